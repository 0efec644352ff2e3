//! Certification-window status derived from a record's end date.
//!
//! Everything here takes "now" explicitly so results are reproducible; the
//! caller decides which clock to read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app_config::StatusThresholds;
use crate::shoes::{parse_certification_date, ShoeRecord};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Display bucket for the time left in a certification window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Expired,
    Urgent,
    Warning,
    Safe,
    Unknown,
}

impl StatusLevel {
    /// Buckets `remaining_days` using `thresholds`; `None` is [`StatusLevel::Unknown`].
    #[must_use]
    pub fn classify(remaining_days: Option<i64>, thresholds: &StatusThresholds) -> Self {
        match remaining_days {
            None => Self::Unknown,
            Some(days) if days <= thresholds.expired_days => Self::Expired,
            Some(days) if days <= thresholds.urgent_days => Self::Urgent,
            Some(days) if days <= thresholds.warning_days => Self::Warning,
            Some(_) => Self::Safe,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Urgent => "urgent",
            Self::Warning => "warning",
            Self::Safe => "safe",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for StatusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whole days from `now` until `end_date`, rounded up.
///
/// Returns `None` when the date is absent or cannot be parsed. A window that
/// ends later today yields `1`; one that ended earlier today yields `0`.
#[must_use]
pub fn remaining_days(end_date: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    let end = parse_certification_date(end_date?)?;
    let diff_ms = (end - now).num_milliseconds();
    let days = diff_ms / MILLIS_PER_DAY;
    // Integer division truncates toward zero, which is already the ceiling
    // for negative differences.
    if diff_ms % MILLIS_PER_DAY > 0 {
        Some(days + 1)
    } else {
        Some(days)
    }
}

/// Share of `window_days` still remaining, as a percentage in `0.0..=100.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_percent(remaining_days: Option<i64>, window_days: i64) -> f64 {
    match remaining_days {
        Some(days) if days > 0 && window_days > 0 => {
            (days as f64 / window_days as f64 * 100.0).min(100.0)
        }
        _ => 0.0,
    }
}

/// Status level plus the labels shown on cards and in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub level: StatusLevel,
    pub remaining_days: Option<i64>,
    /// Compact label, e.g. `D-12`.
    pub label: String,
    /// Sentence-style label for the detail view.
    pub detail_label: String,
}

impl StatusInfo {
    #[must_use]
    pub fn from_end_date(
        end_date: Option<&str>,
        now: DateTime<Utc>,
        thresholds: &StatusThresholds,
    ) -> Self {
        let remaining = remaining_days(end_date, now);
        let level = StatusLevel::classify(remaining, thresholds);

        let (label, detail_label) = match (level, remaining) {
            (StatusLevel::Expired, _) => ("Expired".to_string(), "Approval expired".to_string()),
            (StatusLevel::Unknown, _) | (_, None) => ("TBD".to_string(), "TBD".to_string()),
            (_, Some(days)) => (format!("D-{days}"), format!("{days} days until expiry")),
        };

        Self {
            level,
            remaining_days: remaining,
            label,
            detail_label,
        }
    }

    #[must_use]
    pub fn for_record(
        record: &ShoeRecord,
        now: DateTime<Utc>,
        thresholds: &StatusThresholds,
    ) -> Self {
        Self::from_end_date(record.certification_end_date.as_deref(), now, thresholds)
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
