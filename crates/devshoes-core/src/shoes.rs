use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Approval state reported by the certification list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalStatus {
    /// Fully approved with no end date.
    Approved,
    /// Approved for a bounded window (development shoes).
    ApprovedUntil,
    /// Any status string the list introduces later.
    #[serde(other)]
    Other,
}

/// An athletics event category a shoe is approved for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    pub name: String,
    /// Display order assigned by the source list.
    pub order: Option<i64>,
}

/// One shoe from the certification list, normalized from the page payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeRecord {
    /// `productApplicationuuid` from the source row.
    pub application_id: String,
    pub manufacturer_name: String,
    pub product_name: String,
    pub model_number: String,
    pub shoe_type: String,
    pub is_development_shoe: bool,
    pub status: ApprovalStatus,
    /// Raw date strings, kept exactly as published. See
    /// [`parse_certification_date`] for the accepted shapes.
    pub certification_start_date: Option<String>,
    pub certification_end_date: Option<String>,
    pub release_date: Option<String>,
    pub disciplines: Vec<Discipline>,
    /// Document id used to build the product image URL.
    pub image_document_id: Option<String>,
}

impl ShoeRecord {
    /// A development shoe is flagged as such or approved only until a date.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.is_development_shoe || self.status == ApprovalStatus::ApprovedUntil
    }

    #[must_use]
    pub fn certification_start(&self) -> Option<DateTime<Utc>> {
        self.certification_start_date
            .as_deref()
            .and_then(parse_certification_date)
    }

    #[must_use]
    pub fn certification_end(&self) -> Option<DateTime<Utc>> {
        self.certification_end_date
            .as_deref()
            .and_then(parse_certification_date)
    }

    /// Joins `image_base_url` with the record's document id, if it has one.
    #[must_use]
    pub fn image_url(&self, image_base_url: &str) -> Option<String> {
        self.image_document_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{image_base_url}{id}"))
    }

    /// Iterates the record's discipline names in source order.
    pub fn discipline_names(&self) -> impl Iterator<Item = &str> {
        self.disciplines.iter().map(|d| d.name.as_str())
    }
}

/// Parses the date shapes seen in the certification list.
///
/// Accepts RFC 3339 (`2024-06-01T00:00:00Z`), naive timestamps
/// (`2024-06-01T00:00:00`, optionally with fractional seconds or a space
/// separator) and bare dates (`2024-06-01`). Naive values are read as UTC.
/// Returns `None` for empty or unrecognized input.
#[must_use]
pub fn parse_certification_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Short labels for the discipline names that are too long to display.
const DISCIPLINE_SHORT_NAMES: &[(&str, &str)] = &[
    (
        "Road Races (including Track Race Walking Events)",
        "Road Races",
    ),
    (
        "Cross Country (including Mountain and Trail Running)",
        "Cross Country",
    ),
];

/// Returns the display label for a discipline; unknown names pass through.
#[must_use]
pub fn discipline_display_name(name: &str) -> &str {
    DISCIPLINE_SHORT_NAMES
        .iter()
        .find(|(long, _)| *long == name)
        .map_or(name, |&(_, short)| short)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    fn make_record(is_development_shoe: bool, status: ApprovalStatus) -> ShoeRecord {
        ShoeRecord {
            application_id: "a1".to_string(),
            manufacturer_name: "Nike".to_string(),
            product_name: "Prototype X".to_string(),
            model_number: "NX-1".to_string(),
            shoe_type: "Spike".to_string(),
            is_development_shoe,
            status,
            certification_start_date: Some("2024-06-01".to_string()),
            certification_end_date: None,
            release_date: None,
            disciplines: vec![],
            image_document_id: Some("doc-42".to_string()),
        }
    }

    #[test]
    fn development_when_flagged() {
        assert!(make_record(true, ApprovalStatus::Approved).is_development());
    }

    #[test]
    fn development_when_approved_until() {
        assert!(make_record(false, ApprovalStatus::ApprovedUntil).is_development());
    }

    #[test]
    fn not_development_when_plain_approved() {
        assert!(!make_record(false, ApprovalStatus::Approved).is_development());
        assert!(!make_record(false, ApprovalStatus::Other).is_development());
    }

    #[test]
    fn status_deserializes_known_and_unknown_values() {
        let known: ApprovalStatus = serde_json::from_str("\"APPROVED_UNTIL\"").unwrap();
        assert_eq!(known, ApprovalStatus::ApprovedUntil);
        let plain: ApprovalStatus = serde_json::from_str("\"APPROVED\"").unwrap();
        assert_eq!(plain, ApprovalStatus::Approved);
        let other: ApprovalStatus = serde_json::from_str("\"WITHDRAWN\"").unwrap();
        assert_eq!(other, ApprovalStatus::Other);
    }

    #[test]
    fn parses_bare_date_as_utc_midnight() {
        let dt = parse_certification_date("2024-06-01").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 6, 1));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn parses_naive_timestamp() {
        let dt = parse_certification_date("2024-06-01T13:45:00").unwrap();
        assert_eq!(dt.hour(), 13);
        assert_eq!(dt.minute(), 45);
    }

    #[test]
    fn parses_fractional_timestamp() {
        assert!(parse_certification_date("2024-06-01T13:45:00.123").is_some());
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse_certification_date("2024-06-01T02:00:00+02:00").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn rejects_garbage_and_empty() {
        assert_eq!(parse_certification_date(""), None);
        assert_eq!(parse_certification_date("   "), None);
        assert_eq!(parse_certification_date("next spring"), None);
        assert_eq!(parse_certification_date("2024-13-45"), None);
    }

    #[test]
    fn image_url_joins_base_and_id() {
        let record = make_record(true, ApprovalStatus::Approved);
        assert_eq!(
            record.image_url("https://example.org/OpenDocument/").as_deref(),
            Some("https://example.org/OpenDocument/doc-42")
        );
    }

    #[test]
    fn image_url_none_without_id() {
        let mut record = make_record(true, ApprovalStatus::Approved);
        record.image_document_id = Some(String::new());
        assert_eq!(record.image_url("https://example.org/"), None);
        record.image_document_id = None;
        assert_eq!(record.image_url("https://example.org/"), None);
    }

    #[test]
    fn discipline_display_name_shortens_known_names() {
        assert_eq!(
            discipline_display_name("Road Races (including Track Race Walking Events)"),
            "Road Races"
        );
        assert_eq!(
            discipline_display_name("Cross Country (including Mountain and Trail Running)"),
            "Cross Country"
        );
    }

    #[test]
    fn discipline_display_name_passes_unknown_through() {
        assert_eq!(discipline_display_name("Track Events"), "Track Events");
    }
}
