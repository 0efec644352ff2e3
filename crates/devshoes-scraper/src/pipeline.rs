//! Page → development shoe list.
//!
//! 1. Find the payload marker.
//! 2. Cut out the embedded JSON object.
//! 3. Decode JS string escapes.
//! 4. Deserialize, normalize, keep development shoes, sort newest first.
//!
//! [`parse_development_shoes`] and [`try_fetch_development_shoes`] report
//! every failure as a [`ScraperError`]. [`fetch_development_shoes`] is the
//! display-facing variant: it logs the failure and returns an empty list.

use devshoes_core::catalog::compare_newest;
use devshoes_core::{CatalogConfig, ShoeRecord};

use crate::client::PageSource;
use crate::error::ScraperError;
use crate::extract::{extract_payload, locate_marker};
use crate::normalize::normalize_row;
use crate::types::CertCheckPayload;
use crate::unescape::unescape_js;

/// Extracts, decodes and parses the embedded payload, returning every row.
///
/// # Errors
///
/// - [`ScraperError::MarkerNotFound`] if `marker` is absent from `html`.
/// - [`ScraperError::UnterminatedPayload`] if the embedded object never closes.
/// - [`ScraperError::Deserialize`] if the decoded text is not JSON or a row
///   lacks a required field.
pub fn parse_payload(html: &str, marker: &str) -> Result<Vec<ShoeRecord>, ScraperError> {
    let start = locate_marker(html, marker).ok_or_else(|| ScraperError::MarkerNotFound {
        marker: marker.to_owned(),
    })?;
    let raw = extract_payload(html, start).ok_or(ScraperError::UnterminatedPayload { start })?;
    let json = unescape_js(raw);

    let payload = serde_json::from_str::<CertCheckPayload>(&json).map_err(|e| {
        ScraperError::Deserialize {
            context: format!("embedded payload ({} bytes)", raw.len()),
            source: e,
        }
    })?;

    Ok(payload.rows.into_iter().map(normalize_row).collect())
}

/// Keeps development shoes and orders them by certification start date,
/// newest first. Records without a usable start date go last; ties keep
/// their input order.
#[must_use]
pub fn select_development_shoes(records: Vec<ShoeRecord>) -> Vec<ShoeRecord> {
    let mut shoes: Vec<ShoeRecord> = records
        .into_iter()
        .filter(ShoeRecord::is_development)
        .collect();
    shoes.sort_by(compare_newest);
    shoes
}

/// Runs the parse stages over an already-fetched page.
///
/// # Errors
///
/// See [`parse_payload`].
pub fn parse_development_shoes(
    html: &str,
    marker: &str,
) -> Result<Vec<ShoeRecord>, ScraperError> {
    let records = parse_payload(html, marker)?;
    let total = records.len();
    let shoes = select_development_shoes(records);
    tracing::debug!(total, development = shoes.len(), "parsed certification list");
    Ok(shoes)
}

/// Fetches the page from `source` and runs the full pipeline.
///
/// # Errors
///
/// Propagates fetch errors from `source` and parse errors from
/// [`parse_development_shoes`].
pub async fn try_fetch_development_shoes<S: PageSource>(
    source: &S,
    config: &CatalogConfig,
) -> Result<Vec<ShoeRecord>, ScraperError> {
    let html = source.fetch_page().await?;
    parse_development_shoes(&html, &config.payload_marker)
}

/// Fetches and parses the development shoe list, returning an empty list on
/// any failure.
///
/// The failure is logged with its [`crate::FailureKind`]; callers that need
/// to tell "nothing matched" from "could not load" should use
/// [`try_fetch_development_shoes`].
pub async fn fetch_development_shoes<S: PageSource>(
    source: &S,
    config: &CatalogConfig,
) -> Vec<ShoeRecord> {
    match try_fetch_development_shoes(source, config).await {
        Ok(shoes) => {
            tracing::info!(count = shoes.len(), "loaded development shoes");
            shoes
        }
        Err(e) => {
            tracing::error!(kind = %e.kind(), error = %e, "could not load development shoes");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
