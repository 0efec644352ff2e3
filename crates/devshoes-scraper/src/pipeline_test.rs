use std::future::Future;

use devshoes_core::ApprovalStatus;
use serde_json::json;

use super::*;
use crate::error::FailureKind;

const MARKER: &str = "litProductsDataRaw = '";

/// Writes `value` as JSON inside a JS single-quoted string, the way the
/// certification page does.
fn embed(value: &serde_json::Value) -> String {
    let json = serde_json::to_string(value).unwrap();
    let escaped = json.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "<!DOCTYPE html><html><body><script>\nvar {MARKER}{escaped}';\nrender(litProductsDataRaw);\n</script></body></html>"
    )
}

fn row(id: &str, dev: bool, status: &str, start: Option<&str>) -> serde_json::Value {
    json!({
        "productApplicationuuid": id,
        "manufacturerName": "Nike",
        "productName": format!("Shoe {id}"),
        "modelNumber": format!("M-{id}"),
        "shoeType": "Spike",
        "isDevelopmentShoe": dev,
        "status": status,
        "certificationStartDateExp": start,
        "disciplines": [{ "name": "Track Events", "order": 1 }]
    })
}

fn page(rows: Vec<serde_json::Value>) -> String {
    embed(&json!({ "header_excel": ["Manufacturer", "Product"], "rows": rows }))
}

fn ids(shoes: &[ShoeRecord]) -> Vec<&str> {
    shoes.iter().map(|s| s.application_id.as_str()).collect()
}

struct StaticPage(String);

impl PageSource for StaticPage {
    fn fetch_page(&self) -> impl Future<Output = Result<String, ScraperError>> + Send {
        let html = self.0.clone();
        async move { Ok(html) }
    }
}

struct Unreachable;

impl PageSource for Unreachable {
    fn fetch_page(&self) -> impl Future<Output = Result<String, ScraperError>> + Send {
        async {
            Err(ScraperError::UnexpectedStatus {
                status: 503,
                url: "https://certcheck.example/FullList".to_string(),
            })
        }
    }
}

// -----------------------------------------------------------------------
// filtering
// -----------------------------------------------------------------------

#[test]
fn keeps_flagged_or_approved_until_rows_only() {
    let html = page(vec![
        row("flagged", true, "APPROVED", Some("2024-01-01")),
        row("until", false, "APPROVED_UNTIL", Some("2024-01-02")),
        row("both", true, "APPROVED_UNTIL", Some("2024-01-03")),
        row("plain", false, "APPROVED", Some("2024-01-04")),
        row("other", false, "SUSPENDED", Some("2024-01-05")),
    ]);
    let shoes = parse_development_shoes(&html, MARKER).unwrap();
    assert_eq!(ids(&shoes), vec!["both", "until", "flagged"]);
    assert!(shoes.iter().all(ShoeRecord::is_development));
}

#[test]
fn missing_development_flag_counts_as_false() {
    let mut value = row("noflag", false, "APPROVED", None);
    value.as_object_mut().unwrap().remove("isDevelopmentShoe");
    let shoes = parse_development_shoes(&page(vec![value]), MARKER).unwrap();
    assert!(shoes.is_empty());
}

// -----------------------------------------------------------------------
// sorting
// -----------------------------------------------------------------------

#[test]
fn sorts_newest_first_with_missing_dates_last() {
    let html = page(vec![
        row("jan", true, "APPROVED_UNTIL", Some("2024-01-01")),
        row("none", true, "APPROVED_UNTIL", None),
        row("jun", true, "APPROVED_UNTIL", Some("2024-06-01")),
        row("dec", true, "APPROVED_UNTIL", Some("2023-12-01")),
    ]);
    let shoes = parse_development_shoes(&html, MARKER).unwrap();
    assert_eq!(ids(&shoes), vec!["jun", "jan", "dec", "none"]);
}

#[test]
fn equal_start_dates_keep_page_order() {
    let html = page(vec![
        row("a", true, "APPROVED_UNTIL", Some("2024-05-05")),
        row("b", true, "APPROVED_UNTIL", Some("2024-05-05")),
        row("c", true, "APPROVED_UNTIL", Some("2024-05-05")),
    ]);
    let shoes = parse_development_shoes(&html, MARKER).unwrap();
    assert_eq!(ids(&shoes), vec!["a", "b", "c"]);
}

// -----------------------------------------------------------------------
// decoding through the whole pipeline
// -----------------------------------------------------------------------

#[test]
fn decodes_escaped_text_in_fields() {
    let mut value = row("esc", true, "APPROVED_UNTIL", None);
    value["productName"] = json!("Runner's \"Proto\" {v2} \\ café");
    let shoes = parse_development_shoes(&page(vec![value]), MARKER).unwrap();
    assert_eq!(shoes[0].product_name, "Runner's \"Proto\" {v2} \\ café");
}

#[test]
fn decodes_unicode_escapes_written_by_the_page() {
    let html = format!(
        "{MARKER}{{\"rows\":[{{\"productApplicationuuid\":\"u1\",\"manufacturerName\":\"Asics\",\"productName\":\"Metaspeed \\u2013 Tokyo\",\"status\":\"APPROVED_UNTIL\"}}]}}';"
    );
    let shoes = parse_development_shoes(&html, MARKER).unwrap();
    assert_eq!(shoes[0].product_name, "Metaspeed \u{2013} Tokyo");
}

#[test]
fn empty_rows_yield_empty_list() {
    let shoes = parse_development_shoes(&page(vec![]), MARKER).unwrap();
    assert!(shoes.is_empty());
}

// -----------------------------------------------------------------------
// failures
// -----------------------------------------------------------------------

#[test]
fn missing_marker_is_reported() {
    let err = parse_development_shoes("<html><body>maintenance</body></html>", MARKER).unwrap_err();
    assert!(
        matches!(err, ScraperError::MarkerNotFound { .. }),
        "expected MarkerNotFound, got: {err:?}"
    );
    assert_eq!(err.kind(), FailureKind::MarkerNotFound);
}

#[test]
fn balanced_but_invalid_json_is_malformed() {
    let html = format!("{MARKER}{{rows: [oops,]}}';");
    let err = parse_development_shoes(&html, MARKER).unwrap_err();
    assert!(
        matches!(err, ScraperError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
    assert_eq!(err.kind(), FailureKind::MalformedPayload);
}

#[test]
fn unterminated_payload_is_malformed() {
    let html = format!("{MARKER}{{\"rows\":[");
    let err = parse_development_shoes(&html, MARKER).unwrap_err();
    assert!(matches!(err, ScraperError::UnterminatedPayload { .. }));
    assert_eq!(err.kind(), FailureKind::MalformedPayload);
}

#[test]
fn row_missing_required_field_is_malformed() {
    let mut value = row("bad", true, "APPROVED_UNTIL", None);
    value.as_object_mut().unwrap().remove("productName");
    let err = parse_development_shoes(&page(vec![value]), MARKER).unwrap_err();
    assert_eq!(err.kind(), FailureKind::MalformedPayload);
}

#[test]
fn payload_without_rows_is_malformed() {
    let err = parse_development_shoes(&embed(&json!({ "header_excel": [] })), MARKER).unwrap_err();
    assert_eq!(err.kind(), FailureKind::MalformedPayload);
}

// -----------------------------------------------------------------------
// fetch entry points
// -----------------------------------------------------------------------

#[tokio::test]
async fn fetch_returns_sorted_development_shoes() {
    let source = StaticPage(page(vec![
        row("old", true, "APPROVED_UNTIL", Some("2023-01-01")),
        row("skip", false, "APPROVED", Some("2025-01-01")),
        row("new", false, "APPROVED_UNTIL", Some("2024-01-01")),
    ]));
    let shoes = fetch_development_shoes(&source, &CatalogConfig::default()).await;
    assert_eq!(ids(&shoes), vec!["new", "old"]);
    assert_eq!(shoes[0].status, ApprovalStatus::ApprovedUntil);
}

#[tokio::test]
async fn fetch_fails_open_on_missing_marker() {
    let source = StaticPage("<html>redesigned page</html>".to_string());
    let shoes = fetch_development_shoes(&source, &CatalogConfig::default()).await;
    assert!(shoes.is_empty());
}

#[tokio::test]
async fn fetch_fails_open_on_malformed_json() {
    let source = StaticPage(format!("{MARKER}{{\"rows\": [}}]}}';"));
    let shoes = fetch_development_shoes(&source, &CatalogConfig::default()).await;
    assert!(shoes.is_empty());
}

#[tokio::test]
async fn fetch_fails_open_on_network_failure() {
    let shoes = fetch_development_shoes(&Unreachable, &CatalogConfig::default()).await;
    assert!(shoes.is_empty());
}

#[tokio::test]
async fn try_fetch_surfaces_network_failure() {
    let err = try_fetch_development_shoes(&Unreachable, &CatalogConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::NetworkFailure);
}

#[tokio::test]
async fn try_fetch_uses_configured_marker() {
    let html = page(vec![row("x", true, "APPROVED_UNTIL", None)]).replace(MARKER, "shoes = '");
    let config = CatalogConfig {
        payload_marker: "shoes = '".to_string(),
        ..CatalogConfig::default()
    };
    let shoes = try_fetch_development_shoes(&StaticPage(html), &config)
        .await
        .unwrap();
    assert_eq!(ids(&shoes), vec!["x"]);
}
