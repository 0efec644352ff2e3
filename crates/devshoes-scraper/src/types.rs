//! Shape of the JSON object embedded in the certification list page.
//!
//! ## Observed shape
//!
//! The object has two keys: `header_excel` (column captions for the site's
//! spreadsheet export, ignored here) and `rows`, one entry per certified
//! product. Row keys are camelCase with two exceptions spelled
//! `...uuid` in lower case (`productApplicationuuid`, `imageDocumentuuid`).
//!
//! ### Dates
//! Each date comes twice: a display variant suffixed `Exp`
//! (`certificationStartDateExp`) and an unsuffixed one. The `Exp` variant is
//! preferred during normalization. Either may be `null` or absent.
//!
//! ### `status`
//! `"APPROVED"` or `"APPROVED_UNTIL"`. Development shoes carry the latter.
//!
//! ### `disciplines`
//! Array of `{ "name": ..., "order": ... }`. `disciplinesFullList` holds the
//! same information keyed by numeric id and is not used.

use devshoes_core::ApprovalStatus;
use serde::Deserialize;

/// Top-level embedded object.
#[derive(Debug, Deserialize)]
pub struct CertCheckPayload {
    pub rows: Vec<CertCheckRow>,
}

/// One product row as published.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertCheckRow {
    #[serde(rename = "productApplicationuuid")]
    pub product_application_uuid: String,

    pub manufacturer_name: String,

    pub product_name: String,

    #[serde(default)]
    pub model_number: Option<String>,

    /// Category string, e.g. `"Spike"` or `"Road"`.
    #[serde(default)]
    pub shoe_type: Option<String>,

    #[serde(default)]
    pub is_development_shoe: Option<bool>,

    pub status: ApprovalStatus,

    #[serde(default)]
    pub certification_start_date_exp: Option<String>,

    #[serde(default)]
    pub certification_start_date: Option<String>,

    #[serde(default)]
    pub certification_end_date_exp: Option<String>,

    #[serde(default)]
    pub certification_end_date: Option<String>,

    #[serde(default)]
    pub release_date_exp: Option<String>,

    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default, rename = "imageDocumentuuid")]
    pub image_document_uuid: Option<String>,

    /// `null` on some rows; treated as no disciplines.
    #[serde(default)]
    pub disciplines: Option<Vec<CertCheckDiscipline>>,
}

#[derive(Debug, Deserialize)]
pub struct CertCheckDiscipline {
    pub name: String,
    #[serde(default)]
    pub order: Option<i64>,
}
