//! Normalization from published rows to [`devshoes_core::ShoeRecord`].

use devshoes_core::{Discipline, ShoeRecord};

use crate::types::{CertCheckDiscipline, CertCheckRow};

/// Treats empty or whitespace-only strings as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// The `Exp` display variant wins when both date fields are present.
fn prefer_display_date(display: Option<String>, plain: Option<String>) -> Option<String> {
    non_empty(display).or_else(|| non_empty(plain))
}

fn normalize_discipline(discipline: CertCheckDiscipline) -> Discipline {
    Discipline {
        name: discipline.name,
        order: discipline.order,
    }
}

/// Converts a published row into a [`ShoeRecord`].
///
/// Dates are carried over verbatim; a start date later than the end date is
/// not corrected.
#[must_use]
pub fn normalize_row(row: CertCheckRow) -> ShoeRecord {
    ShoeRecord {
        application_id: row.product_application_uuid,
        manufacturer_name: row.manufacturer_name,
        product_name: row.product_name,
        model_number: row.model_number.unwrap_or_default(),
        shoe_type: row.shoe_type.unwrap_or_default(),
        is_development_shoe: row.is_development_shoe.unwrap_or(false),
        status: row.status,
        certification_start_date: prefer_display_date(
            row.certification_start_date_exp,
            row.certification_start_date,
        ),
        certification_end_date: prefer_display_date(
            row.certification_end_date_exp,
            row.certification_end_date,
        ),
        release_date: prefer_display_date(row.release_date_exp, row.release_date),
        disciplines: row
            .disciplines
            .unwrap_or_default()
            .into_iter()
            .map(normalize_discipline)
            .collect(),
        image_document_id: non_empty(row.image_document_uuid),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
