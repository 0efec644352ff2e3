//! Text and JSON rendering for the CLI subcommands.
//!
//! Renderers return the full output as a `String` so they can be tested
//! without capturing stdout.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use devshoes_core::{
    brand_facets, discipline_display_name, discipline_facets, filter_and_sort, group_by_brand,
    newest_shoes, progress_percent, shoe_stats, sort_brands_with_priority, type_facets,
    CatalogConfig, CatalogQuery, CountedItem, ShoeRecord, ShoeStats, StatusInfo,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListEntry<'a> {
    #[serde(flatten)]
    shoe: &'a ShoeRecord,
    status_info: StatusInfo,
    progress_percent: f64,
    image_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct StatsOutput<'a> {
    #[serde(flatten)]
    stats: ShoeStats,
    newest: Vec<&'a ShoeRecord>,
}

#[derive(Debug, Serialize)]
struct FacetsOutput {
    brands: Vec<CountedItem>,
    disciplines: Vec<CountedItem>,
    types: Vec<CountedItem>,
}

fn empty_message(total: usize) -> &'static str {
    if total == 0 {
        "no development shoes available\n"
    } else {
        "no development shoes match the current filters\n"
    }
}

fn write_shoe_line(
    out: &mut String,
    shoe: &ShoeRecord,
    now: DateTime<Utc>,
    catalog: &CatalogConfig,
) -> std::fmt::Result {
    let info = StatusInfo::for_record(shoe, now, &catalog.thresholds);
    writeln!(
        out,
        "{:<9}{:<16}{:<40}{}",
        info.label, shoe.manufacturer_name, shoe.product_name, shoe.model_number
    )
}

/// Renders the filtered, sorted shoe list.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn render_list(
    shoes: &[ShoeRecord],
    query: &CatalogQuery,
    group: bool,
    now: DateTime<Utc>,
    catalog: &CatalogConfig,
    json: bool,
) -> anyhow::Result<String> {
    let visible = filter_and_sort(shoes, query, now, &catalog.thresholds);

    if json {
        let entries: Vec<ListEntry<'_>> = visible
            .iter()
            .map(|&shoe| {
                let status_info = StatusInfo::for_record(shoe, now, &catalog.thresholds);
                ListEntry {
                    shoe,
                    progress_percent: progress_percent(
                        status_info.remaining_days,
                        catalog.progress_window_days,
                    ),
                    status_info,
                    image_url: shoe.image_url(&catalog.image_base_url),
                }
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&entries)? + "\n");
    }

    if visible.is_empty() {
        return Ok(empty_message(shoes.len()).to_string());
    }

    let mut out = String::new();
    if group {
        let groups = group_by_brand(&visible);
        let names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
        for name in sort_brands_with_priority(&names) {
            let Some((_, members)) = groups.iter().find(|(brand, _)| *brand == name) else {
                continue;
            };
            writeln!(out, "{name} ({})", members.len())?;
            for shoe in members {
                out.push_str("  ");
                write_shoe_line(&mut out, shoe, now, catalog)?;
            }
        }
    } else {
        for shoe in &visible {
            write_shoe_line(&mut out, shoe, now, catalog)?;
        }
    }

    let filters = query.active_filter_count();
    if filters > 0 {
        writeln!(
            out,
            "{} of {} shoes ({filters} filter(s) active)",
            visible.len(),
            shoes.len()
        )?;
    }
    Ok(out)
}

/// Renders headline totals and the most recently certified shoes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn render_stats(
    shoes: &[ShoeRecord],
    catalog: &CatalogConfig,
    json: bool,
) -> anyhow::Result<String> {
    let stats = shoe_stats(shoes);
    let newest = newest_shoes(shoes, catalog.newest_count);

    if json {
        let output = StatsOutput { stats, newest };
        return Ok(serde_json::to_string_pretty(&output)? + "\n");
    }

    let mut out = String::new();
    writeln!(out, "total        {}", stats.total)?;
    writeln!(out, "brands       {}", stats.brand_count)?;
    writeln!(out, "disciplines  {}", stats.discipline_count)?;
    if !newest.is_empty() {
        writeln!(out, "\nnewest")?;
        for shoe in newest {
            writeln!(
                out,
                "  {:<12}{} {}",
                shoe.certification_start_date.as_deref().unwrap_or("\u{2014}"),
                shoe.manufacturer_name,
                shoe.product_name
            )?;
        }
    }
    Ok(out)
}

/// Renders facet counts for brands, disciplines and shoe types.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn render_facets(shoes: &[ShoeRecord], json: bool) -> anyhow::Result<String> {
    let output = FacetsOutput {
        brands: brand_facets(shoes),
        disciplines: discipline_facets(shoes),
        types: type_facets(shoes),
    };

    if json {
        return Ok(serde_json::to_string_pretty(&output)? + "\n");
    }

    if shoes.is_empty() {
        return Ok(empty_message(0).to_string());
    }

    let mut out = String::new();
    for (heading, items, short) in [
        ("brands", &output.brands, false),
        ("disciplines", &output.disciplines, true),
        ("types", &output.types, false),
    ] {
        writeln!(out, "{heading}")?;
        for item in items {
            let name = if short {
                discipline_display_name(&item.name)
            } else {
                item.name.as_str()
            };
            writeln!(out, "  {name:<24}{}", item.count)?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
