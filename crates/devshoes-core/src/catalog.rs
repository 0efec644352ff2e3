//! Catalog browsing over an already-fetched list of shoes: faceted filters,
//! search, sort orders, facet counts, grouping and summary stats.
//!
//! All functions borrow the input list and never mutate it.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app_config::StatusThresholds;
use crate::shoes::ShoeRecord;
use crate::status::remaining_days;

/// Brands listed ahead of everything else, in this order.
pub const PRIORITY_BRANDS: [&str; 4] = ["Nike", "Adidas", "Puma", "Asics"];

/// Which part of the certification window to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    /// No end date, or more than `urgent_days` left.
    Valid,
    /// Between one and `urgent_days` days left.
    Expiring,
    /// End date reached.
    Expired,
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "valid" => Ok(Self::Valid),
            "expiring" => Ok(Self::Expiring),
            "expired" => Ok(Self::Expired),
            other => Err(format!(
                "unknown status filter '{other}' (expected all, valid, expiring or expired)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Certification start date, newest first.
    #[default]
    Newest,
    /// Certification end date, soonest first.
    Expiring,
    /// Product name, case-insensitive.
    Alphabetical,
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "expiring" => Ok(Self::Expiring),
            "alphabetical" => Ok(Self::Alphabetical),
            other => Err(format!(
                "unknown sort option '{other}' (expected newest, expiring or alphabetical)"
            )),
        }
    }
}

/// Filter and sort selections applied to the catalog.
///
/// Empty facet sets match everything. A record must match every non-empty
/// facet; within one facet any selected value matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub brands: BTreeSet<String>,
    pub disciplines: BTreeSet<String>,
    pub shoe_types: BTreeSet<String>,
    pub status: StatusFilter,
    /// Case-insensitive substring over product name, manufacturer and model number.
    pub search: String,
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn toggle_brand(&mut self, brand: &str) {
        toggle(&mut self.brands, brand);
    }

    pub fn toggle_discipline(&mut self, discipline: &str) {
        toggle(&mut self.disciplines, discipline);
    }

    pub fn toggle_type(&mut self, shoe_type: &str) {
        toggle(&mut self.shoe_types, shoe_type);
    }

    /// Resets facets and the status filter. Search text and sort order stay.
    pub fn clear_filters(&mut self) {
        self.brands.clear();
        self.disciplines.clear();
        self.shoe_types.clear();
        self.status = StatusFilter::All;
    }

    /// Number of filter groups currently narrowing the list.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        active_filter_count(self)
    }

    #[must_use]
    pub fn matches(
        &self,
        record: &ShoeRecord,
        now: DateTime<Utc>,
        thresholds: &StatusThresholds,
    ) -> bool {
        let matches_brand =
            self.brands.is_empty() || self.brands.contains(&record.manufacturer_name);
        let matches_discipline = self.disciplines.is_empty()
            || record
                .discipline_names()
                .any(|name| self.disciplines.contains(name));
        let matches_type = self.shoe_types.is_empty() || self.shoe_types.contains(&record.shoe_type);

        matches_brand
            && matches_discipline
            && matches_type
            && self.matches_status(record, now, thresholds)
            && self.matches_search(record)
    }

    fn matches_status(
        &self,
        record: &ShoeRecord,
        now: DateTime<Utc>,
        thresholds: &StatusThresholds,
    ) -> bool {
        if self.status == StatusFilter::All {
            return true;
        }
        let remaining = remaining_days(record.certification_end_date.as_deref(), now);
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Expired => remaining.is_some_and(|d| d <= thresholds.expired_days),
            StatusFilter::Expiring => remaining
                .is_some_and(|d| d > thresholds.expired_days && d <= thresholds.urgent_days),
            StatusFilter::Valid => remaining.is_none_or(|d| d > thresholds.urgent_days),
        }
    }

    fn matches_search(&self, record: &ShoeRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [
            &record.product_name,
            &record.manufacturer_name,
            &record.model_number,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Number of filter groups in `query` that narrow the list (search excluded).
#[must_use]
pub fn active_filter_count(query: &CatalogQuery) -> usize {
    [
        !query.brands.is_empty(),
        !query.disciplines.is_empty(),
        !query.shoe_types.is_empty(),
        query.status != StatusFilter::All,
    ]
    .into_iter()
    .filter(|active| *active)
    .count()
}

/// Milliseconds since the epoch for the certification start; missing or
/// unparseable dates count as the epoch itself.
fn start_key(record: &ShoeRecord) -> i64 {
    record
        .certification_start()
        .map_or(0, |dt| dt.timestamp_millis())
}

/// Newest-first ordering by certification start date.
#[must_use]
pub fn compare_newest(a: &ShoeRecord, b: &ShoeRecord) -> Ordering {
    start_key(b).cmp(&start_key(a))
}

/// Soonest-ending first; records without an end date go last.
#[must_use]
pub fn compare_expiring(a: &ShoeRecord, b: &ShoeRecord) -> Ordering {
    let key = |r: &ShoeRecord| {
        r.certification_end()
            .map_or(i64::MAX, |dt| dt.timestamp_millis())
    };
    key(a).cmp(&key(b))
}

#[must_use]
pub fn compare_alphabetical(a: &ShoeRecord, b: &ShoeRecord) -> Ordering {
    a.product_name
        .to_lowercase()
        .cmp(&b.product_name.to_lowercase())
        .then_with(|| a.product_name.cmp(&b.product_name))
}

/// Applies `query` to `shoes` and returns the matches in the requested order.
///
/// Sorting is stable: records that compare equal keep their input order.
#[must_use]
pub fn filter_and_sort<'a>(
    shoes: &'a [ShoeRecord],
    query: &CatalogQuery,
    now: DateTime<Utc>,
    thresholds: &StatusThresholds,
) -> Vec<&'a ShoeRecord> {
    let mut result: Vec<&ShoeRecord> = shoes
        .iter()
        .filter(|record| query.matches(record, now, thresholds))
        .collect();

    match query.sort {
        SortOption::Newest => result.sort_by(|a, b| compare_newest(a, b)),
        SortOption::Expiring => result.sort_by(|a, b| compare_expiring(a, b)),
        SortOption::Alphabetical => result.sort_by(|a, b| compare_alphabetical(a, b)),
    }

    result
}

/// The `count` most recently certified shoes.
#[must_use]
pub fn newest_shoes(shoes: &[ShoeRecord], count: usize) -> Vec<&ShoeRecord> {
    let mut sorted: Vec<&ShoeRecord> = shoes.iter().collect();
    sorted.sort_by(|a, b| compare_newest(a, b));
    sorted.truncate(count);
    sorted
}

/// A facet value and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountedItem {
    pub name: String,
    pub count: usize,
}

/// Counts occurrences, keeping names in first-seen order.
fn count_first_seen<'a>(names: impl Iterator<Item = &'a str>) -> Vec<CountedItem> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut items: Vec<CountedItem> = Vec::new();
    for name in names {
        if let Some(&i) = index.get(name) {
            items[i].count += 1;
        } else {
            index.insert(name, items.len());
            items.push(CountedItem {
                name: name.to_string(),
                count: 1,
            });
        }
    }
    items
}

fn priority_index(brand: &str) -> Option<usize> {
    PRIORITY_BRANDS.iter().position(|p| *p == brand)
}

/// Manufacturer counts: priority brands first in [`PRIORITY_BRANDS`] order,
/// then the rest by descending count.
#[must_use]
pub fn brand_facets(shoes: &[ShoeRecord]) -> Vec<CountedItem> {
    let mut items = count_first_seen(shoes.iter().map(|s| s.manufacturer_name.as_str()));
    items.sort_by_key(|item| {
        (
            priority_index(&item.name).unwrap_or(usize::MAX),
            Reverse(item.count),
        )
    });
    items
}

/// Discipline counts, most common first.
#[must_use]
pub fn discipline_facets(shoes: &[ShoeRecord]) -> Vec<CountedItem> {
    let mut items = count_first_seen(shoes.iter().flat_map(ShoeRecord::discipline_names));
    items.sort_by_key(|item| Reverse(item.count));
    items
}

/// Shoe type counts, most common first.
#[must_use]
pub fn type_facets(shoes: &[ShoeRecord]) -> Vec<CountedItem> {
    let mut items = count_first_seen(shoes.iter().map(|s| s.shoe_type.as_str()));
    items.sort_by_key(|item| Reverse(item.count));
    items
}

/// Groups records by manufacturer, brands in first-seen order.
#[must_use]
pub fn group_by_brand<'a>(shoes: &[&'a ShoeRecord]) -> Vec<(&'a str, Vec<&'a ShoeRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Vec<&'a ShoeRecord>)> = Vec::new();
    for &shoe in shoes {
        let brand = shoe.manufacturer_name.as_str();
        if let Some(&i) = index.get(brand) {
            groups[i].1.push(shoe);
        } else {
            index.insert(brand, groups.len());
            groups.push((brand, vec![shoe]));
        }
    }
    groups
}

/// Priority brands first in [`PRIORITY_BRANDS`] order, the rest alphabetically.
#[must_use]
pub fn sort_brands_with_priority<S: AsRef<str>>(brands: &[S]) -> Vec<String> {
    let mut sorted: Vec<&str> = brands.iter().map(AsRef::as_ref).collect();
    sorted.sort_by(|a, b| match (priority_index(a), priority_index(b)) {
        (Some(ia), Some(ib)) => ia.cmp(&ib),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
    });
    sorted.into_iter().map(str::to_string).collect()
}

/// Headline numbers for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShoeStats {
    pub total: usize,
    /// Distinct manufacturer names.
    pub brand_count: usize,
    /// Distinct discipline names across all records.
    pub discipline_count: usize,
}

#[must_use]
pub fn shoe_stats(shoes: &[ShoeRecord]) -> ShoeStats {
    let brands: HashSet<&str> = shoes.iter().map(|s| s.manufacturer_name.as_str()).collect();
    let disciplines: HashSet<&str> = shoes.iter().flat_map(ShoeRecord::discipline_names).collect();
    ShoeStats {
        total: shoes.len(),
        brand_count: brands.len(),
        discipline_count: disciplines.len(),
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
