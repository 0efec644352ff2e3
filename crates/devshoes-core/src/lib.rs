pub mod app_config;
pub mod catalog;
pub mod config;
pub mod shoes;
pub mod status;

pub use app_config::{AppConfig, CatalogConfig, Environment, StatusThresholds};
pub use catalog::{
    active_filter_count, brand_facets, discipline_facets, filter_and_sort, group_by_brand,
    newest_shoes, shoe_stats, sort_brands_with_priority, type_facets, CatalogQuery, CountedItem,
    ShoeStats, SortOption, StatusFilter, PRIORITY_BRANDS,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use shoes::{
    discipline_display_name, parse_certification_date, ApprovalStatus, Discipline, ShoeRecord,
};
pub use status::{progress_percent, remaining_days, StatusInfo, StatusLevel};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("config validation error: {0}")]
    Validation(String),
}
