#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

pub const DEFAULT_DATA_URL: &str = "https://certcheck.worldathletics.org/FullList";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://certcheck.worldathletics.org/OpenDocument/";
pub const DEFAULT_PAYLOAD_MARKER: &str = "litProductsDataRaw = '";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Day boundaries used to bucket a certification end date into a
/// [`crate::StatusLevel`].
///
/// `remaining <= expired_days` is expired, `<= urgent_days` urgent,
/// `<= warning_days` warning, anything above is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusThresholds {
    pub expired_days: i64,
    pub urgent_days: i64,
    pub warning_days: i64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            expired_days: 0,
            urgent_days: 30,
            warning_days: 90,
        }
    }
}

/// Everything the catalog pipeline needs to know about its data source and
/// display rules. Passed explicitly into the scraper entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Page that embeds the product list as a JS string literal.
    pub data_url: String,
    /// Prefix joined with a record's image document id.
    pub image_base_url: String,
    /// Text immediately preceding the embedded JSON object.
    pub payload_marker: String,
    pub thresholds: StatusThresholds,
    /// Number of days that maps to a full progress bar.
    pub progress_window_days: i64,
    /// Size of the "newest" highlight section.
    pub newest_count: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            payload_marker: DEFAULT_PAYLOAD_MARKER.to_string(),
            thresholds: StatusThresholds::default(),
            progress_window_days: 180,
            newest_count: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub catalog: CatalogConfig,
}
