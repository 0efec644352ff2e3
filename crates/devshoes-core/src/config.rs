use crate::app_config::{
    AppConfig, CatalogConfig, Environment, StatusThresholds, DEFAULT_DATA_URL,
    DEFAULT_IMAGE_BASE_URL, DEFAULT_PAYLOAD_MARKER, DEFAULT_USER_AGENT,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the thresholds are inconsistent.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the thresholds are inconsistent.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every key has a default, so an empty environment yields the stock
/// certcheck configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("DEVSHOES_ENV", "development"));
    let log_level = or_default("DEVSHOES_LOG_LEVEL", "info");

    let scraper_request_timeout_secs = parse_u64("DEVSHOES_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default("DEVSHOES_USER_AGENT", DEFAULT_USER_AGENT);

    let data_url = or_default("DEVSHOES_DATA_URL", DEFAULT_DATA_URL);
    let image_base_url = or_default("DEVSHOES_IMAGE_BASE_URL", DEFAULT_IMAGE_BASE_URL);
    let payload_marker = or_default("DEVSHOES_PAYLOAD_MARKER", DEFAULT_PAYLOAD_MARKER);
    if payload_marker.is_empty() {
        return Err(ConfigError::Validation(
            "DEVSHOES_PAYLOAD_MARKER must not be empty".to_string(),
        ));
    }

    let urgent_days = parse_i64("DEVSHOES_URGENT_DAYS", "30")?;
    let warning_days = parse_i64("DEVSHOES_WARNING_DAYS", "90")?;
    if urgent_days < 0 {
        return Err(ConfigError::Validation(format!(
            "DEVSHOES_URGENT_DAYS ({urgent_days}) must not be negative"
        )));
    }
    if urgent_days > warning_days {
        return Err(ConfigError::Validation(format!(
            "DEVSHOES_URGENT_DAYS ({urgent_days}) must not exceed DEVSHOES_WARNING_DAYS ({warning_days})"
        )));
    }

    let progress_window_days = parse_i64("DEVSHOES_PROGRESS_WINDOW_DAYS", "180")?;
    if progress_window_days <= 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DEVSHOES_PROGRESS_WINDOW_DAYS".to_string(),
            reason: format!("must be positive, got {progress_window_days}"),
        });
    }
    let newest_count = parse_usize("DEVSHOES_NEWEST_COUNT", "3")?;

    Ok(AppConfig {
        env,
        log_level,
        scraper_request_timeout_secs,
        scraper_user_agent,
        catalog: CatalogConfig {
            data_url,
            image_base_url,
            payload_marker,
            thresholds: StatusThresholds {
                expired_days: 0,
                urgent_days,
                warning_days,
            },
            progress_window_days,
            newest_count,
        },
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
