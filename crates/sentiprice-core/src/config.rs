use crate::app_config::AppConfig;
use crate::ConfigError;

/// Smallest accepted per-ticker throttle. The quote host blocks clients that
/// poll faster than this.
pub const MIN_THROTTLE_SECS: u64 = 20;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let tickers_path = PathBuf::from(or_default("SENTIPRICE_TICKERS_PATH", "./finviz.csv"));
    let output_dir = PathBuf::from(or_default("SENTIPRICE_OUTPUT_DIR", "."));
    let log_level = or_default("SENTIPRICE_LOG_LEVEL", "info");

    let timezone_raw = or_default("SENTIPRICE_TIMEZONE", "America/New_York");
    let timezone = timezone_raw
        .parse::<chrono_tz::Tz>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "SENTIPRICE_TIMEZONE".to_string(),
            reason: e.to_string(),
        })?;

    let throttle_secs = parse_u64("SENTIPRICE_THROTTLE_SECS", "20")?;
    if throttle_secs < MIN_THROTTLE_SECS {
        return Err(ConfigError::InvalidEnvVar {
            var: "SENTIPRICE_THROTTLE_SECS".to_string(),
            reason: format!("must be at least {MIN_THROTTLE_SECS} seconds, got {throttle_secs}"),
        });
    }

    let request_timeout_secs = parse_u64("SENTIPRICE_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SENTIPRICE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("SENTIPRICE_USER_AGENT", "Mozilla/5.0");
    let finviz_base_url = or_default("SENTIPRICE_FINVIZ_BASE_URL", "https://finviz.com");
    let yahoo_base_url = or_default(
        "SENTIPRICE_YAHOO_BASE_URL",
        "https://query1.finance.yahoo.com",
    );

    Ok(AppConfig {
        tickers_path,
        output_dir,
        log_level,
        timezone,
        throttle_secs,
        request_timeout_secs,
        user_agent,
        finviz_base_url,
        yahoo_base_url,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
