use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/api";

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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
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

    let api_base_url = parse_base_url(&or_default(
        "GLOBALVIEW_API_BASE_URL",
        DEFAULT_API_BASE_URL,
    ))?;
    let env = parse_environment(&or_default("GLOBALVIEW_ENV", "development"));
    let log_level = or_default("GLOBALVIEW_LOG_LEVEL", "info");
    let api_token = lookup("GLOBALVIEW_API_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let request_timeout_secs = parse_u64("GLOBALVIEW_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("GLOBALVIEW_USER_AGENT", "globalview/0.1 (dashboard)");
    let search_debounce_ms = parse_u64("GLOBALVIEW_SEARCH_DEBOUNCE_MS", "450")?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        api_token,
        request_timeout_secs,
        user_agent,
        search_debounce_ms,
    })
}

/// Validates the base URL scheme and strips trailing slashes so endpoint
/// paths can be appended verbatim.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GLOBALVIEW_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{raw}\""),
        });
    }
    Ok(trimmed.to_string())
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
