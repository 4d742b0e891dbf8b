use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://maps.googleapis.com/";
pub const DEFAULT_CENSUS_BASE_URL: &str = "https://api.census.gov/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// The optional rules override path, without loading (or requiring) the rest
/// of the configuration. Loads `.env` first, like [`load_app_config`].
#[must_use]
pub fn load_rules_path() -> Option<std::path::PathBuf> {
    dotenvy::dotenv().ok();
    rules_path_from(&|key: &str| std::env::var(key))
}

fn rules_path_from<F>(lookup: &F) -> Option<std::path::PathBuf>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("BTMSITE_RULES_PATH")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(std::path::PathBuf::from)
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

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

    let google_api_key = require("GOOGLE_MAPS_API_KEY")?;
    let census_api_key = optional("CENSUS_API_KEY");

    let log_level = or_default("BTMSITE_LOG_LEVEL", "info");
    let min_population_density = parse_u64("BTMSITE_MIN_POP_DENSITY", "1000")?;

    let request_timeout_secs = parse_u64("BTMSITE_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BTMSITE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let user_agent = or_default("BTMSITE_USER_AGENT", "btmsite/0.1 (site-qualification)");
    let rules_path = rules_path_from(&lookup);
    let google_base_url = or_default("BTMSITE_GOOGLE_BASE_URL", DEFAULT_GOOGLE_BASE_URL);
    let census_base_url = or_default("BTMSITE_CENSUS_BASE_URL", DEFAULT_CENSUS_BASE_URL);
    let export_dir = PathBuf::from(or_default("BTMSITE_EXPORT_DIR", "."));

    Ok(AppConfig {
        google_api_key,
        census_api_key,
        log_level,
        min_population_density,
        request_timeout_secs,
        user_agent,
        rules_path,
        google_base_url,
        census_base_url,
        export_dir,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
