use crate::app_config::{AppConfig, ConfigSource, Environment};
use crate::ConfigError;

/// Read the `SOCIALLENS_*` settings, picking up a `.env` file first if one
/// exists.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Same as [`load_app_config`] without touching `.env`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, fallback: &str| -> String {
        lookup(var).unwrap_or_else(|_| fallback.to_string())
    };

    let number = |var: &str, fallback: &str| -> Result<u64, ConfigError> {
        or_default(var, fallback)
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SOCIALLENS_ENV", "development"));

    let config_source = match lookup("SOCIALLENS_CONFIG_URL") {
        Ok(url) if !url.trim().is_empty() => ConfigSource::Url(url.trim().to_string()),
        _ => ConfigSource::File(PathBuf::from(or_default(
            "SOCIALLENS_CONFIG_PATH",
            "./config.json",
        ))),
    };

    let log_level = or_default("SOCIALLENS_LOG_LEVEL", "info");
    let request_timeout_secs = number("SOCIALLENS_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SOCIALLENS_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("SOCIALLENS_USER_AGENT", "sociallens/0.1 (dashboard-client)");
    let search_debounce_ms = number("SOCIALLENS_SEARCH_DEBOUNCE_MS", "300")?;

    Ok(AppConfig {
        env,
        config_source,
        log_level,
        request_timeout_secs,
        user_agent,
        search_debounce_ms,
    })
}

/// Anything other than `production` or `test` is development.
fn parse_environment(value: &str) -> Environment {
    match value.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
