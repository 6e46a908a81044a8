use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_GEOCODER_BASE_URL: &str = "https://apis.map.qq.com/";

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

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing and validation are decoupled from the process environment so they
/// can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let database_url = require("DATABASE_URL")?;
    let session_salt = require("STOREHUB_SESSION_SALT")?;

    let env = parse_environment(&or_default("STOREHUB_ENV", "development"))?;

    let bind_addr: SocketAddr =
        parse_value("STOREHUB_BIND_ADDR", &or_default("STOREHUB_BIND_ADDR", "0.0.0.0:8080"))?;
    let log_level = or_default("STOREHUB_LOG_LEVEL", "info");

    let db_max_connections: u32 = parse_value(
        "STOREHUB_DB_MAX_CONNECTIONS",
        &or_default("STOREHUB_DB_MAX_CONNECTIONS", "10"),
    )?;
    let db_min_connections: u32 = parse_value(
        "STOREHUB_DB_MIN_CONNECTIONS",
        &or_default("STOREHUB_DB_MIN_CONNECTIONS", "1"),
    )?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREHUB_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs: u64 = parse_value(
        "STOREHUB_DB_ACQUIRE_TIMEOUT_SECS",
        &or_default("STOREHUB_DB_ACQUIRE_TIMEOUT_SECS", "10"),
    )?;

    let page_number: i64 =
        parse_value("STOREHUB_PAGE_NUMBER", &or_default("STOREHUB_PAGE_NUMBER", "1"))?;
    let page_size: i64 =
        parse_value("STOREHUB_PAGE_SIZE", &or_default("STOREHUB_PAGE_SIZE", "20"))?;
    let max_page_size: i64 = parse_value(
        "STOREHUB_MAX_PAGE_SIZE",
        &or_default("STOREHUB_MAX_PAGE_SIZE", "100"),
    )?;
    if page_number < 1 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREHUB_PAGE_NUMBER".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if page_size < 1 || page_size > max_page_size {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREHUB_PAGE_SIZE".to_string(),
            reason: format!("must be between 1 and {max_page_size}"),
        });
    }

    let geocoder_key = lookup("STOREHUB_GEOCODER_KEY")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let geocoder_base_url = or_default("STOREHUB_GEOCODER_BASE_URL", DEFAULT_GEOCODER_BASE_URL);
    let geocoder_timeout_secs: u64 = parse_value(
        "STOREHUB_GEOCODER_TIMEOUT_SECS",
        &or_default("STOREHUB_GEOCODER_TIMEOUT_SECS", "10"),
    )?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        session_salt,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        page_number,
        page_size,
        max_page_size,
        geocoder_key,
        geocoder_base_url,
        geocoder_timeout_secs,
    })
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREHUB_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
