use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_USER_AGENT: &str = "mailsift/0.1 (+email-scan)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; this only fails on values that do not parse.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("MAILSIFT_ENV", "development"))?;
    let bind_addr = parse_addr("MAILSIFT_BIND_ADDR", "0.0.0.0:20002")?;
    let log_level = or_default("MAILSIFT_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("MAILSIFT_OUTPUT_DIR", "./output"));

    let fetch_timeout_secs = parse_u64(
        "MAILSIFT_FETCH_TIMEOUT_SECS",
        &DEFAULT_FETCH_TIMEOUT_SECS.to_string(),
    )?;
    if fetch_timeout_secs == 0 {
        return Err(invalid(
            "MAILSIFT_FETCH_TIMEOUT_SECS",
            "timeout must be at least 1 second".to_string(),
        ));
    }

    let user_agent = or_default("MAILSIFT_USER_AGENT", DEFAULT_USER_AGENT);
    let accept_invalid_certs = parse_bool(
        "MAILSIFT_ACCEPT_INVALID_CERTS",
        &or_default("MAILSIFT_ACCEPT_INVALID_CERTS", "false"),
    )?;
    let max_concurrent_fetches = parse_usize("MAILSIFT_MAX_CONCURRENT_FETCHES", "1")?.max(1);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        output_dir,
        fetch_timeout_secs,
        user_agent,
        accept_invalid_certs,
        max_concurrent_fetches,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MAILSIFT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected a boolean, got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
