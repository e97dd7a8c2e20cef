use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Every setting has a default, so an empty environment yields a usable
/// development config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_nonzero_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            }),
            Ok(value) => Ok(value),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let env = parse_environment(&or_default("BUSCACAR_ENV", "development"))?;

    let bind_addr = parse_addr("BUSCACAR_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BUSCACAR_LOG_LEVEL", "info");
    let feed_path = PathBuf::from(or_default("BUSCACAR_FEED_PATH", "./data/catalog.csv"));
    let brands_path = PathBuf::from(or_default("BUSCACAR_BRANDS_PATH", "./data/brands.json"));
    let page_size = parse_nonzero_usize("BUSCACAR_PAGE_SIZE", "24")?;

    let fipe_base_url = or_default(
        "BUSCACAR_FIPE_BASE_URL",
        "https://parallelum.com.br/fipe/api/v1",
    );
    let fipe_timeout_secs = parse_u64("BUSCACAR_FIPE_TIMEOUT_SECS", "30")?;
    let fipe_cache_ttl_secs = parse_u64("BUSCACAR_FIPE_CACHE_TTL_SECS", "3600")?;
    let fipe_brand_limit = parse_nonzero_usize("BUSCACAR_FIPE_BRAND_LIMIT", "20")?;
    let fipe_max_retries = parse_u32("BUSCACAR_FIPE_MAX_RETRIES", "3")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        feed_path,
        brands_path,
        page_size,
        fipe_base_url,
        fipe_timeout_secs,
        fipe_cache_ttl_secs,
        fipe_brand_limit,
        fipe_max_retries,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BUSCACAR_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
