//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::RegistryConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for environment variable {var}")]
    Env { var: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: TOML file (if any), then environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<RegistryConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => RegistryConfig::default(),
    };

    apply_env_overrides(&mut config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables read through `lookup` onto `config`.
///
/// Recognised: `PORT`, `REQUEST_TIMEOUT_SECS`, `CHECK_INTERVAL_MS`,
/// `CHECK_TIMEOUT_MS`, `LOG_LEVEL`.
pub fn apply_env_overrides<F>(config: &mut RegistryConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    if let Some(port) = parse_var::<u16, _>(&lookup, "PORT")? {
        config.listener.bind_address = with_port(&config.listener.bind_address, port);
    }
    if let Some(secs) = parse_var(&lookup, "REQUEST_TIMEOUT_SECS")? {
        config.timeouts.request_secs = secs;
    }
    if let Some(ms) = parse_var(&lookup, "CHECK_INTERVAL_MS")? {
        config.health_check.interval_ms = ms;
    }
    if let Some(ms) = parse_var(&lookup, "CHECK_TIMEOUT_MS")? {
        config.health_check.timeout_ms = ms;
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    Ok(())
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { var, value }),
    }
}

fn with_port(bind_address: &str, port: u16) -> String {
    match bind_address.rsplit_once(':') {
        Some((host, _)) => format!("{}:{}", host, port),
        None => format!("{}:{}", bind_address, port),
    }
}
