//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::OyakiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming the origin host for path mode.
pub const ORIGIN_HOST_ENV: &str = "OYAKI_ORIGIN_HOST";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, apply environment overrides, and validate.
pub fn load_config(path: &Path) -> Result<OyakiConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: OyakiConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build configuration from defaults plus environment overrides.
pub fn load_from_env() -> Result<OyakiConfig, ConfigError> {
    let mut config = OyakiConfig::default();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides through `lookup`.
///
/// An empty `OYAKI_ORIGIN_HOST` is treated as unset.
pub fn apply_env_overrides<F>(config: &mut OyakiConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup(ORIGIN_HOST_ENV).filter(|h| !h.trim().is_empty()) {
        config.origin.host = Some(host.trim().to_string());
    }
}
