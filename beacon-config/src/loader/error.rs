//! Errors returned while loading settings.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to read, parse, or type-check settings.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} has an unsupported extension")]
    UnsupportedFormat { path: PathBuf },
    #[error("failed to parse JSON config")]
    Json(#[source] serde_json::Error),
    #[error("failed to parse TOML config")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse YAML config")]
    Yaml(#[from] serde_yaml::Error),
    #[error("config root must be a table, found {found}")]
    NotATable { found: &'static str },
    #[error("invalid value for `{key}`")]
    InvalidKey {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value '{value}' for environment variable {var}")]
    InvalidEnv { var: String, value: String },
}
