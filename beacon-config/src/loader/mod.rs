//! Settings source: parses JSON, TOML, or YAML config files into a single
//! key/value tree and layers environment overrides on top of the typed
//! [`Settings`].

pub mod error;
pub mod format;

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

pub use error::SettingsError;
pub use format::ConfigFormat;

use crate::models::Settings;

/// A parsed config file, independent of the format it was written in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    root: Map<String, Value>,
}

impl SettingsDocument {
    /// Read and parse the file at `path`, picking the parser from its
    /// extension.
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            SettingsError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;
        let raw =
            fs::read_to_string(path).map_err(|source| SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&raw, format)
    }

    /// Parse `raw` as `format`. An empty document has no keys.
    pub fn parse(
        raw: &str,
        format: ConfigFormat,
    ) -> Result<Self, SettingsError> {
        let value: Value = match format {
            ConfigFormat::Json => {
                serde_json::from_str(raw).map_err(SettingsError::Json)?
            }
            ConfigFormat::Toml => toml::from_str(raw)?,
            ConfigFormat::Yaml => serde_yaml::from_str(raw)?,
        };

        match value {
            Value::Object(root) => Ok(Self { root }),
            // An empty YAML document parses as null.
            Value::Null => Ok(Self::default()),
            other => Err(SettingsError::NotATable {
                found: value_kind(&other),
            }),
        }
    }

    /// Look up a dot-separated key (`"projects"`, `"server.port"`) and
    /// deserialize it. A missing key is `Ok(None)`.
    pub fn get<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, SettingsError> {
        let Some(value) = self.lookup(key) else {
            return Ok(None);
        };
        serde_json::from_value(value.clone()).map(Some).map_err(|source| {
            SettingsError::InvalidKey {
                key: key.to_string(),
                source,
            }
        })
    }

    /// Whether the dot-separated `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Deserialize the whole document into [`Settings`], filling gaps with
    /// defaults.
    pub fn settings(&self) -> Result<Settings, SettingsError> {
        serde_json::from_value(Value::Object(self.root.clone())).map_err(
            |source| SettingsError::InvalidKey {
                key: "<root>".to_string(),
                source,
            },
        )
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.root.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

/// Builds [`Settings`] from defaults, an optional config file, and
/// `BEACON_*` environment variables, in that order of precedence.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    config_path: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Loader bound to the current process environment.
    pub fn new() -> Self {
        Self {
            config_path: None,
            env: std::env::vars().collect(),
        }
    }

    /// Read this file between the defaults and the environment.
    pub fn config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Replace the environment snapshot the loader reads overrides from.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Build the settings.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let mut settings = match &self.config_path {
            Some(path) => {
                debug!(path = %path.display(), "loading settings file");
                SettingsDocument::from_path(path)?.settings()?
            }
            None => Settings::default(),
        };

        let overridden = settings.apply_env_overrides(&self.env)?;
        debug!(overridden, "applied environment overrides");

        Ok(settings)
    }
}
