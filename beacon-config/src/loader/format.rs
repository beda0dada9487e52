//! Config file formats.

use std::{fmt, path::Path};

use crate::util::file_extension;

/// Serialization format of a config file, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
    /// Covers both `.yaml` and `.yml`.
    Yaml,
}

impl ConfigFormat {
    /// Map an extension (without the dot) to a format. Matching is
    /// case-sensitive: `JSON` is not a supported extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Format of the file at `path`, by extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        file_extension(path).and_then(Self::from_extension)
    }

    /// Canonical extension for the format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
