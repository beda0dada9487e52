//! Validation of config files on disk.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{
    loader::{SettingsDocument, SettingsError},
    models::{ProjectList, Structure, StructureError},
};

/// Why a config file failed validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The file could not be read or parsed. The message stays generic; the
    /// cause is available through `source()`.
    #[error("unable to locate config file")]
    Unreadable {
        /// File that was checked.
        path: PathBuf,
        /// Read or parse failure.
        #[source]
        source: SettingsError,
    },
    /// The `projects` key is present but is not a list of projects.
    #[error("invalid projects section in {path}")]
    Projects {
        /// File that was checked.
        path: PathBuf,
        /// Deserialization failure for the `projects` key.
        #[source]
        source: SettingsError,
    },
    /// The project list parsed but breaks a naming or uniqueness rule.
    #[error(transparent)]
    Structure(#[from] StructureError),
}

/// Seam the generator uses to check a freshly written file.
pub trait ConfigValidator {
    /// Check the file at `path`.
    fn validate_file(&self, path: &Path) -> Result<(), ValidationError>;
}

/// Validates by re-reading the file through [`validate_config_file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileValidator;

impl ConfigValidator for FileValidator {
    fn validate_file(&self, path: &Path) -> Result<(), ValidationError> {
        validate_config_file(path).map(|_| ())
    }
}

impl<F> ConfigValidator for F
where
    F: Fn(&Path) -> Result<(), ValidationError>,
{
    fn validate_file(&self, path: &Path) -> Result<(), ValidationError> {
        self(path)
    }
}

/// Parse the config file at `path` and validate its `projects` list.
///
/// Returns the validated structure so callers can report on it.
pub fn validate_config_file(
    path: &Path,
) -> Result<Structure, ValidationError> {
    let document = SettingsDocument::from_path(path).map_err(|source| {
        ValidationError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let projects: ProjectList = document
        .get("projects")
        .map_err(|source| ValidationError::Projects {
            path: path.to_path_buf(),
            source,
        })?
        .unwrap_or_default();

    let structure = Structure::new(projects);
    structure.validate()?;
    debug!(
        path = %path.display(),
        projects = structure.len(),
        "config file validated"
    );
    Ok(structure)
}
