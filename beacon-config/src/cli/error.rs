//! Errors returned by config generation.

use std::path::PathBuf;
use thiserror::Error;

use super::validation::ValidationError;
use crate::constants::SUPPORTED_EXTENSIONS;

/// Why `genconfig` did not produce a file.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Something (file, directory, ...) is already at the target path.
    #[error("output config file already exists: {path}")]
    AlreadyExists {
        /// Target path.
        path: PathBuf,
    },
    /// The target path could not be checked.
    #[error("failed to check whether {path} exists")]
    PathCheck {
        /// Target path.
        path: PathBuf,
        /// Underlying stat failure.
        #[source]
        source: std::io::Error,
    },
    /// The target path's extension has no template.
    #[error(
        "output config file must have one of supported extensions: {}",
        SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedExtension {
        /// Target path.
        path: PathBuf,
    },
    /// Writing the prompt or reading the answer failed, or input was closed.
    #[error("failed to read project name")]
    Prompt(#[source] std::io::Error),
    /// The rendered file could not be written.
    #[error("failed to write {path}")]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying write failure.
        #[source]
        source: std::io::Error,
    },
    /// The written file failed validation and was removed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
