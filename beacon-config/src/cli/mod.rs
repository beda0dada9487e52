//! CLI-facing config helpers shared by `beacon-init` and the node binary.
//!
//! [`ConfigGenerator`] scaffolds a starter config file interactively and
//! checks it before reporting success; [`validate_config_file`] runs the same
//! check against an existing file.

pub mod error;
pub mod templates;
pub mod validation;

use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use tracing::{info, warn};
use uuid::Uuid;

pub use error::GenerateError;
pub use templates::TemplateContext;
pub use validation::{
    ConfigValidator, FileValidator, ValidationError, validate_config_file,
};

use crate::{constants::PROJECT_NAME_PROMPT, loader::ConfigFormat, util};

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a successful generation produced.
pub struct ConfigFileRequest {
    /// Path the file was written to.
    pub path: PathBuf,
    /// Format chosen from the path's extension.
    pub format: ConfigFormat,
    /// Project name as entered, with surrounding spaces removed.
    pub project_name: String,
    /// Canonical UUID v4 string used as the project secret.
    pub secret: String,
}

/// Interactive starter config writer.
///
/// Reads the project name from `input`, writes the prompt to `output`, and
/// checks the written file with `validator`. A file that fails validation is
/// removed before the error is returned.
#[derive(Debug)]
pub struct ConfigGenerator<R, W, V = FileValidator> {
    input: R,
    output: W,
    validator: V,
}

impl ConfigGenerator<io::StdinLock<'static>, io::Stdout> {
    /// Generator bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R, W> ConfigGenerator<R, W> {
    /// Generator that checks its output with [`FileValidator`].
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            validator: FileValidator,
        }
    }
}

impl<R, W, V> ConfigGenerator<R, W, V> {
    /// Swap the post-write validator.
    pub fn with_validator<U>(self, validator: U) -> ConfigGenerator<R, W, U>
    where
        U: ConfigValidator,
    {
        ConfigGenerator {
            input: self.input,
            output: self.output,
            validator,
        }
    }
}

impl<R, W, V> ConfigGenerator<R, W, V>
where
    R: BufRead,
    W: Write,
    V: ConfigValidator,
{
    /// Create a starter config at `path`.
    ///
    /// Checks run in a fixed order: the path must not exist, then its
    /// extension must be supported. Only after both pass is a secret
    /// generated and the project name read.
    pub fn generate(
        &mut self,
        path: &Path,
    ) -> Result<ConfigFileRequest, GenerateError> {
        match util::path_exists(path) {
            Ok(false) => {}
            Ok(true) => {
                return Err(GenerateError::AlreadyExists {
                    path: path.to_path_buf(),
                });
            }
            Err(source) => {
                return Err(GenerateError::PathCheck {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            GenerateError::UnsupportedExtension {
                path: path.to_path_buf(),
            }
        })?;

        let secret = Uuid::new_v4().to_string();

        let project_name =
            self.prompt_project_name().map_err(GenerateError::Prompt)?;

        let rendered = templates::render(
            format,
            &TemplateContext {
                name: &project_name,
                secret: &secret,
            },
        );

        write_config_file(path, rendered.as_bytes()).map_err(|source| {
            GenerateError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if let Err(err) = self.validator.validate_file(path) {
            warn!(
                path = %path.display(),
                error = %err,
                "generated config failed validation; removing it"
            );
            if let Err(remove_err) = fs::remove_file(path) {
                warn!(
                    path = %path.display(),
                    error = %remove_err,
                    "failed to remove invalid config file"
                );
            }
            return Err(err.into());
        }

        info!(path = %path.display(), %format, "generated config file");

        Ok(ConfigFileRequest {
            path: path.to_path_buf(),
            format,
            project_name,
            secret,
        })
    }

    fn prompt_project_name(&mut self) -> io::Result<String> {
        self.output.write_all(PROJECT_NAME_PROMPT.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a project name was entered",
            ));
        }

        let line = line.trim_end_matches(['\n', '\r']);
        Ok(line.trim_matches(' ').to_string())
    }
}

/// Generate a config at `path`, prompting on stdin/stdout.
pub fn generate_config(
    path: &Path,
) -> Result<ConfigFileRequest, GenerateError> {
    ConfigGenerator::stdio().generate(path)
}

// Plain create/truncate; no temp file and rename.
fn write_config_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}
