//! Configuration library for Beacon nodes.
//!
//! This crate turns raw settings (config file plus `BEACON_*` environment
//! overrides) into the resolved [`Config`] a node runs with, and provides the
//! `genconfig`/`checkconfig` workflow used by the `beacon-init` binary to
//! scaffold and validate project config files in JSON, TOML, or YAML.

pub mod cli;
pub mod constants;
pub mod loader;
pub mod models;
pub mod util;

pub use cli::{
    ConfigFileRequest, ConfigGenerator, ConfigValidator, FileValidator,
    GenerateError, ValidationError, generate_config, validate_config_file,
};
pub use loader::{
    ConfigFormat, SettingsDocument, SettingsError, SettingsLoader,
};
pub use models::{
    ChannelOptions, Config, Namespace, Project, ProjectList, Settings,
    Structure, StructureError,
};
