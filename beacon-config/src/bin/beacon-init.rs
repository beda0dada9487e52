//! `beacon-init`: generate, check, and inspect Beacon config files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use beacon_config::{
    Config, SettingsLoader, generate_config, validate_config_file,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "beacon-init", about = "Beacon configuration bootstrapper")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a starter config file with one project
    Genconfig {
        /// Output file; the extension selects the format (json, toml, yaml, yml)
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },
    /// Validate the projects section of an existing config file
    Checkconfig {
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },
    /// Print the resolved node configuration as JSON
    Show {
        /// Config file to read; defaults and BEACON_* variables apply without it
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the prompt and command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Genconfig { config } => {
            let request = generate_config(&config).with_context(|| {
                format!("failed to generate {}", config.display())
            })?;
            println!(
                "Wrote {} ({} config for project '{}')",
                request.path.display(),
                request.format,
                request.project_name,
            );
        }
        Command::Checkconfig { config } => {
            let structure =
                validate_config_file(&config).with_context(|| {
                    format!("invalid config file {}", config.display())
                })?;
            println!(
                "{} is valid ({} projects)",
                config.display(),
                structure.len()
            );
        }
        Command::Show { config } => {
            let settings = SettingsLoader::new()
                .config_path(config)
                .load()
                .context("failed to load settings")?;
            let resolved = Config::resolve(&settings);
            let rendered = serde_json::to_string_pretty(&resolved)
                .context("failed to render resolved config")?;
            println!("{rendered}");
        }
    }

    Ok(())
}
