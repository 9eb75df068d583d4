//! ---
//! pprz_section: "05-external-interfaces"
//! pprz_subsection: "binary"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Command line inspection of schema-described messages."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use pprz_common::config::{LoadedToolConfig, ToolConfig};
use pprz_logging as logging;
use pprz_msg::SchemaRegistry;

mod list;
mod show;

const DEFAULT_CONFIG_PATH: &str = "configs/pprz-msgctl.toml";

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Inspect schema-described telemetry and datalink messages",
    long_about = None
)]
struct Cli {
    /// Tool configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Message registry file (TOML or JSON), overrides the configured one.
    #[arg(short = 'f', long = "schema", global = true, value_name = "FILE")]
    schema: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every message of a class with its default values.
    List(list::ListArgs),
    /// Render one message in the selected format.
    Show(show::ShowArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(cli.config.as_deref())?;
    logging::init_with(&loaded.config.logging);
    if let Some(source) = &loaded.source {
        tracing::debug!(config = %source.display(), "configuration loaded");
    }

    let registry = load_registry(cli.schema.as_deref(), &loaded.config)?;
    let output = match cli.command {
        Commands::List(args) => list::run(&registry, &loaded.config, &args)?,
        Commands::Show(args) => show::run(&registry, &args)?,
    };
    println!("{output}");
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<LoadedToolConfig> {
    match explicit {
        Some(path) => {
            let loaded = ToolConfig::load_with_source(&[path])?;
            if loaded.source.is_none() {
                bail!("configuration file {} not found", path.display());
            }
            Ok(loaded)
        }
        None => ToolConfig::load_with_source(&[DEFAULT_CONFIG_PATH]),
    }
}

fn load_registry(schema: Option<&Path>, config: &ToolConfig) -> Result<SchemaRegistry> {
    let Some(path) = schema.or(config.schema_path.as_deref()) else {
        bail!("no message registry given; pass --schema or set schema_path in the configuration");
    };
    SchemaRegistry::load(path)
        .with_context(|| format!("failed to load message registry {}", path.display()))
}
