//! ---
//! pprz_section: "01-core-functionality"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Shared configuration primitives."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_class() -> String {
    "telemetry".to_owned()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_filter() -> String {
    "info".to_owned()
}

/// Available log formats for the command line tools.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    StructuredJson,
    #[default]
    Pretty,
}

/// Configuration for the message tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolConfig {
    /// Registry file holding resolved message metadata.
    #[serde(default)]
    pub schema_path: Option<PathBuf>,
    /// Message class used when none is given on the command line.
    #[serde(default = "default_class")]
    pub default_class: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// `EnvFilter` directive applied when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            filter: default_log_filter(),
        }
    }
}

/// Metadata describing where a [`ToolConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedToolConfig {
    pub config: ToolConfig,
    /// `None` when no file was found and defaults are in effect.
    pub source: Option<PathBuf>,
}

impl ToolConfig {
    pub const ENV_CONFIG_PATH: &str = "PPRZ_MSG_CONFIG";

    /// Load configuration together with the effective source path.
    ///
    /// An explicit `PPRZ_MSG_CONFIG` must point at a readable file. Otherwise
    /// the first existing candidate wins and defaults apply when none exist.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedToolConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(&path)?;
                return Ok(LoadedToolConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        for candidate in candidates {
            let path = candidate.as_ref();
            if path.exists() {
                let config = Self::from_path(path)?;
                return Ok(LoadedToolConfig {
                    config,
                    source: Some(path.to_path_buf()),
                });
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(LoadedToolConfig {
            config: Self::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        contents
            .parse::<ToolConfig>()
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        if self.default_class.trim().is_empty() {
            return Err(anyhow!("default_class cannot be empty"));
        }
        Ok(())
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            schema_path: None,
            default_class: default_class(),
            logging: LoggingConfig::default(),
        }
    }
}

impl std::str::FromStr for ToolConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: ToolConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}
