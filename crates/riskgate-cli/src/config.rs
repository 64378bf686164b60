//! CLI configuration

use clap::ValueEnum;
use riskgate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How classification results and reference tables are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Settings read from `riskgate.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default output format
    pub output: OutputFormat,

    /// History file used when no `--history`/`--file` flag is given
    pub history_path: Option<PathBuf>,

    /// Append every classification to `history_path`
    pub audit_all: bool,
}

impl CliConfig {
    /// Load configuration from file, or use defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), ?config, "Loaded configuration");
        Ok(config)
    }

    /// History file a classification should be appended to, if any
    ///
    /// An explicit path always wins; otherwise the configured path is used
    /// only with `audit_all`.
    pub fn history_target(&self, explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| {
            if self.audit_all {
                self.history_path.clone()
            } else {
                None
            }
        })
    }

    /// History file to read from
    pub fn history_source(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        explicit
            .or_else(|| self.history_path.clone())
            .ok_or_else(|| {
                Error::config("no history file given; pass --file or set history_path")
            })
    }
}
