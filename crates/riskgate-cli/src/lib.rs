//! RiskGate command-line interface
//!
//! Argument parsing, configuration loading, report rendering, and run
//! summaries for the `riskgate` binary.

pub mod cli;
pub mod config;
pub mod render;
pub mod summary;

pub use cli::{Cli, Commands, HistoryFormat, ReferenceTable};
pub use config::{CliConfig, OutputFormat};
