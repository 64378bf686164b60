use crate::config::OutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "riskgate")]
#[command(author, version, about = "EU AI Act risk-tier classification")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "RISKGATE_CONFIG",
        default_value = "./riskgate.yaml"
    )]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify an AI system described in a YAML or JSON file
    Classify {
        /// Questionnaire answers
        #[arg(short, long)]
        input: PathBuf,

        /// Evaluate time-gated rules as of this date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        reference_date: Option<NaiveDate>,

        /// Output format (defaults to the configured one)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Append the result to this history file
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Print a static reference table
    Reference {
        /// Table to print
        #[arg(value_enum)]
        table: ReferenceTable,

        /// Output format (defaults to the configured one)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print persisted classification summaries
    History {
        /// History file (defaults to the configured one)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only the latest N entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: HistoryFormat,

        /// Check the hash chain and fail if it is broken
        #[arg(long)]
        verify: bool,
    },
}

/// Reference tables available to `riskgate reference`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReferenceTable {
    /// Risk tiers with labels, colours and penalties
    Tiers,
    /// Prohibited practices (Article 5)
    Prohibited,
    /// High-risk domains and use cases (Annex III)
    Domains,
    /// Regulated product categories (Annex I)
    Products,
    /// Real-time biometric and Article 6(3) exceptions
    Exceptions,
    /// Code-of-Practice marking methods per content medium
    Marking,
    /// Application calendar
    Deadlines,
}

/// Output formats for `riskgate history`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    /// Pretty-printed JSON array
    Json,
    /// One JSON object per line
    Jsonl,
    /// Comma-separated values
    Csv,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify() {
        let cli = Cli::try_parse_from([
            "riskgate",
            "classify",
            "--input",
            "system.yaml",
            "--reference-date",
            "2026-09-01",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Classify {
                input,
                reference_date,
                format,
                history,
            } => {
                assert_eq!(input, PathBuf::from("system.yaml"));
                assert_eq!(reference_date, NaiveDate::from_ymd_opt(2026, 9, 1));
                assert_eq!(format, Some(OutputFormat::Json));
                assert_eq!(history, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_date() {
        let parsed = Cli::try_parse_from([
            "riskgate",
            "classify",
            "--input",
            "system.yaml",
            "--reference-date",
            "01.09.2026",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_reference_and_history() {
        let cli = Cli::try_parse_from(["riskgate", "reference", "domains", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Reference {
                table: ReferenceTable::Domains,
                format: None
            }
        ));

        let cli =
            Cli::try_parse_from(["riskgate", "history", "--limit", "5", "--format", "csv"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::History {
                limit: Some(5),
                format: HistoryFormat::Csv,
                verify: false,
                ..
            }
        ));
    }
}
