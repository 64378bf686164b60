use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use riskgate_cli::render::{reference_value, write_reference, write_report};
use riskgate_cli::summary::log_run_summary;
use riskgate_cli::{Cli, CliConfig, Commands, HistoryFormat, OutputFormat};
use riskgate_core::ClassificationInput;
use riskgate_telemetry::{
    export, ClassificationHistory, ClassificationSummary, ExportFormat, HistoryReader,
    HistoryWriter,
};
use std::io::{self, Write};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CliConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration {}", cli.config.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Classify {
            input,
            reference_date,
            format,
            history,
        } => {
            let mut system = ClassificationInput::from_file(&input)
                .with_context(|| format!("failed to read input {}", input.display()))?;
            if reference_date.is_some() {
                system.reference_date = reference_date;
            }
            system.validate()?;

            let result = riskgate_rules::classify(&system);

            log_run_summary(&result);

            if let Some(path) = config.history_target(history) {
                let mut writer = HistoryWriter::open(&path)
                    .with_context(|| format!("failed to open history {}", path.display()))?;
                writer.append(ClassificationSummary::from_result(&system, &result))?;
            }

            match format.unwrap_or(config.output) {
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &result)?;
                    writeln!(out)?;
                }
                OutputFormat::Text => {
                    write_report(&mut out, &system, &result, Utc::now().date_naive())?;
                }
            }
        }

        Commands::Reference { table, format } => match format.unwrap_or(config.output) {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &reference_value(table))?;
                writeln!(out)?;
            }
            OutputFormat::Text => write_reference(&mut out, table)?,
        },

        Commands::History {
            file,
            limit,
            format,
            verify,
        } => {
            let path = config.history_source(file)?;
            let reader = HistoryReader::new(&path);

            if verify {
                let entries = reader.load()?;
                let count = entries.len();
                if !ClassificationHistory::from_entries(entries).verify() {
                    bail!("history {} failed hash-chain verification", path.display());
                }
                info!(entries = count, "History chain verified");
            }

            let entries = reader.recent(limit)?;
            if entries.is_empty() {
                warn!(path = %path.display(), "History is empty");
            }

            let format = match format {
                HistoryFormat::Json => ExportFormat::Json,
                HistoryFormat::Jsonl => ExportFormat::JsonLines,
                HistoryFormat::Csv => ExportFormat::Csv,
            };
            export(&entries, format, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "riskgate=debug,riskgate_core=debug,riskgate_rules=debug,riskgate_telemetry=debug,riskgate_cli=debug"
    } else {
        "riskgate=info,riskgate_core=warn,riskgate_rules=warn,riskgate_telemetry=info,riskgate_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
