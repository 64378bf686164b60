//! History persistence layer
//!
//! Stores classification summaries as JSON lines, one chained entry per
//! line, and exports them for compliance reports.

use crate::history::{ClassificationHistory, ClassificationSummary};
use riskgate_core::Result;
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Appends chained summaries to a JSON-lines history file
pub struct HistoryWriter {
    path: PathBuf,
    file: BufWriter<File>,
    history: ClassificationHistory,
}

impl HistoryWriter {
    /// Open a history file for appending, continuing its chain
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let history = HistoryReader::new(&path).load_history()?;
        if !history.verify() {
            warn!(path = %path.display(), "Existing history fails verification, appending anyway");
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), entries = history.len(), "Opened history file");

        Ok(Self {
            path,
            file: BufWriter::new(file),
            history,
        })
    }

    /// Chain a summary and append it to the file
    pub fn append(&mut self, summary: ClassificationSummary) -> Result<ClassificationSummary> {
        let chained = self.history.record(summary).clone();

        let json = serde_json::to_string(&chained)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()?;

        info!(id = %chained.id, path = %self.path.display(), "Appended classification to history");
        Ok(chained)
    }

    /// Entries written so far, including those loaded on open
    pub fn history(&self) -> &ClassificationHistory {
        &self.history
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads a JSON-lines history file
pub struct HistoryReader {
    path: PathBuf,
}

impl HistoryReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load every parseable entry, oldest first
    ///
    /// A missing file is an empty history. Lines that fail to parse are
    /// skipped.
    pub fn load(&self) -> Result<Vec<ClassificationSummary>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<ClassificationSummary>(&line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    debug!(line = number + 1, "Failed to parse history entry: {}", e);
                    continue;
                }
            }
        }

        Ok(entries)
    }

    /// Load the file as a chained history
    pub fn load_history(&self) -> Result<ClassificationHistory> {
        Ok(ClassificationHistory::from_entries(self.load()?))
    }

    /// The latest `limit` entries, or all when `limit` is `None`
    pub fn recent(&self, limit: Option<usize>) -> Result<Vec<ClassificationSummary>> {
        let entries = self.load()?;
        Ok(match limit {
            Some(n) => {
                let start = entries.len().saturating_sub(n);
                entries[start..].to_vec()
            }
            None => entries,
        })
    }

    /// Export entries to a file for compliance reporting
    pub fn export_to_file(
        &self,
        output_path: &Path,
        format: ExportFormat,
        limit: Option<usize>,
    ) -> Result<usize> {
        let entries = self.recent(limit)?;
        let mut file = BufWriter::new(File::create(output_path)?);
        let count = export(&entries, format, &mut file)?;
        file.flush()?;
        Ok(count)
    }
}

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// JSON Lines format (one JSON object per line)
    JsonLines,
    /// Pretty-printed JSON array
    Json,
    /// CSV format
    Csv,
}

const CSV_HEADER: [&str; 20] = [
    "id",
    "system_name",
    "provider",
    "system_description",
    "risk_level",
    "risk_label",
    "reasons",
    "obligations",
    "recommendations",
    "applicable_articles",
    "gpai_obligations",
    "transparency_obligations",
    "universal_obligations",
    "warnings",
    "is_gpai",
    "gpai_has_systemic_risk",
    "exception_documentation_required",
    "reference_date",
    "timestamp",
    "hash",
];

/// Write entries in the given format, returning how many were written
pub fn export<W: Write>(
    entries: &[ClassificationSummary],
    format: ExportFormat,
    out: &mut W,
) -> Result<usize> {
    match format {
        ExportFormat::JsonLines => {
            for entry in entries {
                writeln!(out, "{}", serde_json::to_string(entry)?)?;
            }
        }
        ExportFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(entries)?)?;
        }
        ExportFormat::Csv => {
            writeln!(out, "{}", CSV_HEADER.join(","))?;

            for entry in entries {
                let reference_date = entry.reference_date.to_string();
                let timestamp = entry.timestamp.to_rfc3339();
                let row = [
                    entry.id.as_str(),
                    entry.system_name.as_str(),
                    entry.provider.as_str(),
                    entry.system_description.as_str(),
                    entry.risk_level.key(),
                    entry.risk_label.as_str(),
                    entry.reasons.as_str(),
                    entry.obligations.as_str(),
                    entry.recommendations.as_str(),
                    entry.applicable_articles.as_str(),
                    entry.gpai_obligations.as_str(),
                    entry.transparency_obligations.as_str(),
                    entry.universal_obligations.as_str(),
                    entry.warnings.as_str(),
                    yes_no(entry.is_gpai),
                    yes_no(entry.gpai_has_systemic_risk),
                    yes_no(entry.exception_documentation_required),
                    reference_date.as_str(),
                    timestamp.as_str(),
                    entry.hash.as_deref().unwrap_or(""),
                ];

                let cells: Vec<Cow<'_, str>> = row.iter().map(|cell| csv_field(cell)).collect();
                writeln!(out, "{}", cells.join(","))?;
            }
        }
    }

    Ok(entries.len())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Ja"
    } else {
        "Nein"
    }
}

fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use riskgate_core::ClassificationInput;
    use riskgate_rules::classify;
    use tempfile::TempDir;

    fn summary(name: &str) -> ClassificationSummary {
        let input = ClassificationInput {
            interacts_with_humans: true,
            ..ClassificationInput::new(name, "ACME, Inc.", "Chatbot \"Max\"")
                .with_reference_date(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap())
        };
        ClassificationSummary::from_result(&input, &classify(&input))
    }

    #[test]
    fn test_write_and_read_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.jsonl");

        {
            let mut writer = HistoryWriter::open(&path).unwrap();
            writer.append(summary("A")).unwrap();
            writer.append(summary("B")).unwrap();
        }

        let reader = HistoryReader::new(&path);
        let entries = reader.load().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].system_name, "A");
        assert!(reader.load_history().unwrap().verify());
    }

    #[test]
    fn test_reopen_continues_chain() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("history.jsonl");

        let first = HistoryWriter::open(&path)
            .unwrap()
            .append(summary("A"))
            .unwrap();
        let second = HistoryWriter::open(&path)
            .unwrap()
            .append(summary("B"))
            .unwrap();

        assert_eq!(second.previous_hash, first.hash);
        assert!(HistoryReader::new(&path).load_history().unwrap().verify());
    }

    #[test]
    fn test_missing_file_and_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.jsonl");

        assert!(HistoryReader::new(&path).load().unwrap().is_empty());

        HistoryWriter::open(&path).unwrap().append(summary("A")).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "not json").unwrap();
        writeln!(file).unwrap();

        assert_eq!(HistoryReader::new(&path).load().unwrap().len(), 1);
    }

    #[test]
    fn test_recent_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.jsonl");

        let mut writer = HistoryWriter::open(&path).unwrap();
        for name in ["A", "B", "C"] {
            writer.append(summary(name)).unwrap();
        }

        let reader = HistoryReader::new(&path);
        let names: Vec<String> = reader
            .recent(Some(2))
            .unwrap()
            .into_iter()
            .map(|s| s.system_name)
            .collect();
        assert_eq!(names, vec!["B", "C"]);
        assert_eq!(reader.recent(None).unwrap().len(), 3);
    }

    #[test]
    fn test_export_csv_quotes_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.jsonl");
        HistoryWriter::open(&path).unwrap().append(summary("A")).unwrap();

        let export_path = temp_dir.path().join("export.csv");
        let count = HistoryReader::new(&path)
            .export_to_file(&export_path, ExportFormat::Csv, None)
            .unwrap();
        assert_eq!(count, 1);

        let content = std::fs::read_to_string(&export_path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("id,system_name,provider"));
        let row = lines.next().unwrap();
        assert!(row.contains("\"ACME, Inc.\""));
        assert!(row.contains("\"Chatbot \"\"Max\"\"\""));
        assert!(row.contains(",limited,Begrenztes Risiko,"));
        assert!(row.contains(",Nein,Nein,Nein,2026-09-01,"));
    }

    #[test]
    fn test_export_json_array() {
        let entries = vec![summary("A"), summary("B")];
        let mut out = Vec::new();

        let count = export(&entries, ExportFormat::Json, &mut out).unwrap();
        assert_eq!(count, 2);

        let parsed: Vec<ClassificationSummary> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, entries);
    }
}
