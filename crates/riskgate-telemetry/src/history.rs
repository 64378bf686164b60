//! Classification history with hash-chained entries for tamper detection

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use riskgate_core::{ClassificationInput, ClassificationResult, RiskTier};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

/// Separator used when list fields are flattened into one cell
pub const LIST_SEPARATOR: &str = "; ";

/// Flat record of one classification, as stored in history and exports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Unique summary ID
    pub id: String,

    pub system_name: String,
    pub provider: String,
    pub system_description: String,

    /// Assigned tier
    pub risk_level: RiskTier,

    /// German display label of the tier
    pub risk_label: String,

    pub reasons: String,
    pub obligations: String,
    pub recommendations: String,
    pub applicable_articles: String,
    pub gpai_obligations: String,
    pub transparency_obligations: String,
    pub universal_obligations: String,
    pub warnings: String,

    pub is_gpai: bool,
    pub gpai_has_systemic_risk: bool,
    pub exception_documentation_required: bool,

    /// Date the time-gated rules were evaluated against
    pub reference_date: NaiveDate,

    /// When the classification was produced
    pub timestamp: DateTime<Utc>,

    /// Hash of this entry
    #[serde(default)]
    pub hash: Option<String>,

    /// Hash of the previous entry (for chaining)
    #[serde(default)]
    pub previous_hash: Option<String>,
}

impl ClassificationSummary {
    /// Flatten a result together with the identity fields of its input
    pub fn from_result(input: &ClassificationInput, result: &ClassificationResult) -> Self {
        Self {
            id: generate_summary_id(),
            system_name: input.system_name.clone(),
            provider: input.provider.clone(),
            system_description: input.system_description.clone(),
            risk_level: result.risk_level,
            risk_label: result.risk_level.label().to_string(),
            reasons: result.reasons.join(LIST_SEPARATOR),
            obligations: result.obligations.join(LIST_SEPARATOR),
            recommendations: result.recommendations.join(LIST_SEPARATOR),
            applicable_articles: result.applicable_articles.join(LIST_SEPARATOR),
            gpai_obligations: result.gpai_obligations.join(LIST_SEPARATOR),
            transparency_obligations: result.transparency_obligations.join(LIST_SEPARATOR),
            universal_obligations: result.universal_obligations.join(LIST_SEPARATOR),
            warnings: result.warnings.join(LIST_SEPARATOR),
            is_gpai: result.is_gpai,
            gpai_has_systemic_risk: result.gpai_has_systemic_risk,
            exception_documentation_required: result.exception_documentation_required,
            reference_date: result.reference_date,
            timestamp: result.timestamp,
            hash: None,
            previous_hash: None,
        }
    }
}

fn generate_summary_id() -> String {
    format!("cls_{}", uuid::Uuid::new_v4())
}

/// Append-only list of classification summaries
///
/// Every entry carries the SHA-256 hash of its content and of its
/// predecessor's hash, so editing or removing an entry breaks the chain.
#[derive(Debug, Clone, Default)]
pub struct ClassificationHistory {
    entries: Vec<ClassificationSummary>,
    chain_hash: Option<String>,
}

impl ClassificationHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a history from previously chained entries
    ///
    /// The entries are taken as-is; call [`verify`](Self::verify) to check them.
    pub fn from_entries(entries: Vec<ClassificationSummary>) -> Self {
        let chain_hash = entries.last().and_then(|e| e.hash.clone());
        Self {
            entries,
            chain_hash,
        }
    }

    /// Append a summary, chaining it to the previous entry
    pub fn record(&mut self, summary: ClassificationSummary) -> &ClassificationSummary {
        let mut summary = summary;
        summary.previous_hash = self.chain_hash.clone();

        let hash = compute_hash(&summary);
        summary.hash = Some(hash.clone());

        debug!(id = %summary.id, tier = summary.risk_level.key(), "Recorded classification");

        self.chain_hash = Some(hash);
        self.entries.push(summary);
        &self.entries[self.entries.len() - 1]
    }

    /// Verify the integrity of the chain
    pub fn verify(&self) -> bool {
        let mut prev_hash: Option<String> = None;

        for entry in &self.entries {
            if entry.previous_hash != prev_hash {
                warn!(id = %entry.id, "History chain broken");
                return false;
            }

            if entry.hash.as_deref() != Some(compute_hash(entry).as_str()) {
                warn!(id = %entry.id, "History entry modified");
                return false;
            }

            prev_hash = entry.hash.clone();
        }

        true
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[ClassificationSummary] {
        &self.entries
    }

    /// The latest `n` entries, oldest first
    pub fn recent(&self, n: usize) -> &[ClassificationSummary] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry and restart the chain
    pub fn clear(&mut self) {
        self.entries.clear();
        self.chain_hash = None;
    }
}

fn compute_hash(entry: &ClassificationSummary) -> String {
    let mut hasher = Sha256::new();

    for field in [
        entry.id.as_str(),
        entry.system_name.as_str(),
        entry.provider.as_str(),
        entry.system_description.as_str(),
        entry.risk_level.key(),
        entry.reasons.as_str(),
        entry.obligations.as_str(),
        entry.recommendations.as_str(),
        entry.applicable_articles.as_str(),
        entry.gpai_obligations.as_str(),
        entry.transparency_obligations.as_str(),
        entry.universal_obligations.as_str(),
        entry.warnings.as_str(),
    ] {
        hasher.update(field.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update([
        entry.is_gpai as u8,
        entry.gpai_has_systemic_risk as u8,
        entry.exception_documentation_required as u8,
    ]);
    hasher.update(entry.reference_date.to_string().as_bytes());
    hasher.update(entry.timestamp.to_rfc3339().as_bytes());
    if let Some(ref prev) = entry.previous_hash {
        hasher.update(prev.as_bytes());
    }

    format!("{:x}", hasher.finalize())
}

/// History shared between concurrent callers
///
/// Appends are serialized through a single mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedHistory {
    inner: Arc<Mutex<ClassificationHistory>>,
}

impl SharedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing history
    pub fn from_history(history: ClassificationHistory) -> Self {
        Self {
            inner: Arc::new(Mutex::new(history)),
        }
    }

    /// Append a summary and return the chained copy
    pub fn record(&self, summary: ClassificationSummary) -> ClassificationSummary {
        self.inner.lock().record(summary).clone()
    }

    /// Copy of all entries, oldest first
    pub fn snapshot(&self) -> Vec<ClassificationSummary> {
        self.inner.lock().entries().to_vec()
    }

    /// Copy of the latest `n` entries
    pub fn recent(&self, n: usize) -> Vec<ClassificationSummary> {
        self.inner.lock().recent(n).to_vec()
    }

    pub fn verify(&self) -> bool {
        self.inner.lock().verify()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
