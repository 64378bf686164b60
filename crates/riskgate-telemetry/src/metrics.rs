//! Classification metrics

use riskgate_core::{ClassificationResult, RiskTier};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for classification activity
///
/// Keeps local atomic counters and mirrors them to the `metrics` facade,
/// which is a no-op until a recorder is installed.
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    total: AtomicU64,
    by_tier: [AtomicU64; 4],
    gpai: AtomicU64,
    warnings: AtomicU64,
    exceptions_documented: AtomicU64,
}

fn tier_slot(tier: RiskTier) -> usize {
    match tier {
        RiskTier::Unacceptable => 0,
        RiskTier::High => 1,
        RiskTier::Limited => 2,
        RiskTier::Minimal => 3,
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    /// Record one classification
    pub fn record(&self, result: &ClassificationResult) {
        let inner = &self.inner;
        let tier = result.risk_level;

        inner.total.fetch_add(1, Ordering::Relaxed);
        inner.by_tier[tier_slot(tier)].fetch_add(1, Ordering::Relaxed);
        metrics::counter!("riskgate_classifications_total", "tier" => tier.key()).increment(1);

        if result.is_gpai {
            inner.gpai.fetch_add(1, Ordering::Relaxed);
            metrics::counter!("riskgate_gpai_classifications_total").increment(1);
        }

        let warnings = result.warnings.len() as u64;
        if warnings > 0 {
            inner.warnings.fetch_add(warnings, Ordering::Relaxed);
            metrics::counter!("riskgate_conflict_warnings_total").increment(warnings);
        }

        if result.exception_documentation_required {
            inner.exceptions_documented.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let inner = &self.inner;
        MetricsSnapshot {
            total: inner.total.load(Ordering::Relaxed),
            unacceptable: inner.by_tier[0].load(Ordering::Relaxed),
            high: inner.by_tier[1].load(Ordering::Relaxed),
            limited: inner.by_tier[2].load(Ordering::Relaxed),
            minimal: inner.by_tier[3].load(Ordering::Relaxed),
            gpai: inner.gpai.load(Ordering::Relaxed),
            warnings: inner.warnings.load(Ordering::Relaxed),
            exceptions_documented: inner.exceptions_documented.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total: u64,
    pub unacceptable: u64,
    pub high: u64,
    pub limited: u64,
    pub minimal: u64,
    pub gpai: u64,
    pub warnings: u64,
    pub exceptions_documented: u64,
}

impl MetricsSnapshot {
    /// Count for a single tier
    pub fn tier(&self, tier: RiskTier) -> u64 {
        match tier {
            RiskTier::Unacceptable => self.unacceptable,
            RiskTier::High => self.high,
            RiskTier::Limited => self.limited,
            RiskTier::Minimal => self.minimal,
        }
    }

    /// Share of classifications that ended in a prohibited practice
    pub fn prohibited_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.unacceptable as f64 / self.total as f64
        }
    }
}
