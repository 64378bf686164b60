//! RiskGate Telemetry
//!
//! Record keeping around classification results.
//!
//! Provides:
//! - Flat classification summaries and a hash-chained history
//! - JSON-lines persistence and JSON/CSV export of that history
//! - Classification metrics

pub mod history;
pub mod metrics;
pub mod persistence;

pub use history::{ClassificationHistory, ClassificationSummary, SharedHistory};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use persistence::{export, ExportFormat, HistoryReader, HistoryWriter};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::history::{ClassificationHistory, ClassificationSummary, SharedHistory};
    pub use crate::metrics::MetricsCollector;
    pub use crate::persistence::{ExportFormat, HistoryReader, HistoryWriter};
}
