//! RiskGate Rules
//!
//! Risk-tier classification under the EU AI Act (Regulation (EU) 2024/1689).
//!
//! The rule set is hard-coded domain knowledge, evaluated in a fixed order:
//! - Prohibited practices (Article 5)
//! - High-risk pathway A: regulated products (Article 6(1), Annex I)
//! - High-risk pathway B: Annex III domains with Article 6(3) carve-outs
//! - Transparency triggers (Article 50)
//! - Minimal-risk fallback
//!
//! GPAI duties, universal duties, and cumulative transparency duties are
//! attached on top of whichever tier is reached.
//!
//! ```
//! use chrono::NaiveDate;
//! use riskgate_core::{ClassificationInput, RiskTier};
//!
//! let input = ClassificationInput {
//!     interacts_with_humans: true,
//!     ..ClassificationInput::new("Support-Bot", "ACME", "Kundenservice-Chatbot")
//! }
//! .with_reference_date(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
//!
//! let result = riskgate_rules::classify(&input);
//! assert_eq!(result.risk_level, RiskTier::Limited);
//! ```

pub mod aggregator;
pub mod classifier;
pub mod tables;

pub use aggregator::{
    conflict_warnings, fired_transparency_triggers, gpai_obligations, marking_guidance,
    transparency_obligations, universal_obligations,
};
pub use classifier::{classify, classify_at, DomainOutcome, Findings};
pub use tables::{
    CatalogEntry, DeadlineCalendar, DomainEntry, DomainException, MarkingEntry,
    ProhibitedPractice, TransparencyTrigger, AI_ACT_DEADLINES,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{classify, classify_at};
    pub use crate::tables::{ProhibitedPractice, AI_ACT_DEADLINES};
    pub use riskgate_core::prelude::*;
}
