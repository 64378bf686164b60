//! RiskGate Core
//!
//! Core types shared across RiskGate components.
//!
//! This crate provides:
//! - The questionnaire input record and the classification result record
//! - The ordered risk tier and the deadline keys reported in results
//! - Closed key enumerations for domain, exception, and content-medium selectors
//! - Error types and result handling

pub mod error;
pub mod keys;
pub mod types;

pub use error::{Error, Result};
pub use keys::{parse_lenient, BiometricException, ContentMedium, HighRiskDomain};
pub use types::{ClassificationInput, ClassificationResult, DeadlineKey, RiskTier};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::keys::{BiometricException, ContentMedium, HighRiskDomain};
    pub use crate::types::{ClassificationInput, ClassificationResult, DeadlineKey, RiskTier};
}
