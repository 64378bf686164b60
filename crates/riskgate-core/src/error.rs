//! Error types for RiskGate

/// Result type alias using RiskGate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for RiskGate operations
///
/// Classification itself is infallible; these errors come from the
/// surfaces around it (input validation, file loading, history persistence).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input record failed required-field validation
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
