//! Error types for code generation.

use thiserror::Error;

/// Errors that can occur while generating and writing Java sources.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Package is not a dotted sequence of lowercase Java identifiers.
    #[error("invalid java package '{0}': expected dotted lowercase identifiers")]
    InvalidPackage(String),

    /// A table or column name would not survive as an SQL/Java identifier.
    #[error("invalid identifier '{0}': expected letters, digits or underscores, not starting with a digit")]
    InvalidIdentifier(String),

    /// A trigger, view or FTS table was incompletely configured.
    #[error("configuration error: {0}")]
    Config(#[from] droidgen_core::ConfigError),

    /// Filesystem failure, propagated unchanged.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`GenerateError`].
pub type Result<T> = std::result::Result<T, GenerateError>;
