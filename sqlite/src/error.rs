//! Error types for schema validation.

use thiserror::Error;

/// Errors that can occur while validating a schema against SQLite.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The engine rejected a statement; surfaced verbatim as the
    /// diagnostic for the schema author.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A trigger, view or FTS table was incompletely configured.
    #[error("configuration error: {0}")]
    Config(#[from] droidgen_core::ConfigError),

    /// Filesystem failure handling the disposable database file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`CheckError`].
pub type Result<T> = std::result::Result<T, CheckError>;
