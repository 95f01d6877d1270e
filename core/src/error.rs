//! Configuration errors for incompletely described schema entities.
//!
//! These are raised at render time: a [`Trigger`](crate::Trigger) without a
//! timing, event, or body, a [`View`](crate::View) without a SELECT, or an
//! [`Fts3Table`](crate::Fts3Table) mirroring no columns cannot produce valid
//! SQL, so rendering refuses instead of emitting malformed DDL. The caller
//! must fix the builder call; there is no recovery path.

use thiserror::Error;

/// Errors raised when rendering an incompletely configured entity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Trigger was rendered without a BEFORE/AFTER/INSTEAD OF timing.
    #[error("trigger '{0}' has no timing; call before(), after() or instead_of()")]
    MissingTiming(String),
    /// Trigger was rendered without a DELETE/INSERT/UPDATE event.
    #[error("trigger '{0}' has no event; call on_delete(), on_insert() or on_update()")]
    MissingEvent(String),
    /// Trigger was rendered with an empty body.
    #[error("trigger '{0}' has an empty body; add at least one statement")]
    EmptyBody(String),
    /// View was rendered without a SELECT statement.
    #[error("view '{0}' has no select statement")]
    MissingSelect(String),
    /// FTS mirror was asked to index no columns.
    #[error("fts table for '{0}' mirrors no columns")]
    EmptyFtsColumns(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
