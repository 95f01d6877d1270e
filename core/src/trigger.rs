//! Trigger definitions and `CREATE TRIGGER` rendering.
//!
//! A trigger needs a timing, an event, and at least one body statement
//! before it can render; [`Trigger::sql`] refuses with a [`ConfigError`]
//! naming the missing piece otherwise. The three timing setters are
//! independent and the last call wins, with no mutual-exclusion check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// When the trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

impl TriggerTiming {
    fn keyword(&self) -> &'static str {
        match self {
            TriggerTiming::Before => "BEFORE",
            TriggerTiming::After => "AFTER",
            TriggerTiming::InsteadOf => "INSTEAD OF",
        }
    }
}

/// The statement class the trigger reacts to, and on which table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    /// `DELETE ON <table>`
    Delete { table: String },
    /// `INSERT ON <table>`
    Insert { table: String },
    /// `UPDATE [OF <columns>] ON <table>`
    Update { table: String, columns: Vec<String> },
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerEvent::Delete { table } => write!(f, "DELETE ON {table}"),
            TriggerEvent::Insert { table } => write!(f, "INSERT ON {table}"),
            TriggerEvent::Update { table, columns } if columns.is_empty() => {
                write!(f, "UPDATE ON {table}")
            }
            TriggerEvent::Update { table, columns } => {
                write!(f, "UPDATE OF {} ON {table}", columns.join(", "))
            }
        }
    }
}

/// An SQL trigger.
///
/// # Examples
///
/// ```
/// use droidgen_core::Trigger;
///
/// let trigger = Trigger::new("tr_archive")
///     .temporary()
///     .if_not_exists()
///     .before()
///     .on_delete("notes")
///     .with_statement("INSERT INTO archive (noteid) VALUES (old._id)");
///
/// let sql = trigger.sql().unwrap();
/// assert!(sql.starts_with("CREATE TEMP TRIGGER IF NOT EXISTS tr_archive"));
/// assert!(sql.contains("BEFORE DELETE ON notes"));
/// assert!(sql.contains("VALUES (old._id);"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Trigger name.
    pub name: String,
    /// `CREATE TEMP TRIGGER` when set.
    pub temporary: bool,
    /// `IF NOT EXISTS` when set.
    pub if_not_exists: bool,
    /// BEFORE/AFTER/INSTEAD OF; last setter call wins.
    pub timing: Option<TriggerTiming>,
    /// The firing event.
    pub event: Option<TriggerEvent>,
    /// Raw SQL body statements, terminated with `;` at render time.
    pub body: Vec<String>,
}

impl Trigger {
    /// Creates an empty trigger definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporary: false,
            if_not_exists: false,
            timing: None,
            event: None,
            body: Vec::new(),
        }
    }

    /// Marks the trigger `TEMP`.
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// Adds `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Fires before the event. Overwrites any earlier timing.
    pub fn before(mut self) -> Self {
        self.timing = Some(TriggerTiming::Before);
        self
    }

    /// Fires after the event. Overwrites any earlier timing.
    pub fn after(mut self) -> Self {
        self.timing = Some(TriggerTiming::After);
        self
    }

    /// Fires instead of the event (view triggers). Overwrites any earlier
    /// timing.
    pub fn instead_of(mut self) -> Self {
        self.timing = Some(TriggerTiming::InsteadOf);
        self
    }

    /// Reacts to `DELETE` on the given table. Overwrites any earlier event.
    pub fn on_delete(mut self, table: impl Into<String>) -> Self {
        self.event = Some(TriggerEvent::Delete { table: table.into() });
        self
    }

    /// Reacts to `INSERT` on the given table. Overwrites any earlier event.
    pub fn on_insert(mut self, table: impl Into<String>) -> Self {
        self.event = Some(TriggerEvent::Insert { table: table.into() });
        self
    }

    /// Reacts to any `UPDATE` on the given table. Overwrites any earlier
    /// event.
    pub fn on_update(mut self, table: impl Into<String>) -> Self {
        self.event = Some(TriggerEvent::Update {
            table: table.into(),
            columns: Vec::new(),
        });
        self
    }

    /// Reacts to `UPDATE OF <columns>` on the given table. Overwrites any
    /// earlier event.
    pub fn on_update_of<I, S>(mut self, table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.event = Some(TriggerEvent::Update {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Appends a raw SQL statement to the trigger body. A terminating `;`
    /// is added at render time when missing.
    pub fn with_statement(mut self, sql: impl Into<String>) -> Self {
        self.body.push(sql.into());
        self
    }

    /// Renders the `CREATE TRIGGER` statement.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTiming`], [`ConfigError::MissingEvent`]
    /// or [`ConfigError::EmptyBody`] when the definition is incomplete.
    pub fn sql(&self) -> Result<String> {
        let timing = self
            .timing
            .ok_or_else(|| ConfigError::MissingTiming(self.name.clone()))?;
        let event = self
            .event
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEvent(self.name.clone()))?;
        if self.body.is_empty() {
            return Err(ConfigError::EmptyBody(self.name.clone()));
        }

        let mut out = String::from("CREATE ");
        if self.temporary {
            out.push_str("TEMP ");
        }
        out.push_str("TRIGGER ");
        if self.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&self.name);
        out.push_str(&format!("\n  {} {event}\n  BEGIN\n", timing.keyword()));
        for statement in &self.body {
            let statement = statement.trim_end();
            if statement.ends_with(';') {
                out.push_str(&format!("    {statement}\n"));
            } else {
                out.push_str(&format!("    {statement};\n"));
            }
        }
        out.push_str("  END");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_trigger() -> Trigger {
        Trigger::new("tr_log")
            .after()
            .on_update("notes")
            .with_statement("INSERT INTO log (noteid) VALUES (new._id)")
    }

    #[test]
    fn test_full_render() {
        let sql = complete_trigger().sql().unwrap();
        assert_eq!(
            sql,
            "CREATE TRIGGER tr_log\n  \
             AFTER UPDATE ON notes\n  \
             BEGIN\n    \
             INSERT INTO log (noteid) VALUES (new._id);\n  \
             END"
        );
    }

    #[test]
    fn test_missing_timing_is_a_config_error() {
        let trigger = Trigger::new("t").on_delete("x").with_statement("SELECT 1");
        assert_eq!(trigger.sql(), Err(ConfigError::MissingTiming("t".to_string())));
    }

    #[test]
    fn test_missing_event_is_a_config_error() {
        let trigger = Trigger::new("t").before().with_statement("SELECT 1");
        assert_eq!(trigger.sql(), Err(ConfigError::MissingEvent("t".to_string())));
    }

    #[test]
    fn test_empty_body_is_a_config_error() {
        let trigger = Trigger::new("t").before().on_delete("x");
        assert_eq!(trigger.sql(), Err(ConfigError::EmptyBody("t".to_string())));
    }

    #[test]
    fn test_statements_are_terminated_exactly_once() {
        let sql = Trigger::new("t")
            .after()
            .on_insert("x")
            .with_statement("SELECT 1")
            .with_statement("SELECT 2;")
            .sql()
            .unwrap();
        assert!(sql.contains("SELECT 1;\n"));
        assert!(sql.contains("SELECT 2;\n"));
        assert!(!sql.contains("SELECT 2;;"));
    }

    #[test]
    fn test_update_of_lists_columns() {
        let sql = Trigger::new("t")
            .after()
            .on_update_of("people", ["firstname", "lastname"])
            .with_statement("SELECT 1")
            .sql()
            .unwrap();
        assert!(sql.contains("AFTER UPDATE OF firstname, lastname ON people"));
    }

    // The timing setters are independent mutators with no exclusion check;
    // the last call wins. Pinned here so a change shows up as a failure.
    #[test]
    fn test_timing_last_write_wins() {
        let trigger = Trigger::new("t")
            .instead_of()
            .after()
            .before()
            .on_delete("x")
            .with_statement("SELECT 1");
        assert_eq!(trigger.timing, Some(TriggerTiming::Before));
        assert!(trigger.sql().unwrap().contains("\n  BEFORE DELETE ON x"));

        let trigger = Trigger::new("t").before().after();
        assert_eq!(trigger.timing, Some(TriggerTiming::After));
    }

    #[test]
    fn test_instead_of_keyword() {
        let sql = Trigger::new("t")
            .instead_of()
            .on_insert("v")
            .with_statement("SELECT 1")
            .sql()
            .unwrap();
        assert!(sql.contains("INSTEAD OF INSERT ON v"));
    }
}
