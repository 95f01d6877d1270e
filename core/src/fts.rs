//! FTS3 mirror tables.
//!
//! An [`Fts3Table`] keeps a full-text index table synchronized with a
//! source table. It derives a `CREATE VIRTUAL TABLE ... USING fts3`
//! statement plus exactly three AFTER triggers (insert, delete, update of
//! the mirrored columns) that copy row values into the index keyed on the
//! source table's `_id`, exposed to FTS as `docid`.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::table::ID_COLUMN;
use crate::trigger::Trigger;

/// A full-text index shadowing a source table.
///
/// # Examples
///
/// ```
/// use droidgen_core::Fts3Table;
///
/// let fts = Fts3Table::mirroring("tasks", ["title", "note"]);
/// assert_eq!(fts.table_name(), "tasks_fts");
/// assert_eq!(
///     fts.sql().unwrap(),
///     "CREATE VIRTUAL TABLE tasks_fts USING fts3(title, note)"
/// );
/// assert_eq!(fts.triggers().unwrap().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fts3Table {
    /// The table being mirrored.
    pub source_table: String,
    /// Mirrored column names. `_id` is implied and never listed here.
    pub columns: Vec<String>,
}

impl Fts3Table {
    /// Creates an FTS3 mirror of `source_table` indexing the given columns.
    /// A requested `_id` is dropped from the list; the row id is always
    /// mirrored as `docid` regardless.
    pub fn mirroring<I, S>(source_table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_table: source_table.into(),
            columns: columns
                .into_iter()
                .map(Into::into)
                .filter(|name| name != ID_COLUMN)
                .collect(),
        }
    }

    /// Name of the shadow table, `<source>_fts`.
    pub fn table_name(&self) -> String {
        format!("{}_fts", self.source_table)
    }

    /// Renders the `CREATE VIRTUAL TABLE` statement.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyFtsColumns`] when no columns are
    /// mirrored.
    pub fn sql(&self) -> Result<String> {
        self.ensure_columns()?;
        Ok(format!(
            "CREATE VIRTUAL TABLE {} USING fts3({})",
            self.table_name(),
            self.columns.join(", ")
        ))
    }

    /// Derives the three synchronization triggers: after-insert,
    /// after-delete, and after-update-of the mirrored columns. The update
    /// trigger's OF clause lists exactly the requested columns; the row id
    /// still travels as `docid` in every body.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyFtsColumns`] when no columns are
    /// mirrored.
    pub fn triggers(&self) -> Result<Vec<Trigger>> {
        self.ensure_columns()?;

        let fts = self.table_name();
        let source = self.source_table.as_str();
        let column_list = self.columns.join(", ");
        let new_values = self
            .columns
            .iter()
            .map(|name| format!("new.{name}"))
            .collect::<Vec<_>>()
            .join(", ");

        let insert = Trigger::new(format!("{fts}_insert"))
            .after()
            .on_insert(source)
            .with_statement(format!(
                "INSERT INTO {fts} (docid, {column_list}) VALUES (new.{ID_COLUMN}, {new_values})"
            ));

        let delete = Trigger::new(format!("{fts}_delete"))
            .after()
            .on_delete(source)
            .with_statement(format!(
                "DELETE FROM {fts} WHERE docid = old.{ID_COLUMN}"
            ));

        let update = Trigger::new(format!("{fts}_update"))
            .after()
            .on_update_of(source, self.columns.clone())
            .with_statement(format!(
                "INSERT OR REPLACE INTO {fts} (docid, {column_list}) VALUES (new.{ID_COLUMN}, {new_values})"
            ));

        Ok(vec![insert, delete, update])
    }

    fn ensure_columns(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(ConfigError::EmptyFtsColumns(self.source_table.clone()));
        }
        Ok(())
    }
}
