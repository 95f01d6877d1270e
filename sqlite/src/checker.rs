//! Schema validation against a real SQLite engine.
//!
//! Everything upstream of this module is textual; this is where the
//! rendered DDL meets an actual parser. [`SchemaCheck`] opens a fresh,
//! disposable database, enables foreign-key enforcement, and executes
//! every entity's DDL in dependency order — tables, FTS tables and their
//! triggers, views, then triggers. Engine errors are surfaced verbatim as
//! diagnostics for the schema author.
//!
//! The disposable database file is removed before first use and after
//! last use on every exit path, via a guard that deletes on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, warn};

use droidgen_core::{Fts3Table, Table, Trigger, View};

use crate::error::Result;

/// Collects schema entities and executes their DDL against a throwaway
/// database.
///
/// # Examples
///
/// ```
/// use droidgen_core::{Column, Table};
/// use droidgen_sqlite::SchemaCheck;
///
/// let mut check = SchemaCheck::new();
/// check.add_table(
///     Table::new("Person").with_column(Column::text("firstname").not_null()),
/// );
/// check.run_in_memory().unwrap();
/// ```
#[derive(Default)]
pub struct SchemaCheck {
    tables: Vec<Table>,
    fts_tables: Vec<Fts3Table>,
    views: Vec<View>,
    triggers: Vec<Trigger>,
}

impl SchemaCheck {
    /// Creates an empty check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Adds several tables in order.
    pub fn add_tables(&mut self, tables: impl IntoIterator<Item = Table>) {
        self.tables.extend(tables);
    }

    /// Adds an FTS mirror; its virtual table and synchronization triggers
    /// are both executed.
    pub fn add_fts_table(&mut self, fts: Fts3Table) {
        self.fts_tables.push(fts);
    }

    /// Adds a view.
    pub fn add_view(&mut self, view: View) {
        self.views.push(view);
    }

    /// Adds several views in order.
    pub fn add_views(&mut self, views: impl IntoIterator<Item = View>) {
        self.views.extend(views);
    }

    /// Adds a trigger.
    pub fn add_trigger(&mut self, trigger: Trigger) {
        self.triggers.push(trigger);
    }

    /// Adds several triggers in order.
    pub fn add_triggers(&mut self, triggers: impl IntoIterator<Item = Trigger>) {
        self.triggers.extend(triggers);
    }

    /// Executes every entity's DDL against a disposable database file.
    ///
    /// The file is removed before the connection opens and again when the
    /// run finishes, whether it succeeded or not.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError`](crate::CheckError) with the engine's error
    /// verbatim when a statement is rejected, a configuration error when
    /// an entity cannot render, or an I/O error from file cleanup.
    pub fn run(&self, db_path: impl AsRef<Path>) -> Result<()> {
        let guard = DisposableDb::create(db_path.as_ref())?;
        let conn = Connection::open(guard.path())?;
        self.execute_all(&conn)
        // conn and guard drop here; the file is gone on every exit path
    }

    /// Executes every entity's DDL against an in-memory database, for
    /// callers that only want the parse/reference check.
    pub fn run_in_memory(&self) -> Result<()> {
        let conn = Connection::open_in_memory()?;
        self.execute_all(&conn)
    }

    fn execute_all(&self, conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        for table in &self.tables {
            debug!(table = %table.name, "creating table");
            conn.execute_batch(&table.to_string())?;
        }
        for fts in &self.fts_tables {
            debug!(table = %fts.table_name(), "creating fts table");
            conn.execute_batch(&fts.sql()?)?;
            for trigger in fts.triggers()? {
                debug!(trigger = %trigger.name, "creating fts trigger");
                conn.execute_batch(&trigger.sql()?)?;
            }
        }
        for view in &self.views {
            debug!(view = %view.name, "creating view");
            conn.execute_batch(&view.sql()?)?;
        }
        for trigger in &self.triggers {
            debug!(trigger = %trigger.name, "creating trigger");
            conn.execute_batch(&trigger.sql()?)?;
        }
        Ok(())
    }
}

/// Scoped handle on the disposable database file: any stale file is
/// removed on creation, and the file is removed again on drop.
struct DisposableDb {
    path: PathBuf,
}

impl DisposableDb {
    fn create(path: &Path) -> io::Result<Self> {
        remove_if_present(path)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DisposableDb {
    fn drop(&mut self) {
        if let Err(err) = remove_if_present(&self.path) {
            warn!(path = %self.path.display(), %err, "failed to remove disposable database");
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposable_db_removes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.db");
        fs::write(&path, b"leftover").unwrap();

        let guard = DisposableDb::create(&path).unwrap();
        assert!(!path.exists());
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn test_disposable_db_removes_file_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("work.db");

        let guard = DisposableDb::create(&path).unwrap();
        fs::write(&path, b"db contents").unwrap();
        drop(guard);
        assert!(!path.exists());
    }
}
