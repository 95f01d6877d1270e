//! Table definitions and `CREATE TABLE` rendering.
//!
//! Every [`Table`] is born with a leading `_id INTEGER PRIMARY KEY` column.
//! Column insertion order is significant twice over: it drives the DDL
//! column list and the positional cursor indices in generated code, so the
//! model never reorders columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::constraint::TableConstraint;

/// Name of the implicit integer primary key every table owns.
pub const ID_COLUMN: &str = "_id";

/// An SQL table: ordered columns and table constraints.
///
/// # Examples
///
/// ```
/// use droidgen_core::{Column, Table, Unique};
///
/// let table = Table::new("Artist")
///     .with_column(Column::text("artistname").not_null().with_default("''"))
///     .with_constraint(Unique::new(["artistname"]).on_conflict_replace());
///
/// let ddl = table.to_string();
/// assert!(ddl.starts_with("CREATE TABLE Artist"));
/// assert!(ddl.contains("_id INTEGER PRIMARY KEY,"));
/// assert!(ddl.contains("UNIQUE(artistname) ON CONFLICT REPLACE"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in declaration order, `_id` always first.
    pub columns: Vec<Column>,
    /// Table constraints in declaration order.
    pub constraints: Vec<TableConstraint>,
}

impl Table {
    /// Creates a table prepopulated with the `_id INTEGER PRIMARY KEY`
    /// column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![Column::integer(ID_COLUMN).primary_key()],
            constraints: Vec::new(),
        }
    }

    /// Appends a column.
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Appends several columns in order.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Appends a table constraint.
    pub fn with_constraint(mut self, constraint: impl Into<TableConstraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Appends several table constraints in order.
    pub fn with_constraints<I, C>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<TableConstraint>,
    {
        self.constraints.extend(constraints.into_iter().map(Into::into));
        self
    }

    /// Comma-joined column names with `_id` excluded, the common case for
    /// building trigger bodies.
    ///
    /// # Examples
    ///
    /// ```
    /// use droidgen_core::{Column, Table};
    ///
    /// let table = Table::new("Log")
    ///     .with_column(Column::text("who"))
    ///     .with_column(Column::text("what"));
    /// assert_eq!(table.column_names(), "who,what");
    /// ```
    pub fn column_names(&self) -> String {
        self.column_names_with(&ColumnFilter::new())
    }

    /// Comma-joined column names under an explicit [`ColumnFilter`].
    ///
    /// # Examples
    ///
    /// ```
    /// use droidgen_core::{Column, ColumnFilter, Table};
    ///
    /// let table = Table::new("Log")
    ///     .with_column(Column::text("who"))
    ///     .with_column(Column::text("what"));
    ///
    /// // An explicit empty exclusion keeps _id.
    /// let all = table.column_names_with(&ColumnFilter::new().exclude(Vec::<String>::new()));
    /// assert_eq!(all, "_id,who,what");
    ///
    /// // Prefixed, with the id forced in.
    /// let old = table.column_names_with(&ColumnFilter::new().prefix("old.").with_id());
    /// assert_eq!(old, "old._id,old.who,old.what");
    /// ```
    pub fn column_names_with(&self, filter: &ColumnFilter) -> String {
        let excluded: Vec<&str> = match &filter.exclude {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => vec![ID_COLUMN],
        };
        self.columns
            .iter()
            .map(|column| column.name.as_str())
            .filter(|name| {
                if filter.with_id && *name == ID_COLUMN {
                    return true;
                }
                !excluded.contains(name)
            })
            .map(|name| format!("{}{}", filter.prefix, name))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .columns
            .iter()
            .map(Column::to_string)
            .collect::<Vec<_>>()
            .join(",\n  ");
        let constraints = self
            .constraints
            .iter()
            .map(TableConstraint::to_string)
            .collect::<Vec<_>>()
            .join(",\n  ");
        write!(f, "CREATE TABLE {}\n  ({columns}\n\n  {constraints})", self.name)
    }
}

/// Selects and decorates the names returned by
/// [`Table::column_names_with`].
///
/// With no customization the implicit `_id` column is excluded; an explicit
/// exclusion list (even an empty one) replaces that default, and
/// [`with_id`](Self::with_id) forces `_id` back in regardless of exclusions.
#[derive(Debug, Clone, Default)]
pub struct ColumnFilter {
    exclude: Option<Vec<String>>,
    prefix: String,
    with_id: bool,
}

impl ColumnFilter {
    /// Creates the default filter: exclude `_id`, no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default exclusion with an explicit name list.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Prepends a prefix to every returned name (e.g. `"old."` for trigger
    /// bodies).
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Forces `_id` into the listing even when excluded.
    pub fn with_id(mut self) -> Self {
        self.with_id = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{ForeignKey, Unique};

    fn abc_table() -> Table {
        Table::new("T")
            .with_column(Column::text("a"))
            .with_column(Column::text("b"))
            .with_column(Column::text("c"))
    }

    #[test]
    fn test_ddl_starts_with_create_table_and_id_first() {
        let ddl = abc_table().to_string();
        assert!(ddl.starts_with("CREATE TABLE T\n  (_id INTEGER PRIMARY KEY,"));
    }

    #[test]
    fn test_empty_table_renders_id_only() {
        let ddl = Table::new("People").to_string();
        assert_eq!(ddl, "CREATE TABLE People\n  (_id INTEGER PRIMARY KEY\n\n  )");
    }

    #[test]
    fn test_columns_and_constraints_sections() {
        let ddl = Table::new("Albums")
            .with_column(Column::text("albumname").not_null().with_default("''"))
            .with_column(Column::text("artistname").not_null())
            .with_constraint(
                ForeignKey::new("artistname")
                    .references_column("artist", "name")
                    .on_delete_cascade(),
            )
            .with_constraint(Unique::new(["albumname"]).on_conflict_replace())
            .to_string();
        assert_eq!(
            ddl,
            "CREATE TABLE Albums\n  \
             (_id INTEGER PRIMARY KEY,\n  \
             albumname TEXT NOT NULL DEFAULT '',\n  \
             artistname TEXT NOT NULL\n\n  \
             FOREIGN KEY (artistname) REFERENCES artist(name) ON DELETE CASCADE,\n  \
             UNIQUE(albumname) ON CONFLICT REPLACE)"
        );
    }

    #[test]
    fn test_column_names_excludes_id_by_default() {
        assert_eq!(abc_table().column_names(), "a,b,c");
    }

    #[test]
    fn test_column_names_explicit_empty_exclusion_keeps_id() {
        let names = abc_table().column_names_with(&ColumnFilter::new().exclude(Vec::<String>::new()));
        assert_eq!(names, "_id,a,b,c");
    }

    #[test]
    fn test_column_names_prefix_and_with_id() {
        let names = abc_table().column_names_with(&ColumnFilter::new().prefix("old.").with_id());
        assert_eq!(names, "old._id,old.a,old.b,old.c");
    }

    #[test]
    fn test_column_names_custom_exclusion() {
        let names = abc_table().column_names_with(&ColumnFilter::new().exclude(["_id", "b"]));
        assert_eq!(names, "a,c");
    }

    #[test]
    fn test_serde_round_trip_preserves_column_order() {
        let table = abc_table();
        let json = serde_json::to_string(&table).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.columns[0].name, "_id");
    }
}
