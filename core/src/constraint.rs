//! Table-level constraints: foreign keys, unique constraints and checks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// `ON CONFLICT` resolution for a [`Unique`] constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictClause {
    Replace,
    Rollback,
    Abort,
    Fail,
    Ignore,
}

impl ConflictClause {
    fn keyword(&self) -> &'static str {
        match self {
            ConflictClause::Replace => "REPLACE",
            ConflictClause::Rollback => "ROLLBACK",
            ConflictClause::Abort => "ABORT",
            ConflictClause::Fail => "FAIL",
            ConflictClause::Ignore => "IGNORE",
        }
    }
}

/// `ON DELETE` action for a [`ForeignKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForeignKeyAction {
    Cascade,
    SetNull,
    SetDefault,
}

impl ForeignKeyAction {
    fn clause(&self) -> &'static str {
        match self {
            ForeignKeyAction::Cascade => "ON DELETE CASCADE",
            ForeignKeyAction::SetNull => "ON DELETE SET NULL",
            ForeignKeyAction::SetDefault => "ON DELETE SET DEFAULT",
        }
    }
}

/// A foreign key constraint.
///
/// # Examples
///
/// ```
/// use droidgen_core::ForeignKey;
///
/// let fk = ForeignKey::new("listid").references("list").on_delete_cascade();
/// assert_eq!(
///     fk.to_string(),
///     "FOREIGN KEY (listid) REFERENCES list(_id) ON DELETE CASCADE"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Source column in the owning table.
    pub column: String,
    /// Referenced table.
    pub foreign_table: String,
    /// Referenced column, `_id` unless overridden.
    pub foreign_column: String,
    /// Optional `ON DELETE` action.
    pub action: Option<ForeignKeyAction>,
}

impl ForeignKey {
    /// Creates a foreign key on the given source column. The target column
    /// defaults to `_id`, the primary key every table owns.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            foreign_table: String::new(),
            foreign_column: "_id".to_string(),
            action: None,
        }
    }

    /// Points the key at a table's `_id` column.
    pub fn references(mut self, table: impl Into<String>) -> Self {
        self.foreign_table = table.into();
        self
    }

    /// Points the key at a specific column of a table.
    ///
    /// # Examples
    ///
    /// ```
    /// use droidgen_core::ForeignKey;
    ///
    /// let fk = ForeignKey::new("artistname").references_column("artist", "name");
    /// assert_eq!(fk.to_string(), "FOREIGN KEY (artistname) REFERENCES artist(name)");
    /// ```
    pub fn references_column(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        self.foreign_table = table.into();
        self.foreign_column = column.into();
        self
    }

    /// Deletes dependent rows when the referenced row is deleted.
    pub fn on_delete_cascade(mut self) -> Self {
        self.action = Some(ForeignKeyAction::Cascade);
        self
    }

    /// Nulls the source column when the referenced row is deleted.
    pub fn on_delete_set_null(mut self) -> Self {
        self.action = Some(ForeignKeyAction::SetNull);
        self
    }

    /// Resets the source column to its default when the referenced row is
    /// deleted.
    pub fn on_delete_set_default(mut self) -> Self {
        self.action = Some(ForeignKeyAction::SetDefault);
        self
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FOREIGN KEY ({}) REFERENCES {}({})",
            self.column, self.foreign_table, self.foreign_column
        )?;
        if let Some(action) = self.action {
            write!(f, " {}", action.clause())?;
        }
        Ok(())
    }
}

/// A unique constraint over one or more columns.
///
/// # Examples
///
/// ```
/// use droidgen_core::Unique;
///
/// assert_eq!(Unique::new(["name"]).to_string(), "UNIQUE(name)");
/// assert_eq!(
///     Unique::new(["artist", "album"]).on_conflict_replace().to_string(),
///     "UNIQUE(artist, album) ON CONFLICT REPLACE"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unique {
    /// Constrained column names.
    pub columns: Vec<String>,
    /// Optional conflict resolution.
    pub conflict: Option<ConflictClause>,
}

impl Unique {
    /// Creates a unique constraint over the given columns.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            conflict: None,
        }
    }

    /// Sets `ON CONFLICT REPLACE`.
    pub fn on_conflict_replace(self) -> Self {
        self.on_conflict(ConflictClause::Replace)
    }

    /// Sets `ON CONFLICT ROLLBACK`.
    pub fn on_conflict_rollback(self) -> Self {
        self.on_conflict(ConflictClause::Rollback)
    }

    /// Sets `ON CONFLICT ABORT`.
    pub fn on_conflict_abort(self) -> Self {
        self.on_conflict(ConflictClause::Abort)
    }

    /// Sets `ON CONFLICT FAIL`.
    pub fn on_conflict_fail(self) -> Self {
        self.on_conflict(ConflictClause::Fail)
    }

    /// Sets `ON CONFLICT IGNORE`.
    pub fn on_conflict_ignore(self) -> Self {
        self.on_conflict(ConflictClause::Ignore)
    }

    fn on_conflict(mut self, clause: ConflictClause) -> Self {
        self.conflict = Some(clause);
        self
    }
}

impl fmt::Display for Unique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UNIQUE({})", self.columns.join(", "))?;
        if let Some(conflict) = self.conflict {
            write!(f, " ON CONFLICT {}", conflict.keyword())?;
        }
        Ok(())
    }
}

/// A check constraint built from free-form expression fragments.
///
/// Fragments are joined with single spaces inside `CHECK (...)`.
///
/// # Examples
///
/// ```
/// use droidgen_core::Check;
///
/// let check = Check::new(["age", ">=", "0"]);
/// assert_eq!(check.to_string(), "CHECK (age >= 0)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Expression fragments, whitespace-joined at render time.
    pub fragments: Vec<String>,
}

impl Check {
    /// Creates a check constraint from expression fragments.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CHECK ({})", self.fragments.join(" "))
    }
}

/// Any table-level constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableConstraint {
    ForeignKey(ForeignKey),
    Unique(Unique),
    Check(Check),
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableConstraint::ForeignKey(fk) => fk.fmt(f),
            TableConstraint::Unique(unique) => unique.fmt(f),
            TableConstraint::Check(check) => check.fmt(f),
        }
    }
}

impl From<ForeignKey> for TableConstraint {
    fn from(fk: ForeignKey) -> Self {
        TableConstraint::ForeignKey(fk)
    }
}

impl From<Unique> for TableConstraint {
    fn from(unique: Unique) -> Self {
        TableConstraint::Unique(unique)
    }
}

impl From<Check> for TableConstraint {
    fn from(check: Check) -> Self {
        TableConstraint::Check(check)
    }
}
