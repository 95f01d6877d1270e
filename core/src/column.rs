//! Column definitions and their DDL rendering.
//!
//! A [`Column`] is a name, a [`SqlType`], and an ordered list of
//! [`ColumnConstraint`]s. Rendering concatenates the three, space-joined,
//! exactly as they appear in a `CREATE TABLE` column list. Each constraint
//! kind is held at most once; repeated builder calls replace the earlier
//! value rather than appending a duplicate keyword.

use std::fmt;

use serde::{Deserialize, Serialize};

/// SQL storage type of a column.
///
/// # Examples
///
/// ```
/// use droidgen_core::SqlType;
///
/// assert_eq!(SqlType::Integer.keyword(), "INTEGER");
/// assert_eq!(SqlType::default(), SqlType::Text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SqlType {
    /// UTF-8 text (the default).
    #[default]
    Text,
    /// 64-bit signed integer.
    Integer,
    /// Floating point value.
    Real,
    /// Timestamp, stored as text by SQLite.
    Timestamp,
}

impl SqlType {
    /// Returns the DDL keyword for this type.
    pub fn keyword(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Timestamp => "TIMESTAMP",
        }
    }
}

/// A single column constraint, rendered in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnConstraint {
    /// `NOT NULL`
    NotNull,
    /// `PRIMARY KEY`
    PrimaryKey,
    /// `DEFAULT <literal>` with the literal carried verbatim.
    Default(String),
    /// `DEFAULT CURRENT_TIMESTAMP`
    DefaultCurrentTimestamp,
}

impl ColumnConstraint {
    /// Two constraints are the same kind when only one of them may appear
    /// on a column. Both `DEFAULT` forms share a kind since SQL allows a
    /// single default clause.
    fn same_kind(&self, other: &ColumnConstraint) -> bool {
        use ColumnConstraint::*;
        matches!(
            (self, other),
            (NotNull, NotNull)
                | (PrimaryKey, PrimaryKey)
                | (Default(_) | DefaultCurrentTimestamp, Default(_) | DefaultCurrentTimestamp)
        )
    }
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnConstraint::NotNull => write!(f, "NOT NULL"),
            ColumnConstraint::PrimaryKey => write!(f, "PRIMARY KEY"),
            ColumnConstraint::Default(literal) => write!(f, "DEFAULT {literal}"),
            ColumnConstraint::DefaultCurrentTimestamp => write!(f, "DEFAULT CURRENT_TIMESTAMP"),
        }
    }
}

/// A column definition.
///
/// Built with a typed constructor and consuming builder methods; the
/// `Display` impl renders the column-list fragment of a `CREATE TABLE`
/// statement.
///
/// # Examples
///
/// ```
/// use droidgen_core::Column;
///
/// let age = Column::real("age").not_null().with_default("12");
/// assert_eq!(age.to_string(), "age REAL NOT NULL DEFAULT 12");
///
/// let id = Column::integer("_id").primary_key();
/// assert_eq!(id.to_string(), "_id INTEGER PRIMARY KEY");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as it appears in DDL and in generated code.
    pub name: String,
    /// Storage type.
    pub sql_type: SqlType,
    /// Constraints in application order, at most one per kind.
    pub constraints: Vec<ColumnConstraint>,
}

impl Column {
    /// Creates a column of the given type.
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            constraints: Vec::new(),
        }
    }

    /// Creates a TEXT column.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Text)
    }

    /// Creates an INTEGER column.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Integer)
    }

    /// Creates a REAL column.
    pub fn real(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Real)
    }

    /// Creates a TIMESTAMP column.
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, SqlType::Timestamp)
    }

    /// Adds `NOT NULL`.
    pub fn not_null(self) -> Self {
        self.constrain(ColumnConstraint::NotNull)
    }

    /// Adds `PRIMARY KEY`.
    pub fn primary_key(self) -> Self {
        self.constrain(ColumnConstraint::PrimaryKey)
    }

    /// Adds `DEFAULT <literal>`. The literal is rendered verbatim, so text
    /// defaults need their own quoting (e.g. `"''"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use droidgen_core::Column;
    ///
    /// let name = Column::text("name").not_null().with_default("''");
    /// assert_eq!(name.to_string(), "name TEXT NOT NULL DEFAULT ''");
    /// ```
    pub fn with_default(self, literal: impl Into<String>) -> Self {
        self.constrain(ColumnConstraint::Default(literal.into()))
    }

    /// Adds `DEFAULT CURRENT_TIMESTAMP`.
    pub fn default_current_timestamp(self) -> Self {
        self.constrain(ColumnConstraint::DefaultCurrentTimestamp)
    }

    /// Inserts a constraint, replacing an earlier one of the same kind in
    /// place so each kind renders exactly once.
    fn constrain(mut self, constraint: ColumnConstraint) -> Self {
        if let Some(existing) = self
            .constraints
            .iter_mut()
            .find(|c| c.same_kind(&constraint))
        {
            *existing = constraint;
        } else {
            self.constraints.push(constraint);
        }
        self
    }

    /// Whether the column carries `NOT NULL`.
    pub fn is_not_null(&self) -> bool {
        self.constraints.contains(&ColumnConstraint::NotNull)
    }

    /// Whether the column carries `PRIMARY KEY`.
    pub fn is_primary_key(&self) -> bool {
        self.constraints.contains(&ColumnConstraint::PrimaryKey)
    }

    /// Whether the column defaults to `CURRENT_TIMESTAMP`.
    pub fn has_current_timestamp_default(&self) -> bool {
        self.constraints
            .contains(&ColumnConstraint::DefaultCurrentTimestamp)
    }

    /// The `DEFAULT` literal, if one was set.
    pub fn default_literal(&self) -> Option<&str> {
        self.constraints.iter().find_map(|c| match c {
            ColumnConstraint::Default(literal) => Some(literal.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.sql_type.keyword())?;
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_column() {
        assert_eq!(Column::text("title").to_string(), "title TEXT");
        assert_eq!(Column::timestamp("time").to_string(), "time TIMESTAMP");
    }

    #[test]
    fn test_not_null_then_default_renders_in_order_once_each() {
        let rendered = Column::integer("age").not_null().with_default("18").to_string();
        assert_eq!(rendered, "age INTEGER NOT NULL DEFAULT 18");
        assert_eq!(rendered.matches("NOT NULL").count(), 1);
        assert_eq!(rendered.matches("DEFAULT").count(), 1);
    }

    #[test]
    fn test_duplicate_constraint_is_idempotent() {
        let rendered = Column::text("bio").not_null().not_null().to_string();
        assert_eq!(rendered.matches("NOT NULL").count(), 1);
    }

    #[test]
    fn test_repeated_default_replaces_literal_in_place() {
        let col = Column::integer("n").with_default("1").not_null().with_default("2");
        assert_eq!(col.to_string(), "n INTEGER DEFAULT 2 NOT NULL");
    }

    #[test]
    fn test_current_timestamp_shares_the_default_slot() {
        let col = Column::timestamp("time")
            .with_default("'1970-01-01'")
            .default_current_timestamp();
        assert_eq!(col.to_string(), "time TIMESTAMP DEFAULT CURRENT_TIMESTAMP");
        assert!(col.has_current_timestamp_default());
        assert_eq!(col.default_literal(), None);
    }

    #[test]
    fn test_accessors() {
        let col = Column::text("name").not_null().with_default("''");
        assert!(col.is_not_null());
        assert!(!col.is_primary_key());
        assert_eq!(col.default_literal(), Some("''"));
    }
}
