//! View definitions and `CREATE VIEW` rendering.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// An SQL view over a SELECT statement.
///
/// # Examples
///
/// ```
/// use droidgen_core::View;
///
/// let view = View::new("adults")
///     .with_select("SELECT * FROM Person WHERE age >= 18");
/// assert_eq!(
///     view.sql().unwrap(),
///     "CREATE VIEW adults AS SELECT * FROM Person WHERE age >= 18"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// View name.
    pub name: String,
    /// `CREATE TEMP VIEW` when set.
    pub temporary: bool,
    /// `IF NOT EXISTS` when set.
    pub if_not_exists: bool,
    /// The SELECT the view is defined as.
    pub select: Option<String>,
}

impl View {
    /// Creates an empty view definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporary: false,
            if_not_exists: false,
            select: None,
        }
    }

    /// Marks the view `TEMP`.
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// Adds `IF NOT EXISTS`.
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// Sets the SELECT statement the view is defined as.
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    /// Renders the `CREATE VIEW` statement.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSelect`] when no SELECT was set.
    pub fn sql(&self) -> Result<String> {
        let select = self
            .select
            .as_deref()
            .ok_or_else(|| ConfigError::MissingSelect(self.name.clone()))?;

        let mut out = String::from("CREATE ");
        if self.temporary {
            out.push_str("TEMP ");
        }
        out.push_str("VIEW ");
        if self.if_not_exists {
            out.push_str("IF NOT EXISTS ");
        }
        out.push_str(&self.name);
        out.push_str(" AS ");
        out.push_str(select);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_if_not_exists_render() {
        let sql = View::new("v")
            .temporary()
            .if_not_exists()
            .with_select("SELECT 1")
            .sql()
            .unwrap();
        assert_eq!(sql, "CREATE TEMP VIEW IF NOT EXISTS v AS SELECT 1");
    }

    #[test]
    fn test_missing_select_is_a_config_error() {
        assert_eq!(
            View::new("v").sql(),
            Err(ConfigError::MissingSelect("v".to_string()))
        );
    }
}
