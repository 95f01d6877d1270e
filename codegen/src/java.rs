//! Java source helpers shared by the emitters.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GenerateError, Result};

static PACKAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$").expect("static regex must compile")
});

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex must compile")
});

/// Escapes a multi-line SQL string into a Java concatenated string
/// literal, one quoted segment per source line.
///
/// # Examples
///
/// ```
/// use droidgen_codegen::java_string_literal;
///
/// let literal = java_string_literal("CREATE TABLE t\n  (a TEXT)");
/// assert_eq!(literal, "\"CREATE TABLE t\"\n+\"  (a TEXT)\"");
/// ```
pub fn java_string_literal(sql: &str) -> String {
    sql.lines()
        .map(|line| format!("\"{}\"", line.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join("\n+")
}

/// Checks that a package name is a dotted sequence of lowercase Java
/// identifiers.
pub(crate) fn validate_package(package: &str) -> Result<()> {
    if PACKAGE_RE.is_match(package) {
        Ok(())
    } else {
        Err(GenerateError::InvalidPackage(package.to_string()))
    }
}

/// Checks that a table or column name survives as both an SQL and a Java
/// identifier.
pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(())
    } else {
        Err(GenerateError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_quotes_each_line() {
        let literal = java_string_literal("a\nb\nc");
        assert_eq!(literal, "\"a\"\n+\"b\"\n+\"c\"");
    }

    #[test]
    fn test_literal_escapes_embedded_quotes() {
        assert_eq!(java_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_single_line_has_no_concatenation() {
        assert_eq!(java_string_literal("SELECT 1"), "\"SELECT 1\"");
    }

    #[test]
    fn test_package_validation() {
        assert!(validate_package("com.example.appname.database").is_ok());
        assert!(validate_package("db").is_ok());
        assert!(validate_package("Com.Example").is_err());
        assert!(validate_package("com..example").is_err());
        assert!(validate_package("com.1bad").is_err());
        assert!(validate_package("").is_err());
    }

    #[test]
    fn test_identifier_validation() {
        assert!(validate_identifier("_id").is_ok());
        assert!(validate_identifier("firstname").is_ok());
        assert!(validate_identifier("Person2").is_ok());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("drop table").is_err());
        assert!(validate_identifier("").is_err());
    }
}
