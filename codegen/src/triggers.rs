//! `DatabaseTriggers` generation.
//!
//! Emits a class with `create(db)` for permanent triggers (dropped first,
//! then recreated) and `createTemp(db)` for temporary ones, plus one
//! `private static final String` per trigger holding its rendered DDL as
//! a Java string literal.

use droidgen_core::Trigger;

use crate::error::Result;
use crate::java::java_string_literal;

/// Generator for the `DatabaseTriggers` class.
///
/// # Examples
///
/// ```
/// use droidgen_codegen::TriggersClass;
/// use droidgen_core::Trigger;
///
/// let mut triggers = TriggersClass::new("com.example.app.database");
/// triggers.add_trigger(
///     Trigger::new("tr_log")
///         .temporary()
///         .if_not_exists()
///         .after()
///         .on_update("notes")
///         .with_statement("INSERT INTO log (noteid) VALUES (new._id)"),
/// );
///
/// let source = triggers.render().unwrap();
/// assert!(source.contains("public class DatabaseTriggers"));
/// assert!(source.contains("db.execSQL(tr_log);"));
/// ```
pub struct TriggersClass {
    package: String,
    triggers: Vec<Trigger>,
}

impl TriggersClass {
    /// Class name of the generated installer.
    pub const CLASS_NAME: &'static str = "DatabaseTriggers";

    /// Creates an empty generator for the given package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            triggers: Vec::new(),
        }
    }

    /// Registers a trigger.
    pub fn add_trigger(&mut self, trigger: Trigger) {
        self.triggers.push(trigger);
    }

    /// Registers several triggers in order.
    pub fn add_triggers(&mut self, triggers: impl IntoIterator<Item = Trigger>) {
        self.triggers.extend(triggers);
    }

    /// Generated file name.
    pub fn file_name() -> String {
        format!("{}.java", Self::CLASS_NAME)
    }

    /// Renders the complete Java source file.
    ///
    /// # Errors
    ///
    /// Propagates the first [`droidgen_core::ConfigError`] from an
    /// incompletely configured trigger.
    pub fn render(&self) -> Result<String> {
        let mut create_perm = String::new();
        let mut create_temp = String::new();
        let mut definitions = String::new();

        for trigger in &self.triggers {
            let name = &trigger.name;
            if trigger.temporary {
                create_temp.push_str(&format!("        db.execSQL({name});\n"));
            } else {
                create_perm.push_str(&format!(
                    "        db.execSQL(\"DROP TRIGGER IF EXISTS {name}\");\n        db.execSQL({name});\n"
                ));
            }
            definitions.push_str(&format!(
                "\n    private static final String {name} =\n{};\n",
                java_string_literal(&trigger.sql()?)
            ));
        }

        Ok(format!(
            r#"package {package};

import android.database.sqlite.SQLiteDatabase;

public class {classname} {{

    /**
     * Create permanent triggers. They are dropped first,
     * if they already exist.
     */
    public static void create(final SQLiteDatabase db) {{
{create_perm}    }}

    /**
     * Create temporary triggers. Nothing is done if they
     * already exist.
     */
    public static void createTemp(final SQLiteDatabase db) {{
{create_temp}    }}
{definitions}}}
"#,
            package = self.package,
            classname = Self::CLASS_NAME,
            create_perm = create_perm,
            create_temp = create_temp,
            definitions = definitions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidgen_core::ConfigError;

    fn archive_trigger() -> Trigger {
        Trigger::new("tr_archive")
            .temporary()
            .if_not_exists()
            .before()
            .on_delete("notes")
            .with_statement("INSERT INTO archive (noteid) VALUES (old._id)")
    }

    fn log_trigger() -> Trigger {
        Trigger::new("tr_log")
            .if_not_exists()
            .before()
            .on_update("notes")
            .with_statement("INSERT INTO log (noteid) VALUES (new._id)")
    }

    #[test]
    fn test_permanent_triggers_are_dropped_then_created() {
        let mut triggers = TriggersClass::new("com.example.appname.database");
        triggers.add_triggers([archive_trigger(), log_trigger()]);
        let source = triggers.render().unwrap();

        assert!(source.contains("db.execSQL(\"DROP TRIGGER IF EXISTS tr_log\");"));
        assert!(source.contains("db.execSQL(tr_log);"));
        // The temporary trigger is only installed by createTemp.
        assert!(!source.contains("DROP TRIGGER IF EXISTS tr_archive"));
        assert!(source.contains("db.execSQL(tr_archive);"));
    }

    #[test]
    fn test_definitions_embed_rendered_sql() {
        let mut triggers = TriggersClass::new("com.example.appname.database");
        triggers.add_trigger(archive_trigger());
        let source = triggers.render().unwrap();

        assert!(source.contains("private static final String tr_archive ="));
        assert!(source.contains("\"CREATE TEMP TRIGGER IF NOT EXISTS tr_archive\""));
        assert!(source.contains("+\"  BEFORE DELETE ON notes\""));
        assert!(source.contains("+\"  END\";"));
    }

    #[test]
    fn test_incomplete_trigger_fails_render() {
        let mut triggers = TriggersClass::new("com.example.appname.database");
        triggers.add_trigger(Trigger::new("broken").before().on_delete("x"));
        match triggers.render() {
            Err(crate::GenerateError::Config(ConfigError::EmptyBody(name))) => {
                assert_eq!(name, "broken");
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }
}
