//! `DatabaseViews` generation.
//!
//! Same shape as the trigger installer: `create(db)` drops and recreates
//! permanent views, `createTemp(db)` installs temporary ones, and each
//! view's DDL is embedded as a Java string literal.

use droidgen_core::View;

use crate::error::Result;
use crate::java::java_string_literal;

/// Generator for the `DatabaseViews` class.
///
/// # Examples
///
/// ```
/// use droidgen_codegen::ViewsClass;
/// use droidgen_core::View;
///
/// let mut views = ViewsClass::new("com.example.app.database");
/// views.add_view(View::new("adults").with_select("SELECT * FROM Person WHERE age >= 18"));
///
/// let source = views.render().unwrap();
/// assert!(source.contains("db.execSQL(\"DROP VIEW IF EXISTS adults\");"));
/// ```
pub struct ViewsClass {
    package: String,
    views: Vec<View>,
}

impl ViewsClass {
    /// Class name of the generated installer.
    pub const CLASS_NAME: &'static str = "DatabaseViews";

    /// Creates an empty generator for the given package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            views: Vec::new(),
        }
    }

    /// Registers a view.
    pub fn add_view(&mut self, view: View) {
        self.views.push(view);
    }

    /// Registers several views in order.
    pub fn add_views(&mut self, views: impl IntoIterator<Item = View>) {
        self.views.extend(views);
    }

    /// Generated file name.
    pub fn file_name() -> String {
        format!("{}.java", Self::CLASS_NAME)
    }

    /// Renders the complete Java source file.
    ///
    /// # Errors
    ///
    /// Propagates the first [`droidgen_core::ConfigError`] from a view
    /// without a SELECT.
    pub fn render(&self) -> Result<String> {
        let mut create_perm = String::new();
        let mut create_temp = String::new();
        let mut definitions = String::new();

        for view in &self.views {
            let name = &view.name;
            if view.temporary {
                create_temp.push_str(&format!("        db.execSQL({name});\n"));
            } else {
                create_perm.push_str(&format!(
                    "        db.execSQL(\"DROP VIEW IF EXISTS {name}\");\n        db.execSQL({name});\n"
                ));
            }
            definitions.push_str(&format!(
                "\n    private static final String {name} =\n{};\n",
                java_string_literal(&view.sql()?)
            ));
        }

        Ok(format!(
            r#"package {package};

import android.database.sqlite.SQLiteDatabase;

public class {classname} {{

    /**
     * Create permanent views. They are dropped first,
     * if they already exist.
     */
    public static void create(final SQLiteDatabase db) {{
{create_perm}    }}

    /**
     * Create temporary views. Nothing is done if they
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
