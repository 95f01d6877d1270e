//! File and package orchestration.
//!
//! [`Generator`] composes the per-class emitters into a file tree under
//! `<srcdir>/<package-as-nested-dirs>/` and reports what it wrote. Every
//! file write is a full overwrite; there is no partial-write recovery — a
//! failure partway through leaves whatever was already written.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use droidgen_core::{Fts3Table, Table, Trigger, View};

use crate::error::Result;
use crate::handler::HandlerClass;
use crate::item::{ItemClass, base_item_class, base_item_file_name};
use crate::java::{validate_identifier, validate_package};
use crate::provider::ProviderClass;
use crate::triggers::TriggersClass;
use crate::views::ViewsClass;

/// Database file name used when the caller does not set one.
pub const DEFAULT_DATABASE_NAME: &str = "SampleDB";

/// Orchestrates a full generation run.
///
/// # Examples
///
/// ```no_run
/// use droidgen_codegen::Generator;
/// use droidgen_core::{Column, Table};
///
/// let mut generator = Generator::new("./src", "com.example.app.database")
///     .with_database_name("PeopleDB");
/// generator.add_table(
///     Table::new("Person").with_column(Column::text("firstname").not_null()),
/// );
///
/// let report = generator.write().unwrap();
/// println!("{}", report.manifest_entry);
/// ```
pub struct Generator {
    src_dir: PathBuf,
    package: String,
    database_name: String,
    tables: Vec<Table>,
    triggers: Vec<Trigger>,
    views: Vec<View>,
    fts_tables: Vec<Fts3Table>,
}

impl Generator {
    /// Creates a generator writing under `src_dir` into the given dotted
    /// package.
    pub fn new(src_dir: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            src_dir: src_dir.into(),
            package: package.into(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            tables: Vec::new(),
            triggers: Vec::new(),
            views: Vec::new(),
            fts_tables: Vec::new(),
        }
    }

    /// Sets the SQLite database file name baked into the handler.
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }

    /// Adds a table; one item class is generated per table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Adds several tables in order.
    pub fn add_tables(&mut self, tables: impl IntoIterator<Item = Table>) {
        self.tables.extend(tables);
    }

    /// Adds a trigger to the generated installer class.
    pub fn add_trigger(&mut self, trigger: Trigger) {
        self.triggers.push(trigger);
    }

    /// Adds several triggers in order.
    pub fn add_triggers(&mut self, triggers: impl IntoIterator<Item = Trigger>) {
        self.triggers.extend(triggers);
    }

    /// Adds a view to the generated installer class.
    pub fn add_view(&mut self, view: View) {
        self.views.push(view);
    }

    /// Adds several views in order.
    pub fn add_views(&mut self, views: impl IntoIterator<Item = View>) {
        self.views.extend(views);
    }

    /// Adds an FTS3 mirror: its virtual table lands in the handler's
    /// `onCreate`, its three triggers in the installer class.
    pub fn add_fts_table(&mut self, fts: Fts3Table) {
        self.fts_tables.push(fts);
    }

    /// The directory all files are written into.
    pub fn package_dir(&self) -> PathBuf {
        self.src_dir.join(self.package.replace('.', "/"))
    }

    /// The `<provider/>` manifest fragment for this package.
    pub fn manifest_entry(&self) -> String {
        ProviderClass::new(&self.package).manifest_entry()
    }

    fn validate(&self) -> Result<()> {
        validate_package(&self.package)?;
        for table in &self.tables {
            validate_identifier(&table.name)?;
            for column in &table.columns {
                validate_identifier(&column.name)?;
            }
        }
        for trigger in &self.triggers {
            validate_identifier(&trigger.name)?;
        }
        for view in &self.views {
            validate_identifier(&view.name)?;
        }
        for fts in &self.fts_tables {
            validate_identifier(&fts.source_table)?;
        }
        Ok(())
    }

    /// Renders every class up front, so configuration errors surface
    /// before any file is touched.
    fn render_all(&self) -> Result<Vec<(String, String)>> {
        let mut handler = HandlerClass::new(&self.package, &self.database_name);
        let mut provider = ProviderClass::new(&self.package);
        let mut triggers = TriggersClass::new(&self.package);
        let mut views = ViewsClass::new(&self.package);

        triggers.add_triggers(self.triggers.iter().cloned());
        for fts in &self.fts_tables {
            handler.add_fts_table(fts.table_name(), fts.sql()?);
            triggers.add_triggers(fts.triggers()?);
        }
        views.add_views(self.views.iter().cloned());

        let mut files = Vec::new();
        for table in &self.tables {
            let item = ItemClass::new(table, &self.package);
            handler.add_item(item.class_name());
            provider.add_item(item.class_name());
            debug!(table = %table.name, class = %item.class_name(), "rendering item class");
            files.push((item.file_name(), item.render()));
        }

        files.push((base_item_file_name(), base_item_class(&self.package)));
        files.push((TriggersClass::file_name(), triggers.render()?));
        files.push((ViewsClass::file_name(), views.render()?));
        files.push((HandlerClass::file_name(), handler.render()));
        files.push((ProviderClass::file_name(), provider.render()));
        Ok(files)
    }

    /// Writes every generated file and returns the report.
    ///
    /// The package directory is created idempotently; each file write is a
    /// full overwrite of the destination path.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`](crate::GenerateError) on invalid
    /// package/identifier names, incomplete trigger/view/FTS
    /// configuration, or filesystem failures (propagated unchanged).
    pub fn write(&self) -> Result<GenerationReport> {
        self.validate()?;
        let files = self.render_all()?;

        let directory = self.package_dir();
        fs::create_dir_all(&directory)?;

        let mut written = Vec::with_capacity(files.len());
        for (file_name, contents) in files {
            let path = directory.join(&file_name);
            fs::write(&path, contents)?;
            info!(file = %path.display(), "wrote generated source");
            written.push(file_name);
        }

        Ok(GenerationReport {
            package: self.package.clone(),
            directory,
            files: written,
            manifest_entry: self.manifest_entry(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// What a generation run produced.
///
/// The `manifest_entry` is the side-channel output: the caller prints it
/// for manual insertion into the consuming project's manifest.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Target package.
    pub package: String,
    /// Directory the files were written into.
    pub directory: PathBuf,
    /// File names written, in write order.
    pub files: Vec<String>,
    /// `<provider/>` fragment for `AndroidManifest.xml`.
    pub manifest_entry: String,
    /// RFC 3339 timestamp of the run.
    pub generated_at: String,
}

impl GenerationReport {
    /// Full path of a written file.
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.directory.join(file_name)
    }

    /// Whether the run wrote the given file name.
    pub fn wrote(&self, file_name: &str) -> bool {
        self.files.iter().any(|name| name == file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use droidgen_core::Column;

    #[test]
    fn test_package_dir_nests_segments() {
        let generator = Generator::new("/tmp/src", "com.example.app.database");
        assert_eq!(
            generator.package_dir(),
            PathBuf::from("/tmp/src/com/example/app/database")
        );
    }

    #[test]
    fn test_invalid_package_is_rejected_before_writing() {
        let generator = Generator::new("/nonexistent", "Com.Bad.Package");
        match generator.write() {
            Err(GenerateError::InvalidPackage(pkg)) => assert_eq!(pkg, "Com.Bad.Package"),
            other => panic!("expected invalid package, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_column_name_is_rejected() {
        let mut generator = Generator::new("/nonexistent", "com.example.db");
        generator.add_table(
            Table::new("Person").with_column(Column::text("bad name")),
        );
        match generator.write() {
            Err(GenerateError::InvalidIdentifier(name)) => assert_eq!(name, "bad name"),
            other => panic!("expected invalid identifier, got {other:?}"),
        }
    }

    #[test]
    fn test_manifest_entry_matches_provider() {
        let generator = Generator::new("/tmp/src", "com.example.app.database");
        assert!(
            generator
                .manifest_entry()
                .contains("com.example.app.database.ItemProvider")
        );
    }
}
