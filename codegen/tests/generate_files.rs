//! Integration tests for the droidgen-codegen crate: full generation runs
//! writing real files under a temporary source root.

use std::fs;

use droidgen_codegen::Generator;
use droidgen_core::{Column, Fts3Table, ForeignKey, Table, Trigger, Unique, View};

fn persons_table() -> Table {
    Table::new("Person")
        .with_column(Column::text("firstname").not_null().with_default("''"))
        .with_column(Column::text("lastname").not_null().with_default("''"))
        .with_column(Column::text("bio").not_null().with_default("''"))
        .with_constraint(Unique::new(["firstname"]).on_conflict_replace())
}

fn log_table() -> Table {
    Table::new("Log")
        .with_column(Column::integer("pId").not_null())
        .with_column(Column::text("firstname").not_null())
        .with_column(Column::timestamp("time").default_current_timestamp())
}

#[test]
fn test_write_produces_full_file_set_under_package_path() {
    let dir = tempfile::tempdir().unwrap();

    let mut generator = Generator::new(dir.path(), "com.example.appname.database")
        .with_database_name("PeopleDB");
    generator.add_tables([persons_table(), log_table()]);

    let report = generator.write().unwrap();

    let expected_dir = dir.path().join("com/example/appname/database");
    assert_eq!(report.directory, expected_dir);
    for file_name in [
        "PersonItem.java",
        "LogItem.java",
        "DBItem.java",
        "DatabaseTriggers.java",
        "DatabaseViews.java",
        "DatabaseHandler.java",
        "ItemProvider.java",
    ] {
        assert!(report.wrote(file_name), "missing from report: {file_name}");
        assert!(
            expected_dir.join(file_name).is_file(),
            "missing on disk: {file_name}"
        );
    }

    let handler = fs::read_to_string(expected_dir.join("DatabaseHandler.java")).unwrap();
    assert!(handler.contains("DATABASE_NAME = \"PeopleDB\""));
    assert!(handler.contains("db.execSQL(PersonItem.CREATE_TABLE);"));
    assert!(handler.contains("db.execSQL(LogItem.CREATE_TABLE);"));

    let person = fs::read_to_string(expected_dir.join("PersonItem.java")).unwrap();
    assert!(person.contains("package com.example.appname.database;"));
    assert!(person.contains("public class PersonItem extends DBItem"));

    assert!(report.manifest_entry.contains("com.example.appname.database.ItemProvider"));
}

#[test]
fn test_write_is_idempotent_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();

    let mut generator = Generator::new(dir.path(), "com.example.db");
    generator.add_table(persons_table());
    generator.write().unwrap();

    // A second run over the same directory succeeds and overwrites.
    let mut generator = Generator::new(dir.path(), "com.example.db")
        .with_database_name("RenamedDB");
    generator.add_table(persons_table());
    let report = generator.write().unwrap();

    let handler = fs::read_to_string(report.path_of("DatabaseHandler.java")).unwrap();
    assert!(handler.contains("DATABASE_NAME = \"RenamedDB\""));
}

#[test]
fn test_triggers_views_and_fts_flow_into_generated_classes() {
    let dir = tempfile::tempdir().unwrap();

    let mut generator = Generator::new(dir.path(), "com.example.db");
    generator.add_tables([persons_table(), log_table()]);
    generator.add_trigger(
        Trigger::new("tr_log")
            .temporary()
            .if_not_exists()
            .after()
            .on_update("Person")
            .with_statement(
                "INSERT INTO Log (pId,firstname) VALUES (old._id,old.firstname)",
            ),
    );
    generator.add_view(
        View::new("person_names").with_select("SELECT firstname,lastname FROM Person"),
    );
    generator.add_fts_table(Fts3Table::mirroring("Person", ["firstname", "bio"]));

    let report = generator.write().unwrap();

    let triggers = fs::read_to_string(report.path_of("DatabaseTriggers.java")).unwrap();
    assert!(triggers.contains("private static final String tr_log ="));
    // The three FTS synchronization triggers ride along.
    assert!(triggers.contains("Person_fts_insert"));
    assert!(triggers.contains("Person_fts_delete"));
    assert!(triggers.contains("Person_fts_update"));

    let views = fs::read_to_string(report.path_of("DatabaseViews.java")).unwrap();
    assert!(views.contains("private static final String person_names ="));

    let handler = fs::read_to_string(report.path_of("DatabaseHandler.java")).unwrap();
    assert!(handler.contains("DROP TABLE IF EXISTS Person_fts"));
    assert!(handler.contains("CREATE VIRTUAL TABLE Person_fts USING fts3(firstname, bio)"));
}

#[test]
fn test_incomplete_trigger_aborts_before_any_file_is_written() {
    let dir = tempfile::tempdir().unwrap();

    let mut generator = Generator::new(dir.path(), "com.example.db");
    generator.add_table(persons_table());
    generator.add_trigger(Trigger::new("broken").after().on_delete("Person"));

    assert!(generator.write().is_err());
    // Rendering happens before directory creation, so nothing landed.
    assert!(!dir.path().join("com").exists());
}

#[test]
fn test_foreign_keys_survive_into_create_table_literal() {
    let dir = tempfile::tempdir().unwrap();

    let albums = Table::new("Album")
        .with_column(Column::text("albumname").not_null().with_default("''"))
        .with_column(Column::integer("artistid").not_null())
        .with_constraint(ForeignKey::new("artistid").references("Artist").on_delete_cascade());

    let mut generator = Generator::new(dir.path(), "com.example.db");
    generator.add_tables([Table::new("Artist"), albums]);
    let report = generator.write().unwrap();

    let album = fs::read_to_string(report.path_of("AlbumItem.java")).unwrap();
    assert!(album.contains("FOREIGN KEY (artistid) REFERENCES Artist(_id) ON DELETE CASCADE"));
}
