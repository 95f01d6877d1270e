//! Validation example: run the schema through a real SQLite engine.
//!
//! The trigger deliberately references a table named `bob`, so the run
//! fails with the engine's unresolved-reference error. Fix the table name
//! to watch it pass.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p droidgen-demos --example sample_check
//! ```

use droidgen_core::{Column, ColumnFilter, Table, Trigger, Unique};
use droidgen_sqlite::SchemaCheck;

fn main() {
    let persons = Table::new("Person")
        .with_column(Column::text("firstname").not_null().with_default("''"))
        .with_column(Column::text("lastname").not_null().with_default("''"))
        .with_column(Column::text("bio").not_null().with_default("''"))
        .with_constraint(Unique::new(["firstname"]).on_conflict_replace());

    let log = Table::new("Log")
        .with_column(Column::integer("pId").not_null())
        .with_column(Column::text("firstname").not_null())
        .with_column(Column::text("lastname").not_null())
        .with_column(Column::text("bio").not_null())
        .with_column(Column::timestamp("time").default_current_timestamp());

    // Wrong table name on purpose: there is no table named bob.
    let trigger = Trigger::new("tr_log")
        .temporary()
        .if_not_exists()
        .after()
        .on_update("bob")
        .with_statement(format!(
            "INSERT INTO {table} ({cols}) VALUES ({oldcols})",
            table = log.name,
            cols = log.column_names_with(&ColumnFilter::new().exclude(["_id", "time"])),
            oldcols = persons
                .column_names_with(&ColumnFilter::new().prefix("old.").with_id()),
        ));

    let mut check = SchemaCheck::new();
    check.add_tables([persons, log]);
    check.add_trigger(trigger);

    match check.run("sample_check.db") {
        Ok(()) => println!("Schema OK."),
        Err(err) => println!("Schema rejected: {err}"),
    }
}
