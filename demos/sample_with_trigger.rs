//! Generation example with a logging trigger.
//!
//! A `Log` table shadows `Person`; a temporary trigger copies the old row
//! into the log on every update. The trigger body is assembled with the
//! column-name helpers so it stays in sync with the table definitions.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p droidgen-demos --example sample_with_trigger
//! ```

use droidgen_codegen::Generator;
use droidgen_core::{Column, ColumnFilter, Table, Trigger, Unique};

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

    // Temporary triggers are recreated on every open, which keeps them in
    // lockstep with the generated schema.
    let trigger = Trigger::new("tr_log")
        .temporary()
        .if_not_exists()
        .after()
        .on_update(&persons.name)
        .with_statement(format!(
            "INSERT INTO {table} ({cols}) VALUES ({oldcols})",
            table = log.name,
            cols = log.column_names_with(&ColumnFilter::new().exclude(["_id", "time"])),
            oldcols = persons
                .column_names_with(&ColumnFilter::new().prefix("old.").with_id()),
        ));

    let mut generator = Generator::new("./sample/src", "com.example.appname.database");
    generator.add_tables([persons, log]);
    generator.add_trigger(trigger);

    let report = generator.write().unwrap();

    println!("Wrote {} file(s) under {}.", report.files.len(), report.directory.display());
    println!("\nAdd this to AndroidManifest.xml inside <application>:\n");
    println!("{}", report.manifest_entry);
}
