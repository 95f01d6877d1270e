//! Minimal generation example: one table, full ORM layer.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p droidgen-demos --example sample
//! ```

use droidgen_codegen::Generator;
use droidgen_core::{Column, Table};

fn main() {
    let persons = Table::new("Person")
        .with_column(Column::text("firstname").not_null().with_default("''"))
        .with_column(Column::text("lastname").not_null().with_default("''"))
        .with_column(Column::text("bio").not_null().with_default("''"));

    let mut generator = Generator::new("./sample/src", "com.example.appname.database");
    generator.add_table(persons);

    let report = generator.write().unwrap();

    println!("Wrote {} file(s) under {}:", report.files.len(), report.directory.display());
    for file in &report.files {
        println!("  {file}");
    }

    println!("\nAdd this to AndroidManifest.xml inside <application>:\n");
    println!("{}", report.manifest_entry);
}
