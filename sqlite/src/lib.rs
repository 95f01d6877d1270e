//! DDL validation harness for the droidgen generator.
//!
//! The renderers in [`droidgen_core`] are purely textual; this crate is
//! the one component that checks the generated SQL semantically, by
//! executing it against a real (disposable) SQLite database with
//! foreign-key enforcement enabled. The engine acts as an opaque oracle:
//! its errors are surfaced verbatim and never interpreted or retried.
//!
//! # Example
//!
//! ```
//! use droidgen_core::{Column, Table, Trigger};
//! use droidgen_sqlite::SchemaCheck;
//!
//! let mut check = SchemaCheck::new();
//! check.add_table(Table::new("Log").with_column(Column::text("entry").not_null()));
//! check.add_trigger(
//!     Trigger::new("tr_touch")
//!         .after()
//!         .on_insert("Log")
//!         .with_statement("UPDATE Log SET entry = entry WHERE _id = new._id"),
//! );
//! check.run_in_memory().unwrap();
//! ```

mod checker;
mod error;

pub use checker::SchemaCheck;
pub use error::{CheckError, Result};
