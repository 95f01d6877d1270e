//! Java source emitters and file orchestration for the droidgen
//! generator.
//!
//! This crate turns the schema model from [`droidgen_core`] into an
//! Android ORM layer:
//!
//! - [`ItemClass`] — one data class per table (constants, projection
//!   array, typed fields, cursor constructor, `ContentValues`
//!   serialization, URI route codes).
//! - [`HandlerClass`] — the `SQLiteOpenHelper` subclass managing
//!   creation/upgrade and per-table accessors.
//! - [`TriggersClass`] / [`ViewsClass`] — installer classes for triggers
//!   and views.
//! - [`ProviderClass`] — the `ContentProvider` with URI routing, plus the
//!   manifest fragment the consuming project needs.
//! - [`Generator`] — composes the above into a file tree under a package
//!   path and returns a [`GenerationReport`].
//!
//! Route codes are derived with [`route_code`]: a SHA-256 digest prefix
//! of the class name salted per URI shape, stable across runs and
//! collision-free at the scale of one project's tables.
//!
//! # Example
//!
//! ```no_run
//! use droidgen_codegen::Generator;
//! use droidgen_core::{Column, Table};
//!
//! let mut generator = Generator::new("./sample/src", "com.example.appname.database");
//! generator.add_table(
//!     Table::new("Person")
//!         .with_column(Column::text("firstname").not_null().with_default("''")),
//! );
//!
//! let report = generator.write().unwrap();
//! println!("add to AndroidManifest.xml:\n{}", report.manifest_entry);
//! ```

mod error;
mod generator;
mod handler;
mod item;
mod java;
mod provider;
mod triggers;
mod views;

pub use error::{GenerateError, Result};
pub use generator::{DEFAULT_DATABASE_NAME, GenerationReport, Generator};
pub use handler::HandlerClass;
pub use item::{BASE_ITEM_SALT, BASE_URI_SALT, ItemClass, base_item_class, route_code};
pub use java::java_string_literal;
pub use provider::ProviderClass;
pub use triggers::TriggersClass;
pub use views::ViewsClass;
