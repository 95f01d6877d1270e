//! Schema model and DDL rendering for the droidgen generator.
//!
//! This crate defines the declarative description an Android SQLite
//! database is generated from:
//!
//! - [`Table`] / [`Column`] — tables with typed columns; every table owns
//!   an implicit leading `_id INTEGER PRIMARY KEY` column.
//! - [`ForeignKey`] / [`Unique`] / [`Check`] — table constraints.
//! - [`Trigger`] — BEFORE/AFTER/INSTEAD OF triggers with raw SQL bodies.
//! - [`View`] — views over a SELECT.
//! - [`Fts3Table`] — a full-text shadow table plus the three triggers that
//!   keep it synchronized with its source table.
//!
//! Tables and constraints render through `Display` (their string form is
//! the DDL). Triggers, views and FTS tables can be configured
//! incompletely, so they render through fallible `sql()` methods that
//! return a [`ConfigError`] naming the missing piece.
//!
//! # Example
//!
//! ```
//! use droidgen_core::{Column, ForeignKey, Table, Unique};
//!
//! let albums = Table::new("Album")
//!     .with_column(Column::text("albumname").not_null().with_default("''"))
//!     .with_column(Column::text("artistname").not_null())
//!     .with_constraint(
//!         ForeignKey::new("artistname")
//!             .references_column("artist", "name")
//!             .on_delete_cascade(),
//!     )
//!     .with_constraint(Unique::new(["albumname"]).on_conflict_replace());
//!
//! let ddl = albums.to_string();
//! assert!(ddl.starts_with("CREATE TABLE Album"));
//! assert!(ddl.contains("ON DELETE CASCADE"));
//! ```

mod column;
mod constraint;
mod error;
mod fts;
mod table;
mod trigger;
mod view;

pub use column::{Column, ColumnConstraint, SqlType};
pub use constraint::{Check, ConflictClause, ForeignKey, ForeignKeyAction, TableConstraint, Unique};
pub use error::{ConfigError, Result};
pub use fts::Fts3Table;
pub use table::{ColumnFilter, ID_COLUMN, Table};
pub use trigger::{Trigger, TriggerEvent, TriggerTiming};
pub use view::View;
