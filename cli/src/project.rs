//! Declarative project files.
//!
//! Mirrors the builder API as serde types so a whole generation run can be
//! described in JSON or YAML. Loading converts the definitions through the
//! core builders, so every model invariant (the implicit `_id` column,
//! typed constraints) holds for file-loaded projects exactly as for
//! builder-constructed ones.

use std::path::PathBuf;

use serde::Deserialize;

use droidgen_core::{
    Check, Column, ConflictClause, ForeignKey, ForeignKeyAction, Fts3Table, ID_COLUMN, SqlType,
    Table, TableConstraint, Trigger, TriggerTiming, Unique, View,
};

/// Top-level project description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    /// Target Java package.
    pub package: String,
    /// SQLite database file name baked into the handler.
    #[serde(default = "default_database_name")]
    pub database: String,
    /// Source root to generate under; overridable on the command line.
    #[serde(default)]
    pub src_dir: Option<PathBuf>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
    #[serde(default)]
    pub triggers: Vec<TriggerDef>,
    #[serde(default)]
    pub views: Vec<ViewDef>,
    #[serde(default)]
    pub fts: Vec<FtsDef>,
}

fn default_database_name() -> String {
    droidgen_codegen::DEFAULT_DATABASE_NAME.to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub sql_type: SqlType,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub current_timestamp: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintDef {
    ForeignKey {
        column: String,
        references: String,
        #[serde(default)]
        references_column: Option<String>,
        #[serde(default)]
        on_delete: Option<ForeignKeyAction>,
    },
    Unique {
        columns: Vec<String>,
        #[serde(default)]
        on_conflict: Option<ConflictClause>,
    },
    Check {
        fragments: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriggerDef {
    pub name: String,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    pub timing: TriggerTiming,
    pub event: EventDef,
    pub body: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EventDef {
    Delete {
        table: String,
    },
    Insert {
        table: String,
    },
    Update {
        table: String,
        #[serde(default)]
        columns: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewDef {
    pub name: String,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub if_not_exists: bool,
    pub select: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FtsDef {
    pub table: String,
    pub columns: Vec<String>,
}

/// Builds a [`Table`] from its definition. A listed `_id` column is
/// skipped; the model owns it.
pub fn build_table(def: &TableDef) -> Table {
    let mut table = Table::new(&def.name);
    for column in &def.columns {
        if column.name == ID_COLUMN {
            continue;
        }
        table = table.with_column(build_column(column));
    }
    for constraint in &def.constraints {
        table = table.with_constraint(build_constraint(constraint));
    }
    table
}

fn build_column(def: &ColumnDef) -> Column {
    let mut column = Column::new(&def.name, def.sql_type);
    if def.not_null {
        column = column.not_null();
    }
    if def.primary_key {
        column = column.primary_key();
    }
    if let Some(literal) = &def.default {
        column = column.with_default(literal);
    }
    if def.current_timestamp {
        column = column.default_current_timestamp();
    }
    column
}

fn build_constraint(def: &ConstraintDef) -> TableConstraint {
    match def {
        ConstraintDef::ForeignKey {
            column,
            references,
            references_column,
            on_delete,
        } => {
            let mut fk = match references_column {
                Some(target) => ForeignKey::new(column).references_column(references, target),
                None => ForeignKey::new(column).references(references),
            };
            fk = match on_delete {
                Some(ForeignKeyAction::Cascade) => fk.on_delete_cascade(),
                Some(ForeignKeyAction::SetNull) => fk.on_delete_set_null(),
                Some(ForeignKeyAction::SetDefault) => fk.on_delete_set_default(),
                None => fk,
            };
            fk.into()
        }
        ConstraintDef::Unique {
            columns,
            on_conflict,
        } => {
            let unique = Unique::new(columns.iter().map(String::as_str));
            match on_conflict {
                Some(ConflictClause::Replace) => unique.on_conflict_replace(),
                Some(ConflictClause::Rollback) => unique.on_conflict_rollback(),
                Some(ConflictClause::Abort) => unique.on_conflict_abort(),
                Some(ConflictClause::Fail) => unique.on_conflict_fail(),
                Some(ConflictClause::Ignore) => unique.on_conflict_ignore(),
                None => unique,
            }
            .into()
        }
        ConstraintDef::Check { fragments } => Check::new(fragments.iter().map(String::as_str)).into(),
    }
}

/// Builds a [`Trigger`] from its definition.
pub fn build_trigger(def: &TriggerDef) -> Trigger {
    let mut trigger = Trigger::new(&def.name);
    if def.temporary {
        trigger = trigger.temporary();
    }
    if def.if_not_exists {
        trigger = trigger.if_not_exists();
    }
    trigger = match def.timing {
        TriggerTiming::Before => trigger.before(),
        TriggerTiming::After => trigger.after(),
        TriggerTiming::InsteadOf => trigger.instead_of(),
    };
    trigger = match &def.event {
        EventDef::Delete { table } => trigger.on_delete(table),
        EventDef::Insert { table } => trigger.on_insert(table),
        EventDef::Update { table, columns } if columns.is_empty() => trigger.on_update(table),
        EventDef::Update { table, columns } => {
            trigger.on_update_of(table, columns.iter().map(String::as_str))
        }
    };
    for statement in &def.body {
        trigger = trigger.with_statement(statement);
    }
    trigger
}

/// Builds a [`View`] from its definition.
pub fn build_view(def: &ViewDef) -> View {
    let mut view = View::new(&def.name).with_select(&def.select);
    if def.temporary {
        view = view.temporary();
    }
    if def.if_not_exists {
        view = view.if_not_exists();
    }
    view
}

/// Builds an [`Fts3Table`] from its definition.
pub fn build_fts(def: &FtsDef) -> Fts3Table {
    Fts3Table::mirroring(&def.table, def.columns.iter().map(String::as_str))
}
