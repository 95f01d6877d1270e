//! ORM data-class generation.
//!
//! [`ItemClass`] turns one [`Table`] into the Java source of a
//! `<Table>Item` class: column-name constants, a `FIELDS` projection
//! array, typed fields, a cursor constructor, `ContentValues`
//! serialization, URI-matcher registration, and the embedded
//! `CREATE TABLE` literal. Column order is load-bearing: the cursor
//! indices assigned in the constructor are the positions of the constants
//! in `FIELDS`, so both are derived from the same iteration.

use droidgen_core::{Column, ID_COLUMN, SqlType, Table};
use sha2::{Digest, Sha256};

use crate::java::java_string_literal;

/// Salt for a table's collection route code.
pub const BASE_URI_SALT: &str = "baseuri";
/// Salt for a table's single-item route code.
pub const BASE_ITEM_SALT: &str = "baseitem";

/// Derives the stable URI-matcher code for a generated class name and
/// salt: the first 7 hex digits of `SHA-256(class_name || salt)` read as
/// an integer.
///
/// The codes only need to be deterministic and collision-free across the
/// tables of one generation run; nothing about them is security-relevant.
///
/// # Examples
///
/// ```
/// use droidgen_codegen::{BASE_URI_SALT, route_code};
///
/// let a = route_code("PersonItem", BASE_URI_SALT);
/// let b = route_code("PersonItem", BASE_URI_SALT);
/// assert_eq!(a, b);
/// ```
pub fn route_code(class_name: &str, salt: &str) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(class_name.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = hasher.finalize();
    // 28 bits = 7 hex digits of the digest prefix.
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) >> 4
}

/// Java-side view of a single column.
pub(crate) struct JavaColumn<'a> {
    column: &'a Column,
}

impl<'a> JavaColumn<'a> {
    pub(crate) fn new(column: &'a Column) -> Self {
        Self { column }
    }

    /// Field name, identical to the column name.
    pub(crate) fn var_name(&self) -> &str {
        &self.column.name
    }

    /// Constant name: `COL_` + uppercased column name with leading
    /// underscores stripped (`_id` becomes `COL_ID`).
    pub(crate) fn const_name(&self) -> String {
        let upper = self.column.name.to_uppercase();
        format!("COL_{}", upper.trim_start_matches('_'))
    }

    /// The row id stays primitive (`getId()` returns `long`); other
    /// columns box when they lack NOT NULL so a missing value is
    /// representable.
    fn boxed(&self) -> bool {
        !self.column.is_not_null() && self.column.name != ID_COLUMN
    }

    pub(crate) fn java_type(&self) -> &'static str {
        match (self.column.sql_type, self.boxed()) {
            (SqlType::Integer, false) => "long",
            (SqlType::Integer, true) => "Long",
            (SqlType::Real, false) => "float",
            (SqlType::Real, true) => "Float",
            (SqlType::Timestamp | SqlType::Text, _) => "String",
        }
    }

    fn cursor_getter(&self) -> &'static str {
        match self.column.sql_type {
            SqlType::Integer => "Long",
            SqlType::Real => "Float",
            SqlType::Timestamp | SqlType::Text => "String",
        }
    }

    /// Cursor extraction expression for this column at the given
    /// projection index.
    pub(crate) fn cursor_get(&self, index: usize) -> String {
        let getter = self.cursor_getter();
        if self.boxed() {
            format!("cursor.isNull({index}) ? null : cursor.get{getter}({index})")
        } else {
            format!("cursor.get{getter}({index})")
        }
    }

    /// Field initializer, when the column calls for one.
    pub(crate) fn default_value(&self) -> Option<String> {
        if self.column.is_primary_key() {
            // Row ids start at 1; -1 marks "not yet inserted".
            return Some("-1".to_string());
        }
        if self.column.has_current_timestamp_default() {
            return Some("null".to_string());
        }
        let literal = self.column.default_literal()?;
        let literal = literal.replace('\'', "\"");
        Some(match (self.column.sql_type, self.boxed()) {
            (SqlType::Integer, true) => format!("{literal}L"),
            (SqlType::Real, true) => format!("{literal}f"),
            _ => literal,
        })
    }

    pub(crate) fn declare_const(&self) -> String {
        format!(
            "public static final String {} = \"{}\";",
            self.const_name(),
            self.var_name()
        )
    }

    pub(crate) fn declare_var(&self) -> String {
        match self.default_value() {
            Some(value) => format!("public {} {} = {value};", self.java_type(), self.var_name()),
            None => format!("public {} {};", self.java_type(), self.var_name()),
        }
    }

    /// The `getContent()` fragment writing this column into a
    /// `ContentValues`. NOT NULL columns write unconditionally,
    /// CURRENT_TIMESTAMP-default columns write only when set, everything
    /// else writes value-or-null.
    pub(crate) fn content_value_put(&self) -> String {
        let const_name = self.const_name();
        let var = self.var_name();
        if self.column.has_current_timestamp_default() {
            format!("if ({var} != null)\n            values.put({const_name}, {var});")
        } else if self.column.is_not_null() {
            format!("values.put({const_name}, {var});")
        } else {
            format!(
                "if ({var} != null) {{\n            values.put({const_name}, {var});\n        }} else {{\n            values.putNull({const_name});\n        }}"
            )
        }
    }
}

/// Generator for one table's ORM data class.
///
/// # Examples
///
/// ```
/// use droidgen_codegen::ItemClass;
/// use droidgen_core::{Column, Table};
///
/// let table = Table::new("Person").with_column(Column::text("name").not_null());
/// let item = ItemClass::new(&table, "com.example.app.database");
/// assert_eq!(item.class_name(), "PersonItem");
///
/// let source = item.render();
/// assert!(source.contains("public class PersonItem extends DBItem"));
/// assert!(source.contains("COL_ID, COL_NAME"));
/// ```
pub struct ItemClass<'a> {
    table: &'a Table,
    package: String,
}

impl<'a> ItemClass<'a> {
    /// Creates the generator for a table in the given package.
    pub fn new(table: &'a Table, package: impl Into<String>) -> Self {
        Self {
            table,
            package: package.into(),
        }
    }

    /// Generated class name, `<Table>Item`.
    pub fn class_name(&self) -> String {
        format!("{}Item", self.table.name)
    }

    /// Generated file name.
    pub fn file_name(&self) -> String {
        format!("{}.java", self.class_name())
    }

    /// Route code matching the whole-table content URI.
    pub fn base_uri_code(&self) -> u32 {
        route_code(&self.class_name(), BASE_URI_SALT)
    }

    /// Route code matching a single-row content URI.
    pub fn base_item_code(&self) -> u32 {
        route_code(&self.class_name(), BASE_ITEM_SALT)
    }

    /// Renders the complete Java source file.
    pub fn render(&self) -> String {
        let columns: Vec<JavaColumn<'_>> =
            self.table.columns.iter().map(JavaColumn::new).collect();

        let column_constants = columns
            .iter()
            .map(JavaColumn::declare_const)
            .collect::<Vec<_>>()
            .join("\n    ");
        let constants_list = columns
            .iter()
            .map(JavaColumn::const_name)
            .collect::<Vec<_>>()
            .join(", ");
        let column_vars = columns
            .iter()
            .map(JavaColumn::declare_var)
            .collect::<Vec<_>>()
            .join("\n    ");
        let cursor_fields = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                format!("this.{} = {};", column.var_name(), column.cursor_get(index))
            })
            .collect::<Vec<_>>()
            .join("\n        ");
        let content_values = columns
            .iter()
            .filter(|column| column.var_name() != ID_COLUMN)
            .map(JavaColumn::content_value_put)
            .collect::<Vec<_>>()
            .join("\n        ");
        let create_table = java_string_literal(&self.table.to_string());
        let baseuricode = format!("0x{:07x}", self.base_uri_code());
        let baseitemcode = format!("0x{:07x}", self.base_item_code());

        format!(
            r#"package {package};

import android.content.ContentValues;
import android.content.UriMatcher;
import android.database.Cursor;
import android.net.Uri;

/**
 * Represents {table} in the database.
 */
public class {classname} extends DBItem {{
    public static final String TABLE_NAME = "{table}";

    public static Uri URI() {{
        return Uri.withAppendedPath(
            Uri.parse(ItemProvider.SCHEME
                      + ItemProvider.AUTHORITY), TABLE_NAME);
    }}

    // Column names
    {column_constants}

    // For database projection so order is consistent
    public static final String[] FIELDS = {{ {constants_list} }};

    {column_vars}

    public static final int BASEURICODE = {baseuricode};
    public static final int BASEITEMCODE = {baseitemcode};

    public static void addMatcherUris(UriMatcher sURIMatcher) {{
        sURIMatcher.addURI(ItemProvider.AUTHORITY, TABLE_NAME, BASEURICODE);
        sURIMatcher.addURI(ItemProvider.AUTHORITY, TABLE_NAME + "/#", BASEITEMCODE);
    }}

    public static final String TYPE_DIR = "vnd.android.cursor.dir/vnd.{package}." + TABLE_NAME;
    public static final String TYPE_ITEM = "vnd.android.cursor.item/vnd.{package}." + TABLE_NAME;

    public {classname}() {{
        super();
    }}

    public {classname}(final Cursor cursor) {{
        super();
        // Projection expected to match FIELDS array
        {cursor_fields}
    }}

    public ContentValues getContent() {{
        final ContentValues values = new ContentValues();
        {content_values}

        return values;
    }}

    public String getTableName() {{
        return TABLE_NAME;
    }}

    public String[] getFields() {{
        return FIELDS;
    }}

    public long getId() {{
        return _id;
    }}

    public void setId(final long id) {{
        _id = id;
    }}

    public static final String CREATE_TABLE =
{create_table};
}}
"#,
            package = self.package,
            table = self.table.name,
            classname = self.class_name(),
            column_constants = column_constants,
            constants_list = constants_list,
            column_vars = column_vars,
            baseuricode = baseuricode,
            baseitemcode = baseitemcode,
            cursor_fields = cursor_fields,
            content_values = content_values,
            create_table = create_table,
        )
    }
}

/// Renders the abstract `DBItem` base class every item class extends.
pub fn base_item_class(package: &str) -> String {
    format!(
        r#"package {package};

import android.content.ContentValues;
import android.content.Context;
import android.database.Cursor;
import android.net.Uri;

public abstract class DBItem {{
    public static final String COL_ID = "_id";

    public DBItem() {{}}

    public DBItem(final Cursor cursor) {{}}

    public abstract ContentValues getContent();

    public abstract String getTableName();

    public abstract long getId();

    public abstract void setId(final long id);

    public abstract String[] getFields();

    public Uri getUri() {{
        return Uri.withAppendedPath(getBaseUri(), Long.toString(getId()));
    }}

    public Uri getBaseUri() {{
        return Uri.withAppendedPath(
            Uri.parse(ItemProvider.SCHEME
                      + ItemProvider.AUTHORITY), getTableName());
    }}

    public void notifyProvider(final Context context) {{
        try {{
            context.getContentResolver().notifyChange(getUri(), null, false);
        }}
        catch (UnsupportedOperationException e) {{
            // Mock providers in the test suite cannot notify
        }}
    }}
}}
"#
    )
}

/// File name of the abstract base class.
pub fn base_item_file_name() -> String {
    "DBItem.java".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use droidgen_core::Column;

    fn person_table() -> Table {
        Table::new("Person")
            .with_column(Column::text("firstname").not_null())
            .with_column(Column::text("lastname").not_null())
            .with_column(Column::text("bio").not_null())
    }

    #[test]
    fn test_route_code_is_deterministic() {
        assert_eq!(
            route_code("PersonItem", BASE_URI_SALT),
            route_code("PersonItem", BASE_URI_SALT)
        );
    }

    #[test]
    fn test_route_codes_differ_across_names_and_salts() {
        let names = ["PersonItem", "LogItem", "AlbumItem", "ArtistItem", "TaskItem"];
        let mut codes: Vec<u32> = names
            .iter()
            .flat_map(|name| {
                [
                    route_code(name, BASE_URI_SALT),
                    route_code(name, BASE_ITEM_SALT),
                ]
            })
            .collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), names.len() * 2);
    }

    #[test]
    fn test_route_code_fits_seven_hex_digits() {
        assert!(route_code("PersonItem", BASE_URI_SALT) <= 0xFFF_FFFF);
    }

    #[test]
    fn test_const_name_strips_leading_underscores() {
        let id = Column::integer("_id").primary_key();
        assert_eq!(JavaColumn::new(&id).const_name(), "COL_ID");
        let plain = Column::text("firstname");
        assert_eq!(JavaColumn::new(&plain).const_name(), "COL_FIRSTNAME");
    }

    #[test]
    fn test_java_type_boxing_follows_not_null() {
        assert_eq!(JavaColumn::new(&Column::integer("n").not_null()).java_type(), "long");
        assert_eq!(JavaColumn::new(&Column::integer("n")).java_type(), "Long");
        assert_eq!(JavaColumn::new(&Column::real("x").not_null()).java_type(), "float");
        assert_eq!(JavaColumn::new(&Column::real("x")).java_type(), "Float");
        assert_eq!(JavaColumn::new(&Column::timestamp("t")).java_type(), "String");
        assert_eq!(JavaColumn::new(&Column::text("s")).java_type(), "String");
    }

    #[test]
    fn test_id_column_is_primitive_with_sentinel() {
        let id = Column::integer("_id").primary_key();
        let java = JavaColumn::new(&id);
        assert_eq!(java.java_type(), "long");
        assert_eq!(java.declare_var(), "public long _id = -1;");
        assert_eq!(java.cursor_get(0), "cursor.getLong(0)");
    }

    #[test]
    fn test_nullable_cursor_get_guards_with_is_null() {
        let col = Column::text("bio");
        assert_eq!(
            JavaColumn::new(&col).cursor_get(3),
            "cursor.isNull(3) ? null : cursor.getString(3)"
        );
    }

    #[test]
    fn test_default_literal_swaps_quotes() {
        let col = Column::text("name").not_null().with_default("''");
        assert_eq!(JavaColumn::new(&col).declare_var(), "public String name = \"\";");
    }

    #[test]
    fn test_boxed_numeric_defaults_get_suffixes() {
        let age = Column::integer("age").with_default("18");
        assert_eq!(JavaColumn::new(&age).declare_var(), "public Long age = 18L;");
        let score = Column::real("score").with_default("0.5");
        assert_eq!(JavaColumn::new(&score).declare_var(), "public Float score = 0.5f;");
    }

    #[test]
    fn test_current_timestamp_content_value_is_conditional() {
        let col = Column::timestamp("time").default_current_timestamp();
        let put = JavaColumn::new(&col).content_value_put();
        assert!(put.starts_with("if (time != null)"));
        assert!(!put.contains("putNull"));
    }

    #[test]
    fn test_nullable_content_value_puts_null() {
        let put = JavaColumn::new(&Column::text("bio")).content_value_put();
        assert!(put.contains("values.put(COL_BIO, bio);"));
        assert!(put.contains("values.putNull(COL_BIO);"));
    }

    // End-to-end ordering property: FIELDS lists the constants in column
    // declaration order and the cursor constructor assigns matching
    // indices, _id first at index 0.
    #[test]
    fn test_fields_order_matches_cursor_indices() {
        let table = person_table();
        let source = ItemClass::new(&table, "com.example.app.database").render();

        assert!(source.contains(
            "public static final String[] FIELDS = { COL_ID, COL_FIRSTNAME, COL_LASTNAME, COL_BIO };"
        ));
        assert!(source.contains("this._id = cursor.getLong(0);"));
        assert!(source.contains("this.firstname = cursor.getString(1);"));
        assert!(source.contains("this.lastname = cursor.getString(2);"));
        assert!(source.contains("this.bio = cursor.getString(3);"));
    }

    #[test]
    fn test_render_embeds_create_table_literal() {
        let table = person_table();
        let source = ItemClass::new(&table, "com.example.app.database").render();
        assert!(source.contains("public static final String CREATE_TABLE =\n\"CREATE TABLE Person\""));
        assert!(source.contains("+\"  (_id INTEGER PRIMARY KEY,\""));
    }

    #[test]
    fn test_render_carries_route_codes_in_hex() {
        let table = person_table();
        let item = ItemClass::new(&table, "com.example.app.database");
        let source = item.render();
        assert!(source.contains(&format!("BASEURICODE = 0x{:07x};", item.base_uri_code())));
        assert!(source.contains(&format!("BASEITEMCODE = 0x{:07x};", item.base_item_code())));
    }

    #[test]
    fn test_base_item_class_mentions_package() {
        let source = base_item_class("com.example.app.database");
        assert!(source.starts_with("package com.example.app.database;"));
        assert!(source.contains("public abstract class DBItem"));
    }
}
