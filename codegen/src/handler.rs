//! `DatabaseHandler` (SQLiteOpenHelper) generation.
//!
//! The handler owns the database lifecycle in the generated project:
//! `onCreate` drops and recreates every table and FTS shadow table, then
//! installs permanent triggers and views; `onOpen` enables foreign keys
//! and installs the temporary ones. Per-table getter pairs and the generic
//! `putItem`/`deleteItem` convenience methods round out the ORM surface.

use crate::java::java_string_literal;

/// Generator for the `DatabaseHandler` class.
///
/// # Examples
///
/// ```
/// use droidgen_codegen::HandlerClass;
///
/// let mut handler = HandlerClass::new("com.example.app.database", "MusicDB");
/// handler.add_item("AlbumItem");
///
/// let source = handler.render();
/// assert!(source.contains("DATABASE_NAME = \"MusicDB\""));
/// assert!(source.contains("db.execSQL(AlbumItem.CREATE_TABLE);"));
/// assert!(source.contains("public synchronized AlbumItem getAlbumItem(final long id)"));
/// ```
pub struct HandlerClass {
    package: String,
    database_name: String,
    item_classes: Vec<String>,
    fts_tables: Vec<(String, String)>,
}

impl HandlerClass {
    /// Class name of the generated handler.
    pub const CLASS_NAME: &'static str = "DatabaseHandler";

    /// Creates the generator for the given package and database file name.
    pub fn new(package: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            database_name: database_name.into(),
            item_classes: Vec::new(),
            fts_tables: Vec::new(),
        }
    }

    /// Registers a generated item class with the handler.
    pub fn add_item(&mut self, class_name: impl Into<String>) {
        self.item_classes.push(class_name.into());
    }

    /// Registers an FTS shadow table by name and `CREATE VIRTUAL TABLE`
    /// statement.
    pub fn add_fts_table(&mut self, table_name: impl Into<String>, create_sql: impl Into<String>) {
        self.fts_tables.push((table_name.into(), create_sql.into()));
    }

    /// Generated file name.
    pub fn file_name() -> String {
        format!("{}.java", Self::CLASS_NAME)
    }

    fn create_tables(&self) -> String {
        let mut out = String::new();
        for class_name in &self.item_classes {
            out.push_str(&format!(
                "\n        db.execSQL(\"DROP TABLE IF EXISTS \" + {class_name}.TABLE_NAME);\n        db.execSQL({class_name}.CREATE_TABLE);\n"
            ));
        }
        for (table_name, create_sql) in &self.fts_tables {
            out.push_str(&format!(
                "\n        db.execSQL(\"DROP TABLE IF EXISTS {table_name}\");\n        db.execSQL({});\n",
                java_string_literal(create_sql)
            ));
        }
        out.trim_end().to_string()
    }

    fn table_getters(&self) -> String {
        let mut out = String::new();
        for class_name in &self.item_classes {
            out.push_str(&format!(
                r#"
    public synchronized Cursor get{class_name}Cursor(final long id) {{
        final SQLiteDatabase db = this.getReadableDatabase();
        final Cursor cursor = db.query({class_name}.TABLE_NAME,
                {class_name}.FIELDS, {class_name}.COL_ID + " IS ?",
                new String[] {{ String.valueOf(id) }}, null, null, null, null);
        return cursor;
    }}

    public synchronized {class_name} get{class_name}(final long id) {{
        final Cursor cursor = get{class_name}Cursor(id);
        final {class_name} result;
        if (cursor.moveToFirst()) {{
            result = new {class_name}(cursor);
        }}
        else {{
            result = null;
        }}

        cursor.close();
        return result;
    }}

    public synchronized Cursor getAll{class_name}sCursor(final String selection,
                                                         final String[] args,
                                                         final String sortOrder) {{
        final SQLiteDatabase db = this.getReadableDatabase();

        final Cursor cursor = db.query({class_name}.TABLE_NAME,
                {class_name}.FIELDS, selection, args, null, null, sortOrder, null);

        return cursor;
    }}

    public synchronized List<{class_name}> getAll{class_name}s(final String selection,
                                                               final String[] args,
                                                               final String sortOrder) {{
        final List<{class_name}> result = new ArrayList<{class_name}>();

        final Cursor cursor = getAll{class_name}sCursor(selection, args, sortOrder);

        while (cursor.moveToNext()) {{
            {class_name} q = new {class_name}(cursor);
            result.add(q);
        }}

        cursor.close();
        return result;
    }}
"#
            ));
        }
        out.trim_end().to_string()
    }

    /// Renders the complete Java source file.
    pub fn render(&self) -> String {
        format!(
            r#"package {package};

import java.util.ArrayList;
import java.util.List;

import android.content.ContentValues;
import android.content.Context;
import android.database.Cursor;
import android.database.sqlite.SQLiteDatabase;
import android.database.sqlite.SQLiteOpenHelper;

/**
 * Database handler, SQLite wrapper and ORM layer.
 */
public class {classname} extends SQLiteOpenHelper {{

    private static final int DATABASE_VERSION = 1;

    private static final String DATABASE_NAME = "{databasename}";
    private final Context context;

    private static {classname} instance = null;

    public synchronized static {classname} getInstance(Context context) {{
        if (instance == null)
            instance = new {classname}(context.getApplicationContext());
        return instance;
    }}

    public {classname}(Context context) {{
        super(context.getApplicationContext(), DATABASE_NAME, null,
                DATABASE_VERSION);
        this.context = context.getApplicationContext();
    }}

    @Override
    public void onOpen(SQLiteDatabase db) {{
        super.onOpen(db);
        if (!db.isReadOnly()) {{
            // setForeignKeyConstraintsEnabled needs api 16; the pragma
            // works everywhere
            db.execSQL("PRAGMA foreign_keys=ON;");
            DatabaseTriggers.createTemp(db);
            DatabaseViews.createTemp(db);
        }}
    }}

    @Override
    public synchronized void onCreate(SQLiteDatabase db) {{
        {create_tables}

        DatabaseTriggers.create(db);
        DatabaseViews.create(db);
    }}

    @Override
    public synchronized void onUpgrade(SQLiteDatabase db, int oldVersion,
            int newVersion) {{
        // Drop and recreate. Replace with a real migration when the
        // schema stabilizes.
        onCreate(db);
    }}

    public synchronized boolean putItem(final DBItem item) {{
        boolean success = false;
        int result = 0;
        final SQLiteDatabase db = this.getWritableDatabase();
        final ContentValues values = item.getContent();

        if (item.getId() > -1) {{
            result += db.update(item.getTableName(), values,
                    DBItem.COL_ID + " IS ?",
                    new String[] {{ String.valueOf(item.getId()) }});
        }}

        // Update failed or wasn't possible, insert instead
        if (result < 1) {{
            final long id = db.insert(item.getTableName(), null, values);

            if (id > 0) {{
                item.setId(id);
                success = true;
            }}
        }}
        else {{
            success = true;
        }}

        if (success) {{
            item.notifyProvider(context);
        }}
        return success;
    }}

    public synchronized int deleteItem(DBItem item) {{
        final SQLiteDatabase db = this.getWritableDatabase();
        final int result = db.delete(item.getTableName(), DBItem.COL_ID
                + " IS ?", new String[] {{ Long.toString(item.getId()) }});

        if (result > 0) {{
            item.notifyProvider(context);
        }}

        return result;
    }}

    {table_getters}
}}
"#,
            package = self.package,
            classname = Self::CLASS_NAME,
            databasename = self.database_name,
            create_tables = self.create_tables(),
            table_getters = self.table_getters(),
        )
    }
}
