//! `ItemProvider` (ContentProvider) generation.
//!
//! The provider routes content URIs to tables through the route codes
//! baked into each item class: `getType` and `query` switch on
//! `BASEURICODE`/`BASEITEMCODE`, `delete` rebuilds a selection against the
//! matched table. The class name is fixed — the item class template
//! references `ItemProvider.SCHEME` and `ItemProvider.AUTHORITY` — so it
//! is part of the template contract, not a knob.

/// Generator for the `ItemProvider` class and its manifest entry.
///
/// # Examples
///
/// ```
/// use droidgen_codegen::ProviderClass;
///
/// let mut provider = ProviderClass::new("com.example.app.database");
/// provider.add_item("PersonItem");
///
/// assert!(provider.manifest_entry().contains("com.example.app.database.ItemProvider"));
/// assert!(provider.render().contains("case PersonItem.BASEITEMCODE:"));
/// ```
pub struct ProviderClass {
    package: String,
    item_classes: Vec<String>,
}

impl ProviderClass {
    /// Class name of the generated provider.
    pub const CLASS_NAME: &'static str = "ItemProvider";

    /// Creates an empty generator for the given package.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            item_classes: Vec::new(),
        }
    }

    /// Registers a generated item class with the provider.
    pub fn add_item(&mut self, class_name: impl Into<String>) {
        self.item_classes.push(class_name.into());
    }

    /// Generated file name.
    pub fn file_name() -> String {
        format!("{}.java", Self::CLASS_NAME)
    }

    /// The `<provider/>` fragment to paste into the consuming project's
    /// `AndroidManifest.xml`.
    pub fn manifest_entry(&self) -> String {
        format!(
            r#"<provider
    android:name="{package}.{classname}"
    android:authorities="{package}.AUTHORITY"
    android:enabled="true"
    android:exported="false" />
"#,
            package = self.package,
            classname = Self::CLASS_NAME,
        )
    }

    fn match_uris(&self) -> String {
        self.item_classes
            .iter()
            .map(|class_name| format!("{class_name}.addMatcherUris(sURIMatcher);"))
            .collect::<Vec<_>>()
            .join("\n        ")
    }

    fn match_types(&self) -> String {
        let mut out = String::new();
        for class_name in &self.item_classes {
            out.push_str(&format!(
                "\n        case {class_name}.BASEITEMCODE:\n            return {class_name}.TYPE_ITEM;\n        case {class_name}.BASEURICODE:\n            return {class_name}.TYPE_DIR;"
            ));
        }
        out
    }

    fn match_query(&self) -> String {
        let mut out = String::new();
        for class_name in &self.item_classes {
            out.push_str(&format!(
                r#"
        case {class_name}.BASEITEMCODE:
            id = Long.parseLong(uri.getLastPathSegment());
            result = handler.get{class_name}Cursor(id);
            result.setNotificationUri(getContext().getContentResolver(), uri);
            break;
        case {class_name}.BASEURICODE:
            result = handler.getAll{class_name}sCursor(selection, args, sortOrder);
            result.setNotificationUri(getContext().getContentResolver(), uri);
            break;
"#
            ));
        }
        out.trim_end().to_string()
    }

    fn delete_cases(&self) -> String {
        let mut out = String::new();
        for class_name in &self.item_classes {
            out.push_str(&format!(
                r#"
        case {class_name}.BASEITEMCODE:
            table = {class_name}.TABLE_NAME;
            if (selection != null && !selection.isEmpty()) {{
                sb.append(" AND ");
            }}
            sb.append({class_name}.COL_ID + " IS ?");
            args.add(uri.getLastPathSegment());
            break;
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

import android.content.ContentProvider;
import android.content.ContentValues;
import android.content.UriMatcher;
import android.database.Cursor;
import android.database.sqlite.SQLiteDatabase;
import android.net.Uri;

public class {classname} extends ContentProvider {{
    public static final String AUTHORITY = "{package}.AUTHORITY";
    public static final String SCHEME = "content://";

    private static final UriMatcher sURIMatcher = new UriMatcher(
            UriMatcher.NO_MATCH);
    static {{
        {match_uris}
    }}

    @Override
    public boolean onCreate() {{
        return true;
    }}

    @Override
    public int delete(Uri uri, String selection, String[] selectionArgs) {{
        final String table;
        final ArrayList<String> args = new ArrayList<String>();
        if (selectionArgs != null) {{
            for (String arg : selectionArgs) {{
                args.add(arg);
            }}
        }}
        final StringBuilder sb = new StringBuilder();
        if (selection != null && !selection.isEmpty()) {{
            sb.append("(").append(selection).append(")");
        }}

        // Configure table and args depending on uri
        switch (sURIMatcher.match(uri)) {{
        {delete_cases}
        default:
            throw new IllegalArgumentException("Unknown URI " + uri);
        }}

        final SQLiteDatabase db = DatabaseHandler.getInstance(getContext())
                .getWritableDatabase();
        final String[] argArray = new String[args.size()];
        final int result = db.delete(table, sb.toString(),
                args.toArray(argArray));

        if (result > 0) {{
            getContext().getContentResolver().notifyChange(uri, null, true);
        }}
        return result;
    }}

    @Override
    public Uri insert(Uri uri, ContentValues values) {{
        throw new UnsupportedOperationException("Insert through DatabaseHandler.putItem");
    }}

    @Override
    public int update(Uri uri, ContentValues values, String selection,
            String[] selectionArgs) {{
        throw new UnsupportedOperationException("Update through DatabaseHandler.putItem");
    }}

    @Override
    public String getType(Uri uri) {{
        switch (sURIMatcher.match(uri)) {{
        {match_types}
        default:
            throw new IllegalArgumentException("Unknown URI " + uri);
        }}
    }}

    @Override
    public Cursor query(Uri uri, String[] projection, String selection,
            String[] args, String sortOrder) {{
        Cursor result = null;
        final long id;
        final DatabaseHandler handler = DatabaseHandler.getInstance(getContext());

        switch (sURIMatcher.match(uri)) {{
        {match_query}
        default:
            throw new IllegalArgumentException("Unknown URI " + uri);
        }}

        return result;
    }}
}}
"#,
            package = self.package,
            classname = Self::CLASS_NAME,
            match_uris = self.match_uris(),
            match_types = self.match_types(),
            match_query = self.match_query(),
            delete_cases = self.delete_cases(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_provider() -> ProviderClass {
        let mut provider = ProviderClass::new("com.example.appname.database");
        provider.add_item("PersonItem");
        provider.add_item("LogItem");
        provider
    }

    #[test]
    fn test_manifest_entry_names_provider_and_authority() {
        let manifest = sample_provider().manifest_entry();
        assert!(manifest.contains("android:name=\"com.example.appname.database.ItemProvider\""));
        assert!(manifest.contains("android:authorities=\"com.example.appname.database.AUTHORITY\""));
        assert!(manifest.contains("android:exported=\"false\""));
    }

    #[test]
    fn test_matcher_registration_covers_every_item() {
        let source = sample_provider().render();
        assert!(source.contains("PersonItem.addMatcherUris(sURIMatcher);"));
        assert!(source.contains("LogItem.addMatcherUris(sURIMatcher);"));
    }

    #[test]
    fn test_type_and_query_switch_on_route_codes() {
        let source = sample_provider().render();
        for class_name in ["PersonItem", "LogItem"] {
            assert!(source.contains(&format!("case {class_name}.BASEITEMCODE:")));
            assert!(source.contains(&format!("case {class_name}.BASEURICODE:")));
            assert!(source.contains(&format!("return {class_name}.TYPE_ITEM;")));
            assert!(source.contains(&format!("handler.getAll{class_name}sCursor(selection, args, sortOrder);")));
        }
    }

    #[test]
    fn test_delete_scopes_selection_to_matched_table() {
        let source = sample_provider().render();
        assert!(source.contains("table = PersonItem.TABLE_NAME;"));
        assert!(source.contains("sb.append(PersonItem.COL_ID + \" IS ?\");"));
    }
}
