//! # Database Introspection Commands
//!
//! `.tables`, `.schema` and `.databases` read the SQLite catalog through the
//! cursor and package the result with `SpecialResult::from_cursor`.
//!
//! ## Query Policy
//!
//! Each command picks one of two fixed query texts depending on whether an
//! argument was given. User input is only ever bound as a parameter; for the
//! `.tables` prefix filter the `%` wildcard is appended to the bound value,
//! never spliced into the SQL.
//!
//! Internal tables (`sqlite_` prefix) never show up in `.tables`.

use crate::cursor::Cursor;
use crate::special::result::RowMode;
use crate::special::SpecialResult;
use crate::types::Value;
use eyre::Result;
use tracing::debug;

const LIST_TABLES_QUERY: &str = "SELECT name FROM sqlite_master \
     WHERE type IN ('table','view') AND name NOT LIKE 'sqlite_%' \
     ORDER BY 1";

const LIST_TABLES_LIKE_QUERY: &str = "SELECT name FROM sqlite_master \
     WHERE type IN ('table','view') AND name LIKE ? AND name NOT LIKE 'sqlite_%' \
     ORDER BY 1";

const SHOW_SCHEMA_QUERY: &str = "SELECT sql FROM sqlite_master \
     ORDER BY tbl_name, type DESC, name";

const SHOW_SCHEMA_NAMED_QUERY: &str = "SELECT sql FROM sqlite_master \
     WHERE name = ? \
     ORDER BY tbl_name, type DESC, name";

const LIST_DATABASES_QUERY: &str = "PRAGMA database_list";

/// The prefix is bound as a `LIKE` pattern with `%` appended, so `_` and `%`
/// inside it act as wildcards and ASCII letters match in any case:
/// `.tables u_er` and `.tables USER` both list `users`.
///
/// `verbose` (`.tables+`) is accepted and currently changes nothing.
pub fn list_tables(
    cursor: &mut dyn Cursor,
    prefix: Option<&str>,
    _verbose: bool,
) -> Result<Vec<SpecialResult>> {
    let (query, params) = match prefix {
        Some(prefix) => (LIST_TABLES_LIKE_QUERY, vec![Value::Text(format!("{}%", prefix))]),
        None => (LIST_TABLES_QUERY, Vec::new()),
    };

    debug!(query, "list tables");
    cursor.execute(query, &params)?;
    Ok(vec![SpecialResult::from_cursor(cursor, RowMode::Fetch)])
}

pub fn show_schema(cursor: &mut dyn Cursor, table: Option<&str>) -> Result<Vec<SpecialResult>> {
    let (query, params) = match table {
        Some(table) => (SHOW_SCHEMA_NAMED_QUERY, vec![Value::from(table)]),
        None => (SHOW_SCHEMA_QUERY, Vec::new()),
    };

    debug!(query, "show schema");
    cursor.execute(query, &params)?;
    Ok(vec![SpecialResult::from_cursor(cursor, RowMode::Fetch)])
}

/// Rows are handed over as a stream straight off the cursor.
pub fn list_databases(cursor: &mut dyn Cursor) -> Result<Vec<SpecialResult>> {
    debug!(query = LIST_DATABASES_QUERY, "list databases");
    cursor.execute(LIST_DATABASES_QUERY, &[])?;
    Ok(vec![SpecialResult::from_cursor(cursor, RowMode::Stream)])
}
