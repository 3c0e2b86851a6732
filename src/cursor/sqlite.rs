//! # SQLite Cursor
//!
//! `SqliteCursor` adapts a `rusqlite::Connection` to the `Cursor` trait.
//!
//! ## Buffering
//!
//! rusqlite statements borrow the connection, so rows cannot stay lazily
//! attached to a statement once `execute` returns. The cursor drains every
//! result row into an internal queue on `execute`; `fetchone`, `fetchall`
//! and `take_rows` consume that queue.
//!
//! ## Error Classification
//!
//! SQLite reports statements it cannot parse (for example the MySQL
//! `SHOW GLOBAL STATUS`) as a generic `SQLITE_ERROR` with a message such as
//! `near "SHOW": syntax error`. Those become `QueryErrorKind::Unsupported`;
//! every other failure is `QueryErrorKind::Failed`.

use crate::cursor::{ConnectionInfo, Cursor, QueryError, RowStream};
use crate::types::{Row, Value};
use eyre::{Result, WrapErr};
use rusqlite::types::{Null, ToSqlOutput, ValueRef};
use rusqlite::{params_from_iter, Connection, ErrorCode, ToSql};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

const MEMORY_LABEL: &str = ":memory:";
const UNSUPPORTED_MARKERS: &[&str] = &["syntax error", "no such function", "unrecognized token"];

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

pub struct SqliteCursor {
    conn: Connection,
    info: SqliteConnectionInfo,
    description: Option<Vec<String>>,
    pending: VecDeque<Row>,
    rowcount: i64,
}

struct SqliteConnectionInfo {
    id: u64,
    location: String,
}

impl SqliteCursor {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .wrap_err_with(|| format!("failed to open database at {:?}", path))?;
        Ok(Self::from_connection(conn, path.display().to_string()))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().wrap_err("failed to open in-memory database")?;
        Ok(Self::from_connection(conn, MEMORY_LABEL.to_string()))
    }

    pub fn from_connection(conn: Connection, location: String) -> Self {
        Self {
            conn,
            info: SqliteConnectionInfo {
                id: NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
                location,
            },
            description: None,
            pending: VecDeque::new(),
            rowcount: -1,
        }
    }

    pub fn location(&self) -> &str {
        &self.info.location
    }

    fn reset(&mut self) {
        self.description = None;
        self.pending.clear();
        self.rowcount = -1;
    }
}

impl Cursor for SqliteCursor {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<(), QueryError> {
        trace!(sql, params = params.len(), "sqlite execute");
        self.reset();

        let mut stmt = self.conn.prepare(sql).map_err(|e| classify(sql, e))?;
        let column_count = stmt.column_count();

        if column_count == 0 {
            let changed = stmt
                .execute(params_from_iter(params.iter()))
                .map_err(|e| classify(sql, e))?;
            self.rowcount = changed as i64;
            return Ok(());
        }

        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut buffered = VecDeque::new();
        let mut rows = stmt
            .query(params_from_iter(params.iter()))
            .map_err(|e| classify(sql, e))?;

        while let Some(row) = rows.next().map_err(|e| classify(sql, e))? {
            let values = (0..column_count)
                .map(|i| row.get_ref(i).map(value_from_ref))
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| classify(sql, e))?;
            buffered.push_back(Row::new(values));
        }

        self.description = Some(names);
        self.pending = buffered;
        Ok(())
    }

    fn description(&self) -> Option<&[String]> {
        self.description.as_deref()
    }

    fn fetchone(&mut self) -> Option<Row> {
        self.pending.pop_front()
    }

    fn fetchall(&mut self) -> Vec<Row> {
        self.pending.drain(..).collect()
    }

    fn take_rows(&mut self) -> RowStream {
        RowStream::new(std::mem::take(&mut self.pending))
    }

    fn rowcount(&self) -> i64 {
        self.rowcount
    }

    fn connection(&self) -> &dyn ConnectionInfo {
        &self.info
    }
}

impl ConnectionInfo for SqliteConnectionInfo {
    fn connection_id(&self) -> String {
        self.id.to_string()
    }

    fn host_info(&self) -> String {
        self.location.clone()
    }

    fn host(&self) -> String {
        "localhost".to_string()
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Null => ToSqlOutput::from(Null),
            Value::Integer(i) => ToSqlOutput::from(*i),
            Value::Real(f) => ToSqlOutput::from(*f),
            Value::Text(s) => ToSqlOutput::from(s.as_str()),
            Value::Blob(b) => ToSqlOutput::from(b.as_slice()),
        })
    }
}

fn value_from_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

fn classify(sql: &str, err: rusqlite::Error) -> QueryError {
    let rejected = match &err {
        rusqlite::Error::SqliteFailure(failure, Some(msg)) => Some((failure.code, msg.as_str())),
        rusqlite::Error::SqlInputError { error, msg, .. } => Some((error.code, msg.as_str())),
        _ => None,
    };

    if let Some((code, msg)) = rejected {
        if code == ErrorCode::Unknown && UNSUPPORTED_MARKERS.iter().any(|m| msg.contains(m)) {
            return QueryError::unsupported(sql, msg);
        }
    }
    QueryError::failed(sql, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::QueryErrorKind;

    #[test]
    fn select_buffers_rows_and_description() {
        let mut cur = SqliteCursor::open_in_memory().unwrap();
        cur.execute("SELECT 1 AS one, 'two' AS two", &[]).unwrap();

        assert_eq!(cur.description().unwrap(), &["one".to_string(), "two".to_string()]);
        let row = cur.fetchone().unwrap();
        assert_eq!(row.values, vec![Value::Integer(1), Value::from("two")]);
        assert!(cur.fetchone().is_none());
    }

    #[test]
    fn ddl_has_no_description() {
        let mut cur = SqliteCursor::open_in_memory().unwrap();
        cur.execute("CREATE TABLE t (id INTEGER)", &[]).unwrap();
        assert!(cur.description().is_none());
        assert_eq!(cur.rowcount(), 0);

        cur.execute("INSERT INTO t VALUES (1), (2)", &[]).unwrap();
        assert_eq!(cur.rowcount(), 2);
    }

    #[test]
    fn parameters_are_bound() {
        let mut cur = SqliteCursor::open_in_memory().unwrap();
        cur.execute("SELECT ? || '%'", &[Value::from("it's")]).unwrap();
        assert_eq!(cur.fetchall()[0].values[0], Value::from("it's%"));
    }

    #[test]
    fn mysql_statements_are_unsupported() {
        let mut cur = SqliteCursor::open_in_memory().unwrap();
        let err = cur.execute("SHOW GLOBAL STATUS;", &[]).unwrap_err();
        assert_eq!(err.kind, QueryErrorKind::Unsupported);
        assert_eq!(err.sql, "SHOW GLOBAL STATUS;");
    }

    #[test]
    fn missing_table_is_a_plain_failure() {
        let mut cur = SqliteCursor::open_in_memory().unwrap();
        let err = cur.execute("SELECT * FROM nope", &[]).unwrap_err();
        assert_eq!(err.kind, QueryErrorKind::Failed);
        assert!(err.message.contains("no such table"));
    }

    #[test]
    fn take_rows_leaves_cursor_empty() {
        let mut cur = SqliteCursor::open_in_memory().unwrap();
        cur.execute("SELECT 1 UNION ALL SELECT 2", &[]).unwrap();
        let stream = cur.take_rows();
        assert_eq!(stream.len(), 2);
        assert!(cur.fetchall().is_empty());
    }

    #[test]
    fn connection_ids_are_distinct() {
        let a = SqliteCursor::open_in_memory().unwrap();
        let b = SqliteCursor::open_in_memory().unwrap();
        assert_ne!(a.connection().connection_id(), b.connection().connection_id());
        assert_eq!(a.connection().host_info(), ":memory:");
    }
}
