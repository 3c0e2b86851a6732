//! # Cursor Collaborator
//!
//! The special commands never talk to a database driver directly. They issue
//! queries through the `Cursor` trait, which models a DB-API style cursor:
//!
//! - `execute` runs one statement with bound parameters
//! - `description` lists the result columns (absent for statements that
//!   produce no result set)
//! - `fetchone` / `fetchall` consume buffered rows
//! - `take_rows` hands the pending rows over as an unconsumed stream
//!
//! A cursor is borrowed exclusively for the duration of one command, so the
//! trait is `&mut self` throughout and needs no internal locking.
//!
//! ## Errors
//!
//! `execute` returns a `QueryError` rather than an opaque report because the
//! status command must tell an unsupported statement (recoverable through a
//! fallback query) apart from any other failure.
//!
//! ## Implementations
//!
//! - `SqliteCursor`: rusqlite-backed cursor used by the shell

mod sqlite;

pub use sqlite::SqliteCursor;

use crate::types::{Row, Value};
use std::collections::VecDeque;
use std::fmt;

pub trait Cursor {
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<(), QueryError>;

    fn description(&self) -> Option<&[String]>;

    fn fetchone(&mut self) -> Option<Row>;

    fn fetchall(&mut self) -> Vec<Row>;

    fn take_rows(&mut self) -> RowStream;

    /// Rows changed by the last statement, or -1 when unknown.
    fn rowcount(&self) -> i64;

    fn connection(&self) -> &dyn ConnectionInfo;
}

pub trait ConnectionInfo {
    fn connection_id(&self) -> String;

    fn host_info(&self) -> String;

    fn host(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// The server does not understand the statement at all.
    Unsupported,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryError {
    pub kind: QueryErrorKind,
    pub sql: String,
    pub message: String,
}

impl QueryError {
    pub fn unsupported(sql: &str, message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Unsupported,
            sql: sql.to_string(),
            message: message.into(),
        }
    }

    pub fn failed(sql: &str, message: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Failed,
            sql: sql.to_string(),
            message: message.into(),
        }
    }

    pub fn is_unsupported(&self) -> bool {
        self.kind == QueryErrorKind::Unsupported
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for QueryError {}

/// Rows still pending on a cursor, handed over without being collected.
#[derive(Debug, Default)]
pub struct RowStream {
    rows: VecDeque<Row>,
}

impl RowStream {
    pub fn new(rows: VecDeque<Row>) -> Self {
        Self { rows }
    }
}

impl Iterator for RowStream {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rows.len(), Some(self.rows.len()))
    }
}

impl ExactSizeIterator for RowStream {}
