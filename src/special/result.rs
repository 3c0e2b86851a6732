//! # Special Command Results
//!
//! Every special command answers with one or more `SpecialResult` values:
//! a title, rows, column headers and a footer, each optional. The shell hands
//! them to the table renderer without knowing which command produced them.
//!
//! ## Shapes
//!
//! | headers          | rows            | rendered as                  |
//! |------------------|-----------------|------------------------------|
//! | `None`           | `None`          | footer only (nothing to show) |
//! | `Some(names)`    | `Some(rows)`    | ASCII table                  |
//! | `Some(vec![])`   | `Some(rows)`    | free-form `label value` block |
//!
//! ## Normalization
//!
//! `SpecialResult::from_cursor` packages whatever the cursor's last statement
//! produced. A cursor without a column description yields the all-`None`
//! result with an empty footer.

use crate::cursor::{Cursor, RowStream};
use crate::types::Row;

#[derive(Debug)]
pub enum Rows {
    Materialized(Vec<Row>),
    Stream(RowStream),
}

impl Rows {
    pub fn into_vec(self) -> Vec<Row> {
        match self {
            Rows::Materialized(rows) => rows,
            Rows::Stream(stream) => stream.collect(),
        }
    }
}

impl From<Vec<Row>> for Rows {
    fn from(rows: Vec<Row>) -> Self {
        Rows::Materialized(rows)
    }
}

#[derive(Debug)]
pub struct SpecialResult {
    pub title: Option<String>,
    pub rows: Option<Rows>,
    pub headers: Option<Vec<String>>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Fetch,
    Stream,
}

impl SpecialResult {
    pub fn empty() -> Self {
        Self {
            title: None,
            rows: None,
            headers: None,
            footer: Some(String::new()),
        }
    }

    pub fn table(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            title: None,
            rows: Some(Rows::Materialized(rows)),
            headers: Some(headers),
            footer: Some(String::new()),
        }
    }

    pub fn from_cursor(cursor: &mut dyn Cursor, mode: RowMode) -> Self {
        let headers = match cursor.description() {
            Some(columns) => columns.to_vec(),
            None => return Self::empty(),
        };

        let rows = match mode {
            RowMode::Fetch => Rows::Materialized(cursor.fetchall()),
            RowMode::Stream => Rows::Stream(cursor.take_rows()),
        };

        Self {
            title: None,
            rows: Some(rows),
            headers: Some(headers),
            footer: Some(String::new()),
        }
    }

    pub fn has_result_set(&self) -> bool {
        self.headers.is_some()
    }

    /// Consumes the rows, collecting a stream if necessary.
    pub fn take_rows(&mut self) -> Vec<Row> {
        self.rows.take().map(Rows::into_vec).unwrap_or_default()
    }
}
