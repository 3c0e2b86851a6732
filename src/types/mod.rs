//! # Value Model
//!
//! Owned SQL values and rows as they cross the driver boundary. Every cursor
//! implementation converts its native representation into these types, so the
//! special commands and the renderer never see driver-specific values.
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `Value` | A single SQL value (SQLite storage classes) |
//! | `Row` | An ordered sequence of values |
//!
//! ## Text Normalization
//!
//! Some servers hand back keys and values as raw bytes. `Value::to_text`
//! decodes blobs as UTF-8 (lossy) so callers that build key/value maps can
//! treat every value as text.

mod row;
mod value;

pub use row::Row;
pub use value::Value;
