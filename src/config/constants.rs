//! # sqlshell Configuration Constants
//!
//! Values are grouped by the component that consumes them. The status
//! report's separator and the table renderer's width limits live here so the
//! renderer and the commands agree on layout.

// ============================================================================
// Client identity
// ============================================================================

pub const CLIENT_NAME: &str = "sqlshell";

// ============================================================================
// REPL
// ============================================================================

pub const PRIMARY_PROMPT: &str = "sqlshell> ";
pub const CONTINUATION_PROMPT: &str = "       -> ";

/// Trailing character that completes a buffered SQL statement.
pub const STATEMENT_TERMINATOR: char = ';';

// ============================================================================
// History
// ============================================================================

pub const DEFAULT_HISTORY_FILE: &str = ".sqlshell_history";
pub const HISTORY_ENV_VAR: &str = "SQLSHELL_HISTORY";

// ============================================================================
// Environment
// ============================================================================

pub const PAGER_ENV_VAR: &str = "PAGER";
pub const LOG_ENV_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "sqlshell=warn";
pub const VERBOSE_LOG_FILTER: &str = "sqlshell=debug";

// ============================================================================
// Output
// ============================================================================

/// Cells wider than this are truncated with "...".
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Blobs longer than this are rendered as a hex preview plus their length.
pub const BLOB_PREVIEW_BYTES: usize = 16;

/// Rule printed above and below the status report.
pub const STATUS_SEPARATOR: &str = "--------------";

const _: () = assert!(MAX_COLUMN_WIDTH > 3, "truncation needs room for the ellipsis");
