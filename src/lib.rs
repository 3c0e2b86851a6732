//! # sqlshell - Interactive SQLite Shell
//!
//! sqlshell is a line-oriented SQL client. Ordinary statements go straight to
//! the database; lines starting with a registered token (`.tables`,
//! `.schema`, `\s`, ...) run client-side special commands that inspect the
//! database and return uniformly shaped results for the table renderer.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sqlshell::cursor::{Cursor, SqliteCursor};
//! use sqlshell::special::{ClientInfo, CommandRegistry, PagerState, SessionContext};
//!
//! let mut cursor = SqliteCursor::open("./app.db")?;
//! let registry = CommandRegistry::with_builtins();
//! let session = SessionContext::new(ClientInfo::current(), PagerState::from_env(false));
//!
//! if let Some(results) = registry.execute(&mut cursor, ".tables user", &session)? {
//!     for result in results {
//!         print!("{}", sqlshell::cli::table::render_special(result));
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │      CLI (REPL, table renderer)      │
//! ├─────────────────────────────────────┤
//! │   Special commands (registry, query  │
//! │   builders, status report)           │
//! ├─────────────────────────────────────┤
//! │      Cursor trait + SQLite cursor    │
//! ├─────────────────────────────────────┤
//! │              rusqlite                │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - `special`: registry, argument parsing, commands, result contract
//! - `cursor`: the cursor collaborator and its SQLite implementation
//! - `types`: owned values and rows
//! - `cli`: REPL, command boundary, table formatter, history
//! - `config`: shared constants

pub mod cli;
pub mod config;
pub mod cursor;
pub mod special;
pub mod types;

pub use cursor::{Cursor, SqliteCursor};
pub use special::{CommandRegistry, SpecialResult};
pub use types::{Row, Value};
