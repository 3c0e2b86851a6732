//! # sqlshell CLI Module
//!
//! The interactive front end around the special commands:
//!
//! - Interactive SQL execution with query history
//! - ASCII table-formatted result display
//! - Special commands for database introspection
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CLI Entry Point                        │
//! │                    (bin/sqlshell.rs)                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         REPL Loop                           │
//! │  - Reads input via rustyline                                │
//! │  - Dispatches to command handler or the cursor              │
//! │  - Formats and displays results                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │     Commands          │    Table Formatter    │   History   │
//! │  (registry lookup,    │  ASCII tables and     │  Persistent │
//! │   error boundary)     │  key/value blocks     │  ~/.sqlsh.. │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - `repl`: Main read-eval-print loop with rustyline integration
//! - `commands`: Special command boundary between REPL and registry
//! - `table`: ASCII table formatter for query and command results
//! - `history`: History file path resolution

pub mod commands;
pub mod history;
pub mod repl;
pub mod table;

pub use commands::{CommandHandler, CommandResult};
pub use repl::Repl;
