//! # History File Management
//!
//! Resolves where the shell keeps its line history. By default history is
//! stored in `~/.sqlshell_history`.
//!
//! ## Configuration
//!
//! ```bash
//! export SQLSHELL_HISTORY=~/.config/sqlshell/history
//! sqlshell ./app.db
//! ```
//!
//! A leading `~/` in the override is expanded against `HOME`. Setting
//! `SQLSHELL_HISTORY` to an empty string disables history persistence.
//!
//! The path is resolved once at startup; rustyline does the file I/O.

use crate::config::{DEFAULT_HISTORY_FILE, HISTORY_ENV_VAR};
use std::env;
use std::path::PathBuf;

pub fn history_path() -> Option<PathBuf> {
    resolve_history_path(env::var(HISTORY_ENV_VAR).ok(), home_dir())
}

fn resolve_history_path(custom: Option<String>, home: Option<PathBuf>) -> Option<PathBuf> {
    match custom {
        Some(path) if path.is_empty() => None,
        Some(path) => match (path.strip_prefix("~/"), home) {
            (Some(rest), Some(home)) => Some(home.join(rest)),
            _ => Some(PathBuf::from(&path)),
        },
        None => home.map(|home| home.join(DEFAULT_HISTORY_FILE)),
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}
