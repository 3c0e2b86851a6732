//! # sqlshell Configuration Module
//!
//! Centralizes the constants the shell and the special commands share.
//! Runtime configuration comes from command-line flags and a handful of
//! environment variables, all named here.
//!
//! ## Environment
//!
//! | Variable          | Effect                                        |
//! |-------------------|-----------------------------------------------|
//! | `SQLSHELL_HISTORY`| History file path (empty disables history)    |
//! | `PAGER`           | Reported pager command when paging is enabled |
//! | `RUST_LOG`        | Log filter, overrides `--verbose`             |
//!
//! ## Module Organization
//!
//! - [`constants`]: All configuration values

pub mod constants;
pub use constants::*;
