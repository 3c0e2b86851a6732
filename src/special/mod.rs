//! # Special Commands
//!
//! Client-side meta-commands recognized by a literal token, as opposed to
//! SQL statements sent to the database.
//!
//! ## Commands
//!
//! | Command               | Aliases                   | Description                         |
//! |-----------------------|---------------------------|-------------------------------------|
//! | `\dt [prefix]`        | `.tables`                 | List tables and views               |
//! | `.schema [table]`     |                           | Show stored CREATE statements       |
//! | `.databases`          |                           | List attached databases             |
//! | `status`              | `\s`                      | Server status report                |
//! | `help`                | `\?`, `?`, `.help`        | List special commands               |
//! | `quit`                | `\q`, `exit`, `.quit`     | Leave the shell                     |
//!
//! ## Contract
//!
//! Every command receives an exclusively borrowed cursor plus its (optional)
//! argument and returns `Vec<SpecialResult>`. Query failures propagate as
//! `eyre::Report`; the shell decides how to show them. The only failure
//! handled inside a command is the status fallback for servers that do not
//! understand `SHOW GLOBAL STATUS`.
//!
//! ## Module Organization
//!
//! - `registry`: name/alias lookup and dispatch
//! - `parse`: command token, verbose flag and argument shaping
//! - `result`: the `SpecialResult` contract and cursor normalization
//! - `dbcommands`: `.tables`, `.schema`, `.databases`
//! - `status`: the status report
//! - `uptime`: seconds → human duration
//! - `help`: command listing
//! - `session`: client identity and pager state

pub mod dbcommands;
pub mod help;
pub mod parse;
pub mod registry;
pub mod result;
pub mod session;
pub mod status;
pub mod uptime;

pub use parse::{parse_special_command, shape_argument, ArgMode, ParsedInput};
pub use registry::{CommandDescriptor, CommandRegistry, Invocation, SpecialCommand};
pub use result::{RowMode, Rows, SpecialResult};
pub use session::{ClientInfo, PagerState, SessionContext};
pub use uptime::format_uptime;
