//! # sqlshell CLI Entry Point
//!
//! Binary entry point for the sqlshell command-line interface.
//!
//! ## Usage
//!
//! ```bash
//! # Open (or create) a database file
//! sqlshell ./app.db
//!
//! # Scratch in-memory database
//! sqlshell
//!
//! # Debug logging of every issued query
//! sqlshell --verbose ./app.db
//! ```

use eyre::{bail, Result};
use sqlshell::cli::{CommandHandler, Repl};
use sqlshell::config::{DEFAULT_LOG_FILTER, LOG_ENV_VAR, VERBOSE_LOG_FILTER};
use sqlshell::cursor::{Cursor, SqliteCursor};
use sqlshell::special::{ClientInfo, CommandRegistry, PagerState, SessionContext};
use std::env;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct Options {
    db_path: Option<PathBuf>,
    verbose: bool,
    pager: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = match parse_args(env::args().skip(1))? {
        Some(options) => options,
        None => return Ok(()),
    };

    init_logging(options.verbose);

    let (cursor, location) = match &options.db_path {
        Some(path) => {
            let cursor = SqliteCursor::open(path)?;
            let location = cursor.location().to_string();
            (cursor, location)
        }
        None => {
            let cursor = SqliteCursor::open_in_memory()?;
            let location = cursor.location().to_string();
            (cursor, location)
        }
    };
    debug!(location = %location, "database opened");

    let session = SessionContext::new(ClientInfo::current(), PagerState::from_env(options.pager));
    let handler = CommandHandler::new(CommandRegistry::with_builtins(), session);
    let cursor: Box<dyn Cursor> = Box::new(cursor);

    let mut repl = Repl::new(cursor, handler, location)?;
    repl.run()?;

    Ok(())
}

/// Returns `None` when the invocation was fully handled (help, version).
fn parse_args(args: impl Iterator<Item = String>) -> Result<Option<Options>> {
    let mut options = Options {
        db_path: None,
        verbose: false,
        pager: false,
    };

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("sqlshell {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--verbose" | "-v" => options.verbose = true,
            "--pager" => options.pager = true,
            "--no-pager" => options.pager = false,
            flag if flag.starts_with('-') => {
                bail!("Unknown option: {}", flag);
            }
            path => {
                if options.db_path.is_some() {
                    bail!("Multiple database paths specified");
                }
                options.db_path = Some(PathBuf::from(path));
            }
        }
    }

    Ok(Some(options))
}

fn init_logging(verbose: bool) {
    let filter = if env::var(LOG_ENV_VAR).is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::new(DEFAULT_LOG_FILTER)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("sqlshell - Interactive SQLite shell");
    println!();
    println!("USAGE:");
    println!("    sqlshell [OPTIONS] [DATABASE_PATH]");
    println!();
    println!("ARGS:");
    println!("    <DATABASE_PATH>    SQLite database file (in-memory database if omitted)");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose      Log every issued query to stderr");
    println!("        --pager        Report output as paged through $PAGER");
    println!("        --no-pager     Report output as going to stdout (default)");
    println!("    -h, --help         Print help information");
    println!("    -V, --version      Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    sqlshell ./app.db          Open or create ./app.db");
    println!("    sqlshell -v ./app.db       Same, with query logging");
}
