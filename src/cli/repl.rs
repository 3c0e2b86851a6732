//! # REPL - Read-Eval-Print Loop
//!
//! The interactive loop for sqlshell. Handles:
//!
//! - Reading input with rustyline (history, line editing)
//! - Dispatching special commands vs SQL statements
//! - Executing SQL through the cursor and formatting results
//! - Multi-line statement handling
//!
//! ## Input Handling
//!
//! A line whose first token names a registered special command runs
//! immediately, no `;` needed. Everything else accumulates as SQL until a
//! line ends with `;`. The prompt switches from `sqlshell>` to `->` while a
//! statement is incomplete. Special commands are only recognized at the
//! start of a statement.
//!
//! ## Execution Flow
//!
//! ```text
//!            Read Line
//!                │
//!                ▼
//!     Special command token? ──No──► Accumulate SQL ──► Ends with ';'?
//!                │ Yes                                    │ Yes
//!                ▼                                        ▼
//!        CommandHandler::execute               Cursor::execute
//!                │                                        │
//!                └──────────────► Print Result ◄──────────┘
//! ```
//!
//! ## Error Handling
//!
//! SQL and command errors are printed but do not terminate the REPL.
//! Use `quit`, `\q` or Ctrl+D to exit.

use crate::cli::commands::{CommandHandler, CommandResult};
use crate::cli::history::history_path;
use crate::cli::table::{render_special, TableFormatter};
use crate::config::{CONTINUATION_PROMPT, PRIMARY_PROMPT, STATEMENT_TERMINATOR};
use crate::cursor::Cursor;
use eyre::{Result, WrapErr};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub struct Repl {
    cursor: Box<dyn Cursor>,
    handler: CommandHandler,
    location: String,
    editor: DefaultEditor,
    sql_buffer: String,
}

impl Repl {
    pub fn new(cursor: Box<dyn Cursor>, handler: CommandHandler, location: String) -> Result<Self> {
        let mut editor = DefaultEditor::new().wrap_err("failed to initialize line editor")?;

        if let Some(history_file) = history_path() {
            if let Err(e) = editor.load_history(&history_file) {
                debug!(error = %e, path = %history_file.display(), "no history loaded");
            }
        }

        Ok(Self {
            cursor,
            handler,
            location,
            editor,
            sql_buffer: String::new(),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = if self.sql_buffer.is_empty() {
                PRIMARY_PROMPT
            } else {
                CONTINUATION_PROMPT
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    self.sql_buffer.clear();
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return true;
        }

        if self.sql_buffer.is_empty() && self.handler.is_command(trimmed) {
            self.editor.add_history_entry(trimmed).ok();
            return self.execute_command(trimmed);
        }

        if !self.sql_buffer.is_empty() {
            self.sql_buffer.push('\n');
        }
        self.sql_buffer.push_str(trimmed);

        if self.sql_buffer.trim_end().ends_with(STATEMENT_TERMINATOR) {
            let sql = std::mem::take(&mut self.sql_buffer);
            self.editor.add_history_entry(&sql).ok();
            self.execute_sql(&sql);
        }

        true
    }

    fn execute_command(&mut self, input: &str) -> bool {
        match self.handler.execute(input, self.cursor.as_mut()) {
            CommandResult::Exit => {
                println!("Goodbye!");
                false
            }
            CommandResult::Output(results) => {
                for result in results {
                    print!("{}", render_special(result));
                }
                true
            }
            CommandResult::Continue => true,
            CommandResult::Error(msg) => {
                eprintln!("Error: {}", msg);
                true
            }
        }
    }

    fn execute_sql(&mut self, sql: &str) {
        let start = Instant::now();
        debug!(sql, "execute");

        match self.cursor.execute(sql, &[]) {
            Ok(()) => {
                let elapsed = start.elapsed();
                self.print_result(elapsed);
            }
            Err(err) => {
                eprintln!("Error: {}", err);
            }
        }
    }

    fn print_result(&mut self, elapsed: Duration) {
        let headers = match self.cursor.description() {
            Some(columns) => columns.to_vec(),
            None => {
                let affected = self.cursor.rowcount().max(0);
                println!(
                    "Query OK, {} row{} affected ({:.3} sec)",
                    affected,
                    if affected == 1 { "" } else { "s" },
                    elapsed.as_secs_f64()
                );
                return;
            }
        };

        let rows = self.cursor.fetchall();
        if rows.is_empty() {
            println!("Empty set ({:.3} sec)", elapsed.as_secs_f64());
            return;
        }

        let formatter = TableFormatter::new(headers, &rows);
        print!("{}", formatter.render());
        println!(
            "{} row{} in set ({:.3} sec)",
            formatter.row_count(),
            if formatter.row_count() == 1 { "" } else { "s" },
            elapsed.as_secs_f64()
        );
    }

    fn print_welcome(&self) {
        println!("sqlshell version {}", env!("CARGO_PKG_VERSION"));
        println!("Enter \"help\" for usage hints.");
        println!("Connected to: {}", self.location);
        println!();
    }

    fn save_history(&mut self) {
        if let Some(history_file) = history_path() {
            if let Err(e) = self.editor.save_history(&history_file) {
                warn!(error = %e, path = %history_file.display(), "could not save history");
            }
        }
    }
}
