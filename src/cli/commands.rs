//! # Special Command Handler
//!
//! The boundary between the REPL and the special-command layer. The handler
//! owns the command registry and the session collaborators, resolves a line
//! of input, runs the command against the shell's cursor and turns every
//! outcome into a `CommandResult` the REPL can act on.
//!
//! ## Outcomes
//!
//! - `Output`: results to render
//! - `Exit`: the user asked to leave (`quit`, `\q`, `exit`, `.quit`)
//! - `Continue`: nothing to do (blank input)
//! - `Error`: unknown command or a failed command, formatted for display
//!
//! Command failures never escape the handler; the REPL prints them and
//! returns to the prompt.

use crate::cursor::Cursor;
use crate::special::{
    parse_special_command, CommandRegistry, SessionContext, SpecialCommand, SpecialResult,
};

#[derive(Debug)]
pub enum CommandResult {
    Output(Vec<SpecialResult>),
    Exit,
    Continue,
    Error(String),
}

pub struct CommandHandler {
    registry: CommandRegistry,
    session: SessionContext,
}

impl CommandHandler {
    pub fn new(registry: CommandRegistry, session: SessionContext) -> Self {
        Self { registry, session }
    }

    pub fn is_command(&self, input: &str) -> bool {
        self.registry.resolve(input).is_some()
    }

    pub fn execute(&self, input: &str, cursor: &mut dyn Cursor) -> CommandResult {
        let parsed = parse_special_command(input);
        if parsed.command.is_empty() {
            return CommandResult::Continue;
        }

        let descriptor = match self.registry.lookup(&parsed.command) {
            Some(d) => d,
            None => {
                return CommandResult::Error(format!(
                    "Unknown command: {}. Type help for available commands.",
                    parsed.command
                ))
            }
        };

        if descriptor.command == SpecialCommand::Quit {
            return CommandResult::Exit;
        }

        match self.registry.execute(cursor, input, &self.session) {
            Ok(Some(results)) => CommandResult::Output(results),
            Ok(None) => CommandResult::Continue,
            Err(err) => CommandResult::Error(format!("{:#}", err)),
        }
    }
}
