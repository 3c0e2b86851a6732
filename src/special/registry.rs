//! # Command Registry
//!
//! Maps command names and aliases to their `CommandDescriptor`. The shell
//! builds one registry at startup (`CommandRegistry::with_builtins`) and
//! consults it for every line before treating the input as SQL.
//!
//! ## Lookup
//!
//! Descriptors are indexed under their primary name and every alias.
//! Case-insensitive descriptors also go into a separate folded index keyed
//! by the lower-cased names. A lookup tries the exact index first and then
//! the folded one, so `QUIT` finds `quit` while `.TABLES` does not find
//! `.tables`. A case-sensitive `describe` never hides a case-insensitive
//! `Describe` from `DESCRIBE`.
//!
//! ## Overrides
//!
//! Registering a name that is already present replaces the previous entry.
//! This is how a caller swaps a built-in for its own implementation.
//!
//! ## Dispatch
//!
//! Each descriptor carries a `SpecialCommand` tag; `CommandRegistry::run`
//! matches on it and calls the corresponding command body.

use crate::cursor::Cursor;
use crate::special::parse::{parse_special_command, shape_argument, ArgMode};
use crate::special::{dbcommands, help, status, SessionContext, SpecialResult};
use eyre::Result;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialCommand {
    ListTables,
    ShowSchema,
    ListDatabases,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: String,
    pub syntax: String,
    pub help: String,
    pub arg_mode: ArgMode,
    pub case_sensitive: bool,
    pub aliases: Vec<String>,
    pub command: SpecialCommand,
}

impl CommandDescriptor {
    pub fn new(name: &str, syntax: &str, help: &str, command: SpecialCommand) -> Self {
        Self {
            name: name.to_string(),
            syntax: syntax.to_string(),
            help: help.to_string(),
            arg_mode: ArgMode::Raw,
            case_sensitive: false,
            aliases: Vec::new(),
            command,
        }
    }

    pub fn arg_mode(mut self, mode: ArgMode) -> Self {
        self.arg_mode = mode;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|a| a.to_string()).collect();
        self
    }

    fn keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Argument and flags for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub arg: Option<String>,
    pub verbose: bool,
}

#[derive(Debug, Default)]
pub struct CommandRegistry {
    index: HashMap<String, Arc<CommandDescriptor>>,
    folded: HashMap<String, Arc<CommandDescriptor>>,
    commands: BTreeMap<String, Arc<CommandDescriptor>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for descriptor in builtin_descriptors() {
            registry.register(descriptor);
        }
        registry
    }

    pub fn register(&mut self, descriptor: CommandDescriptor) {
        let descriptor = Arc::new(descriptor);

        for key in descriptor.keys() {
            let folded_key = key.to_lowercase();
            // A folded entry registered under this exact key is being replaced.
            if self
                .folded
                .get(&folded_key)
                .is_some_and(|existing| existing.keys().any(|k| k == key))
            {
                self.folded.remove(&folded_key);
            }

            self.index.insert(key.to_string(), Arc::clone(&descriptor));
            if !descriptor.case_sensitive {
                self.folded.insert(folded_key, Arc::clone(&descriptor));
            }
        }
        self.commands
            .insert(descriptor.name.clone(), Arc::clone(&descriptor));
    }

    pub fn lookup(&self, token: &str) -> Option<Arc<CommandDescriptor>> {
        if let Some(descriptor) = self.index.get(token) {
            return Some(Arc::clone(descriptor));
        }

        self.folded.get(&token.to_lowercase()).cloned()
    }

    /// Registered commands in primary-name order.
    pub fn descriptors(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.values().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Resolves the first token of `input` without running anything.
    pub fn resolve(&self, input: &str) -> Option<Arc<CommandDescriptor>> {
        let parsed = parse_special_command(input);
        if parsed.command.is_empty() {
            return None;
        }
        self.lookup(&parsed.command)
    }

    /// Parses `input`, and if it names a registered command, runs it.
    /// Returns `Ok(None)` when the input is not a special command.
    pub fn execute(
        &self,
        cursor: &mut dyn Cursor,
        input: &str,
        session: &SessionContext,
    ) -> Result<Option<Vec<SpecialResult>>> {
        let parsed = parse_special_command(input);
        let descriptor = match self.lookup(&parsed.command) {
            Some(d) => d,
            None => return Ok(None),
        };

        let invocation = Invocation {
            arg: shape_argument(parsed.arg, descriptor.arg_mode)?,
            verbose: parsed.verbose,
        };
        self.run(&descriptor, cursor, &invocation, session).map(Some)
    }

    pub fn run(
        &self,
        descriptor: &CommandDescriptor,
        cursor: &mut dyn Cursor,
        invocation: &Invocation,
        session: &SessionContext,
    ) -> Result<Vec<SpecialResult>> {
        debug!(command = %descriptor.name, arg = ?invocation.arg, "running special command");
        let arg = invocation.arg.as_deref();

        match descriptor.command {
            SpecialCommand::ListTables => dbcommands::list_tables(cursor, arg, invocation.verbose),
            SpecialCommand::ShowSchema => dbcommands::show_schema(cursor, arg),
            SpecialCommand::ListDatabases => dbcommands::list_databases(cursor),
            SpecialCommand::Status => status::status(cursor, session),
            SpecialCommand::Help => Ok(vec![help::show_help(self)]),
            SpecialCommand::Quit => Ok(Vec::new()),
        }
    }
}

fn builtin_descriptors() -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new(
            "\\dt",
            ".tables[+] [table]",
            "List or describe tables.",
            SpecialCommand::ListTables,
        )
        .arg_mode(ArgMode::Parsed)
        .case_sensitive(true)
        .aliases(&[".tables"]),
        CommandDescriptor::new(
            ".schema",
            ".schema[+] [table]",
            "The complete schema for the database or a single table",
            SpecialCommand::ShowSchema,
        )
        .arg_mode(ArgMode::Parsed)
        .case_sensitive(true),
        CommandDescriptor::new(
            ".databases",
            ".databases",
            "List databases.",
            SpecialCommand::ListDatabases,
        )
        .case_sensitive(true),
        CommandDescriptor::new(
            "status",
            "\\s",
            "Get status information from the server.",
            SpecialCommand::Status,
        )
        .case_sensitive(true)
        .aliases(&["\\s"]),
        CommandDescriptor::new("help", "\\?", "Show this help.", SpecialCommand::Help)
            .aliases(&["\\?", "?", ".help"]),
        CommandDescriptor::new("quit", "\\q", "Quit.", SpecialCommand::Quit)
            .aliases(&["\\q", "exit", ".quit", ".exit"]),
    ]
}
