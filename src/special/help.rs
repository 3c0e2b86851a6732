//! `help` / `\?`: one row per registered command.

use crate::special::{CommandRegistry, SpecialResult};
use crate::types::{Row, Value};

const HELP_HEADERS: [&str; 3] = ["Command", "Shortcut", "Description"];

pub fn show_help(registry: &CommandRegistry) -> SpecialResult {
    let rows = registry
        .descriptors()
        .map(|d| {
            Row::new(vec![
                Value::from(d.name.as_str()),
                Value::from(d.syntax.as_str()),
                Value::from(d.help.as_str()),
            ])
        })
        .collect();

    SpecialResult::table(HELP_HEADERS.iter().map(|h| h.to_string()).collect(), rows)
}
