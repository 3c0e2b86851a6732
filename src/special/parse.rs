//! # Special Command Parsing
//!
//! Splits a line of user input into the command token, the verbose flag and
//! the trailing argument, then shapes the argument according to the
//! command's declared `ArgMode`.
//!
//! ## Rules
//!
//! - Surrounding whitespace and one trailing `;` are dropped
//! - The command token ends at the first whitespace
//! - A `+` in the token sets the verbose flag (`.tables+` → `.tables`)
//! - RAW arguments are passed through trimmed
//! - PARSED arguments are tokenized shell-style: quotes are removed and the
//!   tokens re-joined with single spaces (`"my table"` → `my table`)
//!
//! An empty argument in either mode means "no argument".

use crate::config::STATEMENT_TERMINATOR;
use eyre::{Result, WrapErr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgMode {
    Raw,
    Parsed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput<'a> {
    pub command: String,
    pub verbose: bool,
    pub arg: &'a str,
}

pub fn parse_special_command(input: &str) -> ParsedInput<'_> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_suffix(STATEMENT_TERMINATOR)
        .unwrap_or(trimmed)
        .trim_end();

    let (token, arg) = match trimmed.find(char::is_whitespace) {
        Some(pos) => (&trimmed[..pos], trimmed[pos..].trim()),
        None => (trimmed, ""),
    };

    ParsedInput {
        command: token.replace('+', ""),
        verbose: token.contains('+'),
        arg,
    }
}

pub fn shape_argument(arg: &str, mode: ArgMode) -> Result<Option<String>> {
    let shaped = match mode {
        ArgMode::Raw => arg.trim().to_string(),
        ArgMode::Parsed => shell_words::split(arg)
            .wrap_err_with(|| format!("failed to parse argument: {}", arg))?
            .join(" "),
    };

    if shaped.is_empty() {
        Ok(None)
    } else {
        Ok(Some(shaped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_command_and_argument() {
        let parsed = parse_special_command(".schema users");
        assert_eq!(parsed.command, ".schema");
        assert!(!parsed.verbose);
        assert_eq!(parsed.arg, "users");
    }

    #[test]
    fn plus_suffix_sets_verbose() {
        let parsed = parse_special_command(".tables+ us");
        assert_eq!(parsed.command, ".tables");
        assert!(parsed.verbose);
        assert_eq!(parsed.arg, "us");
    }

    #[test]
    fn trailing_semicolon_and_whitespace_are_dropped() {
        let parsed = parse_special_command("  \\dt   orders ;  ");
        assert_eq!(parsed.command, "\\dt");
        assert_eq!(parsed.arg, "orders");

        let parsed = parse_special_command("status;");
        assert_eq!(parsed.command, "status");
        assert_eq!(parsed.arg, "");
    }

    #[test]
    fn parsed_mode_strips_quotes() {
        let arg = shape_argument("\"my table\"", ArgMode::Parsed).unwrap();
        assert_eq!(arg.as_deref(), Some("my table"));

        let arg = shape_argument("'users'", ArgMode::Parsed).unwrap();
        assert_eq!(arg.as_deref(), Some("users"));
    }

    #[test]
    fn raw_mode_keeps_text() {
        let arg = shape_argument("  'users' extra ", ArgMode::Raw).unwrap();
        assert_eq!(arg.as_deref(), Some("'users' extra"));
    }

    #[test]
    fn empty_argument_is_none() {
        assert_eq!(shape_argument("", ArgMode::Parsed).unwrap(), None);
        assert_eq!(shape_argument("   ", ArgMode::Raw).unwrap(), None);
        assert_eq!(shape_argument("''", ArgMode::Parsed).unwrap(), None);
    }

    #[test]
    fn unbalanced_quote_is_an_error() {
        let err = shape_argument("\"users", ArgMode::Parsed).unwrap_err();
        assert!(err.to_string().contains("failed to parse argument"));
    }
}
