//! Command script parsing.
//!
//! One command per line. Verbs are case-insensitive; keys are taken
//! verbatim. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! BEGIN
//! PUT A 5
//! GET A
//! COMMIT
//! ```

use crate::error::{CliError, CliResult};
use txkv_core::Value;

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Read a key.
    Get(String),
    /// Write a key in the active transaction.
    Put(String, Value),
    /// Start a transaction.
    Begin,
    /// Commit the active transaction.
    Commit,
    /// Roll back the active transaction.
    Rollback,
    /// Print the store state.
    State,
    /// Print committed contents and counters.
    Dump,
}

/// Parses one line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line_no: usize, line: &str) -> CliResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_ascii_uppercase();
    let args: Vec<&str> = parts.collect();

    let expect_args = |n: usize| -> CliResult<()> {
        if args.len() == n {
            Ok(())
        } else {
            Err(CliError::parse(
                line_no,
                format!("{verb} takes {n} argument(s), got {}", args.len()),
            ))
        }
    };

    let command = match verb.as_str() {
        "GET" => {
            expect_args(1)?;
            Command::Get(args[0].to_string())
        }
        "PUT" | "SET" => {
            expect_args(2)?;
            let value = args[1].parse::<Value>().map_err(|e| {
                CliError::parse(line_no, format!("invalid value {:?}: {e}", args[1]))
            })?;
            Command::Put(args[0].to_string(), value)
        }
        "BEGIN" => {
            expect_args(0)?;
            Command::Begin
        }
        "COMMIT" => {
            expect_args(0)?;
            Command::Commit
        }
        "ROLLBACK" => {
            expect_args(0)?;
            Command::Rollback
        }
        "STATE" => {
            expect_args(0)?;
            Command::State
        }
        "DUMP" => {
            expect_args(0)?;
            Command::Dump
        }
        other => {
            return Err(CliError::parse(line_no, format!("unknown command {other:?}")));
        }
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_verb() {
        assert_eq!(parse_line(1, "GET a").unwrap(), Some(Command::Get("a".into())));
        assert_eq!(
            parse_line(1, "put a -7").unwrap(),
            Some(Command::Put("a".into(), -7))
        );
        assert_eq!(parse_line(1, "Begin").unwrap(), Some(Command::Begin));
        assert_eq!(parse_line(1, "COMMIT").unwrap(), Some(Command::Commit));
        assert_eq!(parse_line(1, "rollback").unwrap(), Some(Command::Rollback));
        assert_eq!(parse_line(1, "STATE").unwrap(), Some(Command::State));
        assert_eq!(parse_line(1, "dump").unwrap(), Some(Command::Dump));
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_line(1, "").unwrap(), None);
        assert_eq!(parse_line(1, "   ").unwrap(), None);
        assert_eq!(parse_line(1, "# setup").unwrap(), None);
    }

    #[test]
    fn keys_keep_their_case() {
        assert_eq!(parse_line(1, "get Key").unwrap(), Some(Command::Get("Key".into())));
    }

    #[test]
    fn rejects_bad_lines() {
        let err = parse_line(3, "PUT a").unwrap_err();
        assert!(matches!(err, CliError::Parse { line: 3, .. }));

        assert!(parse_line(1, "PUT a x").is_err());
        assert!(parse_line(1, "BEGIN now").is_err());
        assert!(parse_line(1, "DELETE a").is_err());
    }
}
