//! Run command: executes a command script against a fresh store.

use super::format_value;
use crate::error::{CliError, CliResult};
use crate::script::{parse_line, Command};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};
use txkv_core::{StatsSnapshot, StoreResult, TransactionalStore, Value};

/// Output format for `DUMP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl std::str::FromStr for Format {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CliError::UnknownFormat(other.to_string())),
        }
    }
}

/// Options for the run command.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// `DUMP` output format.
    pub format: Format,
    /// Stop at the first rejected or malformed command.
    pub strict: bool,
}

/// Summary of a script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed.
    pub executed: usize,
    /// Commands the store rejected.
    pub rejected: usize,
    /// Lines that failed to parse.
    pub malformed: usize,
}

/// Store contents as printed by `DUMP`.
#[derive(Debug, Serialize)]
pub struct DumpResult {
    /// `idle` or `in-transaction`.
    pub state: String,
    /// Keys written by the active transaction.
    pub pending_writes: usize,
    /// Committed contents, sorted by key.
    pub committed: BTreeMap<String, Value>,
    /// Operation counters.
    pub stats: StatsView,
}

/// Serializable copy of the store counters.
#[derive(Debug, Serialize)]
pub struct StatsView {
    /// Total reads.
    pub reads: u64,
    /// Reads served by the overlay.
    pub overlay_hits: u64,
    /// Accepted writes.
    pub writes: u64,
    /// Transactions started.
    pub transactions_started: u64,
    /// Transactions committed.
    pub transactions_committed: u64,
    /// Transactions rolled back.
    pub transactions_rolled_back: u64,
    /// Rejected operations.
    pub errors: u64,
}

impl From<StatsSnapshot> for StatsView {
    fn from(s: StatsSnapshot) -> Self {
        Self {
            reads: s.reads,
            overlay_hits: s.overlay_hits,
            writes: s.writes,
            transactions_started: s.transactions_started,
            transactions_committed: s.transactions_committed,
            transactions_rolled_back: s.transactions_rolled_back,
            errors: s.errors,
        }
    }
}

/// Runs every command in `input`, writing results to `out`.
///
/// Rejected commands print the store's error message and execution
/// continues, unless `options.strict` is set.
pub fn run(
    input: impl BufRead,
    out: &mut impl Write,
    options: RunOptions,
) -> CliResult<RunSummary> {
    let mut store = TransactionalStore::new();
    let mut summary = RunSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;

        let command = match parse_line(line_no, &line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) if options.strict => return Err(err),
            Err(err) => {
                warn!("{err}");
                writeln!(out, "error: {err}")?;
                summary.malformed += 1;
                continue;
            }
        };

        debug!(line = line_no, ?command, "executing");
        summary.executed += 1;

        if let Err(source) = execute(&mut store, &command, out, options.format)? {
            if options.strict {
                return Err(CliError::Store {
                    line: line_no,
                    source,
                });
            }
            writeln!(out, "{source}")?;
            summary.rejected += 1;
        }
    }

    if store.in_transaction() {
        warn!(
            pending = store.pending_len(),
            "script ended inside a transaction; pending writes discarded"
        );
    }
    info!(
        executed = summary.executed,
        rejected = summary.rejected,
        malformed = summary.malformed,
        "script finished"
    );
    Ok(summary)
}

/// Executes one command. The outer result carries output failures, the
/// inner one the store's verdict.
fn execute(
    store: &mut TransactionalStore,
    command: &Command,
    out: &mut impl Write,
    format: Format,
) -> CliResult<StoreResult<()>> {
    let result = match command {
        Command::Get(key) => {
            writeln!(out, "{}", format_value(store.get(key)))?;
            Ok(())
        }
        Command::Put(key, value) => store.put(key.as_str(), *value),
        Command::Begin => store.begin_transaction(),
        Command::Commit => store.commit(),
        Command::Rollback => store.rollback(),
        Command::State => {
            writeln!(out, "{}", store.state())?;
            Ok(())
        }
        Command::Dump => {
            dump(store, out, format)?;
            Ok(())
        }
    };
    Ok(result)
}

fn dump(store: &TransactionalStore, out: &mut impl Write, format: Format) -> CliResult<()> {
    let result = DumpResult {
        state: store.state().to_string(),
        pending_writes: store.pending_len(),
        committed: store.committed_snapshot(),
        stats: store.stats().snapshot().into(),
    };

    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?,
        Format::Text => print_text_output(&result, out)?,
    }
    Ok(())
}

fn print_text_output(result: &DumpResult, out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "State:          {}", result.state)?;
    writeln!(out, "Pending writes: {}", result.pending_writes)?;
    writeln!(out, "Committed:      {} key(s)", result.committed.len())?;
    for (key, value) in &result.committed {
        writeln!(out, "  {key} = {value}")?;
    }
    writeln!(
        out,
        "Transactions:   {} started, {} committed, {} rolled back",
        result.stats.transactions_started,
        result.stats.transactions_committed,
        result.stats.transactions_rolled_back
    )?;
    writeln!(out, "Rejected:       {}", result.stats.errors)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENIENT: RunOptions = RunOptions {
        format: Format::Text,
        strict: false,
    };

    fn run_script(script: &str, options: RunOptions) -> (CliResult<RunSummary>, String) {
        let mut out = Vec::new();
        let result = run(script.as_bytes(), &mut out, options);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn reports_reads_and_rejections() {
        let script = "\
GET A
PUT A 5
BEGIN
PUT A 5
GET A
PUT A 6
COMMIT
GET A
COMMIT
ROLLBACK
";
        let (result, out) = run_script(script, LENIENT);
        let summary = result.unwrap();

        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "null",
                "no transaction in progress",
                "5",
                "6",
                "no transaction in progress",
                "no transaction in progress",
            ]
        );
        assert_eq!(summary.executed, 10);
        assert_eq!(summary.rejected, 3);
        assert_eq!(summary.malformed, 0);
    }

    #[test]
    fn malformed_lines_are_reported_and_skipped() {
        let (result, out) = run_script("# comment\nFROB\n\nBEGIN\nSTATE\n", LENIENT);
        let summary = result.unwrap();

        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.executed, 2);
        assert!(out.contains("line 2"));
        assert!(out.ends_with("in-transaction\n"));
    }

    #[test]
    fn strict_mode_stops_at_first_rejection() {
        let options = RunOptions {
            strict: true,
            ..LENIENT
        };
        let (result, out) = run_script("BEGIN\nBEGIN\nGET A\n", options);

        assert!(matches!(
            result,
            Err(CliError::Store {
                line: 2,
                source: txkv_core::StoreError::TransactionAlreadyActive
            })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn strict_mode_stops_at_first_malformed_line() {
        let options = RunOptions {
            strict: true,
            ..LENIENT
        };
        let (result, out) = run_script("BEGIN\nFROB\nSTATE\n", options);

        assert!(matches!(result, Err(CliError::Parse { line: 2, .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn dump_as_json() {
        let options = RunOptions {
            format: Format::Json,
            ..LENIENT
        };
        let (result, out) = run_script("BEGIN\nPUT b 2\nPUT a 1\nCOMMIT\nDUMP\n", options);
        result.unwrap();

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["state"], "idle");
        assert_eq!(json["committed"]["a"], 1);
        assert_eq!(json["committed"]["b"], 2);
        assert_eq!(json["stats"]["transactions_committed"], 1);
    }

    #[test]
    fn dump_as_text() {
        let (result, out) = run_script("BEGIN\nPUT a 1\nCOMMIT\nBEGIN\nDUMP\n", LENIENT);
        result.unwrap();

        assert!(out.contains("State:          in-transaction"));
        assert!(out.contains("  a = 1"));
    }

    #[test]
    fn format_parsing() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("yaml".parse::<Format>().is_err());
    }
}
