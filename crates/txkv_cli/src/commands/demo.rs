//! Demo command: walks through the reference scenario.

use super::format_value;
use crate::error::CliResult;
use std::io::Write;
use tracing::info;
use txkv_core::{StoreResult, TransactionalStore};

fn report(out: &mut impl Write, result: StoreResult<()>) -> CliResult<()> {
    if let Err(err) = result {
        writeln!(out, "{err}")?;
    }
    Ok(())
}

/// Runs the demo, writing one line per read or rejected call.
pub fn run(out: &mut impl Write) -> CliResult<()> {
    info!("Running reference scenario");
    let mut store = TransactionalStore::with_config(txkv_core::Config::new().name("demo"));

    writeln!(out, "{}", format_value(store.get("A")))?;
    report(out, store.put("A", 5))?;

    report(out, store.begin_transaction())?;
    report(out, store.put("A", 5))?;
    writeln!(out, "{}", format_value(store.get("A")))?;

    report(out, store.put("A", 6))?;
    report(out, store.commit())?;
    writeln!(out, "{}", format_value(store.get("A")))?;

    report(out, store.commit())?;
    report(out, store.rollback())?;

    writeln!(out, "{}", format_value(store.get("B")))?;
    report(out, store.begin_transaction())?;
    report(out, store.put("B", 10))?;
    report(out, store.rollback())?;
    writeln!(out, "{}", format_value(store.get("B")))?;

    Ok(())
}
