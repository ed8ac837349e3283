use std::path::Path;

use crate::cli::{open_store, policy};
use crate::error::Result;
use crate::fmt::money;
use crate::importer::{compute_checksum, parse_file};
use crate::reconciler::reconcile;
use crate::reports::totals;

pub fn run(file: &str) -> Result<()> {
    let path = Path::new(file);
    let mut store = open_store()?;

    let checksum = compute_checksum(path)?;
    if store.already_loaded(&checksum) {
        println!("This file is already loaded (identical checksum). Ledger unchanged.");
        return Ok(());
    }

    let parsed = parse_file(path)?;
    // Reconcile first so a bad upload never replaces the session.
    let records = reconcile(&parsed.headers, &parsed.rows, &policy()?)?;
    let sums = totals(&records);

    let source = path.file_name().and_then(|n| n.to_str()).unwrap_or(file);
    store.load(parsed.headers, parsed.rows, source, checksum)?;

    println!("Loaded {} rows from {source}", records.len());
    println!(
        "Billed {}  Collected {}  Outstanding {}",
        money(sums.billed),
        money(sums.paid),
        money(sums.outstanding)
    );
    Ok(())
}
