use rust_decimal::Decimal;

use crate::cli::{open_store, policy};
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::reconciler::reconcile;
use crate::settings::{ledger_path, load_settings};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let path = ledger_path();

    println!("Data dir:     {}", settings.data_dir);
    println!("Session:      {}", path.display());
    println!("Scheme:       {}", settings.scheme);
    println!("Threshold:    {}", money(settings.high_threshold));
    println!("Missing cols: {}", settings.missing_amounts);

    if !path.exists() {
        println!();
        println!("No ledger session. Run `dunner load <file>` to get started.");
        return Ok(());
    }

    let size = std::fs::metadata(&path)?.len();
    let store = open_store()?;
    let session = store.session();
    let records = if store.is_empty() {
        Vec::new()
    } else {
        reconcile(store.headers(), store.rows(), &policy()?)?
    };
    let debtor_rows = records
        .iter()
        .filter(|r| r.outstanding > Decimal::ZERO)
        .count();

    println!();
    println!("File size:    {}", format_bytes(size));
    println!("Source:       {}", session.source_file.as_deref().unwrap_or("(none)"));
    println!("Loaded at:    {}", session.loaded_at.as_deref().unwrap_or("(unknown)"));
    println!("Rows:         {}", store.rows().len());
    println!("Debtor rows:  {debtor_rows}");
    Ok(())
}
