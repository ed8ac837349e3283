use std::path::PathBuf;

use crate::cli::{open_store, policy};
use crate::error::Result;
use crate::exporter::write_csv;
use crate::reconciler::reconcile;
use crate::settings::get_data_dir;

fn default_path() -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    get_data_dir().join("exports").join(format!("ledger-{date}.csv"))
}

pub fn run(output: Option<String>) -> Result<()> {
    let store = open_store()?;
    if store.is_empty() {
        println!("Ledger is empty; nothing to export.");
        return Ok(());
    }
    let records = reconcile(store.headers(), store.rows(), &policy()?)?;
    let path = output.map(PathBuf::from).unwrap_or_else(default_path);
    write_csv(&path, store.headers(), &records)?;
    println!("Wrote {} ({} rows)", path.display(), records.len());
    Ok(())
}
