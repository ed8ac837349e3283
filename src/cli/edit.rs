use crate::cli::{open_store, policy};
use crate::error::{DunnerError, Result};
use crate::fmt::money;
use crate::importer::{parse_amount, COL_BILLED, COL_BILLED_ALIAS, COL_NAME, COL_PAID};
use crate::models::{PartyRecord, RawRow};
use crate::reconciler::reconcile;
use crate::store::LedgerStore;

/// Validate the edited copy before swapping it in; a bad edit never lands.
fn commit(store: &mut LedgerStore, rows: Vec<RawRow>) -> Result<Vec<PartyRecord>> {
    let records = reconcile(store.headers(), &rows, &policy()?)?;
    store.replace_all(rows)?;
    Ok(records)
}

fn print_row(records: &[PartyRecord], row: usize) {
    let r = &records[row - 1];
    println!(
        "Row {row}: {} billed {} paid {} outstanding {} [{}]",
        r.name,
        money(r.billed),
        money(r.paid),
        money(r.outstanding),
        r.status.label()
    );
}

pub fn set(
    row: usize,
    name: Option<String>,
    billed: Option<String>,
    paid: Option<String>,
) -> Result<()> {
    let mut store = open_store()?;
    if row == 0 || row > store.rows().len() {
        return Err(DunnerError::RowOutOfRange(row));
    }

    let mut rows = store.rows().to_vec();
    let target = &mut rows[row - 1];
    if let Some(n) = name {
        target.name = n;
    }
    if let Some(raw) = billed.as_deref() {
        target.billed = parse_amount(raw, row, COL_BILLED)?;
        store.ensure_column(COL_BILLED, &[COL_BILLED_ALIAS]);
    }
    if let Some(raw) = paid.as_deref() {
        target.paid = parse_amount(raw, row, COL_PAID)?;
        store.ensure_column(COL_PAID, &[]);
    }

    let records = commit(&mut store, rows)?;
    print_row(&records, row);
    Ok(())
}

pub fn add(name: String, billed: Option<String>, paid: Option<String>) -> Result<()> {
    let mut store = open_store()?;
    let row = store.rows().len() + 1;
    // A hand-built ledger gets the canonical columns up front.
    store.ensure_column(COL_NAME, &[]);
    store.ensure_column(COL_BILLED, &[COL_BILLED_ALIAS]);
    store.ensure_column(COL_PAID, &[]);

    let billed = match billed.as_deref() {
        Some(raw) => parse_amount(raw, row, COL_BILLED)?,
        None => None,
    };
    let paid = match paid.as_deref() {
        Some(raw) => parse_amount(raw, row, COL_PAID)?,
        None => None,
    };

    let mut rows = store.rows().to_vec();
    rows.push(RawRow {
        name,
        billed,
        paid,
        extras: Vec::new(),
    });
    let records = commit(&mut store, rows)?;
    print_row(&records, row);
    Ok(())
}

pub fn remove(row: usize) -> Result<()> {
    let mut store = open_store()?;
    if row == 0 || row > store.rows().len() {
        return Err(DunnerError::RowOutOfRange(row));
    }
    let mut rows = store.rows().to_vec();
    let removed = rows.remove(row - 1);
    commit(&mut store, rows)?;
    println!("Removed {} (row {row})", removed.name);
    Ok(())
}
