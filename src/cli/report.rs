use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::cli::{open_store, policy};
use crate::error::Result;
use crate::fmt::money;
use crate::models::{PartyRecord, Status};
use crate::reconciler::reconcile;
use crate::reports;

fn reconciled() -> Result<Vec<PartyRecord>> {
    let store = open_store()?;
    if store.is_empty() {
        return Ok(Vec::new());
    }
    reconcile(store.headers(), store.rows(), &policy()?)
}

fn status_cell(status: Status) -> String {
    let label = status.label();
    match status {
        Status::High => label.red().bold().to_string(),
        Status::Medium | Status::Unpaid => label.yellow().to_string(),
        Status::Paid | Status::Settled => label.green().to_string(),
    }
}

fn ledger_table<'a, I>(rows: I) -> Table
where
    I: Iterator<Item = (usize, &'a PartyRecord)>,
{
    let mut table = Table::new();
    table.set_header(vec!["Row", "Name", "Billed", "Paid", "Outstanding", "Status"]);
    for (i, r) in rows {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&r.name),
            Cell::new(money(r.billed)),
            Cell::new(money(r.paid)),
            Cell::new(money(r.outstanding)),
            Cell::new(status_cell(r.status)),
        ]);
    }
    table
}

pub fn summary() -> Result<()> {
    let records = reconciled()?;
    let sums = reports::totals(&records);

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Amount"]);
    table.add_row(vec![Cell::new("Total billed"), Cell::new(money(sums.billed))]);
    table.add_row(vec![Cell::new("Collected"), Cell::new(money(sums.paid))]);
    table.add_row(vec![
        Cell::new("Outstanding".bold()),
        Cell::new(money(sums.outstanding)),
    ]);
    println!("Ledger Summary\n{table}");

    let breakdown = reports::status_breakdown(&records);
    if breakdown.is_empty() {
        println!("\nLedger is empty. Run `dunner load <file>` to get started.");
        return Ok(());
    }
    let mut btable = Table::new();
    btable.set_header(vec!["Status", "Rows"]);
    for item in &breakdown {
        btable.add_row(vec![Cell::new(status_cell(item.status)), Cell::new(item.count)]);
    }
    println!("\nBy Status\n{btable}");
    Ok(())
}

pub fn ledger() -> Result<()> {
    let records = reconciled()?;
    if records.is_empty() {
        println!("Ledger is empty. Run `dunner load <file>` to get started.");
        return Ok(());
    }
    println!("Master Ledger\n{}", ledger_table(records.iter().enumerate()));
    Ok(())
}

pub fn debtors() -> Result<()> {
    let records = reconciled()?;
    let owed: Vec<(usize, &PartyRecord)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.outstanding > Decimal::ZERO)
        .collect();
    if owed.is_empty() {
        println!("{}", "Clean slate: no outstanding balances.".green());
        return Ok(());
    }
    println!("Debtors\n{}", ledger_table(owed.into_iter()));
    Ok(())
}
