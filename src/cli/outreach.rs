use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::cli::{open_store, policy};
use crate::error::Result;
use crate::fmt::money;
use crate::outreach::{compose, outstanding_for};
use crate::reconciler::reconcile;
use crate::reports::debtors;

pub fn run(name: Option<String>) -> Result<()> {
    let store = open_store()?;
    let records = if store.is_empty() {
        Vec::new()
    } else {
        reconcile(store.headers(), store.rows(), &policy()?)?
    };
    let owed = debtors(&records);

    if owed.is_empty() {
        println!("{}", "Clean slate: no outstanding balances.".green());
        return Ok(());
    }

    let Some(name) = name else {
        // One line per party; repeated names collapse to their summed debt.
        let mut by_name: Vec<(String, Decimal)> = Vec::new();
        for r in &owed {
            match by_name.iter_mut().find(|(n, _)| n == &r.name) {
                Some((_, due)) => *due += r.outstanding,
                None => by_name.push((r.name.clone(), r.outstanding)),
            }
        }
        let mut table = Table::new();
        table.set_header(vec!["Name", "Outstanding"]);
        for (party, due) in &by_name {
            table.add_row(vec![Cell::new(party), Cell::new(money(*due))]);
        }
        println!("Debtors\n{table}");
        println!("\nDraft a reminder with `dunner outreach <name>`.");
        return Ok(());
    };

    let due = outstanding_for(&records, &name)?;
    let reminder = compose(&name, due);

    println!("{}", "Draft message".bold());
    println!("Subject: {}", reminder.subject);
    println!();
    println!("{}", reminder.body);
    println!("{}", "Mail link".bold());
    println!("{}", reminder.mailto());
    Ok(())
}
