pub mod edit;
pub mod export;
pub mod init;
pub mod load;
pub mod outreach;
pub mod report;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::reconciler::ReconcilePolicy;
use crate::settings;
use crate::store::LedgerStore;

pub(crate) fn open_store() -> Result<LedgerStore> {
    LedgerStore::open(&settings::ledger_path())
}

pub(crate) fn policy() -> Result<ReconcilePolicy> {
    settings::load_settings().policy()
}

#[derive(Parser)]
#[command(name = "dunner", about = "Reconcile a billing ledger and chase outstanding balances.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up dunner: choose a data directory for ledger sessions.
    Init {
        /// Path for dunner data (default: ~/Documents/dunner)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Load a ledger file (CSV/XLSX), replacing the current session.
    Load {
        /// Path to the ledger file
        file: String,
    },
    /// Ledger reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Edit ledger rows; every change commits the whole ledger back.
    Edit {
        #[command(subcommand)]
        command: EditCommands,
    },
    /// Draft a payment reminder for a debtor.
    Outreach {
        /// Party name; omit to list parties with outstanding balances
        name: Option<String>,
    },
    /// Export the reconciled ledger to CSV.
    Export {
        /// Output file path (default: <data_dir>/exports/ledger-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the current session and summary statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals and per-status counts.
    Summary,
    /// Full reconciled ledger table.
    Ledger,
    /// Parties with a positive outstanding balance.
    Debtors,
}

#[derive(Subcommand)]
pub enum EditCommands {
    /// Update one row (row numbers as shown in `dunner report ledger`).
    Set {
        /// Row number
        row: usize,
        /// New party name
        #[arg(long)]
        name: Option<String>,
        /// New billed amount
        #[arg(long)]
        billed: Option<String>,
        /// New paid amount
        #[arg(long)]
        paid: Option<String>,
    },
    /// Append a row.
    Add {
        /// Party name
        #[arg(long)]
        name: String,
        /// Billed amount
        #[arg(long)]
        billed: Option<String>,
        /// Paid amount
        #[arg(long)]
        paid: Option<String>,
    },
    /// Remove a row.
    Remove {
        /// Row number
        row: usize,
    },
}
