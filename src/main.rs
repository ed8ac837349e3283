mod cli;
mod error;
mod exporter;
mod fmt;
mod importer;
mod models;
mod outreach;
mod providers;
mod reconciler;
mod reports;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, EditCommands, ReportCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Load { file } => cli::load::run(&file),
        Commands::Report { command } => match command {
            ReportCommands::Summary => cli::report::summary(),
            ReportCommands::Ledger => cli::report::ledger(),
            ReportCommands::Debtors => cli::report::debtors(),
        },
        Commands::Edit { command } => match command {
            EditCommands::Set {
                row,
                name,
                billed,
                paid,
            } => cli::edit::set(row, name, billed, paid),
            EditCommands::Add { name, billed, paid } => cli::edit::add(name, billed, paid),
            EditCommands::Remove { row } => cli::edit::remove(row),
        },
        Commands::Outreach { name } => cli::outreach::run(name),
        Commands::Export { output } => cli::export::run(output),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
