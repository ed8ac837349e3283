use colored::Colorize;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    std::fs::create_dir_all(&settings.data_dir)?;
    save_settings(&settings)?;

    println!("{}", "dunner is ready.".green());
    println!("Data dir: {}", settings.data_dir);
    println!("Load a ledger with `dunner load <file.csv>`.");
    Ok(())
}
