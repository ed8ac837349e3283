use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DunnerError, Result};
use crate::reconciler::{MissingAmounts, ReconcilePolicy, Scheme};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// "three_tier" (HIGH/MEDIUM/PAID) or "two_tier" (UNPAID/SETTLED).
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// HIGH-priority boundary for the three-tier scheme.
    #[serde(default = "default_high_threshold")]
    pub high_threshold: Decimal,
    /// "error" rejects uploads without billed/paid columns; "zero" treats
    /// the missing amounts as 0.
    #[serde(default = "default_missing_amounts")]
    pub missing_amounts: String,
}

fn default_scheme() -> String {
    "three_tier".to_string()
}

fn default_high_threshold() -> Decimal {
    Decimal::from(500)
}

fn default_missing_amounts() -> String {
    "error".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            scheme: default_scheme(),
            high_threshold: default_high_threshold(),
            missing_amounts: default_missing_amounts(),
        }
    }
}

impl Settings {
    pub fn policy(&self) -> Result<ReconcilePolicy> {
        let scheme = match self.scheme.as_str() {
            "three_tier" => Scheme::ThreeTier {
                high_threshold: self.high_threshold,
            },
            "two_tier" => Scheme::TwoTier,
            other => {
                return Err(DunnerError::Settings(format!(
                    "unknown scheme '{other}' (expected three_tier or two_tier)"
                )))
            }
        };
        let missing_amounts = match self.missing_amounts.as_str() {
            "error" => MissingAmounts::Error,
            "zero" => MissingAmounts::Zero,
            other => {
                return Err(DunnerError::Settings(format!(
                    "unknown missing_amounts policy '{other}' (expected error or zero)"
                )))
            }
        };
        Ok(ReconcilePolicy {
            scheme,
            missing_amounts,
        })
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dunner")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("dunner")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| DunnerError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}

/// Where the ledger session lives.
pub fn ledger_path() -> PathBuf {
    get_data_dir().join("ledger.json")
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
