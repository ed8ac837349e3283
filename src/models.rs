use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One ledger row as uploaded, before any derivation. An amount is `None`
/// when its column was absent or the cell was empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub name: String,
    pub billed: Option<Decimal>,
    pub paid: Option<Decimal>,
    /// Unrecognized columns carried through for export: (header, value).
    #[serde(default)]
    pub extras: Vec<(String, String)>,
}

/// A reconciled ledger row. `outstanding` and `status` are derived from the
/// current billed/paid values on every read and are never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyRecord {
    pub name: String,
    pub billed: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
    pub status: Status,
    pub extras: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    High,
    Medium,
    Paid,
    Unpaid,
    Settled,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
            Self::Settled => "SETTLED",
        }
    }
}
