use rust_decimal::Decimal;

use crate::error::{DunnerError, Result};
use crate::importer::{COL_BILLED, COL_BILLED_ALIAS, COL_PAID};
use crate::models::{PartyRecord, RawRow, Status};

/// How to treat an upload whose header set has no billed or paid column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissingAmounts {
    /// Reject the upload with a blocking validation error.
    Error,
    /// Treat every missing amount as zero.
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scheme {
    /// UNPAID / SETTLED, split at zero.
    TwoTier,
    /// HIGH above the threshold, MEDIUM above zero, PAID otherwise.
    ThreeTier { high_threshold: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcilePolicy {
    pub scheme: Scheme,
    pub missing_amounts: MissingAmounts,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            scheme: Scheme::ThreeTier {
                high_threshold: Decimal::from(500),
            },
            missing_amounts: MissingAmounts::Error,
        }
    }
}

/// Status is a pure function of the outstanding balance.
pub fn classify(outstanding: Decimal, scheme: &Scheme) -> Status {
    match scheme {
        Scheme::TwoTier => {
            if outstanding > Decimal::ZERO {
                Status::Unpaid
            } else {
                Status::Settled
            }
        }
        Scheme::ThreeTier { high_threshold } => {
            if outstanding > *high_threshold {
                Status::High
            } else if outstanding > Decimal::ZERO {
                Status::Medium
            } else {
                Status::Paid
            }
        }
    }
}

fn has_column(headers: &[String], wanted: &[&str]) -> bool {
    headers.iter().any(|h| wanted.contains(&h.as_str()))
}

/// Derive outstanding balance and status for every row. Output length always
/// equals input length. Under the strict policy a missing amount column
/// fails the whole pass; no partial ledger is produced.
pub fn reconcile(
    headers: &[String],
    rows: &[RawRow],
    policy: &ReconcilePolicy,
) -> Result<Vec<PartyRecord>> {
    if policy.missing_amounts == MissingAmounts::Error {
        if !has_column(headers, &[COL_BILLED, COL_BILLED_ALIAS]) {
            return Err(DunnerError::MissingColumn(COL_BILLED.to_string()));
        }
        if !has_column(headers, &[COL_PAID]) {
            return Err(DunnerError::MissingColumn(COL_PAID.to_string()));
        }
    }

    Ok(rows
        .iter()
        .map(|row| {
            let billed = row.billed.unwrap_or(Decimal::ZERO);
            let paid = row.paid.unwrap_or(Decimal::ZERO);
            let outstanding = billed - paid;
            PartyRecord {
                name: row.name.clone(),
                billed,
                paid,
                outstanding,
                status: classify(outstanding, &policy.scheme),
                extras: row.extras.clone(),
            }
        })
        .collect())
}
