use rust_decimal::Decimal;

use crate::models::{PartyRecord, Status};

/// Ledger-wide sums. The empty ledger is all zeros.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub billed: Decimal,
    pub paid: Decimal,
    pub outstanding: Decimal,
}

pub fn totals(records: &[PartyRecord]) -> Totals {
    Totals {
        billed: records.iter().map(|r| r.billed).sum(),
        paid: records.iter().map(|r| r.paid).sum(),
        outstanding: records.iter().map(|r| r.outstanding).sum(),
    }
}

pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Per-status row counts in descending urgency order, omitting empty tiers.
pub fn status_breakdown(records: &[PartyRecord]) -> Vec<StatusCount> {
    const ORDER: [Status; 5] = [
        Status::High,
        Status::Medium,
        Status::Unpaid,
        Status::Paid,
        Status::Settled,
    ];
    ORDER
        .iter()
        .filter_map(|&status| {
            let count = records.iter().filter(|r| r.status == status).count();
            (count > 0).then_some(StatusCount { status, count })
        })
        .collect()
}

/// Rows with a positive outstanding balance, in ledger order.
pub fn debtors(records: &[PartyRecord]) -> Vec<&PartyRecord> {
    records
        .iter()
        .filter(|r| r.outstanding > Decimal::ZERO)
        .collect()
}
