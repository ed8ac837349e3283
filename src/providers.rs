use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt::money;
use crate::models::PartyRecord;
use crate::reports::{debtors, Totals};

/// Billing collaborator: turns (party, amount) into a hosted payment URL.
/// Implementations live outside this crate; the engine only consumes the
/// contract.
pub trait PaymentLinkProvider {
    fn create_link(&self, party: &str, amount: Decimal) -> Result<String>;
}

/// Narration collaborator: answers free-text questions about the ledger. It
/// only ever sees rendered text and cannot mutate ledger data.
#[allow(dead_code)]
pub trait LedgerAnalyst {
    fn answer(&self, context: &str, question: &str) -> Result<String>;
}

/// Render the aggregate figures and debtor list as the context handed to a
/// `LedgerAnalyst`.
#[allow(dead_code)]
pub fn analysis_context(totals: &Totals, records: &[PartyRecord]) -> String {
    let mut context = format!(
        "Ledger summary: billed {}, collected {}, outstanding {}.\nDebtors:\n",
        money(totals.billed),
        money(totals.paid),
        money(totals.outstanding),
    );
    let owed = debtors(records);
    if owed.is_empty() {
        context.push_str("  (none)\n");
    } else {
        for record in owed {
            context.push_str(&format!("  {} owes {}\n", record.name, money(record.outstanding)));
        }
    }
    context
}
