use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rust_decimal::Decimal;

use crate::error::{DunnerError, Result};
use crate::fmt::money;
use crate::models::PartyRecord;
use crate::providers::PaymentLinkProvider;

/// RFC 3986 unreserved characters pass through; everything else is escaped
/// so subject and body survive embedding in a mailto query string.
const MAILTO_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, MAILTO_SET).to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub subject: String,
    pub body: String,
}

impl Reminder {
    /// A URI any mail client can open. The message is never sent by this
    /// tool.
    pub fn mailto(&self) -> String {
        format!(
            "mailto:?subject={}&body={}",
            encode(&self.subject),
            encode(&self.body)
        )
    }
}

/// Draft a reminder for a party with a positive outstanding balance. Callers
/// filter to debtors first; a non-positive balance here is a caller bug, not
/// a checked condition.
pub fn compose(name: &str, outstanding: Decimal) -> Reminder {
    let amount = money(outstanding);
    Reminder {
        subject: format!("Account Reconciliation - {name}"),
        body: format!(
            "Hi {name},\n\nOur records indicate an outstanding balance of {amount} on your \
             account. Please confirm receipt of this notice and arrange payment at your \
             earliest convenience.\n"
        ),
    }
}

/// Same draft with a payment URL from the billing collaborator appended.
#[allow(dead_code)]
pub fn compose_with_link(
    name: &str,
    outstanding: Decimal,
    links: &dyn PaymentLinkProvider,
) -> Result<Reminder> {
    let mut reminder = compose(name, outstanding);
    let url = links.create_link(name, outstanding)?;
    reminder.body.push_str(&format!("\nPay securely here: {url}\n"));
    Ok(reminder)
}

/// Total positive outstanding for a named party. Names can repeat across
/// rows; the reminder covers the sum of that party's open rows.
pub fn outstanding_for(records: &[PartyRecord], name: &str) -> Result<Decimal> {
    let matching: Vec<&PartyRecord> = records.iter().filter(|r| r.name == name).collect();
    if matching.is_empty() {
        return Err(DunnerError::UnknownParty(name.to_string()));
    }
    let due: Decimal = matching
        .iter()
        .filter(|r| r.outstanding > Decimal::ZERO)
        .map(|r| r.outstanding)
        .sum();
    if due <= Decimal::ZERO {
        return Err(DunnerError::NothingOwed(name.to_string()));
    }
    Ok(due)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use percent_encoding::percent_decode_str;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn record(name: &str, outstanding: &str) -> PartyRecord {
        PartyRecord {
            name: name.to_string(),
            billed: d(outstanding),
            paid: d("0"),
            outstanding: d(outstanding),
            status: Status::Medium,
            extras: Vec::new(),
        }
    }

    #[test]
    fn test_compose_names_party_and_amount() {
        let reminder = compose("Alice", d("600"));
        assert_eq!(reminder.subject, "Account Reconciliation - Alice");
        assert!(reminder.body.contains("Hi Alice"));
        assert!(reminder.body.contains("$600.00"));
    }

    #[test]
    fn test_mailto_shape() {
        let reminder = compose("Alice", d("1234.5"));
        let uri = reminder.mailto();
        assert!(uri.starts_with("mailto:?subject=Account%20Reconciliation%20-%20Alice&body="));
        assert!(uri.contains("%241%2C234.50"));
        // no raw reserved characters leak into the query
        let query = &uri["mailto:?".len()..];
        for part in query.split('&') {
            let value = part.split_once('=').unwrap().1;
            assert!(value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_.~%".contains(c)));
        }
    }

    #[test]
    fn test_encoding_round_trips() {
        let reminder = compose("Núñez & Sons", d("99.99"));
        let encoded_body = encode(&reminder.body);
        let decoded = percent_decode_str(&encoded_body).decode_utf8().unwrap();
        assert_eq!(decoded, reminder.body);
        let encoded_subject = encode(&reminder.subject);
        let decoded = percent_decode_str(&encoded_subject)
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, reminder.subject);
    }

    #[test]
    fn test_outstanding_for_sums_duplicate_names() {
        let records = vec![record("Alice", "100"), record("Alice", "250"), record("Bob", "10")];
        assert_eq!(outstanding_for(&records, "Alice").unwrap(), d("350"));
    }

    #[test]
    fn test_outstanding_for_unknown_party() {
        let records = vec![record("Alice", "100")];
        assert!(matches!(
            outstanding_for(&records, "Mallory"),
            Err(DunnerError::UnknownParty(_))
        ));
    }

    #[test]
    fn test_outstanding_for_settled_party() {
        let mut settled = record("Bob", "0");
        settled.outstanding = d("-25");
        let records = vec![settled];
        assert!(matches!(
            outstanding_for(&records, "Bob"),
            Err(DunnerError::NothingOwed(_))
        ));
    }

    #[test]
    fn test_compose_with_link_appends_payment_url() {
        struct FakeLinks;
        impl PaymentLinkProvider for FakeLinks {
            fn create_link(&self, party: &str, amount: Decimal) -> Result<String> {
                Ok(format!("https://pay.example.com/{party}/{amount}"))
            }
        }
        let reminder = compose_with_link("Alice", d("600"), &FakeLinks).unwrap();
        assert!(reminder.body.contains("https://pay.example.com/Alice/600"));
    }
}
