use std::path::Path;

use crate::error::Result;
use crate::importer::{COL_BILLED, COL_BILLED_ALIAS, COL_NAME, COL_OUTSTANDING, COL_PAID, COL_STATUS};
use crate::models::PartyRecord;

/// Write the reconciled ledger as UTF-8 CSV: the session's columns in their
/// original order plus the two derived columns.
pub fn write_csv(path: &Path, headers: &[String], records: &[PartyRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut wtr = csv::Writer::from_path(path)?;

    let mut out_headers: Vec<&str> = headers.iter().map(|h| h.as_str()).collect();
    out_headers.push(COL_OUTSTANDING);
    out_headers.push(COL_STATUS);
    wtr.write_record(&out_headers)?;

    for record in records {
        let mut extras = record.extras.iter();
        let mut fields: Vec<String> = Vec::with_capacity(out_headers.len());
        for header in headers {
            let value = match header.as_str() {
                COL_NAME => record.name.clone(),
                COL_BILLED | COL_BILLED_ALIAS => record.billed.to_string(),
                COL_PAID => record.paid.to_string(),
                _ => extras.next().map(|(_, v)| v.clone()).unwrap_or_default(),
            };
            fields.push(value);
        }
        fields.push(record.outstanding.to_string());
        fields.push(record.status.label().to_string());
        wtr.write_record(&fields)?;
    }
    wtr.flush()?;
    Ok(())
}
