use std::path::Path;

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::error::{DunnerError, Result};
use crate::models::RawRow;

// Canonical column names after header normalization.
pub const COL_NAME: &str = "NAME";
pub const COL_BILLED: &str = "AMOUNT";
pub const COL_BILLED_ALIAS: &str = "BILLED";
pub const COL_PAID: &str = "PAID";
pub const COL_OUTSTANDING: &str = "OUTSTANDING";
pub const COL_STATUS: &str = "STATUS";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Trim and uppercase a header so inconsistently-cased uploads line up.
pub fn normalize_header(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Derived columns are recomputed on every read; drop them on ingest so an
/// exported file can be reloaded.
pub fn is_derived(header: &str) -> bool {
    header == COL_OUTSTANDING || header == COL_STATUS
}

/// Strip currency noise and parse an amount cell. An empty cell is `None`;
/// a non-empty cell that still fails to parse is a hard error naming the row
/// and column.
pub fn parse_amount(raw: &str, row: usize, column: &str) -> Result<Option<Decimal>> {
    let s = raw.replace(',', "").replace('"', "").replace('$', "");
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        let amount: Decimal = inner
            .trim()
            .parse()
            .map_err(|_| bad_amount(row, column, raw))?;
        return Ok(Some(-amount));
    }
    s.parse().map(Some).map_err(|_| bad_amount(row, column, raw))
}

fn bad_amount(row: usize, column: &str, value: &str) -> DunnerError {
    DunnerError::BadAmount {
        row,
        column: column.to_string(),
        value: value.trim().to_string(),
    }
}

pub fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

struct Layout {
    headers: Vec<String>,
    name_idx: usize,
    billed_idx: Option<usize>,
    paid_idx: Option<usize>,
}

impl Layout {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let name_idx = headers
            .iter()
            .position(|h| h == COL_NAME)
            .ok_or_else(|| DunnerError::MissingColumn(COL_NAME.to_string()))?;
        let billed_idx = headers
            .iter()
            .position(|h| h == COL_BILLED || h == COL_BILLED_ALIAS);
        let paid_idx = headers.iter().position(|h| h == COL_PAID);
        Ok(Self {
            headers: headers.to_vec(),
            name_idx,
            billed_idx,
            paid_idx,
        })
    }

    /// Columns carried into the session: everything except the derived ones.
    fn kept_headers(&self) -> Vec<String> {
        self.headers
            .iter()
            .filter(|h| !is_derived(h))
            .cloned()
            .collect()
    }

    fn row_from_fields(&self, fields: &[&str], row_no: usize) -> Result<RawRow> {
        let get = |idx: usize| fields.get(idx).copied().unwrap_or("");
        let name = get(self.name_idx).trim().to_string();
        let billed = match self.billed_idx {
            Some(i) => parse_amount(get(i), row_no, &self.headers[i])?,
            None => None,
        };
        let paid = match self.paid_idx {
            Some(i) => parse_amount(get(i), row_no, &self.headers[i])?,
            None => None,
        };
        let mut extras = Vec::new();
        for (i, header) in self.headers.iter().enumerate() {
            if i == self.name_idx
                || Some(i) == self.billed_idx
                || Some(i) == self.paid_idx
                || is_derived(header)
            {
                continue;
            }
            extras.push((header.clone(), get(i).trim().to_string()));
        }
        Ok(RawRow {
            name,
            billed,
            paid,
            extras,
        })
    }
}

// ---------------------------------------------------------------------------
// Formats, detected by file-name extension
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LedgerFormat {
    Csv,
    #[cfg(feature = "xlsx")]
    Xlsx,
}

impl LedgerFormat {
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            #[cfg(feature = "xlsx")]
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(DunnerError::UnknownFormat(path.display().to_string())),
        }
    }
}

/// A parsed upload: normalized headers in original order plus typed rows.
#[derive(Debug, Clone)]
pub struct ParsedLedger {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

pub fn parse_file(path: &Path) -> Result<ParsedLedger> {
    match LedgerFormat::detect(path)? {
        LedgerFormat::Csv => parse_csv(path),
        #[cfg(feature = "xlsx")]
        LedgerFormat::Xlsx => parse_xlsx(path),
    }
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

fn parse_csv(path: &Path) -> Result<ParsedLedger> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut records = rdr.records();
    let header_record = match records.next() {
        Some(r) => r?,
        None => return Err(DunnerError::MissingColumn(COL_NAME.to_string())),
    };
    let headers: Vec<String> = header_record.iter().map(normalize_header).collect();
    let layout = Layout::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (i, result) in records.enumerate() {
        let record = result?;
        // 1-based row numbers in messages, counting the header row
        let row_no = i + 2;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let fields: Vec<&str> = record.iter().collect();
        rows.push(layout.row_from_fields(&fields, row_no)?);
    }
    Ok(ParsedLedger {
        headers: layout.kept_headers(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// XLSX parser (feature-gated)
// ---------------------------------------------------------------------------

#[cfg(feature = "xlsx")]
fn parse_xlsx(path: &Path) -> Result<ParsedLedger> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| DunnerError::Other(format!("Failed to open XLSX: {e}")))?;
    let sheet_names = workbook.sheet_names();
    let sheet = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| DunnerError::Other("XLSX file has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| DunnerError::Other(format!("Failed to read worksheet '{sheet}': {e}")))?;

    let mut sheet_rows = range.rows();
    let header_row = sheet_rows
        .next()
        .ok_or_else(|| DunnerError::MissingColumn(COL_NAME.to_string()))?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|c| normalize_header(&cell_text(c)))
        .collect();
    let layout = Layout::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (i, row) in sheet_rows.enumerate() {
        let row_no = i + 2;
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let fields: Vec<&str> = cells.iter().map(|s| s.as_str()).collect();
        rows.push(layout.row_from_fields(&fields, row_no)?);
    }
    Ok(ParsedLedger {
        headers: layout.kept_headers(),
        rows,
    })
}

#[cfg(feature = "xlsx")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
