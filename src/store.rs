use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DunnerError, Result};
use crate::models::RawRow;

/// Everything persisted for a ledger session. Only raw values are written;
/// derived columns are recomputed on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<RawRow>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
    #[serde(default)]
    pub loaded_at: Option<String>,
}

/// The ledger session store. `load` and `replace_all` are the only mutators;
/// each rewrites the session file as one document.
pub struct LedgerStore {
    path: PathBuf,
    session: Session,
}

impl LedgerStore {
    /// Open the session at `path`, starting from an empty one when no
    /// session file exists yet.
    pub fn open(path: &Path) -> Result<Self> {
        let session = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| {
                DunnerError::Other(format!("Corrupt session file {}: {e}", path.display()))
            })?
        } else {
            Session::default()
        };
        Ok(Self {
            path: path.to_path_buf(),
            session,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.session.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.session.headers
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.session.rows
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True when `checksum` matches the file this session was loaded from.
    pub fn already_loaded(&self, checksum: &str) -> bool {
        self.session.checksum.as_deref() == Some(checksum)
    }

    /// Append `header` unless it, or one of `aliases`, is already present.
    pub fn ensure_column(&mut self, header: &str, aliases: &[&str]) {
        let present = self
            .session
            .headers
            .iter()
            .any(|h| h == header || aliases.contains(&h.as_str()));
        if !present {
            self.session.headers.push(header.to_string());
        }
    }

    /// Replace the whole session from a fresh upload.
    pub fn load(
        &mut self,
        headers: Vec<String>,
        rows: Vec<RawRow>,
        source_file: &str,
        checksum: String,
    ) -> Result<()> {
        self.session = Session {
            headers,
            rows,
            source_file: Some(source_file.to_string()),
            checksum: Some(checksum),
            loaded_at: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        };
        self.persist()
    }

    /// Commit an edited copy of the rows. The row set is swapped wholesale;
    /// there is no partial-commit path.
    pub fn replace_all(&mut self, rows: Vec<RawRow>) -> Result<()> {
        self.session.rows = rows;
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.session)
            .map_err(|e| DunnerError::Other(format!("Failed to serialize session: {e}")))?;
        std::fs::write(&self.path, format!("{json}\n"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_rows() -> Vec<RawRow> {
        vec![RawRow {
            name: "Alice".to_string(),
            billed: Some(d("1000.50")),
            paid: Some(d("400")),
            extras: vec![("EMAIL".to_string(), "alice@example.com".to_string())],
        }]
    }

    #[test]
    fn test_open_without_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::open(&dir.path().join("ledger.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.headers().is_empty());
    }

    #[test]
    fn test_load_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let headers = vec!["NAME".to_string(), "AMOUNT".to_string(), "PAID".to_string()];

        let mut store = LedgerStore::open(&path).unwrap();
        store
            .load(headers.clone(), sample_rows(), "upload.csv", "abc123".to_string())
            .unwrap();

        let reopened = LedgerStore::open(&path).unwrap();
        assert_eq!(reopened.headers(), headers.as_slice());
        assert_eq!(reopened.rows(), sample_rows().as_slice());
        assert_eq!(reopened.session().source_file.as_deref(), Some("upload.csv"));
        assert!(reopened.already_loaded("abc123"));
        assert!(!reopened.already_loaded("def456"));
    }

    #[test]
    fn test_replace_all_swaps_rows_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut store = LedgerStore::open(&path).unwrap();
        store
            .load(
                vec!["NAME".to_string(), "AMOUNT".to_string(), "PAID".to_string()],
                sample_rows(),
                "upload.csv",
                "abc123".to_string(),
            )
            .unwrap();

        let mut edited = store.rows().to_vec();
        edited[0].paid = Some(d("1000.50"));
        store.replace_all(edited).unwrap();

        let reopened = LedgerStore::open(&path).unwrap();
        assert_eq!(reopened.rows()[0].paid, Some(d("1000.50")));
        // metadata from the original upload survives an edit commit
        assert_eq!(reopened.session().source_file.as_deref(), Some("upload.csv"));
    }

    #[test]
    fn test_session_file_holds_no_derived_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut store = LedgerStore::open(&path).unwrap();
        store
            .load(
                vec!["NAME".to_string(), "AMOUNT".to_string(), "PAID".to_string()],
                sample_rows(),
                "upload.csv",
                "abc123".to_string(),
            )
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("outstanding"));
        assert!(!content.contains("status"));
    }

    #[test]
    fn test_ensure_column_respects_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LedgerStore::open(&dir.path().join("ledger.json")).unwrap();
        store.ensure_column("NAME", &[]);
        store.ensure_column("AMOUNT", &["BILLED"]);
        store.ensure_column("AMOUNT", &["BILLED"]);
        assert_eq!(store.headers(), &["NAME".to_string(), "AMOUNT".to_string()]);

        let mut aliased = LedgerStore::open(&dir.path().join("other.json")).unwrap();
        aliased.ensure_column("BILLED", &[]);
        aliased.ensure_column("AMOUNT", &["BILLED"]);
        assert_eq!(aliased.headers(), &["BILLED".to_string()]);
    }

    #[test]
    fn test_open_rejects_corrupt_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(LedgerStore::open(&path).is_err());
    }
}
