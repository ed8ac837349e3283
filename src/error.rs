use thiserror::Error;

#[derive(Error, Debug)]
pub enum DunnerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Row {row}: cannot parse {column} value '{value}' as an amount")]
    BadAmount {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unknown party: {0}")]
    UnknownParty(String),

    #[error("Nothing outstanding for: {0}")]
    NothingOwed(String),

    #[error("Row out of range: {0}")]
    RowOutOfRange(usize),

    #[error("Unsupported ledger format: {0}")]
    UnknownFormat(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DunnerError>;
