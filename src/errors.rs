use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Error type that captures ledger validation and computation failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("a transaction needs at least two entries, got {0}")]
    InsufficientEntries(usize),
    #[error("entry amount must be a positive number, got `{0}`")]
    InvalidAmount(String),
    #[error("entry references no live account in this book: {0}")]
    UnresolvedAccount(Uuid),
    #[error("debit total {debit} does not match credit total {credit}")]
    Unbalanced { debit: Decimal, credit: Decimal },
    #[error("entry references an account missing from the snapshot: {0}")]
    UnknownAccount(Uuid),
    #[error("account references a category missing from the snapshot: {0}")]
    UnknownCategory(Uuid),
    #[error("{kind} `{name}` is still referenced by live records")]
    StillReferenced { kind: &'static str, name: String },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
