pub mod account_service;
pub mod category_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use category_service::CategoryService;
pub use transaction_service::TransactionService;

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors surfaced by the service layer on top of core ledger failures.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
