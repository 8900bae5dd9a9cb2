//! Business logic helpers for managing transactions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::core::validation::{EntryDraft, EntryValidator};
use crate::core::view::{TransactionFilterSort, TransactionQuery};
use crate::domain::book::Book;
use crate::domain::common::SoftDelete;
use crate::domain::transaction::{HighlightColor, Transaction};

/// Provides validated CRUD helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates and records a new transaction, returning its identifier.
    pub fn add(
        book: &mut Book,
        date: DateTime<Utc>,
        description: impl Into<String>,
        drafts: &[EntryDraft],
    ) -> ServiceResult<Uuid> {
        let description = description.into();
        let entries = EntryValidator::validate(book, &description, drafts)?;
        let id = book.add_transaction(Transaction::new(date, description, entries));
        tracing::debug!(transaction = %id, "recorded transaction");
        Ok(id)
    }

    /// Revalidates and replaces the transaction's user-editable fields.
    pub fn update(
        book: &mut Book,
        id: Uuid,
        date: DateTime<Utc>,
        description: impl Into<String>,
        drafts: &[EntryDraft],
    ) -> ServiceResult<()> {
        Self::ensure_user_editable(book, id)?;
        let description = description.into();
        let entries = EntryValidator::validate(book, &description, drafts)?;
        if let Some(txn) = book.transaction_mut(id) {
            txn.date = date;
            txn.description = description;
            txn.entries = entries;
        }
        book.touch();
        Ok(())
    }

    /// Sets or clears the row highlight.
    pub fn set_highlight(
        book: &mut Book,
        id: Uuid,
        highlight: Option<HighlightColor>,
    ) -> ServiceResult<()> {
        let txn = book
            .transaction_mut(id)
            .filter(|txn| !txn.is_deleted())
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        txn.highlight = highlight;
        book.touch();
        Ok(())
    }

    /// Toggles a highlight color: applying the current color clears it.
    /// Returns the highlight now in effect.
    pub fn toggle_highlight(
        book: &mut Book,
        id: Uuid,
        color: HighlightColor,
    ) -> ServiceResult<Option<HighlightColor>> {
        let txn = book
            .transaction_mut(id)
            .filter(|txn| !txn.is_deleted())
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        let next = if txn.highlight == Some(color) {
            None
        } else {
            Some(color)
        };
        txn.highlight = next;
        book.touch();
        Ok(next)
    }

    /// Moves the transaction to the recycle bin.
    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        Self::ensure_user_editable(book, id)?;
        if let Some(txn) = book.transaction_mut(id) {
            txn.mark_deleted();
        }
        book.touch();
        tracing::info!(transaction = %id, "transaction moved to recycle bin");
        Ok(())
    }

    /// Bulk removal. The whole batch is checked before any row is touched,
    /// so a single refusal leaves the book unchanged.
    pub fn remove_many(book: &mut Book, ids: &[Uuid]) -> ServiceResult<()> {
        for &id in ids {
            Self::ensure_user_editable(book, id)?;
        }
        for &id in ids {
            if let Some(txn) = book.transaction_mut(id) {
                txn.mark_deleted();
            }
        }
        book.touch();
        Ok(())
    }

    /// Returns the filtered, ordered transaction view.
    pub fn select<'a>(book: &'a Book, query: &TransactionQuery) -> Vec<&'a Transaction> {
        TransactionFilterSort::select(&book.transactions, query)
    }

    fn ensure_user_editable(book: &Book, id: Uuid) -> ServiceResult<()> {
        let txn = book
            .live_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        if txn.is_opening() {
            return Err(ServiceError::Invalid(
                "Opening balance entries are system managed".into(),
            ));
        }
        Ok(())
    }
}
