//! Entry validation gating what may be recorded in a book.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::book::Book;
use crate::domain::transaction::{Entry, EntrySide};
use crate::errors::LedgerError;

/// A proposed entry as captured by a form, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub account_id: Uuid,
    pub side: EntrySide,
    pub amount: Decimal,
    pub description: Option<String>,
}

impl EntryDraft {
    pub fn new(account_id: Uuid, side: EntrySide, amount: Decimal) -> Self {
        Self {
            account_id,
            side,
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Decides whether a proposed transaction is well-formed and balanced.
///
/// Pure: the validator never mutates the book; persistence is the caller's
/// responsibility once validation succeeds.
pub struct EntryValidator;

impl EntryValidator {
    /// Validates the drafted entries against the book and returns them
    /// normalized: debits first, then credits, with input order preserved
    /// within each side. Downstream display logic relies on that order.
    pub fn validate(
        book: &Book,
        description: &str,
        drafts: &[EntryDraft],
    ) -> Result<Vec<Entry>, LedgerError> {
        if drafts.len() < 2 {
            return Err(LedgerError::InsufficientEntries(drafts.len()));
        }
        for draft in drafts {
            if draft.amount <= Decimal::ZERO {
                return Err(LedgerError::InvalidAmount(draft.amount.to_string()));
            }
        }
        for draft in drafts {
            if book.live_account(draft.account_id).is_none() {
                return Err(LedgerError::UnresolvedAccount(draft.account_id));
            }
        }

        let debit: Decimal = drafts
            .iter()
            .filter(|draft| draft.side == EntrySide::Debit)
            .map(|draft| draft.amount)
            .sum();
        let credit: Decimal = drafts
            .iter()
            .filter(|draft| draft.side == EntrySide::Credit)
            .map(|draft| draft.amount)
            .sum();
        if debit != credit {
            tracing::debug!(%debit, %credit, description, "rejected unbalanced entry set");
            return Err(LedgerError::Unbalanced { debit, credit });
        }

        let mut entries = Vec::with_capacity(drafts.len());
        for side in [EntrySide::Debit, EntrySide::Credit] {
            entries.extend(drafts.iter().filter(|draft| draft.side == side).map(|draft| {
                Entry {
                    account_id: draft.account_id,
                    side: draft.side,
                    amount: draft.amount,
                    description: draft.description.clone(),
                }
            }));
        }
        Ok(entries)
    }
}
