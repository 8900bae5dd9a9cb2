//! The recycle bin: soft-deleted records and their restore/purge dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::book_manager::BookManager;
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::book::Book;
use crate::domain::common::SoftDelete;
use crate::errors::LedgerError;

/// Identifies one soft-deleted record, tagged by entity type. Dispatch is
/// exhaustive over this closed set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecycleTarget {
    Account { book_id: Uuid, account_id: Uuid },
    Category { book_id: Uuid, category_id: Uuid },
    Transaction { book_id: Uuid, transaction_id: Uuid },
    Book { book_id: Uuid },
}

/// A recycle bin row: the typed target plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecycledEntry {
    pub target: RecycleTarget,
    pub name: String,
    pub deleted_at: DateTime<Utc>,
}

/// Lists, restores, and purges soft-deleted records across all books.
pub struct RecycleBin;

impl RecycleBin {
    /// Every binned record, newest deletion first. A binned book hides its
    /// own contents; they come back (or go away) with the book itself.
    pub fn list(manager: &BookManager) -> Vec<RecycledEntry> {
        let mut entries = Vec::new();
        for book in manager.books() {
            if let Some(deleted_at) = book.deleted_at {
                entries.push(RecycledEntry {
                    target: RecycleTarget::Book { book_id: book.id },
                    name: book.name.clone(),
                    deleted_at,
                });
                continue;
            }
            for account in &book.accounts {
                if let Some(deleted_at) = account.deleted_at {
                    entries.push(RecycledEntry {
                        target: RecycleTarget::Account {
                            book_id: book.id,
                            account_id: account.id,
                        },
                        name: account.name.clone(),
                        deleted_at,
                    });
                }
            }
            for category in &book.categories {
                if let Some(deleted_at) = category.deleted_at {
                    entries.push(RecycledEntry {
                        target: RecycleTarget::Category {
                            book_id: book.id,
                            category_id: category.id,
                        },
                        name: category.name.clone(),
                        deleted_at,
                    });
                }
            }
            for txn in &book.transactions {
                if let Some(deleted_at) = txn.deleted_at {
                    entries.push(RecycledEntry {
                        target: RecycleTarget::Transaction {
                            book_id: book.id,
                            transaction_id: txn.id,
                        },
                        name: txn.description.clone(),
                        deleted_at,
                    });
                }
            }
        }
        entries.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        entries
    }

    /// Restores the targeted record. Whatever the record references must be
    /// live again first.
    pub fn restore(manager: &mut BookManager, target: RecycleTarget) -> ServiceResult<()> {
        match target {
            RecycleTarget::Account {
                book_id,
                account_id,
            } => {
                let book = live_book_mut(manager, book_id)?;
                let category_id = {
                    let account = binned_account(book, account_id)?;
                    account.category_id
                };
                if book.live_category(category_id).is_none() {
                    return Err(ServiceError::Invalid(
                        "Restore the account's category first".into(),
                    ));
                }
                if let Some(account) = book.account_mut(account_id) {
                    account.restore();
                }
                let opening: Vec<Uuid> = book
                    .transactions
                    .iter()
                    .filter(|txn| txn.opening_account() == Some(account_id) && txn.is_deleted())
                    .map(|txn| txn.id)
                    .collect();
                for txn_id in opening {
                    if let Some(txn) = book.transaction_mut(txn_id) {
                        txn.restore();
                    }
                }
                book.touch();
                Ok(())
            }
            RecycleTarget::Category {
                book_id,
                category_id,
            } => {
                let book = live_book_mut(manager, book_id)?;
                let category = book
                    .category_mut(category_id)
                    .filter(|category| category.is_deleted())
                    .ok_or_else(|| not_in_bin("Category"))?;
                category.restore();
                book.touch();
                Ok(())
            }
            RecycleTarget::Transaction {
                book_id,
                transaction_id,
            } => {
                let book = live_book_mut(manager, book_id)?;
                let unresolved = {
                    let txn = book
                        .transaction(transaction_id)
                        .filter(|txn| txn.is_deleted())
                        .ok_or_else(|| not_in_bin("Transaction"))?;
                    txn.entries
                        .iter()
                        .any(|entry| book.live_account(entry.account_id).is_none())
                };
                if unresolved {
                    return Err(ServiceError::Invalid(
                        "Restore the referenced accounts first".into(),
                    ));
                }
                if let Some(txn) = book.transaction_mut(transaction_id) {
                    txn.restore();
                }
                book.touch();
                Ok(())
            }
            RecycleTarget::Book { book_id } => {
                let book = manager
                    .book_mut(book_id)
                    .filter(|book| book.is_deleted())
                    .ok_or_else(|| not_in_bin("Book"))?;
                book.restore();
                book.touch();
                Ok(())
            }
        }
    }

    /// Permanently removes the targeted record. Irreversible.
    pub fn purge(manager: &mut BookManager, target: RecycleTarget) -> ServiceResult<()> {
        match target {
            RecycleTarget::Account {
                book_id,
                account_id,
            } => {
                let book = live_book_mut(manager, book_id)?;
                let name = {
                    let account = binned_account(book, account_id)?;
                    account.name.clone()
                };
                let referenced = book.transactions.iter().any(|txn| {
                    txn.opening_account() != Some(account_id)
                        && txn.entries.iter().any(|entry| entry.account_id == account_id)
                });
                if referenced {
                    return Err(LedgerError::StillReferenced {
                        kind: "account",
                        name,
                    }
                    .into());
                }
                book.transactions
                    .retain(|txn| txn.opening_account() != Some(account_id));
                book.accounts.retain(|account| account.id != account_id);
                book.touch();
                Ok(())
            }
            RecycleTarget::Category {
                book_id,
                category_id,
            } => {
                let book = live_book_mut(manager, book_id)?;
                let name = book
                    .category(category_id)
                    .filter(|category| category.is_deleted())
                    .map(|category| category.name.clone())
                    .ok_or_else(|| not_in_bin("Category"))?;
                if book
                    .accounts
                    .iter()
                    .any(|account| account.category_id == category_id)
                {
                    return Err(LedgerError::StillReferenced {
                        kind: "category",
                        name,
                    }
                    .into());
                }
                book.categories.retain(|category| category.id != category_id);
                book.touch();
                Ok(())
            }
            RecycleTarget::Transaction {
                book_id,
                transaction_id,
            } => {
                let book = live_book_mut(manager, book_id)?;
                if book
                    .transaction(transaction_id)
                    .filter(|txn| txn.is_deleted())
                    .is_none()
                {
                    return Err(not_in_bin("Transaction"));
                }
                book.transactions.retain(|txn| txn.id != transaction_id);
                book.touch();
                Ok(())
            }
            RecycleTarget::Book { book_id } => {
                if manager
                    .book(book_id)
                    .filter(|book| book.is_deleted())
                    .is_none()
                {
                    return Err(not_in_bin("Book"));
                }
                manager.remove_book(book_id);
                Ok(())
            }
        }
    }
}

fn live_book_mut(manager: &mut BookManager, book_id: Uuid) -> ServiceResult<&mut Book> {
    manager
        .live_book_mut(book_id)
        .ok_or_else(|| ServiceError::Invalid("Book not found".into()))
}

fn binned_account(
    book: &Book,
    account_id: Uuid,
) -> ServiceResult<&crate::domain::account::Account> {
    book.account(account_id)
        .filter(|account| account.is_deleted())
        .ok_or_else(|| not_in_bin("Account"))
}

fn not_in_bin(kind: &str) -> ServiceError {
    ServiceError::Invalid(format!("{} is not in the recycle bin", kind))
}
