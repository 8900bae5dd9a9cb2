//! Business logic helpers for managing accounts.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::core::validation::{EntryDraft, EntryValidator};
use crate::domain::account::Account;
use crate::domain::book::Book;
use crate::domain::category::{Category, CategoryKind};
use crate::domain::common::SoftDelete;
use crate::domain::transaction::{EntrySide, Transaction, TransactionOrigin};
use crate::errors::LedgerError;

const OPENING_EQUITY_ACCOUNT: &str = "Opening Balances";
const OPENING_EQUITY_CATEGORY: &str = "Equity";

/// Provides validated CRUD helpers for ledger accounts.
pub struct AccountService;

impl AccountService {
    /// Adds a new account and returns its identifier. A non-zero opening
    /// balance synthesizes the matching opening-balance transaction.
    pub fn add(book: &mut Book, account: Account) -> ServiceResult<Uuid> {
        Self::validate_name(book, None, &account.name)?;
        Self::ensure_category_live(book, account.category_id)?;
        if account.opening_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(account.opening_balance.to_string()).into());
        }
        let id = account.id;
        let name = account.name.clone();
        let opening = (account.opening_balance, account.opening_side);
        book.add_account(account);
        if opening.0 > Decimal::ZERO {
            Self::record_opening(book, id, &name, opening.0, opening.1)?;
        }
        tracing::debug!(account = %id, "added account");
        Ok(id)
    }

    /// Updates name, category, and opening balance, keeping the synthesized
    /// opening transaction in sync.
    pub fn edit(book: &mut Book, id: Uuid, changes: Account) -> ServiceResult<()> {
        Self::validate_name(book, Some(id), &changes.name)?;
        Self::ensure_category_live(book, changes.category_id)?;
        if changes.opening_balance < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(changes.opening_balance.to_string()).into());
        }
        let account = book
            .account_mut(id)
            .filter(|account| !account.is_deleted())
            .ok_or_else(|| ServiceError::Invalid("Account not found".into()))?;
        account.name = changes.name;
        account.category_id = changes.category_id;
        account.opening_balance = changes.opening_balance;
        account.opening_side = changes.opening_side;
        Self::sync_opening(book, id)?;
        book.touch();
        Ok(())
    }

    /// Moves the account to the recycle bin, together with its synthesized
    /// opening transaction.
    pub fn remove(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        Self::ensure_removable(book, id)?;
        Self::mark_removed(book, id);
        book.touch();
        tracing::info!(account = %id, "account moved to recycle bin");
        Ok(())
    }

    /// Bulk removal. The whole batch is checked before any account is
    /// touched, so a single refusal leaves the book unchanged.
    pub fn remove_many(book: &mut Book, ids: &[Uuid]) -> ServiceResult<()> {
        for &id in ids {
            Self::ensure_removable(book, id)?;
        }
        for &id in ids {
            Self::mark_removed(book, id);
        }
        book.touch();
        Ok(())
    }

    /// Returns the book's live accounts.
    pub fn list(book: &Book) -> Vec<&Account> {
        book.live_accounts().collect()
    }

    fn ensure_removable(book: &Book, id: Uuid) -> ServiceResult<()> {
        let name = book
            .live_account(id)
            .map(|account| account.name.clone())
            .ok_or_else(|| ServiceError::Invalid("Account not found".into()))?;
        let referenced = book.live_transactions().any(|txn| {
            txn.opening_account() != Some(id) && txn.entries.iter().any(|e| e.account_id == id)
        });
        if referenced {
            return Err(LedgerError::StillReferenced {
                kind: "account",
                name,
            }
            .into());
        }
        Ok(())
    }

    fn mark_removed(book: &mut Book, id: Uuid) {
        let opening: Vec<Uuid> = book
            .live_transactions()
            .filter(|txn| txn.opening_account() == Some(id))
            .map(|txn| txn.id)
            .collect();
        for txn_id in opening {
            if let Some(txn) = book.transaction_mut(txn_id) {
                txn.mark_deleted();
            }
        }
        if let Some(account) = book.account_mut(id) {
            account.mark_deleted();
        }
    }

    /// Rewrites, creates, or drops the account's opening transaction so it
    /// matches the account's current opening balance.
    fn sync_opening(book: &mut Book, id: Uuid) -> ServiceResult<()> {
        let (name, amount, side) = {
            let account = book
                .account(id)
                .ok_or_else(|| ServiceError::Invalid("Account not found".into()))?;
            (
                account.name.clone(),
                account.opening_balance,
                account.opening_side,
            )
        };
        let existing = book
            .transactions
            .iter()
            .find(|txn| txn.opening_account() == Some(id))
            .map(|txn| txn.id);
        match existing {
            Some(txn_id) if amount > Decimal::ZERO => {
                let equity_id = Self::opening_equity_account(book);
                let description = opening_description(&name);
                let drafts = [
                    EntryDraft::new(id, side, amount),
                    EntryDraft::new(equity_id, side.opposite(), amount),
                ];
                let entries = EntryValidator::validate(book, &description, &drafts)?;
                if let Some(txn) = book.transaction_mut(txn_id) {
                    txn.description = description;
                    txn.entries = entries;
                }
            }
            Some(txn_id) => {
                // opening balance cleared: the synthesized row goes with it
                book.transactions.retain(|txn| txn.id != txn_id);
            }
            None if amount > Decimal::ZERO => {
                Self::record_opening(book, id, &name, amount, side)?;
            }
            None => {}
        }
        Ok(())
    }

    fn record_opening(
        book: &mut Book,
        id: Uuid,
        name: &str,
        amount: Decimal,
        side: EntrySide,
    ) -> ServiceResult<()> {
        let equity_id = Self::opening_equity_account(book);
        let description = opening_description(name);
        let drafts = [
            EntryDraft::new(id, side, amount),
            EntryDraft::new(equity_id, side.opposite(), amount),
        ];
        let entries = EntryValidator::validate(book, &description, &drafts)?;
        let mut txn = Transaction::new(Utc::now(), description, entries);
        txn.origin = TransactionOrigin::OpeningBalance { account_id: id };
        book.add_transaction(txn);
        Ok(())
    }

    /// Finds or creates the equity account opening balances post against.
    fn opening_equity_account(book: &mut Book) -> Uuid {
        if let Some(account) = book
            .live_accounts()
            .find(|account| account.name == OPENING_EQUITY_ACCOUNT)
        {
            return account.id;
        }
        let category_id = match book.live_categories().find(|category| {
            category.name == OPENING_EQUITY_CATEGORY && category.kind == CategoryKind::Equity
        }) {
            Some(category) => category.id,
            None => book.add_category(Category::new(OPENING_EQUITY_CATEGORY, CategoryKind::Equity)),
        };
        book.add_account(Account::new(OPENING_EQUITY_ACCOUNT, category_id))
    }

    fn validate_name(book: &Book, exclude: Option<Uuid>, candidate: &str) -> ServiceResult<()> {
        if candidate.trim().is_empty() {
            return Err(ServiceError::Invalid("Account name cannot be empty".into()));
        }
        let normalized = candidate.trim().to_ascii_lowercase();
        let duplicate = book.live_accounts().any(|account| {
            let name = account.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| account.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Account `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }

    fn ensure_category_live(book: &Book, category_id: Uuid) -> ServiceResult<()> {
        if book.live_category(category_id).is_some() {
            Ok(())
        } else {
            Err(ServiceError::Invalid(
                "Linked category does not exist".into(),
            ))
        }
    }
}

fn opening_description(name: &str) -> String {
    format!("Opening Balance for {}", name)
}
