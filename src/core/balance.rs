//! Balance computation over a book's accounts and transaction history.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::account::Account;
use crate::domain::book::Book;
use crate::domain::category::{Category, CategoryKind};
use crate::domain::common::SoftDelete;
use crate::domain::transaction::{EntrySide, Transaction};
use crate::errors::LedgerError;

/// Per-account balances plus the five categorized totals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalanceReport {
    pub accounts: BTreeMap<Uuid, Decimal>,
    pub totals: KindTotals,
}

/// Live balances summed per category kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KindTotals {
    pub assets: Decimal,
    pub liabilities: Decimal,
    pub equity: Decimal,
    pub income: Decimal,
    pub expenses: Decimal,
}

impl KindTotals {
    fn slot(&mut self, kind: CategoryKind) -> &mut Decimal {
        match kind {
            CategoryKind::Asset => &mut self.assets,
            CategoryKind::Liability => &mut self.liabilities,
            CategoryKind::Equity => &mut self.equity,
            CategoryKind::Income => &mut self.income,
            CategoryKind::Expense => &mut self.expenses,
        }
    }
}

/// Folds the full transaction history into current account balances in a
/// single pass.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Computes balances over the book's records.
    pub fn compute(book: &Book) -> Result<BalanceReport, LedgerError> {
        Self::compute_from(&book.accounts, &book.categories, &book.transactions)
    }

    /// Computes balances from raw snapshots.
    ///
    /// Balances report in each account's normal sign: debit-normal kinds
    /// (asset, expense) grow with debits, the rest grow with credits.
    /// Soft-deleted transactions are skipped entirely; soft-deleted accounts
    /// are absent from the report, though entries posted to them inside live
    /// transactions still count for the other legs' accounts.
    pub fn compute_from(
        accounts: &[Account],
        categories: &[Category],
        transactions: &[Transaction],
    ) -> Result<BalanceReport, LedgerError> {
        let kinds: BTreeMap<Uuid, CategoryKind> = categories
            .iter()
            .map(|category| (category.id, category.kind))
            .collect();

        let mut polarity: BTreeMap<Uuid, (CategoryKind, bool)> = BTreeMap::new();
        for account in accounts {
            let kind = kinds
                .get(&account.category_id)
                .copied()
                .ok_or(LedgerError::UnknownCategory(account.category_id))?;
            polarity.insert(account.id, (kind, !account.is_deleted()));
        }

        let mut report = BalanceReport::default();
        for account in accounts.iter().filter(|account| !account.is_deleted()) {
            report.accounts.insert(account.id, Decimal::ZERO);
        }

        for txn in transactions.iter().filter(|txn| !txn.is_deleted()) {
            for entry in &txn.entries {
                let (kind, live) = polarity
                    .get(&entry.account_id)
                    .copied()
                    .ok_or(LedgerError::UnknownAccount(entry.account_id))?;
                if !live {
                    continue;
                }
                let grows = kind.debit_normal() == (entry.side == EntrySide::Debit);
                let delta = if grows { entry.amount } else { -entry.amount };
                if let Some(balance) = report.accounts.get_mut(&entry.account_id) {
                    *balance += delta;
                }
            }
        }

        for account in accounts.iter().filter(|account| !account.is_deleted()) {
            if let (Some((kind, _)), Some(balance)) =
                (polarity.get(&account.id), report.accounts.get(&account.id))
            {
                *report.totals.slot(*kind) += *balance;
            }
        }

        Ok(report)
    }
}
