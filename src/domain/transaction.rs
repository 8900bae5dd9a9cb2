use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A dated double-entry record: a narration plus balanced debit and credit
/// legs against the book's accounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HighlightColor>,
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub origin: TransactionOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Creates a user-recorded transaction from already-validated entries.
    pub fn new(date: DateTime<Utc>, description: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            highlight: None,
            entries,
            origin: TransactionOrigin::User,
            deleted_at: None,
        }
    }

    /// Sum of the debit-side entry amounts.
    pub fn debit_total(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|entry| entry.side == EntrySide::Debit)
            .map(|entry| entry.amount)
            .sum()
    }

    /// Sum of the credit-side entry amounts.
    pub fn credit_total(&self) -> Decimal {
        self.entries
            .iter()
            .filter(|entry| entry.side == EntrySide::Credit)
            .map(|entry| entry.amount)
            .sum()
    }

    /// The account this transaction opens, if it is a synthesized
    /// opening-balance record.
    pub fn opening_account(&self) -> Option<Uuid> {
        match self.origin {
            TransactionOrigin::OpeningBalance { account_id } => Some(account_id),
            TransactionOrigin::User => None,
        }
    }

    pub fn is_opening(&self) -> bool {
        self.opening_account().is_some()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} ({})",
            self.description,
            crate::domain::money::format_amount(&self.debit_total())
        )
    }
}

impl SoftDelete for Transaction {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }
}

/// One debit or credit leg of a transaction, tied to one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub account_id: Uuid,
    pub side: EntrySide,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Entry {
    pub fn new(account_id: Uuid, side: EntrySide, amount: Decimal) -> Self {
        Self {
            account_id,
            side,
            amount,
            description: None,
        }
    }

    /// Attaches a line-item narration overriding the transaction's.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Which side of the book an entry posts to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    Debit,
    Credit,
}

impl EntrySide {
    pub fn opposite(self) -> Self {
        match self {
            EntrySide::Debit => EntrySide::Credit,
            EntrySide::Credit => EntrySide::Debit,
        }
    }
}

/// Row highlight colors the transaction list supports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Yellow,
    Blue,
    Green,
}

/// Distinguishes user-recorded transactions from system-generated ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionOrigin {
    #[default]
    User,
    /// Synthesized when the referenced account was created with a non-zero
    /// opening balance. Excluded from user edit and delete flows.
    OpeningBalance { account_id: Uuid },
}
