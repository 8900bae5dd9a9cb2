use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::transaction::EntrySide;

/// A ledger account: one line in the book that entries post against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub opening_balance: Decimal,
    pub opening_side: EntrySide,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Creates a new account under the given category with a zero opening
    /// balance.
    pub fn new(name: impl Into<String>, category_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category_id,
            opening_balance: Decimal::ZERO,
            opening_side: EntrySide::Debit,
            deleted_at: None,
        }
    }

    /// Sets the balance the account starts with at creation time.
    pub fn with_opening_balance(mut self, amount: Decimal, side: EntrySide) -> Self {
        self.opening_balance = amount;
        self.opening_side = side;
        self
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}

impl SoftDelete for Account {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }
}
