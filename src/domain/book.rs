use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::Account,
    category::Category,
    common::{Identifiable, NamedEntity, SoftDelete},
    transaction::Transaction,
};
use crate::errors::LedgerError;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// An isolated ledger namespace owning its accounts, categories, and
/// transactions. Cross-book references are disallowed; every operation is
/// scoped to one book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    /// The account with the given id, provided it is not in the recycle bin.
    pub fn live_account(&self, id: Uuid) -> Option<&Account> {
        self.account(id).filter(|account| !account.is_deleted())
    }

    pub fn live_category(&self, id: Uuid) -> Option<&Category> {
        self.category(id).filter(|category| !category.is_deleted())
    }

    pub fn live_transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transaction(id).filter(|txn| !txn.is_deleted())
    }

    pub fn live_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|account| !account.is_deleted())
    }

    pub fn live_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories
            .iter()
            .filter(|category| !category.is_deleted())
    }

    pub fn live_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|txn| !txn.is_deleted())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    /// Encodes the book as a JSON snapshot for the persistence collaborator.
    pub fn snapshot_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decodes a book from a JSON snapshot.
    pub fn from_snapshot_json(data: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(data)?)
    }
}

impl Identifiable for Book {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Book {
    fn name(&self) -> &str {
        &self.name
    }
}

impl SoftDelete for Book {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }
}
