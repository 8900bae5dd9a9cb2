//! Domain types classifying ledger accounts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Groups accounts and fixes the polarity their balances report with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            deleted_at: None,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

impl SoftDelete for Category {
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        self.deleted_at = deleted_at;
    }
}

/// The five double-entry classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryKind {
    Asset,
    Liability,
    Equity,
    Income,
    Expense,
}

impl CategoryKind {
    /// Whether debit entries increase balances of accounts in this kind.
    pub fn debit_normal(self) -> bool {
        matches!(self, CategoryKind::Asset | CategoryKind::Expense)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Asset => "Asset",
            CategoryKind::Liability => "Liability",
            CategoryKind::Equity => "Equity",
            CategoryKind::Income => "Income",
            CategoryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}
