//! Caller-owned presentation preferences.
//!
//! These are explicit values the presentation layer threads through its own
//! calls; the validation and balance engines never read them.

use serde::{Deserialize, Serialize};

use crate::domain::transaction::EntrySide;

/// How the transaction list labels the two sides of an entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransactionView {
    /// Plain-language "To"/"From" headings.
    #[default]
    ToFrom,
    /// Accounting "Dr"/"Cr" headings.
    DrCr,
}

impl TransactionView {
    pub fn debit_label(self) -> &'static str {
        match self {
            TransactionView::ToFrom => "To",
            TransactionView::DrCr => "Dr",
        }
    }

    pub fn credit_label(self) -> &'static str {
        match self {
            TransactionView::ToFrom => "From",
            TransactionView::DrCr => "Cr",
        }
    }

    pub fn side_label(self, side: EntrySide) -> &'static str {
        match side {
            EntrySide::Debit => self.debit_label(),
            EntrySide::Credit => self.credit_label(),
        }
    }
}

/// Per-book display preferences supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ViewPreferences {
    #[serde(default)]
    pub transaction_view: TransactionView,
}
