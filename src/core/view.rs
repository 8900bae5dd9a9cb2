//! Filtered, ordered views over a book's transactions.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::domain::common::SoftDelete;
use crate::domain::transaction::Transaction;

/// Sort keys the transaction list offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// An inclusive date window; half-open when only one bound is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn starting(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn until(to: DateTime<Utc>) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    /// The calendar week around `reference`, starting Monday.
    pub fn this_week(reference: DateTime<Utc>) -> Self {
        let monday = reference.date_naive()
            - Duration::days(reference.weekday().num_days_from_monday() as i64);
        let start = start_of_day(monday);
        Self::between(start, start + Duration::days(7) - Duration::seconds(1))
    }

    /// The calendar month containing `reference`.
    pub fn this_month(reference: DateTime<Utc>) -> Self {
        let date = reference.date_naive();
        let first = date.with_day(1).unwrap();
        let next = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1).unwrap()
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1).unwrap()
        };
        Self::between(
            start_of_day(first),
            start_of_day(next) - Duration::seconds(1),
        )
    }

    /// The trailing window of `days` days ending at `reference`.
    pub fn last_days(reference: DateTime<Utc>, days: i64) -> Self {
        Self::between(reference - Duration::days(days), reference)
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc()
}

/// Filter and ordering criteria for the transaction list.
#[derive(Debug, Clone, Default)]
pub struct TransactionQuery {
    pub search: Option<String>,
    pub range: Option<DateRange>,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl TransactionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on the transaction narration.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_sort(mut self, sort: SortKey, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }
}

/// Produces the view-ordered subset of a transaction collection.
pub struct TransactionFilterSort;

impl TransactionFilterSort {
    /// Selects live user transactions matching `query`, recomputed fresh on
    /// every call. The input collection is never reordered; ties in the sort
    /// key keep their input order.
    ///
    /// Amount ordering uses the debit-side total, which equals the credit
    /// total for every validated transaction.
    pub fn select<'a>(
        transactions: &'a [Transaction],
        query: &TransactionQuery,
    ) -> Vec<&'a Transaction> {
        let needle = query.search.as_ref().map(|term| term.to_lowercase());
        let mut rows: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| !txn.is_deleted() && !txn.is_opening())
            .filter(|txn| match &needle {
                Some(term) => txn.description.to_lowercase().contains(term),
                None => true,
            })
            .filter(|txn| query.range.map_or(true, |range| range.contains(txn.date)))
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match query.sort {
                SortKey::Date => a.date.cmp(&b.date),
                SortKey::Amount => a.debit_total().cmp(&b.debit_total()),
                SortKey::Description => a
                    .description
                    .to_lowercase()
                    .cmp(&b.description.to_lowercase()),
            };
            match query.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows
    }

    /// The system-generated opening-balance rows, which the list screens
    /// show in their own section.
    pub fn opening_balances(transactions: &[Transaction]) -> Vec<&Transaction> {
        transactions
            .iter()
            .filter(|txn| !txn.is_deleted() && txn.is_opening())
            .collect()
    }
}
