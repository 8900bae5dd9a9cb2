use chrono::Utc;
use ledger_core::core::balance::BalanceCalculator;
use ledger_core::core::services::{AccountService, TransactionService};
use ledger_core::core::validation::EntryDraft;
use ledger_core::domain::account::Account;
use ledger_core::domain::book::Book;
use ledger_core::domain::category::{Category, CategoryKind};
use ledger_core::domain::transaction::{Entry, EntrySide, Transaction};
use ledger_core::domain::SoftDelete;
use ledger_core::errors::LedgerError;
use rust_decimal::Decimal;
use uuid::Uuid;

fn sale_book() -> (Book, Uuid, Uuid) {
    let mut book = Book::new("Shop");
    let assets = book.add_category(Category::new("Assets", CategoryKind::Asset));
    let income = book.add_category(Category::new("Income", CategoryKind::Income));
    let cash = AccountService::add(&mut book, Account::new("Cash", assets))
        .expect("cash account created");
    let sales = AccountService::add(&mut book, Account::new("Sales", income))
        .expect("sales account created");
    (book, cash, sales)
}

fn record_sale(book: &mut Book, cash: Uuid, sales: Uuid, amount: i64) -> Uuid {
    let drafts = [
        EntryDraft::new(cash, EntrySide::Debit, Decimal::from(amount)),
        EntryDraft::new(sales, EntrySide::Credit, Decimal::from(amount)),
    ];
    TransactionService::add(book, Utc::now(), "Sale", &drafts).expect("sale records")
}

#[test]
fn opening_balance_is_included() {
    let mut book = Book::new("Opening");
    let assets = book.add_category(Category::new("Assets", CategoryKind::Asset));
    let savings = AccountService::add(
        &mut book,
        Account::new("Savings", assets).with_opening_balance(Decimal::from(500), EntrySide::Debit),
    )
    .expect("account created");

    let report = BalanceCalculator::compute(&book).expect("balances compute");
    assert_eq!(report.accounts[&savings], Decimal::from(500));
    assert_eq!(report.totals.assets, Decimal::from(500));
    // the synthesized counterpart sits in equity
    assert_eq!(report.totals.equity, Decimal::from(500));
}

#[test]
fn sale_round_trip_reports_both_sides_positive() {
    let (mut book, cash, sales) = sale_book();
    record_sale(&mut book, cash, sales, 200);

    let report = BalanceCalculator::compute(&book).expect("balances compute");
    assert_eq!(report.accounts[&cash], Decimal::from(200));
    assert_eq!(report.accounts[&sales], Decimal::from(200));
    assert_eq!(report.totals.assets, Decimal::from(200));
    assert_eq!(report.totals.income, Decimal::from(200));
}

#[test]
fn debit_decreases_credit_normal_accounts() {
    let mut book = Book::new("Loan");
    let assets = book.add_category(Category::new("Assets", CategoryKind::Asset));
    let liabilities = book.add_category(Category::new("Liabilities", CategoryKind::Liability));
    let cash = AccountService::add(&mut book, Account::new("Cash", assets)).expect("cash created");
    let loan = AccountService::add(&mut book, Account::new("Loan", liabilities))
        .expect("loan created");

    let borrow = [
        EntryDraft::new(cash, EntrySide::Debit, Decimal::from(1000)),
        EntryDraft::new(loan, EntrySide::Credit, Decimal::from(1000)),
    ];
    TransactionService::add(&mut book, Utc::now(), "Borrow", &borrow).expect("borrow records");
    let repay = [
        EntryDraft::new(loan, EntrySide::Debit, Decimal::from(400)),
        EntryDraft::new(cash, EntrySide::Credit, Decimal::from(400)),
    ];
    TransactionService::add(&mut book, Utc::now(), "Repay", &repay).expect("repay records");

    let report = BalanceCalculator::compute(&book).expect("balances compute");
    assert_eq!(report.accounts[&cash], Decimal::from(600));
    assert_eq!(report.accounts[&loan], Decimal::from(600));
    assert_eq!(report.totals.liabilities, Decimal::from(600));
}

#[test]
fn soft_deleted_transactions_are_excluded() {
    let (mut book, cash, sales) = sale_book();
    record_sale(&mut book, cash, sales, 200);
    let second = record_sale(&mut book, cash, sales, 50);
    TransactionService::remove(&mut book, second).expect("second sale binned");

    let report = BalanceCalculator::compute(&book).expect("balances compute");
    assert_eq!(report.accounts[&cash], Decimal::from(200));
    assert_eq!(report.accounts[&sales], Decimal::from(200));
}

#[test]
fn soft_deleted_accounts_are_not_reported() {
    let (mut book, cash, sales) = sale_book();
    AccountService::remove(&mut book, sales).expect("unused account binned");

    let report = BalanceCalculator::compute(&book).expect("balances compute");
    assert!(report.accounts.contains_key(&cash));
    assert!(!report.accounts.contains_key(&sales));
}

#[test]
fn unknown_account_reference_errors() {
    let (mut book, cash, _) = sale_book();
    let bogus = Uuid::new_v4();
    // bypass the validator to simulate a corrupt snapshot
    let entries = vec![
        Entry::new(cash, EntrySide::Debit, Decimal::from(10)),
        Entry::new(bogus, EntrySide::Credit, Decimal::from(10)),
    ];
    book.add_transaction(Transaction::new(Utc::now(), "Corrupt", entries));

    let err = BalanceCalculator::compute(&book).expect_err("unknown account must fail");
    assert!(matches!(err, LedgerError::UnknownAccount(id) if id == bogus));
}

#[test]
fn computation_is_deterministic() {
    let (mut book, cash, sales) = sale_book();
    record_sale(&mut book, cash, sales, 75);
    record_sale(&mut book, cash, sales, 125);

    let first = BalanceCalculator::compute(&book).expect("first pass computes");
    let second = BalanceCalculator::compute(&book).expect("second pass computes");
    assert_eq!(first, second);
}

#[test]
fn binned_account_entries_still_post_to_live_legs() {
    let (mut book, cash, sales) = sale_book();
    record_sale(&mut book, cash, sales, 200);
    // bin the income account directly, keeping the transaction live
    book.account_mut(sales)
        .expect("sales account exists")
        .mark_deleted();

    let report = BalanceCalculator::compute(&book).expect("balances compute");
    assert_eq!(report.accounts[&cash], Decimal::from(200));
    assert!(!report.accounts.contains_key(&sales));
}
