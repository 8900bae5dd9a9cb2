use ledger_core::core::validation::{EntryDraft, EntryValidator};
use ledger_core::domain::account::Account;
use ledger_core::domain::book::Book;
use ledger_core::domain::category::{Category, CategoryKind};
use ledger_core::domain::money::parse_amount;
use ledger_core::domain::transaction::EntrySide;
use ledger_core::domain::SoftDelete;
use ledger_core::errors::LedgerError;
use rust_decimal::Decimal;
use uuid::Uuid;

fn book_with_accounts() -> (Book, Uuid, Uuid) {
    let mut book = Book::new("Household");
    let assets = book.add_category(Category::new("Assets", CategoryKind::Asset));
    let income = book.add_category(Category::new("Income", CategoryKind::Income));
    let cash = book.add_account(Account::new("Cash", assets));
    let salary = book.add_account(Account::new("Salary", income));
    (book, cash, salary)
}

#[test]
fn fewer_than_two_entries_are_rejected() {
    let (book, cash, _) = book_with_accounts();

    let err = EntryValidator::validate(&book, "Empty", &[]).expect_err("no entries must fail");
    assert!(matches!(err, LedgerError::InsufficientEntries(0)));

    let single = [EntryDraft::new(cash, EntrySide::Debit, Decimal::from(10))];
    let err =
        EntryValidator::validate(&book, "Single", &single).expect_err("one entry must fail");
    assert!(matches!(err, LedgerError::InsufficientEntries(1)));
}

#[test]
fn zero_and_negative_amounts_are_rejected() {
    let (book, cash, salary) = book_with_accounts();

    let zero = [
        EntryDraft::new(cash, EntrySide::Debit, Decimal::ZERO),
        EntryDraft::new(salary, EntrySide::Credit, Decimal::ZERO),
    ];
    let err = EntryValidator::validate(&book, "Zero", &zero).expect_err("zero amount must fail");
    assert!(matches!(err, LedgerError::InvalidAmount(_)));

    let negative = [
        EntryDraft::new(cash, EntrySide::Debit, Decimal::from(-5)),
        EntryDraft::new(salary, EntrySide::Credit, Decimal::from(-5)),
    ];
    let err = EntryValidator::validate(&book, "Negative", &negative)
        .expect_err("negative amount must fail");
    assert!(matches!(err, LedgerError::InvalidAmount(_)));
}

#[test]
fn unknown_account_is_rejected() {
    let (book, cash, _) = book_with_accounts();
    let bogus = Uuid::new_v4();

    let drafts = [
        EntryDraft::new(cash, EntrySide::Debit, Decimal::from(10)),
        EntryDraft::new(bogus, EntrySide::Credit, Decimal::from(10)),
    ];
    let err = EntryValidator::validate(&book, "Unknown", &drafts)
        .expect_err("unknown account must fail");
    assert!(matches!(err, LedgerError::UnresolvedAccount(id) if id == bogus));
}

#[test]
fn soft_deleted_account_is_rejected() {
    let (mut book, cash, salary) = book_with_accounts();
    book.account_mut(salary)
        .expect("salary account exists")
        .mark_deleted();

    let drafts = [
        EntryDraft::new(cash, EntrySide::Debit, Decimal::from(10)),
        EntryDraft::new(salary, EntrySide::Credit, Decimal::from(10)),
    ];
    let err = EntryValidator::validate(&book, "Binned", &drafts)
        .expect_err("binned account must fail");
    assert!(matches!(err, LedgerError::UnresolvedAccount(id) if id == salary));
}

#[test]
fn unbalanced_totals_are_rejected() {
    let (book, cash, salary) = book_with_accounts();

    let drafts = [
        EntryDraft::new(cash, EntrySide::Debit, Decimal::from(100)),
        EntryDraft::new(salary, EntrySide::Credit, Decimal::from(90)),
    ];
    let err = EntryValidator::validate(&book, "Skewed", &drafts)
        .expect_err("unbalanced entries must fail");
    match err {
        LedgerError::Unbalanced { debit, credit } => {
            assert_eq!(debit, Decimal::from(100));
            assert_eq!(credit, Decimal::from(90));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn valid_entries_normalize_debits_first() {
    let (mut book, cash, salary) = book_with_accounts();
    let assets = book.categories[0].id;
    let bank = book.add_account(Account::new("Bank", assets));

    // mixed input order; the split debits must keep their relative order
    let drafts = [
        EntryDraft::new(salary, EntrySide::Credit, Decimal::from(150)),
        EntryDraft::new(cash, EntrySide::Debit, Decimal::from(100)).with_description("cash leg"),
        EntryDraft::new(bank, EntrySide::Debit, Decimal::from(50)),
    ];
    let entries = EntryValidator::validate(&book, "Payday", &drafts)
        .expect("balanced entries must validate");

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].account_id, cash);
    assert_eq!(entries[0].side, EntrySide::Debit);
    assert_eq!(entries[0].description.as_deref(), Some("cash leg"));
    assert_eq!(entries[1].account_id, bank);
    assert_eq!(entries[1].side, EntrySide::Debit);
    assert_eq!(entries[2].account_id, salary);
    assert_eq!(entries[2].side, EntrySide::Credit);
}

#[test]
fn non_numeric_amounts_fail_to_parse() {
    let err = parse_amount("12abc").expect_err("junk text must fail");
    assert!(matches!(err, LedgerError::InvalidAmount(ref raw) if raw == "12abc"));

    let amount = parse_amount(" 12.50 ").expect("plain decimal parses");
    assert_eq!(amount, Decimal::new(1250, 2));
}
