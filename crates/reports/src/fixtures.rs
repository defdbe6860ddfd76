use chrono::NaiveDate;
use rust_decimal::Decimal;

use ledgerbook_ledger::{
    NewStatement, Statement, StatementPeriod, TransactionDraft, TransactionKind, engine,
};

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

pub fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}

/// June statement, opening 100:
///
/// | date  | description    | category  | kind    | debit | credit | balance |
/// |-------|----------------|-----------|---------|-------|--------|---------|
/// | 06-01 | Salary         | Income    | income  |       | 1000   | 1100    |
/// | 06-01 | Rent           | Housing   | payment | 600   |        | 500     |
/// | 06-03 | Groceries      | Food      | expense | 80    |        | 420     |
/// | 06-10 | Coffee beans   | Food      | expense | 20    |        | 400     |
/// | 06-10 | Refund         | (none)    | (none)  |       | 15     | 415     |
pub fn june() -> Statement {
    let st = Statement::open(NewStatement {
        name: "June".to_string(),
        period: StatementPeriod::Monthly,
        start_date: day(1),
        end_date: day(30),
        opening_balance: dec(100),
        currency: Some("USD".to_string()),
    });
    engine::bulk_add(
        &st,
        vec![
            TransactionDraft::of_kind(TransactionKind::Income, day(1), "Salary", dec(1000))
                .with_category("Income"),
            TransactionDraft::of_kind(TransactionKind::Payment, day(1), "Rent", dec(600))
                .with_category("Housing")
                .with_reference("LEASE-7"),
            TransactionDraft::of_kind(TransactionKind::Expense, day(3), "Groceries", dec(80))
                .with_category("Food"),
            TransactionDraft::of_kind(TransactionKind::Expense, day(10), "Coffee beans", dec(20))
                .with_category("Food"),
            TransactionDraft::new(day(10), "Refund").with_credit(dec(15)),
        ],
    )
    .unwrap()
}
