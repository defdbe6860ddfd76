use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use ledgerbook_core::{DomainResult, ValueObject};
use ledgerbook_ledger::{Transaction, TransactionKind, money};

/// Bucket for transactions without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Per-category totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub credits: Decimal,
    pub debits: Decimal,
    pub net: Decimal,
    pub count: usize,
}

impl ValueObject for CategoryTotal {}

/// Per-day totals plus the balance the day closed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub credits: Decimal,
    pub debits: Decimal,
    pub net: Decimal,
    /// Balance of the last transaction (in statement order) dated `date`.
    pub balance: Decimal,
}

impl ValueObject for DailyTrend {}

/// Amounts per recorded kind. Entries without a kind count towards none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub payments: Decimal,
    /// `income - expenses - payments`.
    pub net_income: Decimal,
}

impl ValueObject for KindTotals {}

pub fn kind_totals<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> DomainResult<KindTotals> {
    let mut totals = KindTotals::default();

    for tx in transactions {
        let Some(kind) = tx.kind else { continue };
        let slot = match kind {
            TransactionKind::Income => &mut totals.income,
            TransactionKind::Expense => &mut totals.expenses,
            TransactionKind::Payment => &mut totals.payments,
        };
        *slot = money::add(*slot, kind.amount_of(tx))?;
    }

    totals.net_income = money::sub(money::sub(totals.income, totals.expenses)?, totals.payments)?;
    Ok(totals)
}

/// Totals grouped by category, ordered by category name.
pub fn category_breakdown<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> DomainResult<Vec<CategoryTotal>> {
    let mut buckets: BTreeMap<&str, CategoryTotal> = BTreeMap::new();

    for tx in transactions {
        let name = tx
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(UNCATEGORIZED);
        let bucket = buckets.entry(name).or_insert_with(|| CategoryTotal {
            category: name.to_string(),
            credits: Decimal::ZERO,
            debits: Decimal::ZERO,
            net: Decimal::ZERO,
            count: 0,
        });
        bucket.credits = money::add(bucket.credits, tx.credit_amount())?;
        bucket.debits = money::add(bucket.debits, tx.debit_amount())?;
        bucket.net = money::sub(bucket.credits, bucket.debits)?;
        bucket.count += 1;
    }

    Ok(buckets.into_values().collect())
}

/// Totals grouped by date, ascending.
pub fn daily_trends<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> DomainResult<Vec<DailyTrend>> {
    let mut days: BTreeMap<NaiveDate, DailyTrend> = BTreeMap::new();

    for tx in transactions {
        let day = days.entry(tx.date).or_insert_with(|| DailyTrend {
            date: tx.date,
            credits: Decimal::ZERO,
            debits: Decimal::ZERO,
            net: Decimal::ZERO,
            balance: Decimal::ZERO,
        });
        day.credits = money::add(day.credits, tx.credit_amount())?;
        day.debits = money::add(day.debits, tx.debit_amount())?;
        day.net = money::sub(day.credits, day.debits)?;
        day.balance = tx.balance();
    }

    Ok(days.into_values().collect())
}
