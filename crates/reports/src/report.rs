use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use ledgerbook_core::{DomainResult, StatementId};
use ledgerbook_ledger::{Statement, Transaction, money};

use crate::breakdown::{
    CategoryTotal, DailyTrend, KindTotals, category_breakdown, daily_trends, kind_totals,
};
use crate::filter::TransactionFilter;

/// Summary of the filtered slice of one statement.
///
/// Totals here cover the filtered transactions only; the statement's own
/// aggregates are unaffected by the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub statement_id: StatementId,
    pub statement_name: String,
    pub currency: String,
    pub generated_for: NaiveDate,
    pub transaction_count: usize,
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub net_change: Decimal,
    pub by_kind: KindTotals,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<CategoryTotal>,
    pub daily: Vec<DailyTrend>,
}

impl Report {
    pub fn generate(
        statement: &Statement,
        filter: &TransactionFilter,
        today: NaiveDate,
    ) -> DomainResult<Self> {
        let selected = filter.apply(statement.transactions(), today);

        let total_credits = money::sum(selected.iter().map(|tx| tx.credit_amount()))?;
        let total_debits = money::sum(selected.iter().map(|tx| tx.debit_amount()))?;

        Ok(Self {
            statement_id: statement.id_typed(),
            statement_name: statement.name().to_string(),
            currency: statement.currency().to_string(),
            generated_for: today,
            transaction_count: selected.len(),
            total_credits,
            total_debits,
            net_change: money::sub(total_credits, total_debits)?,
            by_kind: kind_totals(selected.iter().copied())?,
            categories: category_breakdown(selected.iter().copied())?,
            daily: daily_trends(selected.iter().copied())?,
            transactions: selected.into_iter().cloned().collect(),
        })
    }
}
