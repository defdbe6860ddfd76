use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use ledgerbook_core::DomainResult;
use ledgerbook_ledger::Statement;

use crate::breakdown::{KindTotals, kind_totals};

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_credits: Decimal,
    pub total_debits: Decimal,
    pub net_change: Decimal,
    pub current_balance: Decimal,
    pub transaction_count: usize,
    /// Transactions dated `today`.
    pub today_count: usize,
    pub by_kind: KindTotals,
}

impl DashboardStats {
    pub fn for_statement(statement: &Statement, today: NaiveDate) -> DomainResult<Self> {
        Ok(Self {
            total_credits: statement.total_credits(),
            total_debits: statement.total_debits(),
            net_change: statement.net_change(),
            current_balance: statement.closing_balance(),
            transaction_count: statement.len(),
            today_count: statement
                .transactions()
                .iter()
                .filter(|tx| tx.date == today)
                .count(),
            by_kind: kind_totals(statement.transactions())?,
        })
    }
}
