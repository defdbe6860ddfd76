use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerbook_core::{DomainResult, Entity, StatementId, ValueObject};

use crate::money;
use crate::transaction::Transaction;

/// Currency used when a new statement does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Statement period classification (not enforced against the date range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementPeriod {
    Monthly,
    Quarterly,
    Yearly,
    Custom,
}

/// A named container of transactions with an opening balance and derived
/// aggregates.
///
/// The transaction sequence, running balances and totals are only ever
/// produced by [`crate::engine`]; this type exposes them read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statement {
    id: StatementId,
    name: String,
    period: StatementPeriod,
    start_date: NaiveDate,
    end_date: NaiveDate,
    transactions: Vec<Transaction>,
    total_debits: Decimal,
    total_credits: Decimal,
    net_change: Decimal,
    opening_balance: Decimal,
    closing_balance: Decimal,
    currency: String,
}

/// Input for [`Statement::open`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStatement {
    pub name: String,
    pub period: StatementPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub opening_balance: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
}

impl ValueObject for NewStatement {}

/// Edit of a statement's descriptive fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatementPatch {
    pub name: Option<String>,
    pub period: Option<StatementPeriod>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub opening_balance: Option<Decimal>,
    pub currency: Option<String>,
}

impl ValueObject for StatementPatch {}

impl StatementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_period(mut self, period: StatementPeriod) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    pub fn with_opening_balance(mut self, opening_balance: Decimal) -> Self {
        self.opening_balance = Some(opening_balance);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

impl Statement {
    /// Create an empty statement: no transactions, `closing_balance == opening_balance`.
    pub fn open(new: NewStatement) -> Self {
        Self {
            id: StatementId::new(),
            name: new.name,
            period: new.period,
            start_date: new.start_date,
            end_date: new.end_date,
            transactions: Vec::new(),
            total_debits: Decimal::ZERO,
            total_credits: Decimal::ZERO,
            net_change: Decimal::ZERO,
            opening_balance: new.opening_balance,
            closing_balance: new.opening_balance,
            currency: new.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }

    pub fn id_typed(&self) -> StatementId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn period(&self) -> StatementPeriod {
        self.period
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn total_debits(&self) -> Decimal {
        self.total_debits
    }

    pub fn total_credits(&self) -> Decimal {
        self.total_credits
    }

    pub fn net_change(&self) -> Decimal {
        self.net_change
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    pub fn closing_balance(&self) -> Decimal {
        self.closing_balance
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Balance the next appended transaction chains from.
    pub(crate) fn anchor_balance(&self) -> Decimal {
        self.transactions
            .last()
            .map(Transaction::balance)
            .unwrap_or(self.opening_balance)
    }

    pub(crate) fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }

    /// Re-derive running balances from `index` to the end of the sequence.
    ///
    /// The anchor is the stored balance of the transaction before `index`, or
    /// the opening balance when `index == 0`. Transactions before `index` are
    /// left untouched. On overflow the statement is left partly rechained, so
    /// callers only run this on a scratch copy.
    pub(crate) fn rechain_from(&mut self, index: usize) -> DomainResult<()> {
        let mut balance = match index {
            0 => self.opening_balance,
            i => self.transactions[i - 1].balance(),
        };
        for tx in self.transactions.iter_mut().skip(index) {
            balance = money::add(balance, tx.effect()?)?;
            tx.set_balance(balance);
        }
        Ok(())
    }

    /// Re-derive totals as full sums over the sequence.
    pub(crate) fn refresh_totals(&mut self) -> DomainResult<()> {
        let debits = money::sum(self.transactions.iter().map(Transaction::debit_amount))?;
        let credits = money::sum(self.transactions.iter().map(Transaction::credit_amount))?;
        let net_change = money::sub(credits, debits)?;
        self.closing_balance = money::add(self.opening_balance, net_change)?;
        self.total_debits = debits;
        self.total_credits = credits;
        self.net_change = net_change;
        Ok(())
    }

    /// Apply descriptive edits. Returns `true` when the opening balance moved.
    pub(crate) fn apply_patch(&mut self, patch: &StatementPatch) -> bool {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(period) = patch.period {
            self.period = period;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(currency) = &patch.currency {
            self.currency = currency.clone();
        }
        match patch.opening_balance {
            Some(opening) if opening != self.opening_balance => {
                self.opening_balance = opening;
                true
            }
            _ => false,
        }
    }
}

impl Entity for Statement {
    type Id = StatementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
