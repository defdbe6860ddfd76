use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerbook_core::{DomainResult, Entity, TransactionId, ValueObject};

use crate::money;

/// What the user said they were recording.
///
/// Picks the side of the entry and is kept on the transaction for per-kind
/// reporting. Balances only ever look at debit/credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Payment,
}

impl TransactionKind {
    /// Income lands on the credit side; expenses and payments on the debit side.
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionKind::Income)
    }

    /// The amount this kind reports: credits for income, debits otherwise.
    pub fn amount_of(self, tx: &Transaction) -> Decimal {
        if self.is_credit() {
            tx.credit_amount()
        } else {
            tx.debit_amount()
        }
    }
}

/// A single debit or credit entry with a derived running balance.
///
/// `id` and `balance` are owned by the engine: they can be read but never
/// set from outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    pub reference: Option<String>,
    pub category: Option<String>,
    /// Absent for entries recorded straight as a debit or credit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    balance: Decimal,
    pub currency: String,
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Transaction {
    pub(crate) fn from_draft(draft: TransactionDraft, default_currency: &str, balance: Decimal) -> Self {
        Self {
            id: TransactionId::new(),
            date: draft.date,
            description: draft.description,
            reference: draft.reference,
            category: draft.category,
            kind: draft.kind,
            debit: draft.debit,
            credit: draft.credit,
            balance,
            currency: draft.currency.unwrap_or_else(|| default_currency.to_string()),
            notes: draft.notes,
            tags: draft.tags,
        }
    }

    pub fn id_typed(&self) -> TransactionId {
        self.id
    }

    /// Running balance after this transaction is applied.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub(crate) fn set_balance(&mut self, balance: Decimal) {
        self.balance = balance;
    }

    pub fn debit_amount(&self) -> Decimal {
        self.debit.unwrap_or(Decimal::ZERO)
    }

    pub fn credit_amount(&self) -> Decimal {
        self.credit.unwrap_or(Decimal::ZERO)
    }

    /// Net effect on the balance: `credit - debit`.
    ///
    /// Both sides set is allowed and nets out; neither set is a zero-effect entry.
    pub fn effect(&self) -> DomainResult<Decimal> {
        money::sub(self.credit_amount(), self.debit_amount())
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A transaction as submitted by a form, before it gets an id and a balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub kind: Option<TransactionKind>,
    #[serde(default)]
    pub debit: Option<Decimal>,
    #[serde(default)]
    pub credit: Option<Decimal>,
    /// Falls back to the statement currency when absent.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl ValueObject for TransactionDraft {}

impl TransactionDraft {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
            reference: None,
            category: None,
            kind: None,
            debit: None,
            credit: None,
            currency: None,
            notes: None,
            tags: BTreeSet::new(),
        }
    }

    /// Draft for an income, expense or payment of `amount`.
    pub fn of_kind(
        kind: TransactionKind,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        let draft = Self::new(date, description).with_kind(kind);
        if kind.is_credit() {
            draft.with_credit(amount)
        } else {
            draft.with_debit(amount)
        }
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_debit(mut self, amount: Decimal) -> Self {
        self.debit = Some(amount);
        self
    }

    pub fn with_credit(mut self, amount: Decimal) -> Self {
        self.credit = Some(amount);
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

/// Partial edit of an existing transaction.
///
/// Outer `None` leaves a field as it is. For optional fields the inner
/// `Option` is the new value, so `Some(None)` clears it (e.g. moving an
/// amount from the debit to the credit side).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub reference: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub kind: Option<Option<TransactionKind>>,
    pub debit: Option<Option<Decimal>>,
    pub credit: Option<Option<Decimal>>,
    pub currency: Option<String>,
    pub notes: Option<Option<String>>,
    pub tags: Option<BTreeSet<String>>,
}

impl ValueObject for TransactionPatch {}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_reference(mut self, reference: Option<String>) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_kind(mut self, kind: Option<TransactionKind>) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_debit(mut self, debit: Option<Decimal>) -> Self {
        self.debit = Some(debit);
        self
    }

    pub fn with_credit(mut self, credit: Option<Decimal>) -> Self {
        self.credit = Some(credit);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn with_tags(mut self, tags: BTreeSet<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub(crate) fn apply_to(&self, tx: &mut Transaction) {
        if let Some(date) = self.date {
            tx.date = date;
        }
        if let Some(description) = &self.description {
            tx.description = description.clone();
        }
        if let Some(reference) = &self.reference {
            tx.reference = reference.clone();
        }
        if let Some(category) = &self.category {
            tx.category = category.clone();
        }
        if let Some(kind) = self.kind {
            tx.kind = kind;
        }
        if let Some(debit) = self.debit {
            tx.debit = debit;
        }
        if let Some(credit) = self.credit {
            tx.credit = credit;
        }
        if let Some(currency) = &self.currency {
            tx.currency = currency.clone();
        }
        if let Some(notes) = &self.notes {
            tx.notes = notes.clone();
        }
        if let Some(tags) = &self.tags {
            tx.tags = tags.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn kind_picks_the_side_of_the_entry() {
        let income = TransactionDraft::of_kind(TransactionKind::Income, day(), "Salary", Decimal::from(900));
        assert_eq!(income.credit, Some(Decimal::from(900)));
        assert_eq!(income.debit, None);
        assert_eq!(income.kind, Some(TransactionKind::Income));

        let payment = TransactionDraft::of_kind(TransactionKind::Payment, day(), "Rent", Decimal::from(400));
        assert_eq!(payment.debit, Some(Decimal::from(400)));
        assert_eq!(payment.credit, None);

        let tx = Transaction::from_draft(payment, "USD", Decimal::ZERO);
        assert_eq!(tx.kind, Some(TransactionKind::Payment));
        assert_eq!(TransactionKind::Payment.amount_of(&tx), Decimal::from(400));
        assert_eq!(TransactionKind::Income.amount_of(&tx), Decimal::ZERO);
    }

    #[test]
    fn both_sides_net_out() {
        let draft = TransactionDraft::new(day(), "Refund with fee")
            .with_credit(Decimal::from(50))
            .with_debit(Decimal::from(5));
        let tx = Transaction::from_draft(draft, "USD", Decimal::ZERO);
        assert_eq!(tx.effect().unwrap(), Decimal::from(45));
    }

    #[test]
    fn neither_side_has_no_effect() {
        let tx = Transaction::from_draft(TransactionDraft::new(day(), "Memo"), "USD", Decimal::ZERO);
        assert_eq!(tx.effect().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn draft_currency_overrides_statement_currency() {
        let tx = Transaction::from_draft(
            TransactionDraft::new(day(), "Hotel").with_currency("EUR"),
            "USD",
            Decimal::ZERO,
        );
        assert_eq!(tx.currency, "EUR");

        let tx = Transaction::from_draft(TransactionDraft::new(day(), "Taxi"), "USD", Decimal::ZERO);
        assert_eq!(tx.currency, "USD");
    }

    #[test]
    fn patch_can_move_amount_between_sides() {
        let mut tx = Transaction::from_draft(
            TransactionDraft::new(day(), "Mistyped").with_debit(Decimal::from(20)),
            "USD",
            Decimal::ZERO,
        );
        let patch = TransactionPatch::new()
            .with_debit(None)
            .with_credit(Some(Decimal::from(20)));

        patch.apply_to(&mut tx);
        assert_eq!(tx.debit, None);
        assert_eq!(tx.credit, Some(Decimal::from(20)));
        assert_eq!(tx.description, "Mistyped");
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let tx = Transaction::from_draft(
            TransactionDraft::new(day(), "Coffee").with_debit(Decimal::new(350, 2)),
            "USD",
            Decimal::new(-350, 2),
        );
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["debit"], "3.50");
        assert_eq!(json["balance"], "-3.50");
        assert!(json.get("tags").is_none());
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn reads_numeric_amounts_from_stored_json() {
        let json = serde_json::json!({
            "id": TransactionId::new().to_string(),
            "date": "2024-03-01",
            "description": "Groceries",
            "reference": null,
            "category": "Food",
            "kind": "expense",
            "debit": 12.5,
            "credit": null,
            "balance": -12.5,
            "currency": "USD",
            "notes": null
        });
        let tx: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(tx.debit, Some(Decimal::new(125, 1)));
        assert_eq!(tx.balance(), Decimal::new(-125, 1));
        assert_eq!(tx.kind, Some(TransactionKind::Expense));
        assert!(tx.tags.is_empty());
    }

    #[test]
    fn patch_can_relabel_or_clear_the_kind() {
        let mut tx = Transaction::from_draft(
            TransactionDraft::of_kind(TransactionKind::Expense, day(), "Card bill", Decimal::from(80)),
            "USD",
            Decimal::ZERO,
        );
        TransactionPatch::new().with_kind(Some(TransactionKind::Payment)).apply_to(&mut tx);
        assert_eq!(tx.kind, Some(TransactionKind::Payment));
        TransactionPatch::new().with_kind(None).apply_to(&mut tx);
        assert_eq!(tx.kind, None);
        assert_eq!(tx.debit, Some(Decimal::from(80)));
    }

    #[test]
    fn effect_reports_overflow() {
        let mut tx = Transaction::from_draft(
            TransactionDraft::new(day(), "bad import").with_credit(Decimal::MAX),
            "USD",
            Decimal::ZERO,
        );
        tx.debit = Some(Decimal::MIN);
        assert!(tx.effect().is_err());
    }
}
