use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use ledgerbook_core::ValueObject;
use ledgerbook_ledger::{Transaction, TransactionKind};

/// Look-back window relative to a reference day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativePeriod {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
}

impl RelativePeriod {
    /// Earliest date included, or `None` for no lower bound.
    pub fn earliest(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            RelativePeriod::All => None,
            RelativePeriod::Today => Some(today),
            RelativePeriod::Week => today.checked_sub_days(Days::new(7)),
            RelativePeriod::Month => today.checked_sub_months(Months::new(1)),
            RelativePeriod::Year => today.checked_sub_months(Months::new(12)),
        }
    }

    /// Inclusive window ending on `today`, or `None` for `All`.
    ///
    /// A look-back that runs off the calendar starts at the earliest date.
    pub fn window(self, today: NaiveDate) -> Option<DateRange> {
        match self {
            RelativePeriod::All => None,
            period => Some(DateRange {
                start: period.earliest(today).unwrap_or(NaiveDate::MIN),
                end: today,
            }),
        }
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which side of the ledger an entry must touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    Debit,
    Credit,
}

/// Composable transaction filter. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub period: RelativePeriod,
    pub range: Option<DateRange>,
    pub side: Option<EntrySide>,
    /// Only entries recorded with this kind.
    pub kind: Option<TransactionKind>,
    /// Case-insensitive substring over description, reference and category.
    pub search: Option<String>,
}

impl ValueObject for TransactionFilter {}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period(mut self, period: RelativePeriod) -> Self {
        self.period = period;
        self
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.range = Some(DateRange { start, end });
        self
    }

    pub fn with_side(mut self, side: EntrySide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    pub fn matches(&self, tx: &Transaction, today: NaiveDate) -> bool {
        let windows = [self.period.window(today), self.range];
        if windows.iter().flatten().any(|range| !range.contains(tx.date)) {
            return false;
        }
        if self.kind.is_some() && tx.kind != self.kind {
            return false;
        }
        match self.side {
            Some(EntrySide::Debit) if tx.debit_amount().is_zero() => return false,
            Some(EntrySide::Credit) if tx.credit_amount().is_zero() => return false,
            _ => {}
        }
        match &self.search {
            Some(term) => matches_text(tx, &term.to_lowercase()),
            None => true,
        }
    }

    /// Matching transactions in statement order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction], today: NaiveDate) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx, today))
            .collect()
    }
}

fn matches_text(tx: &Transaction, needle: &str) -> bool {
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(&tx.description)
        || tx.reference.as_deref().is_some_and(hit)
        || tx.category.as_deref().is_some_and(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{day, june};

    fn descriptions(filter: &TransactionFilter, today: NaiveDate) -> Vec<String> {
        let st = june();
        filter
            .apply(st.transactions(), today)
            .into_iter()
            .map(|tx| tx.description.clone())
            .collect()
    }

    #[test]
    fn default_filter_matches_everything() {
        assert_eq!(descriptions(&TransactionFilter::new(), day(30)).len(), 5);
    }

    #[test]
    fn week_looks_back_seven_days() {
        let filter = TransactionFilter::new().with_period(RelativePeriod::Week);
        assert_eq!(descriptions(&filter, day(10)), vec!["Groceries", "Coffee beans", "Refund"]);
    }

    #[test]
    fn today_only_keeps_same_day() {
        let filter = TransactionFilter::new().with_period(RelativePeriod::Today);
        assert_eq!(descriptions(&filter, day(1)), vec!["Salary", "Rent"]);
    }

    #[test]
    fn periods_exclude_dates_after_today() {
        let week = TransactionFilter::new().with_period(RelativePeriod::Week);
        assert_eq!(descriptions(&week, day(5)), vec!["Salary", "Rent", "Groceries"]);

        let year = TransactionFilter::new().with_period(RelativePeriod::Year);
        assert!(descriptions(&year, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()).is_empty());
    }

    #[test]
    fn all_ignores_today() {
        let all = TransactionFilter::new().with_period(RelativePeriod::All);
        assert_eq!(descriptions(&all, day(1)).len(), 5);
        assert_eq!(RelativePeriod::All.window(day(1)), None);
    }

    #[test]
    fn kind_filter_skips_untyped_entries() {
        let expenses = TransactionFilter::new().with_kind(TransactionKind::Expense);
        assert_eq!(descriptions(&expenses, day(30)), vec!["Groceries", "Coffee beans"]);

        let payments = TransactionFilter::new().with_kind(TransactionKind::Payment);
        assert_eq!(descriptions(&payments, day(30)), vec!["Rent"]);
    }

    #[test]
    fn month_window_crosses_month_boundary() {
        let july_first = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(RelativePeriod::Month.earliest(july_first), Some(day(1)));
    }

    #[test]
    fn range_is_inclusive() {
        let filter = TransactionFilter::new().with_range(day(3), day(10));
        assert_eq!(descriptions(&filter, day(30)), vec!["Groceries", "Coffee beans", "Refund"]);
    }

    #[test]
    fn side_filter_uses_amounts() {
        let credits = TransactionFilter::new().with_side(EntrySide::Credit);
        assert_eq!(descriptions(&credits, day(30)), vec!["Salary", "Refund"]);
    }

    #[test]
    fn search_covers_reference_and_category() {
        let by_category = TransactionFilter::new().with_search("food");
        assert_eq!(descriptions(&by_category, day(30)), vec!["Groceries", "Coffee beans"]);

        let by_reference = TransactionFilter::new().with_search("lease");
        assert_eq!(descriptions(&by_reference, day(30)), vec!["Rent"]);
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(TransactionFilter::new().with_search("  ").search, None);
    }
}
