//! Read-side derivations over statements: dashboard figures, filters and
//! report breakdowns.
//!
//! Nothing here mutates a statement; every value is recomputed from the
//! engine's already-consistent fields.

pub mod breakdown;
pub mod dashboard;
pub mod filter;
pub mod report;

#[cfg(test)]
mod fixtures;

pub use breakdown::{
    CategoryTotal, DailyTrend, KindTotals, UNCATEGORIZED, category_breakdown, daily_trends, kind_totals,
};
pub use dashboard::DashboardStats;
pub use filter::{DateRange, EntrySide, RelativePeriod, TransactionFilter};
pub use report::Report;
