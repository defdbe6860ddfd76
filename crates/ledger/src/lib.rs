//! Ledger engine (statements, transactions, running balances).
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod engine;
pub mod money;
pub mod statement;
pub mod transaction;
pub mod validate;

pub use statement::{DEFAULT_CURRENCY, NewStatement, Statement, StatementPatch, StatementPeriod};
pub use transaction::{Transaction, TransactionDraft, TransactionKind, TransactionPatch};
