//! Overflow-checked decimal arithmetic for balances and totals.

use rust_decimal::Decimal;

use ledgerbook_core::{DomainError, DomainResult};

pub fn add(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| DomainError::invariant("amount overflow"))
}

pub fn sub(a: Decimal, b: Decimal) -> DomainResult<Decimal> {
    a.checked_sub(b)
        .ok_or_else(|| DomainError::invariant("amount overflow"))
}

pub fn sum(amounts: impl IntoIterator<Item = Decimal>) -> DomainResult<Decimal> {
    amounts.into_iter().try_fold(Decimal::ZERO, add)
}
