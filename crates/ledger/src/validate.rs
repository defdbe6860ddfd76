//! Form-level checks run by callers before handing input to the engine.
//!
//! The engine itself accepts anything. In particular a draft with both a
//! debit and a credit passes here and is netted by the engine.

use rust_decimal::Decimal;

use ledgerbook_core::{DomainError, DomainResult};

use crate::statement::{NewStatement, StatementPatch};
use crate::transaction::{TransactionDraft, TransactionPatch};

pub fn validate_draft(draft: &TransactionDraft) -> DomainResult<()> {
    require_text("description", &draft.description)?;
    non_negative("debit", draft.debit)?;
    non_negative("credit", draft.credit)?;
    if let Some(currency) = &draft.currency {
        validate_currency(currency)?;
    }
    Ok(())
}

pub fn validate_patch(patch: &TransactionPatch) -> DomainResult<()> {
    if let Some(description) = &patch.description {
        require_text("description", description)?;
    }
    non_negative("debit", patch.debit.flatten())?;
    non_negative("credit", patch.credit.flatten())?;
    if let Some(currency) = &patch.currency {
        validate_currency(currency)?;
    }
    Ok(())
}

pub fn validate_new_statement(new: &NewStatement) -> DomainResult<()> {
    require_text("name", &new.name)?;
    if let Some(currency) = &new.currency {
        validate_currency(currency)?;
    }
    Ok(())
}

pub fn validate_statement_patch(patch: &StatementPatch) -> DomainResult<()> {
    if let Some(name) = &patch.name {
        require_text("name", name)?;
    }
    if let Some(currency) = &patch.currency {
        validate_currency(currency)?;
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn non_negative(field: &str, amount: Option<Decimal>) -> DomainResult<()> {
    match amount {
        Some(value) if value < Decimal::ZERO => Err(DomainError::validation(format!(
            "{field} must not be negative (got {value})"
        ))),
        _ => Ok(()),
    }
}

/// ISO 4217 shape: three uppercase ASCII letters.
pub fn validate_currency(code: &str) -> DomainResult<()> {
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(DomainError::validation(format!("invalid currency code: {code:?}")))
    }
}
