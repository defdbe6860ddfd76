//! Running-balance engine.
//!
//! Every operation borrows a statement snapshot and returns a new one. The
//! input is never modified, so a failed call leaves the caller holding the
//! exact statement it had before.
//!
//! Invariants on every returned snapshot:
//! - `balance[i] == balance[i - 1] + credit[i] - debit[i]`, `balance[-1] == opening_balance`
//! - `net_change == total_credits - total_debits`
//! - `closing_balance == opening_balance + net_change`
//!
//! Balances and totals use checked arithmetic; a sum that no longer fits a
//! `Decimal` fails with `DomainError::InvariantViolation`.

use ledgerbook_core::{DomainError, DomainResult, TransactionId, entity::position_of};

use crate::money;
use crate::statement::{Statement, StatementPatch};
use crate::transaction::{Transaction, TransactionDraft, TransactionPatch};

/// Append one transaction, chained off the current last balance.
///
/// Insertion is always at the end; the draft's date plays no part in ordering.
/// The engine does not validate drafts.
pub fn add(statement: &Statement, draft: TransactionDraft) -> DomainResult<Statement> {
    let mut next = statement.clone();
    append(&mut next, draft)?;
    next.refresh_totals()?;

    tracing::debug!(
        statement_id = %next.id_typed(),
        closing_balance = %next.closing_balance(),
        "transaction appended"
    );
    Ok(next)
}

/// Append drafts in order. Same end state as calling [`add`] once per draft.
pub fn bulk_add(
    statement: &Statement,
    drafts: impl IntoIterator<Item = TransactionDraft>,
) -> DomainResult<Statement> {
    let mut next = statement.clone();
    let before = next.len();
    for draft in drafts {
        append(&mut next, draft)?;
    }
    next.refresh_totals()?;

    tracing::debug!(
        statement_id = %next.id_typed(),
        appended = next.len() - before,
        closing_balance = %next.closing_balance(),
        "transactions appended"
    );
    Ok(next)
}

/// Merge `patch` into the transaction with `id`, keeping its position, then
/// rechain it and everything after it.
pub fn update(
    statement: &Statement,
    id: TransactionId,
    patch: &TransactionPatch,
) -> DomainResult<Statement> {
    let index = locate(statement, id)?;

    let mut next = statement.clone();
    patch.apply_to(&mut next.transactions_mut()[index]);
    next.rechain_from(index)?;
    next.refresh_totals()?;

    tracing::debug!(
        statement_id = %next.id_typed(),
        transaction_id = %id,
        rechained = next.len() - index,
        "transaction updated"
    );
    Ok(next)
}

/// Remove the transaction with `id` and rechain the whole sequence.
pub fn delete(statement: &Statement, id: TransactionId) -> DomainResult<Statement> {
    let index = locate(statement, id)?;

    let mut next = statement.clone();
    next.transactions_mut().remove(index);
    next.rechain_from(0)?;
    next.refresh_totals()?;

    tracing::debug!(
        statement_id = %next.id_typed(),
        transaction_id = %id,
        remaining = next.len(),
        "transaction deleted"
    );
    Ok(next)
}

/// Full rechain from the opening balance in current order. Idempotent.
///
/// This is the repair path for snapshots whose balances were edited outside
/// the engine (e.g. hand-edited storage).
pub fn recalculate_all(statement: &Statement) -> DomainResult<Statement> {
    let mut next = statement.clone();
    next.rechain_from(0)?;
    next.refresh_totals()?;
    Ok(next)
}

/// Edit the statement's descriptive fields.
///
/// Moving the opening balance shifts every running balance, so the whole
/// sequence is rechained in that case.
pub fn update_details(statement: &Statement, patch: &StatementPatch) -> DomainResult<Statement> {
    let mut next = statement.clone();
    if next.apply_patch(patch) {
        next.rechain_from(0)?;
        tracing::debug!(
            statement_id = %next.id_typed(),
            opening_balance = %next.opening_balance(),
            "opening balance moved, rechained"
        );
    }
    next.refresh_totals()?;
    Ok(next)
}

fn append(statement: &mut Statement, draft: TransactionDraft) -> DomainResult<()> {
    let effect = money::sub(draft.credit.unwrap_or_default(), draft.debit.unwrap_or_default())?;
    let balance = money::add(statement.anchor_balance(), effect)?;
    let tx = Transaction::from_draft(draft, statement.currency(), balance);
    statement.transactions_mut().push(tx);
    Ok(())
}

fn locate(statement: &Statement, id: TransactionId) -> DomainResult<usize> {
    position_of(statement.transactions(), &id).ok_or_else(|| DomainError::not_found("Transaction", id))
}
