//! Session store: owner of the statement collection and the current selection.
//!
//! Every mutation follows the same pipeline:
//!
//! ```text
//! input
//!   ↓
//! 1. Validate (drafts, patches, new statements)
//!   ↓
//! 2. Compute the next snapshot with the ledger engine (pure)
//!   ↓
//! 3. Persist the snapshot through the repository
//!   ↓
//! 4. Swap it into the collection
//!   ↓
//! 5. Publish a session event (failures are logged, never returned)
//! ```
//!
//! A failure at steps 1-3 returns an error with the session exactly as it was.

use ledgerbook_core::{DomainError, StatementId, TransactionId, entity::position_of};
use ledgerbook_events::{Event, EventBus};
use ledgerbook_ledger::{
    NewStatement, Statement, StatementPatch, TransactionDraft, TransactionPatch, engine, validate,
};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::event::{SessionEvent, SessionEventKind};
use crate::repository::StatementRepository;

#[derive(Debug)]
pub struct SessionStore<R, B> {
    config: SessionConfig,
    repository: R,
    bus: B,
    statements: Vec<Statement>,
    current: Option<StatementId>,
}

impl<R, B> SessionStore<R, B> {
    /// Empty session; call [`SessionStore::load`] to populate it from the repository.
    pub fn new(config: SessionConfig, repository: R, bus: B) -> Self {
        Self {
            config,
            repository,
            bus,
            statements: Vec::new(),
            current: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn statement(&self, id: StatementId) -> Option<&Statement> {
        self.statements.iter().find(|s| s.id_typed() == id)
    }

    pub fn current_id(&self) -> Option<StatementId> {
        self.current
    }

    pub fn current(&self) -> Option<&Statement> {
        self.current.and_then(|id| self.statement(id))
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

impl<R, B> SessionStore<R, B>
where
    R: StatementRepository,
    B: EventBus<SessionEvent>,
{
    /// Replace the collection with what the repository holds.
    ///
    /// The current selection survives if its statement is still present;
    /// otherwise the first statement (if any) becomes current.
    pub fn load(&mut self) -> SessionResult<usize> {
        let statements = self.repository.load_all()?;

        self.current = self
            .current
            .filter(|id| statements.iter().any(|s| s.id_typed() == *id))
            .or_else(|| statements.first().map(Statement::id_typed));
        self.statements = statements;

        tracing::info!(
            statements = self.statements.len(),
            current = ?self.current,
            "session loaded"
        );
        Ok(self.statements.len())
    }

    pub fn select_statement(&mut self, id: StatementId) -> SessionResult<&Statement> {
        let index = self.index_of(id)?;
        self.current = Some(id);
        Ok(&self.statements[index])
    }

    /// Open a new empty statement and make it current.
    pub fn create_statement(&mut self, mut new: NewStatement) -> SessionResult<&Statement> {
        validate::validate_new_statement(&new)?;
        new.currency
            .get_or_insert_with(|| self.config.default_currency.clone());

        let statement = Statement::open(new);
        let id = statement.id_typed();
        let index = self.commit(statement, SessionEventKind::StatementCreated)?;
        self.current = Some(id);
        Ok(&self.statements[index])
    }

    pub fn update_statement(
        &mut self,
        id: StatementId,
        patch: &StatementPatch,
    ) -> SessionResult<&Statement> {
        validate::validate_statement_patch(patch)?;
        let index = self.index_of(id)?;

        let next = engine::update_details(&self.statements[index], patch)?;
        let index = self.commit(next, SessionEventKind::StatementUpdated)?;
        Ok(&self.statements[index])
    }

    /// Remove a statement. Deleting the current statement selects the first
    /// remaining one.
    pub fn delete_statement(&mut self, id: StatementId) -> SessionResult<()> {
        let index = self.index_of(id)?;
        self.repository.remove(id)?;

        self.statements.remove(index);
        if self.current == Some(id) {
            self.current = self.statements.first().map(Statement::id_typed);
        }

        tracing::info!(statement_id = %id, current = ?self.current, "statement deleted");
        self.publish(SessionEvent::new(id, SessionEventKind::StatementDeleted));
        Ok(())
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> SessionResult<&Statement> {
        validate::validate_draft(&draft)?;
        let index = self.current_index()?;

        let next = engine::add(&self.statements[index], draft)?;
        let transaction_id = last_transaction_id(&next)?;
        let index = self.commit(next, SessionEventKind::TransactionAdded { transaction_id })?;
        Ok(&self.statements[index])
    }

    /// Append several drafts at once. Nothing is appended if any draft is invalid.
    pub fn bulk_add_transactions(
        &mut self,
        drafts: Vec<TransactionDraft>,
    ) -> SessionResult<&Statement> {
        for draft in &drafts {
            validate::validate_draft(draft)?;
        }
        let index = self.current_index()?;

        let count = drafts.len();
        let next = engine::bulk_add(&self.statements[index], drafts)?;
        let index = self.commit(next, SessionEventKind::TransactionsImported { count })?;
        Ok(&self.statements[index])
    }

    pub fn update_transaction(
        &mut self,
        transaction_id: TransactionId,
        patch: &TransactionPatch,
    ) -> SessionResult<&Statement> {
        validate::validate_patch(patch)?;
        let index = self.current_index()?;

        let next = engine::update(&self.statements[index], transaction_id, patch)?;
        let index = self.commit(next, SessionEventKind::TransactionUpdated { transaction_id })?;
        Ok(&self.statements[index])
    }

    pub fn delete_transaction(&mut self, transaction_id: TransactionId) -> SessionResult<&Statement> {
        let index = self.current_index()?;

        let next = engine::delete(&self.statements[index], transaction_id)?;
        let index = self.commit(next, SessionEventKind::TransactionDeleted { transaction_id })?;
        Ok(&self.statements[index])
    }

    /// Rechain the current statement from its opening balance.
    pub fn recalculate_balances(&mut self) -> SessionResult<&Statement> {
        let index = self.current_index()?;

        let next = engine::recalculate_all(&self.statements[index])?;
        let index = self.commit(next, SessionEventKind::BalancesRecalculated)?;
        Ok(&self.statements[index])
    }

    /// Persist `next`, swap it in (or append it when new), then publish.
    fn commit(&mut self, next: Statement, kind: SessionEventKind) -> SessionResult<usize> {
        self.repository.save(&next)?;

        let id = next.id_typed();
        let closing_balance = next.closing_balance();
        let index = match position_of(&self.statements, &id) {
            Some(index) => {
                self.statements[index] = next;
                index
            }
            None => {
                self.statements.push(next);
                self.statements.len() - 1
            }
        };

        let event = SessionEvent::new(id, kind);
        tracing::info!(
            statement_id = %id,
            event_type = event.event_type(),
            closing_balance = %closing_balance,
            "session updated"
        );
        self.publish(event);
        Ok(index)
    }

    fn publish(&self, event: SessionEvent) {
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(error = ?err, "failed to publish session event");
        }
    }

    fn index_of(&self, id: StatementId) -> SessionResult<usize> {
        position_of(&self.statements, &id)
            .ok_or_else(|| DomainError::not_found("Statement", id).into())
    }

    fn current_index(&self) -> SessionResult<usize> {
        let id = self.current.ok_or(SessionError::NoStatementSelected)?;
        position_of(&self.statements, &id).ok_or(SessionError::NoStatementSelected)
    }
}

fn last_transaction_id(statement: &Statement) -> SessionResult<TransactionId> {
    statement
        .transactions()
        .last()
        .map(|tx| tx.id_typed())
        .ok_or_else(|| DomainError::not_found("Transaction", "appended").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerbook_events::InMemoryEventBus;
    use ledgerbook_ledger::StatementPeriod;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    use crate::repository::InMemoryStatementRepository;

    type TestStore = SessionStore<Arc<InMemoryStatementRepository>, Arc<InMemoryEventBus<SessionEvent>>>;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, d).unwrap()
    }

    fn new_statement(name: &str, opening: i64) -> NewStatement {
        NewStatement {
            name: name.to_string(),
            period: StatementPeriod::Monthly,
            start_date: day(1),
            end_date: day(29),
            opening_balance: Decimal::from(opening),
            currency: None,
        }
    }

    fn store() -> TestStore {
        SessionStore::new(
            SessionConfig::default(),
            Arc::new(InMemoryStatementRepository::new()),
            Arc::new(InMemoryEventBus::new()),
        )
    }

    #[test]
    fn transaction_ops_need_a_current_statement() {
        let mut store = store();
        let err = store
            .add_transaction(TransactionDraft::new(day(2), "Lunch").with_debit(Decimal::from(12)))
            .unwrap_err();
        assert!(matches!(err, SessionError::NoStatementSelected));
        assert!(matches!(store.recalculate_balances(), Err(SessionError::NoStatementSelected)));
    }

    #[test]
    fn create_selects_and_persists() {
        let mut store = store();
        let id = store.create_statement(new_statement("Feb", 10)).unwrap().id_typed();
        assert_eq!(store.current_id(), Some(id));
        assert_eq!(store.current().unwrap().currency(), "USD");
        assert!(store.repository().get(id).is_some());
    }

    #[test]
    fn config_currency_fills_missing_currency() {
        let mut store = SessionStore::new(
            SessionConfig { default_currency: "GBP".to_string() },
            InMemoryStatementRepository::new(),
            InMemoryEventBus::<SessionEvent>::new(),
        );
        let st = store.create_statement(new_statement("Feb", 0)).unwrap();
        assert_eq!(st.currency(), "GBP");
    }

    #[test]
    fn invalid_draft_leaves_statement_unchanged() {
        let mut store = store();
        store.create_statement(new_statement("Feb", 10)).unwrap();
        let before = store.current().unwrap().clone();

        let err = store.add_transaction(TransactionDraft::new(day(3), "")).unwrap_err();
        assert_eq!(err.notice(), "description is required");
        assert_eq!(store.current().unwrap(), &before);
    }

    #[test]
    fn overflowing_amount_is_rejected_without_panicking() {
        let mut store = store();
        store.create_statement(new_statement("Feb", 1)).unwrap();
        let sub = store.bus().subscribe();
        let before = store.current().unwrap().clone();

        let err = store
            .add_transaction(TransactionDraft::new(day(3), "Typo").with_credit(Decimal::MAX))
            .unwrap_err();
        assert_eq!(err.notice(), "Amount is too large");
        assert_eq!(store.current().unwrap(), &before);
        assert!(store.repository().get(before.id_typed()).unwrap().is_empty());
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn one_bad_draft_rejects_the_whole_batch() {
        let mut store = store();
        store.create_statement(new_statement("Feb", 0)).unwrap();
        let drafts = vec![
            TransactionDraft::new(day(3), "ok").with_credit(Decimal::from(1)),
            TransactionDraft::new(day(3), "bad").with_debit(Decimal::from(-1)),
        ];
        assert!(store.bulk_add_transactions(drafts).is_err());
        assert!(store.current().unwrap().is_empty());
    }

    #[test]
    fn deleting_current_selects_first_remaining() {
        let mut store = store();
        let first = store.create_statement(new_statement("Jan", 0)).unwrap().id_typed();
        let second = store.create_statement(new_statement("Feb", 0)).unwrap().id_typed();
        assert_eq!(store.current_id(), Some(second));

        store.delete_statement(second).unwrap();
        assert_eq!(store.current_id(), Some(first));

        store.delete_statement(first).unwrap();
        assert_eq!(store.current_id(), None);
        assert!(store.statements().is_empty());
    }

    #[test]
    fn deleting_other_statement_keeps_selection() {
        let mut store = store();
        let first = store.create_statement(new_statement("Jan", 0)).unwrap().id_typed();
        let second = store.create_statement(new_statement("Feb", 0)).unwrap().id_typed();
        store.delete_statement(first).unwrap();
        assert_eq!(store.current_id(), Some(second));
    }

    #[test]
    fn unknown_statement_is_not_found() {
        let mut store = store();
        let err = store.select_statement(StatementId::new()).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.notice(), "Statement not found");
        assert!(store.delete_statement(StatementId::new()).unwrap_err().is_not_found());
    }

    #[test]
    fn mutations_publish_notices() {
        let mut store = store();
        let sub = store.bus().subscribe();

        store.create_statement(new_statement("Feb", 0)).unwrap();
        let id = store
            .add_transaction(TransactionDraft::new(day(4), "Pay").with_credit(Decimal::from(5)))
            .unwrap()
            .transactions()[0]
            .id_typed();
        store.delete_transaction(id).unwrap();

        let notices: Vec<_> = sub.drain().iter().map(|e| e.notice()).collect();
        assert_eq!(
            notices,
            vec![
                "Statement created successfully",
                "Transaction added successfully",
                "Transaction deleted successfully",
            ]
        );
    }

    #[test]
    fn load_keeps_present_selection_and_falls_back_to_first() {
        let repo = Arc::new(InMemoryStatementRepository::new());
        let bus = Arc::new(InMemoryEventBus::<SessionEvent>::new());
        let mut store = SessionStore::new(SessionConfig::default(), repo.clone(), bus);
        let jan = store.create_statement(new_statement("Jan", 0)).unwrap().id_typed();
        let feb = store.create_statement(new_statement("Feb", 0)).unwrap().id_typed();

        assert_eq!(store.load().unwrap(), 2);
        assert_eq!(store.current_id(), Some(feb));

        repo.remove(feb).unwrap();
        store.load().unwrap();
        assert_eq!(store.current_id(), Some(jan));
    }
}
