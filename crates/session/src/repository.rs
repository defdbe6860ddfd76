//! Durable storage for statement snapshots, keyed by statement id.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use ledgerbook_core::{StatementId, entity::position_of};
use ledgerbook_ledger::Statement;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("statement store lock poisoned")]
    Poisoned,

    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Storage collaborator for the session store.
///
/// Implementations keep statements in the order they were first saved;
/// saving an existing id replaces it in place.
pub trait StatementRepository: Send + Sync {
    fn load_all(&self) -> Result<Vec<Statement>, RepositoryError>;
    fn save(&self, statement: &Statement) -> Result<(), RepositoryError>;
    fn remove(&self, id: StatementId) -> Result<(), RepositoryError>;
}

impl<S> StatementRepository for Arc<S>
where
    S: StatementRepository + ?Sized,
{
    fn load_all(&self) -> Result<Vec<Statement>, RepositoryError> {
        (**self).load_all()
    }

    fn save(&self, statement: &Statement) -> Result<(), RepositoryError> {
        (**self).save(statement)
    }

    fn remove(&self, id: StatementId) -> Result<(), RepositoryError> {
        (**self).remove(id)
    }
}

/// In-memory repository for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStatementRepository {
    inner: RwLock<Vec<Statement>>,
}

impl InMemoryStatementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `statements`, in order.
    pub fn with_statements(statements: Vec<Statement>) -> Self {
        Self {
            inner: RwLock::new(statements),
        }
    }

    pub fn get(&self, id: StatementId) -> Option<Statement> {
        let stored = self.inner.read().ok()?;
        stored.iter().find(|s| s.id_typed() == id).cloned()
    }
}

impl StatementRepository for InMemoryStatementRepository {
    fn load_all(&self) -> Result<Vec<Statement>, RepositoryError> {
        let stored = self.inner.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(stored.clone())
    }

    fn save(&self, statement: &Statement) -> Result<(), RepositoryError> {
        let mut stored = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;
        match position_of(&stored, &statement.id_typed()) {
            Some(index) => stored[index] = statement.clone(),
            None => stored.push(statement.clone()),
        }
        Ok(())
    }

    fn remove(&self, id: StatementId) -> Result<(), RepositoryError> {
        let mut stored = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;
        stored.retain(|s| s.id_typed() != id);
        Ok(())
    }
}
