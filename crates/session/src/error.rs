use thiserror::Error;

use ledgerbook_core::DomainError;

use crate::repository::RepositoryError;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// A transaction operation was requested with no current statement.
    #[error("no statement selected")]
    NoStatementSelected,

    /// Unknown identifier or rejected input.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The persistence collaborator failed; the session kept its previous state.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl SessionError {
    /// Short message suitable for a transient notification.
    pub fn notice(&self) -> String {
        match self {
            SessionError::NoStatementSelected => "No statement selected".to_string(),
            SessionError::Domain(DomainError::NotFound { entity, .. }) => format!("{entity} not found"),
            SessionError::Domain(DomainError::Validation(msg)) => msg.clone(),
            SessionError::Domain(DomainError::InvalidId(_)) => "Invalid identifier".to_string(),
            SessionError::Domain(DomainError::InvariantViolation(_)) => "Amount is too large".to_string(),
            SessionError::Repository(_) => "Failed to save financial data".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::Domain(err) if err.is_not_found())
    }
}
