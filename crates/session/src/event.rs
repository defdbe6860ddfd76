use chrono::{DateTime, Utc};
use serde::Serialize;

use ledgerbook_core::{StatementId, TransactionId};
use ledgerbook_events::Event;

/// What changed in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEventKind {
    StatementCreated,
    StatementUpdated,
    StatementDeleted,
    TransactionAdded { transaction_id: TransactionId },
    TransactionsImported { count: usize },
    TransactionUpdated { transaction_id: TransactionId },
    TransactionDeleted { transaction_id: TransactionId },
    BalancesRecalculated,
}

/// Published after a session mutation has been persisted and swapped in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    pub statement_id: StatementId,
    #[serde(flatten)]
    pub kind: SessionEventKind,
    pub occurred_at: DateTime<Utc>,
}

impl SessionEvent {
    pub fn new(statement_id: StatementId, kind: SessionEventKind) -> Self {
        Self {
            statement_id,
            kind,
            occurred_at: Utc::now(),
        }
    }
}

impl Event for SessionEvent {
    fn event_type(&self) -> &'static str {
        match self.kind {
            SessionEventKind::StatementCreated => "session.statement.created",
            SessionEventKind::StatementUpdated => "session.statement.updated",
            SessionEventKind::StatementDeleted => "session.statement.deleted",
            SessionEventKind::TransactionAdded { .. } => "session.transaction.added",
            SessionEventKind::TransactionsImported { .. } => "session.transaction.imported",
            SessionEventKind::TransactionUpdated { .. } => "session.transaction.updated",
            SessionEventKind::TransactionDeleted { .. } => "session.transaction.deleted",
            SessionEventKind::BalancesRecalculated => "session.statement.recalculated",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn notice(&self) -> String {
        match &self.kind {
            SessionEventKind::StatementCreated => "Statement created successfully".to_string(),
            SessionEventKind::StatementUpdated => "Statement updated successfully".to_string(),
            SessionEventKind::StatementDeleted => "Statement deleted successfully".to_string(),
            SessionEventKind::TransactionAdded { .. } => "Transaction added successfully".to_string(),
            SessionEventKind::TransactionsImported { count: 1 } => {
                "1 transaction added successfully".to_string()
            }
            SessionEventKind::TransactionsImported { count } => {
                format!("{count} transactions added successfully")
            }
            SessionEventKind::TransactionUpdated { .. } => "Transaction updated successfully".to_string(),
            SessionEventKind::TransactionDeleted { .. } => "Transaction deleted successfully".to_string(),
            SessionEventKind::BalancesRecalculated => "Balances recalculated".to_string(),
        }
    }
}
