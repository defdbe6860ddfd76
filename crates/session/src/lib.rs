//! Session-scoped state: the statement collection, the current selection,
//! and the collaborators that persist snapshots and surface notices.
//!
//! The ledger engine never sees this state; the store hands it one
//! statement at a time and swaps in whatever comes back.

pub mod config;
pub mod error;
pub mod event;
pub mod repository;
pub mod store;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use event::{SessionEvent, SessionEventKind};
pub use repository::{InMemoryStatementRepository, RepositoryError, StatementRepository};
pub use store::SessionStore;
