//! wd-session: per-session data store, memoization and session registry.

pub mod hash;
pub mod key;
pub mod registry;
pub mod store;

pub use hash::InputIdentity;
pub use key::Key;
pub use registry::{Session, SessionId, SessionRegistry};
pub use store::{MemoStats, SessionStore, StagedWrites};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {id}")]
    NotFound { id: SessionId },

    #[error("Store key '{key}' already holds a value of another type")]
    KeyType { key: &'static str },
}
