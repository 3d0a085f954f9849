//! Port abstraction for persisting the local admin session.

use async_trait::async_trait;

use crate::domain::StoredSession;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        /// The backing storage could not be read or written.
        Io { message: String } => "session storage failed: {message}",
        /// A stored payload exists but cannot be parsed.
        Corrupt { message: String } => "stored session is unreadable: {message}",
    }
}

/// Single-slot storage for the current session payload.
///
/// Only the auth service touches this store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the stored payload, if any.
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError>;

    /// Replace the stored payload.
    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError>;

    /// Remove the stored payload; succeeds when nothing is stored.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
