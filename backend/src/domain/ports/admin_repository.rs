//! Port abstraction for admin account persistence.

use async_trait::async_trait;

use crate::domain::{AdminId, AdminPatch, AdminUser, NewAdmin};

use super::RepositoryError;

/// Admin account persistence.
///
/// Implementations store only [`crate::domain::simple_hash`] of passwords
/// and never return the hash from any read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Store a new account with the hash of `password`.
    async fn create(&self, admin: NewAdmin, password: &str) -> Result<AdminId, RepositoryError>;

    /// All accounts ordered by username.
    async fn list(&self) -> Result<Vec<AdminUser>, RepositoryError>;

    async fn find_by_id(&self, id: &AdminId) -> Result<Option<AdminUser>, RepositoryError>;

    /// Exact-match lookup by login name.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<AdminUser>, RepositoryError>;

    /// Check a username/password pair.
    ///
    /// On success records the login time and returns the updated account.
    /// An unknown username and a wrong password both yield `Ok(None)`.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminUser>, RepositoryError>;

    /// Merge the supplied profile fields into an existing account.
    async fn update(&self, id: &AdminId, patch: AdminPatch) -> Result<(), RepositoryError>;

    /// Replace the stored hash with the hash of `password`.
    async fn update_password(&self, id: &AdminId, password: &str) -> Result<(), RepositoryError>;

    /// Hard delete; succeeds when the account is already gone.
    async fn delete(&self, id: &AdminId) -> Result<(), RepositoryError>;

    /// Whether at least one account exists.
    async fn has_any(&self) -> Result<bool, RepositoryError>;
}
