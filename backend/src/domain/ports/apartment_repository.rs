//! Port abstraction for apartment persistence.

use async_trait::async_trait;

use crate::domain::{Apartment, ApartmentId, ApartmentPatch, BlockId, NewApartment};

use super::RepositoryError;

/// Apartment persistence.
///
/// Implementations derive the apartment code on create, and on update when
/// the patch carries both the block code and the room number.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApartmentRepository: Send + Sync {
    /// Store a new apartment and return its id.
    async fn create(&self, apartment: NewApartment) -> Result<ApartmentId, RepositoryError>;

    /// All apartments ordered by code.
    async fn list(&self) -> Result<Vec<Apartment>, RepositoryError>;

    /// Apartments of one block ordered by floor.
    async fn list_by_block(&self, block_id: &BlockId) -> Result<Vec<Apartment>, RepositoryError>;

    async fn find_by_id(&self, id: &ApartmentId) -> Result<Option<Apartment>, RepositoryError>;

    /// Look up an apartment by code, upper-casing the input.
    async fn find_by_code(&self, code: &str) -> Result<Option<Apartment>, RepositoryError>;

    /// Merge the supplied fields into an existing apartment.
    async fn update(&self, id: &ApartmentId, patch: ApartmentPatch)
    -> Result<(), RepositoryError>;

    /// Hard delete; succeeds when the apartment is already gone.
    async fn delete(&self, id: &ApartmentId) -> Result<(), RepositoryError>;
}
