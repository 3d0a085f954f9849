//! Port abstraction for resident persistence.

use async_trait::async_trait;

use crate::domain::{ApartmentId, BlockId, NewResident, Resident, ResidentId, ResidentPatch};

use super::RepositoryError;

/// Resident persistence. Residents have no natural key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResidentRepository: Send + Sync {
    /// Store a new resident and return its id.
    async fn create(&self, resident: NewResident) -> Result<ResidentId, RepositoryError>;

    /// All residents ordered by full name.
    async fn list(&self) -> Result<Vec<Resident>, RepositoryError>;

    async fn list_by_apartment(
        &self,
        apartment_id: &ApartmentId,
    ) -> Result<Vec<Resident>, RepositoryError>;

    async fn list_by_block(&self, block_id: &BlockId) -> Result<Vec<Resident>, RepositoryError>;

    async fn find_by_id(&self, id: &ResidentId) -> Result<Option<Resident>, RepositoryError>;

    /// Merge the supplied fields into an existing resident.
    async fn update(&self, id: &ResidentId, patch: ResidentPatch) -> Result<(), RepositoryError>;

    /// Hard delete; succeeds when the resident is already gone.
    async fn delete(&self, id: &ResidentId) -> Result<(), RepositoryError>;
}
