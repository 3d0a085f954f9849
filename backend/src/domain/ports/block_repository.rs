//! Port abstraction for block persistence.

use async_trait::async_trait;

use crate::domain::{Block, BlockId, BlockPatch, NewBlock};

use super::RepositoryError;

/// Block persistence.
///
/// Implementations upper-case codes on every write and on
/// [`BlockRepository::find_by_code`], list blocks by code ascending and
/// never cascade a delete to apartments, residents or vehicles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockRepository: Send + Sync {
    /// Store a new block and return its id.
    async fn create(&self, block: NewBlock) -> Result<BlockId, RepositoryError>;

    /// All blocks ordered by code.
    async fn list(&self) -> Result<Vec<Block>, RepositoryError>;

    async fn find_by_id(&self, id: &BlockId) -> Result<Option<Block>, RepositoryError>;

    /// Look up a block by code, ignoring case.
    async fn find_by_code(&self, code: &str) -> Result<Option<Block>, RepositoryError>;

    /// Merge the supplied fields into an existing block.
    async fn update(&self, id: &BlockId, patch: BlockPatch) -> Result<(), RepositoryError>;

    /// Hard delete; succeeds when the block is already gone.
    async fn delete(&self, id: &BlockId) -> Result<(), RepositoryError>;
}
