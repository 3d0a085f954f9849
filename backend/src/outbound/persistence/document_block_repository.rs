//! Document-backed `BlockRepository` adapter.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{BlockRepository, RepositoryError};
use crate::domain::{Block, BlockCode, BlockId, BlockPatch, NewBlock};
use crate::outbound::store::{DocumentStore, Query, SortDirection};

use super::BLOCKS;
use super::collection::{DocumentCollection, blank_to_none, optional_text_patch};
use super::models::{BlockChanges, BlockDocument, BlockRecord};

/// Blocks stored in the `blocks` collection.
pub struct DocumentBlockRepository<S> {
    collection: DocumentCollection<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> DocumentBlockRepository<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection: DocumentCollection::new(store, BLOCKS),
            clock,
        }
    }
}

#[async_trait]
impl<S: DocumentStore> BlockRepository for DocumentBlockRepository<S> {
    async fn create(&self, block: NewBlock) -> Result<BlockId, RepositoryError> {
        let now = self.clock.utc();
        let code = block.code.clone();
        let id = self
            .collection
            .insert(&BlockDocument {
                code: block.code,
                name: block.name,
                total_floors: block.total_floors,
                description: blank_to_none(block.description),
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(block_id = %id, %code, "block created");
        Ok(BlockId::new(id))
    }

    async fn list(&self) -> Result<Vec<Block>, RepositoryError> {
        let records: Vec<BlockRecord> = self
            .collection
            .select(&Query::all().order_by("code", SortDirection::Ascending))
            .await?;
        Ok(records.into_iter().map(Block::from).collect())
    }

    async fn find_by_id(&self, id: &BlockId) -> Result<Option<Block>, RepositoryError> {
        let record: Option<BlockRecord> = self.collection.fetch(id.as_ref()).await?;
        Ok(record.map(Block::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Block>, RepositoryError> {
        let code = BlockCode::new(code);
        let record: Option<BlockRecord> = self
            .collection
            .first(&Query::all().where_eq("code", json!(code)))
            .await?;
        Ok(record.map(Block::from))
    }

    async fn update(&self, id: &BlockId, patch: BlockPatch) -> Result<(), RepositoryError> {
        self.collection
            .merge(
                id.as_ref(),
                &BlockChanges {
                    code: patch.code,
                    name: patch.name,
                    total_floors: patch.total_floors,
                    description: optional_text_patch(patch.description),
                    updated_at: self.clock.utc(),
                },
            )
            .await?;
        info!(block_id = %id, "block updated");
        Ok(())
    }

    async fn delete(&self, id: &BlockId) -> Result<(), RepositoryError> {
        self.collection.remove(id.as_ref()).await?;
        info!(block_id = %id, "block deleted");
        Ok(())
    }
}
