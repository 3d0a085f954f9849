//! Document-backed `ResidentRepository` adapter.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{RepositoryError, ResidentRepository};
use crate::domain::{ApartmentId, BlockId, NewResident, Resident, ResidentId, ResidentPatch};
use crate::outbound::store::{DocumentStore, Query, SortDirection};

use super::RESIDENTS;
use super::collection::{DocumentCollection, blank_to_none, optional_text_patch};
use super::models::{ResidentChanges, ResidentDocument, ResidentRecord};

/// Residents stored in the `residents` collection.
pub struct DocumentResidentRepository<S> {
    collection: DocumentCollection<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> DocumentResidentRepository<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection: DocumentCollection::new(store, RESIDENTS),
            clock,
        }
    }

    async fn select(&self, query: Query) -> Result<Vec<Resident>, RepositoryError> {
        let records: Vec<ResidentRecord> = self.collection.select(&query).await?;
        Ok(records.into_iter().map(Resident::from).collect())
    }
}

#[async_trait]
impl<S: DocumentStore> ResidentRepository for DocumentResidentRepository<S> {
    async fn create(&self, resident: NewResident) -> Result<ResidentId, RepositoryError> {
        let now = self.clock.utc();
        let id = self
            .collection
            .insert(&ResidentDocument {
                full_name: resident.full_name,
                phone: resident.phone,
                email: blank_to_none(resident.email),
                id_number: blank_to_none(resident.id_number),
                apartment_id: resident.apartment_id,
                apartment_code: resident.apartment_code,
                block_id: resident.block_id,
                block_code: resident.block_code,
                is_owner: resident.is_owner,
                notes: blank_to_none(resident.notes),
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(resident_id = %id, "resident created");
        Ok(ResidentId::new(id))
    }

    async fn list(&self) -> Result<Vec<Resident>, RepositoryError> {
        self.select(Query::all().order_by("fullName", SortDirection::Ascending))
            .await
    }

    async fn list_by_apartment(
        &self,
        apartment_id: &ApartmentId,
    ) -> Result<Vec<Resident>, RepositoryError> {
        self.select(Query::all().where_eq("apartmentId", json!(apartment_id)))
            .await
    }

    async fn list_by_block(&self, block_id: &BlockId) -> Result<Vec<Resident>, RepositoryError> {
        self.select(Query::all().where_eq("blockId", json!(block_id)))
            .await
    }

    async fn find_by_id(&self, id: &ResidentId) -> Result<Option<Resident>, RepositoryError> {
        let record: Option<ResidentRecord> = self.collection.fetch(id.as_ref()).await?;
        Ok(record.map(Resident::from))
    }

    async fn update(&self, id: &ResidentId, patch: ResidentPatch) -> Result<(), RepositoryError> {
        self.collection
            .merge(
                id.as_ref(),
                &ResidentChanges {
                    full_name: patch.full_name,
                    phone: patch.phone,
                    email: optional_text_patch(patch.email),
                    id_number: optional_text_patch(patch.id_number),
                    apartment_id: patch.apartment_id,
                    apartment_code: patch.apartment_code,
                    block_id: patch.block_id,
                    block_code: patch.block_code,
                    is_owner: patch.is_owner,
                    notes: optional_text_patch(patch.notes),
                    updated_at: self.clock.utc(),
                },
            )
            .await?;
        info!(resident_id = %id, "resident updated");
        Ok(())
    }

    async fn delete(&self, id: &ResidentId) -> Result<(), RepositoryError> {
        self.collection.remove(id.as_ref()).await?;
        info!(resident_id = %id, "resident deleted");
        Ok(())
    }
}
