//! Document-backed `ApartmentRepository` adapter.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{ApartmentRepository, RepositoryError};
use crate::domain::{Apartment, ApartmentCode, ApartmentId, ApartmentPatch, BlockId, NewApartment};
use crate::outbound::store::{DocumentStore, Query, SortDirection};

use super::APARTMENTS;
use super::collection::{DocumentCollection, blank_to_none, optional_text_patch};
use super::models::{ApartmentChanges, ApartmentDocument, ApartmentRecord};

/// Apartments stored in the `apartments` collection.
pub struct DocumentApartmentRepository<S> {
    collection: DocumentCollection<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> DocumentApartmentRepository<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection: DocumentCollection::new(store, APARTMENTS),
            clock,
        }
    }

    async fn select(&self, query: Query) -> Result<Vec<Apartment>, RepositoryError> {
        let records: Vec<ApartmentRecord> = self.collection.select(&query).await?;
        Ok(records.into_iter().map(Apartment::from).collect())
    }
}

#[async_trait]
impl<S: DocumentStore> ApartmentRepository for DocumentApartmentRepository<S> {
    async fn create(&self, apartment: NewApartment) -> Result<ApartmentId, RepositoryError> {
        let now = self.clock.utc();
        let code = apartment.code();
        let id = self
            .collection
            .insert(&ApartmentDocument {
                code: code.clone(),
                block_id: apartment.block_id,
                block_code: apartment.block_code,
                floor: apartment.floor,
                room_number: apartment.room_number,
                apartment_type: blank_to_none(apartment.apartment_type),
                area: apartment.area,
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(apartment_id = %id, %code, "apartment created");
        Ok(ApartmentId::new(id))
    }

    async fn list(&self) -> Result<Vec<Apartment>, RepositoryError> {
        self.select(Query::all().order_by("code", SortDirection::Ascending))
            .await
    }

    async fn list_by_block(&self, block_id: &BlockId) -> Result<Vec<Apartment>, RepositoryError> {
        self.select(
            Query::all()
                .where_eq("blockId", json!(block_id))
                .order_by("floor", SortDirection::Ascending),
        )
        .await
    }

    async fn find_by_id(&self, id: &ApartmentId) -> Result<Option<Apartment>, RepositoryError> {
        let record: Option<ApartmentRecord> = self.collection.fetch(id.as_ref()).await?;
        Ok(record.map(Apartment::from))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Apartment>, RepositoryError> {
        let record: Option<ApartmentRecord> = self
            .collection
            .first(&Query::all().where_eq("code", json!(ApartmentCode::lookup_key(code))))
            .await?;
        Ok(record.map(Apartment::from))
    }

    async fn update(
        &self,
        id: &ApartmentId,
        patch: ApartmentPatch,
    ) -> Result<(), RepositoryError> {
        let code = patch.derived_code();
        self.collection
            .merge(
                id.as_ref(),
                &ApartmentChanges {
                    code,
                    block_id: patch.block_id,
                    block_code: patch.block_code,
                    floor: patch.floor,
                    room_number: patch.room_number,
                    apartment_type: optional_text_patch(patch.apartment_type),
                    area: patch.area,
                    updated_at: self.clock.utc(),
                },
            )
            .await?;
        info!(apartment_id = %id, "apartment updated");
        Ok(())
    }

    async fn delete(&self, id: &ApartmentId) -> Result<(), RepositoryError> {
        self.collection.remove(id.as_ref()).await?;
        info!(apartment_id = %id, "apartment deleted");
        Ok(())
    }
}
