//! Document-backed `VehicleRepository` adapter.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{RepositoryError, VehicleRepository};
use crate::domain::{
    ApartmentId, NewVehicle, PlateNumber, ResidentId, Vehicle, VehicleId, VehiclePatch,
};
use crate::outbound::store::{DocumentStore, Query, SortDirection};

use super::VEHICLES;
use super::collection::{DocumentCollection, blank_to_none, optional_text_patch};
use super::models::{VehicleChanges, VehicleDocument, VehicleRecord};

/// Vehicles stored in the `vehicles` collection.
pub struct DocumentVehicleRepository<S> {
    collection: DocumentCollection<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> DocumentVehicleRepository<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection: DocumentCollection::new(store, VEHICLES),
            clock,
        }
    }

    async fn select(&self, query: Query) -> Result<Vec<Vehicle>, RepositoryError> {
        let records: Vec<VehicleRecord> = self.collection.select(&query).await?;
        Ok(records.into_iter().map(Vehicle::from).collect())
    }
}

#[async_trait]
impl<S: DocumentStore> VehicleRepository for DocumentVehicleRepository<S> {
    async fn create(&self, vehicle: NewVehicle) -> Result<VehicleId, RepositoryError> {
        let now = self.clock.utc();
        let plate = vehicle.plate_number.clone();
        let id = self
            .collection
            .insert(&VehicleDocument {
                plate_number: vehicle.plate_number,
                resident_id: vehicle.resident_id,
                resident_name: vehicle.resident_name,
                apartment_id: vehicle.apartment_id,
                apartment_code: vehicle.apartment_code,
                block_id: vehicle.block_id,
                block_code: vehicle.block_code,
                vehicle_type: vehicle.vehicle_type,
                brand: blank_to_none(vehicle.brand),
                model: blank_to_none(vehicle.model),
                color: blank_to_none(vehicle.color),
                parking_slot: blank_to_none(vehicle.parking_slot),
                notes: blank_to_none(vehicle.notes),
                is_active: vehicle.is_active.unwrap_or(true),
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(vehicle_id = %id, %plate, "vehicle created");
        Ok(VehicleId::new(id))
    }

    async fn list(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        self.select(Query::all().order_by("plateNumber", SortDirection::Ascending))
            .await
    }

    async fn list_by_resident(
        &self,
        resident_id: &ResidentId,
    ) -> Result<Vec<Vehicle>, RepositoryError> {
        self.select(Query::all().where_eq("residentId", json!(resident_id)))
            .await
    }

    async fn list_by_apartment(
        &self,
        apartment_id: &ApartmentId,
    ) -> Result<Vec<Vehicle>, RepositoryError> {
        self.select(Query::all().where_eq("apartmentId", json!(apartment_id)))
            .await
    }

    async fn find_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let record: Option<VehicleRecord> = self.collection.fetch(id.as_ref()).await?;
        Ok(record.map(Vehicle::from))
    }

    async fn find_by_plate(&self, plate: &str) -> Result<Option<Vehicle>, RepositoryError> {
        let plate = PlateNumber::new(plate);
        let record: Option<VehicleRecord> = self
            .collection
            .first(
                &Query::all()
                    .where_eq("plateNumber", json!(plate))
                    .where_eq("isActive", json!(true)),
            )
            .await?;
        Ok(record.map(Vehicle::from))
    }

    async fn update(&self, id: &VehicleId, patch: VehiclePatch) -> Result<(), RepositoryError> {
        self.collection
            .merge(
                id.as_ref(),
                &VehicleChanges {
                    plate_number: patch.plate_number,
                    resident_id: patch.resident_id,
                    resident_name: patch.resident_name,
                    apartment_id: patch.apartment_id,
                    apartment_code: patch.apartment_code,
                    block_id: patch.block_id,
                    block_code: patch.block_code,
                    vehicle_type: patch.vehicle_type,
                    brand: optional_text_patch(patch.brand),
                    model: optional_text_patch(patch.model),
                    color: optional_text_patch(patch.color),
                    parking_slot: optional_text_patch(patch.parking_slot),
                    notes: optional_text_patch(patch.notes),
                    is_active: patch.is_active,
                    updated_at: self.clock.utc(),
                },
            )
            .await?;
        info!(vehicle_id = %id, "vehicle updated");
        Ok(())
    }

    async fn deactivate(&self, id: &VehicleId) -> Result<(), RepositoryError> {
        self.collection
            .merge(
                id.as_ref(),
                &VehicleChanges {
                    is_active: Some(false),
                    updated_at: self.clock.utc(),
                    ..VehicleChanges::default()
                },
            )
            .await?;
        info!(vehicle_id = %id, "vehicle deactivated");
        Ok(())
    }

    async fn delete(&self, id: &VehicleId) -> Result<(), RepositoryError> {
        self.collection.remove(id.as_ref()).await?;
        info!(vehicle_id = %id, "vehicle deleted");
        Ok(())
    }
}
