//! Port abstraction for vehicle persistence.

use async_trait::async_trait;

use crate::domain::{ApartmentId, NewVehicle, ResidentId, Vehicle, VehicleId, VehiclePatch};

use super::RepositoryError;

/// Vehicle persistence.
///
/// Plate numbers are normalised on create, on update and on every plate
/// lookup, so differently formatted input finds the same record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Store a new vehicle and return its id.
    async fn create(&self, vehicle: NewVehicle) -> Result<VehicleId, RepositoryError>;

    /// All vehicles ordered by plate number.
    async fn list(&self) -> Result<Vec<Vehicle>, RepositoryError>;

    async fn list_by_resident(
        &self,
        resident_id: &ResidentId,
    ) -> Result<Vec<Vehicle>, RepositoryError>;

    async fn list_by_apartment(
        &self,
        apartment_id: &ApartmentId,
    ) -> Result<Vec<Vehicle>, RepositoryError>;

    async fn find_by_id(&self, id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError>;

    /// First active vehicle registered under the normalised plate.
    async fn find_by_plate(&self, plate: &str) -> Result<Option<Vehicle>, RepositoryError>;

    /// Merge the supplied fields into an existing vehicle.
    async fn update(&self, id: &VehicleId, patch: VehiclePatch) -> Result<(), RepositoryError>;

    /// Mark the vehicle inactive instead of deleting it.
    async fn deactivate(&self, id: &VehicleId) -> Result<(), RepositoryError>;

    /// Hard delete; succeeds when the vehicle is already gone.
    async fn delete(&self, id: &VehicleId) -> Result<(), RepositoryError>;
}
