//! Read-side operations spanning all four registry collections.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::ports::{
    ApartmentRepository, BlockRepository, RepositoryError, ResidentRepository, VehicleRepository,
};
use super::{Apartment, Block, RegistrySnapshot, Resident, Vehicle};

/// Record counts per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub blocks: usize,
    pub apartments: usize,
    pub residents: usize,
    pub vehicles: usize,
}

/// Result of looking up a single plate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlateLookup {
    pub vehicle: Option<Vehicle>,
    pub resident: Option<Resident>,
    pub apartment: Option<Apartment>,
    pub block: Option<Block>,
}

impl PlateLookup {
    /// Whether an active vehicle was found.
    pub fn found(&self) -> bool {
        self.vehicle.is_some()
    }
}

/// Loads the registry collections and answers cross-collection queries.
#[derive(Clone)]
pub struct RegistryService {
    blocks: Arc<dyn BlockRepository>,
    apartments: Arc<dyn ApartmentRepository>,
    residents: Arc<dyn ResidentRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl RegistryService {
    pub fn new(
        blocks: Arc<dyn BlockRepository>,
        apartments: Arc<dyn ApartmentRepository>,
        residents: Arc<dyn ResidentRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            blocks,
            apartments,
            residents,
            vehicles,
        }
    }

    /// Count every collection, reading all four concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first repository failure.
    pub async fn stats(&self) -> Result<RegistryStats, RepositoryError> {
        let snapshot = self.load_snapshot().await?;
        Ok(RegistryStats {
            blocks: snapshot.blocks().len(),
            apartments: snapshot.apartments().len(),
            residents: snapshot.residents().len(),
            vehicles: snapshot.vehicles().len(),
        })
    }

    /// Read all four collections concurrently into a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns the first repository failure.
    pub async fn load_snapshot(&self) -> Result<RegistrySnapshot, RepositoryError> {
        let (blocks, apartments, residents, vehicles) = tokio::try_join!(
            self.blocks.list(),
            self.apartments.list(),
            self.residents.list(),
            self.vehicles.list(),
        )?;
        debug!(
            blocks = blocks.len(),
            apartments = apartments.len(),
            residents = residents.len(),
            vehicles = vehicles.len(),
            "registry snapshot loaded"
        );
        Ok(RegistrySnapshot::new(blocks, apartments, residents, vehicles))
    }

    /// Find the active vehicle for `plate` and resolve its parents by id.
    ///
    /// Parents whose id is empty or dangling are left out.
    ///
    /// # Errors
    ///
    /// Returns the first repository failure.
    pub async fn lookup_plate(&self, plate: &str) -> Result<PlateLookup, RepositoryError> {
        let Some(vehicle) = self.vehicles.find_by_plate(plate).await? else {
            return Ok(PlateLookup::default());
        };

        let resident = if vehicle.resident_id.is_empty() {
            None
        } else {
            self.residents.find_by_id(&vehicle.resident_id).await?
        };
        let apartment = if vehicle.apartment_id.is_empty() {
            None
        } else {
            self.apartments.find_by_id(&vehicle.apartment_id).await?
        };
        let block = if vehicle.block_id.is_empty() {
            None
        } else {
            self.blocks.find_by_id(&vehicle.block_id).await?
        };

        Ok(PlateLookup {
            vehicle: Some(vehicle),
            resident,
            apartment,
            block,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cross-collection reads.

    use super::*;
    use crate::domain::ports::{
        MockApartmentRepository, MockBlockRepository, MockResidentRepository,
        MockVehicleRepository,
    };
    use crate::test_support::registry::{apartment, block, resident, vehicle};
    use rstest::rstest;

    fn service(
        blocks: MockBlockRepository,
        apartments: MockApartmentRepository,
        residents: MockResidentRepository,
        vehicles: MockVehicleRepository,
    ) -> RegistryService {
        RegistryService::new(
            Arc::new(blocks),
            Arc::new(apartments),
            Arc::new(residents),
            Arc::new(vehicles),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn stats_counts_each_collection() {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let a102 = apartment("ap-2", &block_a, "102");
        let an = resident("r-1", "An", "0901", &a101);
        let plate = vehicle("v-1", "51A-12345", &an, &a101);

        let mut blocks = MockBlockRepository::new();
        blocks.expect_list().return_once(move || Ok(vec![block_a]));
        let mut apartments = MockApartmentRepository::new();
        apartments
            .expect_list()
            .return_once(move || Ok(vec![a101, a102]));
        let mut residents = MockResidentRepository::new();
        residents.expect_list().return_once(move || Ok(vec![an]));
        let mut vehicles = MockVehicleRepository::new();
        vehicles.expect_list().return_once(move || Ok(vec![plate]));

        let stats = service(blocks, apartments, residents, vehicles)
            .stats()
            .await
            .expect("stats load");

        assert_eq!(
            stats,
            RegistryStats {
                blocks: 1,
                apartments: 2,
                residents: 1,
                vehicles: 1,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn stats_propagates_store_failure() {
        let mut blocks = MockBlockRepository::new();
        blocks
            .expect_list()
            .return_once(|| Err(RepositoryError::connection("offline")));
        let mut apartments = MockApartmentRepository::new();
        apartments.expect_list().returning(|| Ok(Vec::new()));
        let mut residents = MockResidentRepository::new();
        residents.expect_list().returning(|| Ok(Vec::new()));
        let mut vehicles = MockVehicleRepository::new();
        vehicles.expect_list().returning(|| Ok(Vec::new()));

        let result = service(blocks, apartments, residents, vehicles)
            .stats()
            .await;

        assert_eq!(result, Err(RepositoryError::connection("offline")));
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_reports_not_found_without_joins() {
        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_by_plate()
            .withf(|plate| plate == "99Z-00000")
            .return_once(|_| Ok(None));
        let mut residents = MockResidentRepository::new();
        residents.expect_find_by_id().never();

        let lookup = service(
            MockBlockRepository::new(),
            MockApartmentRepository::new(),
            residents,
            vehicles,
        )
        .lookup_plate("99Z-00000")
        .await
        .expect("lookup runs");

        assert!(!lookup.found());
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_tolerates_dangling_parents() {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let an = resident("r-1", "An", "0901", &a101);
        let found = vehicle("v-1", "51A-12345", &an, &a101);

        let mut vehicles = MockVehicleRepository::new();
        vehicles
            .expect_find_by_plate()
            .return_once(move |_| Ok(Some(found)));
        let mut residents = MockResidentRepository::new();
        residents.expect_find_by_id().return_once(|_| Ok(None));
        let mut apartments = MockApartmentRepository::new();
        apartments
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(a101)));
        let mut blocks = MockBlockRepository::new();
        blocks.expect_find_by_id().return_once(|_| Ok(None));

        let lookup = service(blocks, apartments, residents, vehicles)
            .lookup_plate("51a 12345")
            .await
            .expect("lookup runs");

        assert!(lookup.found());
        assert!(lookup.resident.is_none());
        assert!(lookup.apartment.is_some());
        assert!(lookup.block.is_none());
    }
}
