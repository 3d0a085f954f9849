//! Demo data seeding orchestration.
//!
//! Converts an expanded example-data registry into domain records and writes
//! them through the entity repositories in dependency order: admins, blocks,
//! apartments, residents, vehicles. Natural keys in the dataset are resolved
//! to the ids the store assigns as each level is written.

use std::collections::HashMap;
use std::sync::Arc;

use example_data::{
    AdminRoleSeed, AdminSeed, ApartmentSeed, BlockSeed, DemoDataset, ResidentSeed, VehicleSeed,
    VehicleTypeSeed,
};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    AdminRepository, ApartmentRepository, BlockRepository, RepositoryError, ResidentRepository,
    VehicleRepository,
};
use crate::domain::{
    AdminRole, ApartmentCode, ApartmentId, BlockCode, BlockId, NewAdmin, NewApartment, NewBlock,
    NewResident, NewVehicle, PlateNumber, ResidentId, VehicleType,
};

/// Number of records written per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSeedOutcome {
    /// Admin accounts created; zero when accounts already existed.
    pub admins: usize,
    pub blocks: usize,
    pub apartments: usize,
    pub residents: usize,
    pub vehicles: usize,
}

/// Errors raised while applying demo data.
#[derive(Debug, Error)]
pub enum DemoSeedingError {
    /// The registry already holds blocks.
    #[error("registry already seeded: {blocks} blocks exist")]
    AlreadySeeded { blocks: usize },
    /// A dataset record names a parent that was not written.
    #[error("{kind} '{key}' referenced by the demo dataset was not seeded")]
    UnresolvedReference { kind: &'static str, key: String },
    /// Persistence adapter failed while seeding.
    #[error("demo data persistence error: {0}")]
    Persistence(#[from] RepositoryError),
}

/// Ids and keys of a written apartment, used to fill child projections.
#[derive(Clone)]
struct SeededApartment {
    id: ApartmentId,
    code: ApartmentCode,
    block_id: BlockId,
    block_code: BlockCode,
}

#[derive(Clone)]
struct SeededResident {
    id: ResidentId,
    apartment: SeededApartment,
}

/// Service that writes a demo dataset into an empty registry.
#[derive(Clone)]
pub struct DemoDataSeeder {
    admins: Arc<dyn AdminRepository>,
    blocks: Arc<dyn BlockRepository>,
    apartments: Arc<dyn ApartmentRepository>,
    residents: Arc<dyn ResidentRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl DemoDataSeeder {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        blocks: Arc<dyn BlockRepository>,
        apartments: Arc<dyn ApartmentRepository>,
        residents: Arc<dyn ResidentRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            admins,
            blocks,
            apartments,
            residents,
            vehicles,
        }
    }

    /// Write the dataset into an empty registry.
    ///
    /// Admin accounts are only created when none exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`DemoSeedingError::AlreadySeeded`] when any block exists, or
    /// the first repository failure. Records written before a failure stay
    /// in place.
    pub async fn seed(&self, dataset: &DemoDataset) -> Result<DemoSeedOutcome, DemoSeedingError> {
        let existing = self.blocks.list().await?.len();
        if existing > 0 {
            return Err(DemoSeedingError::AlreadySeeded { blocks: existing });
        }

        let mut outcome = DemoSeedOutcome::default();
        if !self.admins.has_any().await? {
            for admin in &dataset.admins {
                self.admins
                    .create(convert_admin(admin), &admin.password)
                    .await?;
                outcome.admins += 1;
            }
        }

        let mut blocks = HashMap::with_capacity(dataset.blocks.len());
        for seed in &dataset.blocks {
            let block = convert_block(seed);
            let code = block.code.clone();
            let id = self.blocks.create(block).await?;
            blocks.insert(code, id);
        }
        outcome.blocks = blocks.len();

        let mut apartments = HashMap::with_capacity(dataset.apartments.len());
        for seed in &dataset.apartments {
            let block_code = BlockCode::new(&seed.block_code);
            let block_id = blocks.get(&block_code).cloned().ok_or_else(|| {
                DemoSeedingError::UnresolvedReference {
                    kind: "block",
                    key: block_code.to_string(),
                }
            })?;
            let apartment = convert_apartment(seed, block_id.clone(), block_code.clone());
            let code = apartment.code();
            let id = self.apartments.create(apartment).await?;
            apartments.insert(
                ApartmentCode::lookup_key(code.as_ref()),
                SeededApartment {
                    id,
                    code,
                    block_id,
                    block_code,
                },
            );
        }
        outcome.apartments = apartments.len();

        let mut residents = HashMap::with_capacity(dataset.residents.len());
        for seed in &dataset.residents {
            let apartment = apartments
                .get(&ApartmentCode::lookup_key(&seed.apartment_code))
                .cloned()
                .ok_or_else(|| DemoSeedingError::UnresolvedReference {
                    kind: "apartment",
                    key: seed.apartment_code.clone(),
                })?;
            let id = self
                .residents
                .create(convert_resident(seed, &apartment))
                .await?;
            residents.insert(seed.full_name.as_str(), SeededResident { id, apartment });
            outcome.residents += 1;
        }

        for seed in &dataset.vehicles {
            let resident = residents
                .get(seed.resident_name.as_str())
                .ok_or_else(|| DemoSeedingError::UnresolvedReference {
                    kind: "resident",
                    key: seed.resident_name.clone(),
                })?;
            self.vehicles
                .create(convert_vehicle(seed, resident))
                .await?;
            outcome.vehicles += 1;
        }

        info!(
            admins = outcome.admins,
            blocks = outcome.blocks,
            apartments = outcome.apartments,
            residents = outcome.residents,
            vehicles = outcome.vehicles,
            "demo data seeded"
        );
        Ok(outcome)
    }
}

fn convert_admin(seed: &AdminSeed) -> NewAdmin {
    NewAdmin {
        username: seed.username.clone(),
        email: seed.email.clone(),
        display_name: seed.display_name.clone(),
        role: match seed.role {
            AdminRoleSeed::Admin => AdminRole::Admin,
            AdminRoleSeed::Superadmin => AdminRole::Superadmin,
        },
    }
}

fn convert_block(seed: &BlockSeed) -> NewBlock {
    NewBlock {
        code: BlockCode::new(&seed.code),
        name: seed.name.clone(),
        total_floors: seed.total_floors,
        description: seed.description.clone(),
    }
}

fn convert_apartment(seed: &ApartmentSeed, block_id: BlockId, block_code: BlockCode) -> NewApartment {
    NewApartment {
        block_id,
        block_code,
        floor: seed.floor,
        room_number: seed.room_number.clone(),
        apartment_type: Some(seed.apartment_type.clone()),
        area: Some(seed.area),
    }
}

fn convert_resident(seed: &ResidentSeed, apartment: &SeededApartment) -> NewResident {
    NewResident {
        full_name: seed.full_name.clone(),
        phone: seed.phone.clone(),
        email: None,
        id_number: None,
        apartment_id: apartment.id.clone(),
        apartment_code: apartment.code.clone(),
        block_id: apartment.block_id.clone(),
        block_code: apartment.block_code.clone(),
        is_owner: seed.is_owner,
        notes: None,
    }
}

fn convert_vehicle(seed: &VehicleSeed, resident: &SeededResident) -> NewVehicle {
    let apartment = &resident.apartment;
    NewVehicle {
        plate_number: PlateNumber::new(&seed.plate),
        resident_id: resident.id.clone(),
        resident_name: seed.resident_name.clone(),
        apartment_id: apartment.id.clone(),
        apartment_code: apartment.code.clone(),
        block_id: apartment.block_id.clone(),
        block_code: apartment.block_code.clone(),
        vehicle_type: map_vehicle_type(seed.vehicle_type),
        brand: seed.brand.clone(),
        model: seed.model.clone(),
        color: seed.color.clone(),
        parking_slot: None,
        notes: None,
        is_active: Some(true),
    }
}

fn map_vehicle_type(vehicle_type: VehicleTypeSeed) -> VehicleType {
    match vehicle_type {
        VehicleTypeSeed::Car => VehicleType::Car,
        VehicleTypeSeed::Motorcycle => VehicleType::Motorcycle,
        VehicleTypeSeed::Bicycle => VehicleType::Bicycle,
        VehicleTypeSeed::Other => VehicleType::Other,
    }
}
