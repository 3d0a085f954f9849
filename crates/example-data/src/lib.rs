//! Deterministic demo registry data for PlateSnap Admin.
//!
//! This crate describes the demonstration dataset used to bootstrap an empty
//! condominium registry: admin accounts, blocks, an apartment layout that is
//! expanded per block, residents and their vehicles. It is designed to be
//! independent of backend domain types to avoid circular dependencies; the
//! backend converts these records at the point of use.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading demo registries from JSON strings or files
//! - A bundled registry matching the documented demo credentials
//! - Cross-reference validation (apartment codes, resident names, vehicle
//!   types)
//! - Deterministic apartment expansion (`{floor}0{room}` room numbers)
//!
//! # Example
//!
//! ```
//! use example_data::{DemoRegistry, generate_demo_dataset};
//!
//! let registry = DemoRegistry::bundled().expect("bundled registry is valid");
//! let dataset = generate_demo_dataset(&registry);
//!
//! assert_eq!(dataset.blocks.len(), 3);
//! assert_eq!(dataset.apartments.len(), 60);
//! assert_eq!(dataset.residents.len(), 10);
//! assert_eq!(dataset.vehicles.len(), 10);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::RegistryError;
pub use generator::{DemoDataset, generate_demo_dataset};
pub use registry::DemoRegistry;
pub use seed::{
    AdminRoleSeed, AdminSeed, ApartmentLayout, ApartmentSeed, BlockSeed, ResidentSeed,
    VehicleSeed, VehicleTypeSeed,
};
pub use validation::{apartment_code, block_code_of};
