//! Document-store persistence adapters.
//!
//! Concrete implementations of the entity repository ports on top of any
//! [`DocumentStore`](crate::outbound::store::DocumentStore).
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories translate between domain types and
//!   stored documents and apply write-time normalisation. No business
//!   logic resides here.
//! - **Internal models**: document shapes (`models.rs`) never leave this
//!   module.
//! - **Injected time**: `createdAt`/`updatedAt` come from a
//!   [`mockable::Clock`].
//! - **Strongly typed errors**: store failures map to
//!   [`RepositoryError`](crate::domain::ports::RepositoryError).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockable::DefaultClock;
//! use platesnap_admin::outbound::persistence::DocumentBlockRepository;
//! use platesnap_admin::outbound::store::InMemoryDocumentStore;
//!
//! let store = Arc::new(InMemoryDocumentStore::new());
//! let blocks = DocumentBlockRepository::new(store, Arc::new(DefaultClock));
//! # let _ = blocks;
//! ```

mod collection;
mod document_admin_repository;
mod document_apartment_repository;
mod document_block_repository;
mod document_resident_repository;
mod document_vehicle_repository;
mod models;

use std::sync::Arc;

use mockable::Clock;

pub use document_admin_repository::DocumentAdminRepository;
pub use document_apartment_repository::DocumentApartmentRepository;
pub use document_block_repository::DocumentBlockRepository;
pub use document_resident_repository::DocumentResidentRepository;
pub use document_vehicle_repository::DocumentVehicleRepository;

use crate::domain::ports::{
    AdminRepository, ApartmentRepository, BlockRepository, ResidentRepository, VehicleRepository,
};
use crate::outbound::store::DocumentStore;

/// Collection holding admin accounts.
pub const ADMINS: &str = "admins";
/// Collection holding blocks.
pub const BLOCKS: &str = "blocks";
/// Collection holding apartments.
pub const APARTMENTS: &str = "apartments";
/// Collection holding residents.
pub const RESIDENTS: &str = "residents";
/// Collection holding vehicles.
pub const VEHICLES: &str = "vehicles";

/// Every repository over one shared store, ready to hand to services.
#[derive(Clone)]
pub struct Repositories {
    pub admins: Arc<dyn AdminRepository>,
    pub blocks: Arc<dyn BlockRepository>,
    pub apartments: Arc<dyn ApartmentRepository>,
    pub residents: Arc<dyn ResidentRepository>,
    pub vehicles: Arc<dyn VehicleRepository>,
}

impl Repositories {
    /// Build document-backed repositories sharing `store` and `clock`.
    pub fn over<S: DocumentStore + 'static>(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            admins: Arc::new(DocumentAdminRepository::new(
                Arc::clone(&store),
                Arc::clone(&clock),
            )),
            blocks: Arc::new(DocumentBlockRepository::new(
                Arc::clone(&store),
                Arc::clone(&clock),
            )),
            apartments: Arc::new(DocumentApartmentRepository::new(
                Arc::clone(&store),
                Arc::clone(&clock),
            )),
            residents: Arc::new(DocumentResidentRepository::new(
                Arc::clone(&store),
                Arc::clone(&clock),
            )),
            vehicles: Arc::new(DocumentVehicleRepository::new(store, clock)),
        }
    }
}
