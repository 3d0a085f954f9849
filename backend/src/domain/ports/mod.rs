//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_repository;
mod apartment_repository;
mod block_repository;
mod repository_error;
mod resident_repository;
mod session_store;
mod vehicle_repository;

pub use admin_repository::AdminRepository;
#[cfg(test)]
pub use admin_repository::MockAdminRepository;
pub use apartment_repository::ApartmentRepository;
#[cfg(test)]
pub use apartment_repository::MockApartmentRepository;
pub use block_repository::BlockRepository;
#[cfg(test)]
pub use block_repository::MockBlockRepository;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use resident_repository::MockResidentRepository;
pub use resident_repository::ResidentRepository;
#[cfg(test)]
pub use session_store::MockSessionStore;
pub use session_store::{SessionStore, SessionStoreError};
#[cfg(test)]
pub use vehicle_repository::MockVehicleRepository;
pub use vehicle_repository::VehicleRepository;
