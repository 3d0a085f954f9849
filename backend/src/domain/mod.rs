//! Domain primitives, aggregates and services.
//!
//! Purpose: Define the strongly typed registry entities (blocks, apartments,
//! residents, vehicles, admin accounts) and the services that operate on
//! them through the ports in [`ports`]. Nothing here knows how records are
//! stored.
//!
//! Public surface:
//! - [`Error`]: transport-agnostic failure payload.
//! - Entities and their `New*`/`*Patch` write shapes.
//! - Natural keys ([`BlockCode`], [`ApartmentCode`], [`PlateNumber`]) and the
//!   [`Denormalized`] wrapper for cached parent keys.
//! - Services: [`AuthService`], [`RegistryService`], [`DemoDataSeeder`],
//!   [`import::BulkImporter`], [`DebouncedSearch`] and [`ReferenceAudit`].

pub mod error;
pub mod import;
pub mod ports;

mod admin;
mod apartment;
mod audit;
mod auth;
mod block;
mod codes;
mod debounce;
mod example_data;
mod ids;
mod projection;
mod registry;
mod resident;
mod search;
mod session;
mod vehicle;

pub use self::admin::{AdminPatch, AdminRole, AdminUser, NewAdmin, simple_hash};
pub use self::apartment::{Apartment, ApartmentPatch, NewApartment};
pub use self::audit::{RecordKind, ReferenceAudit, ReferenceFinding};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::block::{Block, BlockPatch, NewBlock};
pub use self::codes::{ApartmentCode, BlockCode, PlateNumber};
pub use self::debounce::{DebouncedSearch, SEARCH_DEBOUNCE};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::example_data::{DemoDataSeeder, DemoSeedOutcome, DemoSeedingError};
pub use self::ids::{AdminId, ApartmentId, BlockId, ResidentId, VehicleId};
pub use self::projection::Denormalized;
pub use self::registry::{PlateLookup, RegistryService, RegistryStats};
pub use self::resident::{NewResident, Resident, ResidentPatch};
pub use self::search::{RegistrySnapshot, VehicleMatch};
pub use self::session::{
    AuthService, INVALID_CREDENTIALS_MESSAGE, SESSION_TTL, SessionState, StoredSession,
    UNEXPECTED_LOGIN_MESSAGE,
};
pub use self::vehicle::{NewVehicle, Vehicle, VehiclePatch, VehicleType};

/// Convenient service result alias.
///
/// # Examples
/// ```
/// use platesnap_admin::domain::{DomainResult, Error};
///
/// fn guard(signed_in: bool) -> DomainResult<()> {
///     if signed_in {
///         Ok(())
///     } else {
///         Err(Error::unauthorized("sign in first"))
///     }
/// }
///
/// assert!(guard(false).is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
