//! PlateSnap condominium registry.
//!
//! The domain layer owns entities, ports and services; outbound adapters
//! persist records in a document store; the inbound console drives it all
//! from the command line.

pub mod config;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod outbound;
pub mod telemetry;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::AppSettings;
pub use domain::Error;
