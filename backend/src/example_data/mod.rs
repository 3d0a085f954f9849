//! Wiring for demo data seeding.

mod config;
mod startup;

pub use config::ExampleDataSettings;
pub use startup::{StartupSeedingError, load_demo_dataset, seed_demo_data_on_startup};
