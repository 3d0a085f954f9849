//! Demo dataset loading and startup seeding.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use example_data::{DemoDataset, DemoRegistry, RegistryError, generate_demo_dataset};
use thiserror::Error;
use tracing::info;

use crate::domain::{DemoDataSeeder, DemoSeedOutcome, DemoSeedingError};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while loading or applying demo data.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing or validation failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Writing the dataset failed.
    #[error("demo data seeding error: {0}")]
    Seeding(#[from] DemoSeedingError),
}

/// Expand the configured registry, or the bundled one when none is set.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the registry file cannot be read or
/// fails validation.
pub fn load_demo_dataset(
    settings: &ExampleDataSettings,
) -> Result<DemoDataset, StartupSeedingError> {
    let registry = match &settings.registry_path {
        Some(path) => load_registry(path)?,
        None => DemoRegistry::bundled()?,
    };
    Ok(generate_demo_dataset(&registry))
}

/// Seed an empty registry when demo seeding is enabled.
///
/// A registry that already holds blocks is left alone.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use platesnap_admin::domain::DemoDataSeeder;
/// use platesnap_admin::example_data::{ExampleDataSettings, seed_demo_data_on_startup};
/// use platesnap_admin::outbound::persistence::Repositories;
/// use platesnap_admin::outbound::store::InMemoryDocumentStore;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let repos = Repositories::over(Arc::new(InMemoryDocumentStore::new()), Arc::new(DefaultClock));
/// let seeder = DemoDataSeeder::new(
///     repos.admins,
///     repos.blocks,
///     repos.apartments,
///     repos.residents,
///     repos.vehicles,
/// );
/// let settings = ExampleDataSettings::default();
/// let outcome = seed_demo_data_on_startup(&settings, &seeder).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the dataset cannot be loaded or a
/// write fails.
pub async fn seed_demo_data_on_startup(
    settings: &ExampleDataSettings,
    seeder: &DemoDataSeeder,
) -> Result<Option<DemoSeedOutcome>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "demo data seeding skipped");
        return Ok(None);
    }

    let dataset = load_demo_dataset(settings)?;
    match seeder.seed(&dataset).await {
        Ok(outcome) => Ok(Some(outcome)),
        Err(DemoSeedingError::AlreadySeeded { blocks }) => {
            info!(blocks, "registry already seeded; skipping");
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

fn load_registry(path: &Path) -> Result<DemoRegistry, StartupSeedingError> {
    let read_error = |source: std::io::Error| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(DemoRegistry::from_json(&contents)?)
}
