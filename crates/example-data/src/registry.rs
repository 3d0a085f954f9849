//! Demo registry loading.
//!
//! A registry is a single JSON document listing admins, blocks, the shared
//! apartment layout, residents and vehicles. Loading validates the version
//! and every cross reference so that seeding never half-applies a broken
//! dataset.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{AdminSeed, ApartmentLayout, BlockSeed, ResidentSeed, VehicleSeed};
use crate::validation::validate_registry;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Registry shipped with the crate; mirrors the documented demo dataset.
const BUNDLED_REGISTRY: &str = include_str!("../fixtures/demo-registry.json");

/// A validated demo registry.
///
/// # Example
///
/// ```
/// use example_data::DemoRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "admins": [],
///     "blocks": [{"code": "A", "name": "Block A", "totalFloors": 10}],
///     "layout": {"floors": 1, "roomsPerFloor": 1, "types": ["Studio"], "areas": [40]},
///     "residents": [],
///     "vehicles": []
/// }"#;
///
/// let registry = DemoRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.blocks().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DemoRegistry {
    version: u32,
    admins: Vec<AdminSeed>,
    blocks: Vec<BlockSeed>,
    layout: ApartmentLayout,
    residents: Vec<ResidentSeed>,
    vehicles: Vec<VehicleSeed>,
}

impl DemoRegistry {
    /// Parses a demo registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or misses required fields
    /// - The version is unsupported
    /// - The layout cannot be expanded
    /// - A resident or vehicle reference does not resolve
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawDemoRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a demo registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    /// Returns the registry bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] only if the bundled fixture is corrupt.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(BUNDLED_REGISTRY)
    }

    fn from_raw(raw: RawDemoRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let registry = Self {
            version: raw.version,
            admins: raw.admins,
            blocks: raw.blocks,
            layout: raw.layout,
            residents: raw.residents,
            vehicles: raw.vehicles,
        };
        validate_registry(&registry)?;
        Ok(registry)
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the demo admin accounts.
    #[must_use]
    pub fn admins(&self) -> &[AdminSeed] {
        &self.admins
    }

    /// Returns the demo blocks.
    #[must_use]
    pub fn blocks(&self) -> &[BlockSeed] {
        &self.blocks
    }

    /// Returns the layout applied to every block.
    #[must_use]
    pub const fn layout(&self) -> &ApartmentLayout {
        &self.layout
    }

    /// Returns the demo residents.
    #[must_use]
    pub fn residents(&self) -> &[ResidentSeed] {
        &self.residents
    }

    /// Returns the demo vehicles.
    #[must_use]
    pub fn vehicles(&self) -> &[VehicleSeed] {
        &self.vehicles
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDemoRegistry {
    version: u32,
    #[serde(default)]
    admins: Vec<AdminSeed>,
    blocks: Vec<BlockSeed>,
    layout: ApartmentLayout,
    #[serde(default)]
    residents: Vec<ResidentSeed>,
    #[serde(default)]
    vehicles: Vec<VehicleSeed>,
}
