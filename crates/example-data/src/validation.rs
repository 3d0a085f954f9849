//! Cross-reference checks for demo registries.
//!
//! The backend never enforces referential integrity, so the registry checks
//! its own references up front: every resident must land in an apartment the
//! layout produces and every vehicle must name a known resident.

use std::collections::HashSet;

use crate::error::RegistryError;
use crate::generator::expand_apartments;
use crate::registry::DemoRegistry;

/// Builds an apartment code in `{blockCode}-{roomNumber}` form.
///
/// The block code is upper-cased; the room number is kept verbatim.
///
/// # Examples
///
/// ```
/// use example_data::apartment_code;
///
/// assert_eq!(apartment_code("a", "101"), "A-101");
/// ```
#[must_use]
pub fn apartment_code(block_code: &str, room_number: &str) -> String {
    format!("{}-{room_number}", block_code.to_uppercase())
}

/// Returns the block part of an apartment code.
///
/// # Examples
///
/// ```
/// use example_data::block_code_of;
///
/// assert_eq!(block_code_of("C-103"), "C");
/// assert_eq!(block_code_of("PH"), "PH");
/// ```
#[must_use]
pub fn block_code_of(apartment_code: &str) -> &str {
    apartment_code
        .split_once('-')
        .map_or(apartment_code, |(block, _)| block)
}

pub(crate) fn validate_registry(registry: &DemoRegistry) -> Result<(), RegistryError> {
    if registry.blocks().is_empty() {
        return Err(RegistryError::EmptyBlocks);
    }

    let mut block_codes = HashSet::new();
    for block in registry.blocks() {
        let code = block.code.to_uppercase();
        if !block_codes.insert(code.clone()) {
            return Err(RegistryError::DuplicateBlockCode { code });
        }
    }

    validate_layout(registry)?;

    let apartment_codes: HashSet<String> = expand_apartments(registry)
        .iter()
        .map(crate::ApartmentSeed::code)
        .collect();
    for resident in registry.residents() {
        if !apartment_codes.contains(&resident.apartment_code.to_uppercase()) {
            return Err(RegistryError::UnknownApartment {
                resident: resident.full_name.clone(),
                code: resident.apartment_code.clone(),
            });
        }
    }

    let resident_names: HashSet<&str> = registry
        .residents()
        .iter()
        .map(|resident| resident.full_name.as_str())
        .collect();
    for vehicle in registry.vehicles() {
        if !resident_names.contains(vehicle.resident_name.as_str()) {
            return Err(RegistryError::UnknownResident {
                plate: vehicle.plate.clone(),
                name: vehicle.resident_name.clone(),
            });
        }
    }

    Ok(())
}

fn validate_layout(registry: &DemoRegistry) -> Result<(), RegistryError> {
    let layout = registry.layout();
    if layout.floors == 0 || layout.rooms_per_floor == 0 {
        return Err(RegistryError::InvalidLayout {
            message: "floors and roomsPerFloor must be positive".to_owned(),
        });
    }
    let rooms = usize::try_from(layout.rooms_per_floor).map_err(|_| RegistryError::InvalidLayout {
        message: "roomsPerFloor exceeds supported range".to_owned(),
    })?;
    if layout.types.len() != rooms || layout.areas.len() != rooms {
        return Err(RegistryError::InvalidLayout {
            message: format!("types and areas must each list {rooms} entries"),
        });
    }
    Ok(())
}
