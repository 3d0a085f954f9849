//! Deterministic expansion of a demo registry.
//!
//! Blocks, residents, vehicles and admins are copied verbatim; apartments are
//! produced by applying the layout to every block in registry order, floor by
//! floor, room by room. The same registry always yields the same dataset.

use crate::registry::DemoRegistry;
use crate::seed::{AdminSeed, ApartmentSeed, BlockSeed, ResidentSeed, VehicleSeed};

/// Fully expanded demo dataset, ready to be written in dependency order.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoDataset {
    /// Admin accounts.
    pub admins: Vec<AdminSeed>,
    /// Blocks in registry order.
    pub blocks: Vec<BlockSeed>,
    /// Apartments grouped by block, then floor, then room.
    pub apartments: Vec<ApartmentSeed>,
    /// Residents in registry order.
    pub residents: Vec<ResidentSeed>,
    /// Vehicles in registry order.
    pub vehicles: Vec<VehicleSeed>,
}

/// Expands a registry into the dataset the backend seeds.
///
/// # Example
///
/// ```
/// use example_data::{DemoRegistry, generate_demo_dataset};
///
/// let registry = DemoRegistry::bundled().expect("bundled registry");
/// let dataset = generate_demo_dataset(&registry);
/// let first = dataset.apartments.first().expect("apartments generated");
///
/// assert_eq!(first.code(), "A-101");
/// assert_eq!(first.apartment_type, "Studio");
/// ```
#[must_use]
pub fn generate_demo_dataset(registry: &DemoRegistry) -> DemoDataset {
    DemoDataset {
        admins: registry.admins().to_vec(),
        blocks: registry.blocks().to_vec(),
        apartments: expand_apartments(registry),
        residents: registry.residents().to_vec(),
        vehicles: registry.vehicles().to_vec(),
    }
}

pub(crate) fn expand_apartments(registry: &DemoRegistry) -> Vec<ApartmentSeed> {
    let layout = registry.layout();
    let mut apartments = Vec::new();
    for block in registry.blocks() {
        let block_code = block.code.to_uppercase();
        for floor in 1..=layout.floors {
            for (position, (apartment_type, area)) in
                layout.types.iter().zip(layout.areas.iter()).enumerate()
            {
                let room = position + 1;
                apartments.push(ApartmentSeed {
                    block_code: block_code.clone(),
                    floor,
                    room_number: format!("{floor}0{room}"),
                    apartment_type: apartment_type.clone(),
                    area: *area,
                });
            }
        }
    }
    apartments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_matches_documented_counts() {
        let registry = DemoRegistry::bundled().expect("bundled registry");
        let dataset = generate_demo_dataset(&registry);

        assert_eq!(dataset.blocks.len(), 3);
        assert_eq!(dataset.apartments.len(), 60);
        assert_eq!(dataset.residents.len(), 10);
        assert_eq!(dataset.vehicles.len(), 10);
        assert_eq!(dataset.admins.len(), 2);
    }

    #[test]
    fn expansion_is_deterministic() {
        let registry = DemoRegistry::bundled().expect("bundled registry");
        assert_eq!(
            generate_demo_dataset(&registry),
            generate_demo_dataset(&registry)
        );
    }

    #[test]
    fn room_numbers_follow_floor_zero_room_pattern() {
        let registry = DemoRegistry::bundled().expect("bundled registry");
        let codes: Vec<String> = expand_apartments(&registry)
            .iter()
            .filter(|apartment| apartment.block_code == "C" && apartment.floor == 5)
            .map(ApartmentSeed::code)
            .collect();

        assert_eq!(codes, ["C-501", "C-502", "C-503", "C-504"]);
    }
}
