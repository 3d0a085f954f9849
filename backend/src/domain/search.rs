//! In-memory search over a full registry snapshot.
//!
//! The snapshot holds every block, apartment, resident and vehicle plus
//! hash-map indexes by id. It is rebuilt from scratch on each reload and is
//! never persisted. Searches are plain substring scans that keep the stored
//! order of the searched collection.

use std::collections::HashMap;

use super::{
    Apartment, ApartmentId, Block, BlockId, Resident, ResidentId, Vehicle,
};

/// All four collections loaded at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    blocks: Vec<Block>,
    apartments: Vec<Apartment>,
    residents: Vec<Resident>,
    vehicles: Vec<Vehicle>,
    block_index: HashMap<BlockId, usize>,
    apartment_index: HashMap<ApartmentId, usize>,
    resident_index: HashMap<ResidentId, usize>,
}

impl RegistrySnapshot {
    /// Build a snapshot and its id indexes.
    ///
    /// Each collection keeps the order it was listed in.
    pub fn new(
        blocks: Vec<Block>,
        apartments: Vec<Apartment>,
        residents: Vec<Resident>,
        vehicles: Vec<Vehicle>,
    ) -> Self {
        let block_index = index_by(&blocks, |block| block.id.clone());
        let apartment_index = index_by(&apartments, |apartment| apartment.id.clone());
        let resident_index = index_by(&residents, |resident| resident.id.clone());
        Self {
            blocks,
            apartments,
            residents,
            vehicles,
            block_index,
            apartment_index,
            resident_index,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn apartments(&self) -> &[Apartment] {
        &self.apartments
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residents
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.block_index.get(id).map(|&position| &self.blocks[position])
    }

    pub fn apartment(&self, id: &ApartmentId) -> Option<&Apartment> {
        self.apartment_index
            .get(id)
            .map(|&position| &self.apartments[position])
    }

    pub fn resident(&self, id: &ResidentId) -> Option<&Resident> {
        self.resident_index
            .get(id)
            .map(|&position| &self.residents[position])
    }

    /// Vehicles whose plate, owner name or owner phone contains `query`.
    ///
    /// The query is trimmed and lower-cased; an empty query matches nothing.
    /// Plate and name compare case-insensitively, the phone compares raw.
    /// When the owner id no longer resolves, the vehicle's cached resident
    /// name stands in for the owner name and the phone check is skipped.
    ///
    /// # Examples
    /// ```
    /// use platesnap_admin::domain::RegistrySnapshot;
    ///
    /// let snapshot = RegistrySnapshot::default();
    /// assert!(snapshot.search_vehicles("51a").is_empty());
    /// ```
    pub fn search_vehicles(&self, query: &str) -> Vec<VehicleMatch> {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }

        self.vehicles
            .iter()
            .filter(|vehicle| {
                if vehicle.plate_number.as_ref().to_lowercase().contains(&term) {
                    return true;
                }
                match self.resident(&vehicle.resident_id) {
                    Some(resident) => {
                        resident.full_name.to_lowercase().contains(&term)
                            || resident.phone.contains(&term)
                    }
                    None => vehicle.resident_name.cached().to_lowercase().contains(&term),
                }
            })
            .map(|vehicle| self.join_vehicle(vehicle))
            .collect()
    }

    /// Residents whose name, phone or cached apartment code contains `query`.
    ///
    /// Name and apartment code compare case-insensitively, the phone raw.
    /// The query is lower-cased but not trimmed, so an empty query lists
    /// every resident.
    pub fn search_residents(&self, query: &str) -> Vec<Resident> {
        let term = query.to_lowercase();

        self.residents
            .iter()
            .filter(|resident| {
                resident.full_name.to_lowercase().contains(&term)
                    || resident.phone.contains(&term)
                    || resident
                        .apartment_code
                        .as_ref()
                        .to_lowercase()
                        .contains(&term)
            })
            .cloned()
            .collect()
    }

    /// Join a vehicle with whatever parents still resolve.
    pub fn join_vehicle(&self, vehicle: &Vehicle) -> VehicleMatch {
        VehicleMatch {
            vehicle: vehicle.clone(),
            resident: self.resident(&vehicle.resident_id).cloned(),
            apartment: self.apartment(&vehicle.apartment_id).cloned(),
            block: self.block(&vehicle.block_id).cloned(),
        }
    }
}

fn index_by<T, K, F>(items: &[T], key: F) -> HashMap<K, usize>
where
    K: std::hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut index = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        index.entry(key(item)).or_insert(position);
    }
    index
}

/// A vehicle with its resolved parents.
///
/// Parents are `None` when the stored reference is dangling; the display
/// accessors then fall back to the vehicle's cached copies.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleMatch {
    pub vehicle: Vehicle,
    pub resident: Option<Resident>,
    pub apartment: Option<Apartment>,
    pub block: Option<Block>,
}

impl VehicleMatch {
    /// Owner name, live when the resident resolves.
    pub fn resident_name(&self) -> &str {
        self.resident.as_ref().map_or_else(
            || self.vehicle.resident_name.cached().as_str(),
            |resident| resident.full_name.as_str(),
        )
    }

    /// Apartment code, live when the apartment resolves.
    pub fn apartment_code(&self) -> &str {
        self.apartment.as_ref().map_or_else(
            || self.vehicle.apartment_code.as_ref(),
            |apartment| apartment.code.as_ref(),
        )
    }

    /// Block code, live when the block resolves.
    pub fn block_code(&self) -> &str {
        self.block.as_ref().map_or_else(
            || self.vehicle.block_code.as_ref(),
            |block| block.code.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for snapshot indexes and matching rules.

    use super::*;
    use crate::test_support::registry::{apartment, block, resident, vehicle};
    use rstest::{fixture, rstest};

    #[fixture]
    fn snapshot() -> RegistrySnapshot {
        let block_a = block("b-a", "A");
        let a101 = apartment("ap-1", &block_a, "101");
        let an = resident("r-1", "Nguyễn Văn An", "0901234567", &a101);
        let binh = resident("r-2", "Trần Thị Bích", "0912345678", &a101);
        RegistrySnapshot::new(
            vec![block_a],
            vec![a101.clone()],
            vec![an.clone(), binh],
            vec![
                vehicle("v-1", "51A-12345", &an, &a101),
                vehicle("v-2", "51B-11111", &an, &a101),
                vehicle("v-3", "30K-99999", &resident("r-gone", "Ghost Owner", "000", &a101), &a101),
            ],
        )
    }

    fn plates(matches: &[VehicleMatch]) -> Vec<&str> {
        matches
            .iter()
            .map(|found| found.vehicle.plate_number.as_ref())
            .collect()
    }

    #[rstest]
    #[case("", &[])]
    #[case("   ", &[])]
    #[case("51a", &["51A12345"])]
    #[case("NGUYỄN", &["51A12345", "51B11111"])]
    #[case("0901", &["51A12345", "51B11111"])]
    #[case("ghost", &["30K99999"])]
    #[case("zzz", &[])]
    fn vehicle_search_matches_plate_name_or_phone(
        snapshot: RegistrySnapshot,
        #[case] query: &str,
        #[case] expected: &[&str],
    ) {
        assert_eq!(plates(&snapshot.search_vehicles(query)), expected);
    }

    #[rstest]
    fn dangling_owner_falls_back_to_cached_name(snapshot: RegistrySnapshot) {
        let found = snapshot.search_vehicles("30k");
        let only = found.first().expect("one match");

        assert!(only.resident.is_none());
        assert_eq!(only.resident_name(), "Ghost Owner");
        assert_eq!(only.apartment_code(), "A-101");
        assert_eq!(only.block_code(), "A");
    }

    #[rstest]
    #[case("bích", 1)]
    #[case("a-101", 2)]
    #[case("0912", 1)]
    #[case("", 2)]
    #[case(" a-101", 0)]
    fn resident_search_matches_name_phone_or_apartment(
        snapshot: RegistrySnapshot,
        #[case] query: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(snapshot.search_residents(query).len(), expected);
    }

    #[rstest]
    fn indexes_resolve_by_id(snapshot: RegistrySnapshot) {
        assert!(snapshot.block(&BlockId::new("b-a")).is_some());
        assert!(snapshot.apartment(&ApartmentId::new("ap-1")).is_some());
        assert!(snapshot.resident(&ResidentId::new("r-gone")).is_none());
    }
}
