//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with
//! the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::outbound::persistence::Repositories;
use crate::outbound::store::InMemoryDocumentStore;

/// Timestamp shared by fixtures that do not care about the exact time.
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).single() {
        Some(timestamp) => timestamp,
        None => panic!("fixture timestamp is unambiguous"),
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    pub fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Default for FixtureClock {
    fn default() -> Self {
        Self::new(fixture_timestamp())
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Clock that tests move forward explicitly.
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Repositories over a fresh in-memory store.
pub fn in_memory_repositories(clock: Arc<dyn Clock>) -> Repositories {
    Repositories::over(Arc::new(InMemoryDocumentStore::new()), clock)
}

#[cfg(feature = "test-support")]
pub mod data_dir {
    //! Temporary on-disk registries.

    use std::sync::Arc;

    use tempfile::TempDir;

    use crate::outbound::store::DirectoryDocumentStore;

    /// A directory store living in a temporary directory.
    ///
    /// The directory is removed when the value is dropped.
    pub struct TempRegistry {
        pub dir: TempDir,
        pub store: Arc<DirectoryDocumentStore>,
    }

    impl TempRegistry {
        pub fn new() -> Self {
            let dir = match tempfile::tempdir() {
                Ok(dir) => dir,
                Err(error) => panic!("create temp dir: {error}"),
            };
            let store = match DirectoryDocumentStore::open(&dir.path().join("registry")) {
                Ok(store) => Arc::new(store),
                Err(error) => panic!("open directory store: {error}"),
            };
            Self { dir, store }
        }
    }

    impl Default for TempRegistry {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub mod registry {
    //! Builders for in-memory registry records.
    //!
    //! Children copy their parents' keys exactly as a fresh write would, so
    //! a graph built here has no stale projections until a test edits one.

    use crate::domain::{
        AdminId, AdminRole, AdminUser, Apartment, ApartmentCode, ApartmentId, Block, BlockCode,
        BlockId, Denormalized, PlateNumber, Resident, ResidentId, Vehicle, VehicleId, VehicleType,
    };

    use super::fixture_timestamp;

    pub fn block(id: &str, code: &str) -> Block {
        Block {
            id: BlockId::new(id),
            code: BlockCode::new(code),
            name: format!("Block {code}"),
            total_floors: 20,
            description: None,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }

    /// Apartment on the floor given by the first digit of `room`.
    pub fn apartment(id: &str, block: &Block, room: &str) -> Apartment {
        let floor = room
            .chars()
            .next()
            .and_then(|digit| digit.to_digit(10))
            .unwrap_or(1);
        Apartment {
            id: ApartmentId::new(id),
            code: ApartmentCode::derive(&block.code, room),
            block_id: block.id.clone(),
            block_code: Denormalized::captured(block.code.clone()),
            floor,
            room_number: room.to_owned(),
            apartment_type: Some("Studio".to_owned()),
            area: Some(45.0),
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }

    pub fn resident(id: &str, full_name: &str, phone: &str, apartment: &Apartment) -> Resident {
        Resident {
            id: ResidentId::new(id),
            full_name: full_name.to_owned(),
            phone: phone.to_owned(),
            email: None,
            id_number: None,
            apartment_id: apartment.id.clone(),
            apartment_code: Denormalized::captured(apartment.code.clone()),
            block_id: apartment.block_id.clone(),
            block_code: apartment.block_code.clone(),
            is_owner: true,
            notes: None,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }

    pub fn vehicle(id: &str, plate: &str, owner: &Resident, apartment: &Apartment) -> Vehicle {
        Vehicle {
            id: VehicleId::new(id),
            plate_number: PlateNumber::new(plate),
            resident_id: owner.id.clone(),
            resident_name: Denormalized::captured(owner.full_name.clone()),
            apartment_id: apartment.id.clone(),
            apartment_code: Denormalized::captured(apartment.code.clone()),
            block_id: apartment.block_id.clone(),
            block_code: apartment.block_code.clone(),
            vehicle_type: VehicleType::Car,
            brand: None,
            model: None,
            color: None,
            parking_slot: None,
            notes: None,
            is_active: true,
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }

    pub fn admin_user(id: &str, username: &str) -> AdminUser {
        AdminUser {
            id: AdminId::new(id),
            username: username.to_owned(),
            email: format!("{username}@platesnap.local"),
            display_name: username.to_owned(),
            role: AdminRole::Admin,
            created_at: fixture_timestamp(),
            last_login_at: None,
        }
    }
}
