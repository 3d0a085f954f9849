//! Residents living in apartments.

use chrono::{DateTime, Utc};

use super::{ApartmentCode, ApartmentId, BlockCode, BlockId, Denormalized, ResidentId};

/// A stored resident.
///
/// `apartment_code` and `block_code` are copies taken at write time; they
/// may no longer match the referenced apartment or block.
#[derive(Debug, Clone, PartialEq)]
pub struct Resident {
    pub id: ResidentId,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub id_number: Option<String>,
    pub apartment_id: ApartmentId,
    pub apartment_code: Denormalized<ApartmentCode>,
    pub block_id: BlockId,
    pub block_code: Denormalized<BlockCode>,
    pub is_owner: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a resident.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResident {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub id_number: Option<String>,
    pub apartment_id: ApartmentId,
    pub apartment_code: ApartmentCode,
    pub block_id: BlockId,
    pub block_code: BlockCode,
    pub is_owner: bool,
    pub notes: Option<String>,
}

/// Partial update of a resident; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidentPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub id_number: Option<String>,
    pub apartment_id: Option<ApartmentId>,
    pub apartment_code: Option<ApartmentCode>,
    pub block_id: Option<BlockId>,
    pub block_code: Option<BlockCode>,
    pub is_owner: Option<bool>,
    pub notes: Option<String>,
}
