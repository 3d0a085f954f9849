//! Registered vehicles.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    ApartmentCode, ApartmentId, BlockCode, BlockId, Denormalized, PlateNumber, ResidentId,
    VehicleId,
};

/// Kind of vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Car,
    Motorcycle,
    Bicycle,
    Other,
}

impl VehicleType {
    /// Lower-case label as stored.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Bicycle => "bicycle",
            Self::Other => "other",
        }
    }

    /// Parse a label, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use platesnap_admin::domain::VehicleType;
    ///
    /// assert_eq!(VehicleType::from_label(" Motorcycle "), Some(VehicleType::Motorcycle));
    /// assert_eq!(VehicleType::from_label("truck"), None);
    /// ```
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "car" => Some(Self::Car),
            "motorcycle" => Some(Self::Motorcycle),
            "bicycle" => Some(Self::Bicycle),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub plate_number: PlateNumber,
    pub resident_id: ResidentId,
    pub resident_name: Denormalized<String>,
    pub apartment_id: ApartmentId,
    pub apartment_code: Denormalized<ApartmentCode>,
    pub block_id: BlockId,
    pub block_code: Denormalized<BlockCode>,
    pub vehicle_type: VehicleType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub parking_slot: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a vehicle.
///
/// `is_active` left as `None` stores the vehicle as active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVehicle {
    pub plate_number: PlateNumber,
    pub resident_id: ResidentId,
    pub resident_name: String,
    pub apartment_id: ApartmentId,
    pub apartment_code: ApartmentCode,
    pub block_id: BlockId,
    pub block_code: BlockCode,
    pub vehicle_type: VehicleType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub parking_slot: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update of a vehicle; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehiclePatch {
    pub plate_number: Option<PlateNumber>,
    pub resident_id: Option<ResidentId>,
    pub resident_name: Option<String>,
    pub apartment_id: Option<ApartmentId>,
    pub apartment_code: Option<ApartmentCode>,
    pub block_id: Option<BlockId>,
    pub block_code: Option<BlockCode>,
    pub vehicle_type: Option<VehicleType>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    pub parking_slot: Option<String>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}
