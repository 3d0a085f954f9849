//! Demo record types.
//!
//! These types mirror the backend entities without creating a dependency on
//! them. Field names serialise in camelCase to match the registry JSON.

use serde::{Deserialize, Serialize};

/// Role granted to a demo admin account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRoleSeed {
    /// Regular administrator.
    #[default]
    Admin,
    /// Administrator allowed to manage other admins.
    Superadmin,
}

/// Kind of a demo vehicle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleTypeSeed {
    /// Passenger car.
    #[default]
    Car,
    /// Motorcycle or scooter.
    Motorcycle,
    /// Bicycle.
    Bicycle,
    /// Anything else.
    Other,
}

impl VehicleTypeSeed {
    /// Lower-case label used by the backend and import files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
            Self::Bicycle => "bicycle",
            Self::Other => "other",
        }
    }
}

/// A demo admin account with its plaintext demo password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSeed {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Name shown in the dashboard header.
    pub display_name: String,
    /// Granted role.
    pub role: AdminRoleSeed,
    /// Documented demo password (hashed by the backend before storage).
    pub password: String,
}

/// A demo block (building).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSeed {
    /// Short block code such as `A`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Number of floors in the building.
    pub total_floors: u32,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Apartment layout applied to every demo block.
///
/// Floors are numbered from 1; rooms on each floor are numbered from 1 and
/// take the type and area at the same (zero-based) position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentLayout {
    /// Number of populated floors per block.
    pub floors: u32,
    /// Number of apartments per floor.
    pub rooms_per_floor: u32,
    /// Apartment type per room position.
    pub types: Vec<String>,
    /// Floor area in square metres per room position.
    pub areas: Vec<f64>,
}

/// An expanded demo apartment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentSeed {
    /// Code of the owning block.
    pub block_code: String,
    /// Floor number.
    pub floor: u32,
    /// Room number such as `101`.
    pub room_number: String,
    /// Apartment type such as `Studio`.
    pub apartment_type: String,
    /// Floor area in square metres.
    pub area: f64,
}

impl ApartmentSeed {
    /// Apartment code in `{blockCode}-{roomNumber}` form.
    #[must_use]
    pub fn code(&self) -> String {
        crate::validation::apartment_code(&self.block_code, &self.room_number)
    }
}

/// A demo resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentSeed {
    /// Full name.
    pub full_name: String,
    /// Contact phone number.
    pub phone: String,
    /// Code of the apartment the resident lives in.
    pub apartment_code: String,
    /// Whether the resident owns the apartment.
    pub is_owner: bool,
}

/// A demo vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSeed {
    /// Plate number as printed (normalised by the backend).
    pub plate: String,
    /// Full name of the owning resident.
    pub resident_name: String,
    /// Vehicle kind.
    pub vehicle_type: VehicleTypeSeed,
    /// Manufacturer.
    #[serde(default)]
    pub brand: Option<String>,
    /// Model name.
    #[serde(default)]
    pub model: Option<String>,
    /// Paint colour.
    #[serde(default)]
    pub color: Option<String>,
}
