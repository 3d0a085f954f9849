//! Stored document shapes.
//!
//! `*Record` structs decode a stored document (its id injected under `id`);
//! `*Document` structs encode a create; `*Changes` structs encode an update
//! and skip every field the caller left untouched. Field names are the
//! camelCase names already present in the store. Timestamps are RFC 3339
//! strings.
//!
//! Older writers stored vehicle types, roles and counts without checking
//! them, so those fields decode through [`lenient`] instead of failing the
//! whole collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AdminId, AdminRole, AdminUser, Apartment, ApartmentCode, ApartmentId, Block, BlockCode,
    BlockId, Denormalized, PlateNumber, Resident, ResidentId, Vehicle, VehicleId, VehicleType,
};

// Blocks

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BlockRecord {
    id: BlockId,
    code: BlockCode,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "lenient::total_floors")]
    total_floors: u32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: DateTime<Utc>,
}

impl From<BlockRecord> for Block {
    fn from(record: BlockRecord) -> Self {
        Self {
            id: record.id,
            code: record.code,
            name: record.name,
            total_floors: record.total_floors,
            description: record.description,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BlockDocument {
    pub code: BlockCode,
    pub name: String,
    pub total_floors: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BlockChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<BlockCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_floors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

// Apartments

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApartmentRecord {
    id: ApartmentId,
    code: ApartmentCode,
    #[serde(default)]
    block_id: BlockId,
    #[serde(default)]
    block_code: BlockCode,
    #[serde(default, deserialize_with = "lenient::floor")]
    floor: u32,
    #[serde(default)]
    room_number: String,
    #[serde(default, rename = "type")]
    apartment_type: Option<String>,
    #[serde(default)]
    area: Option<f64>,
    #[serde(default)]
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: DateTime<Utc>,
}

impl From<ApartmentRecord> for Apartment {
    fn from(record: ApartmentRecord) -> Self {
        Self {
            id: record.id,
            code: record.code,
            block_id: record.block_id,
            block_code: Denormalized::captured(record.block_code),
            floor: record.floor,
            room_number: record.room_number,
            apartment_type: record.apartment_type,
            area: record.area,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApartmentDocument {
    pub code: ApartmentCode,
    pub block_id: BlockId,
    pub block_code: BlockCode,
    pub floor: u32,
    pub room_number: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub apartment_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApartmentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ApartmentCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_code: Option<BlockCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub apartment_type: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    pub updated_at: DateTime<Utc>,
}

// Residents

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResidentRecord {
    id: ResidentId,
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    id_number: Option<String>,
    #[serde(default)]
    apartment_id: ApartmentId,
    #[serde(default)]
    apartment_code: ApartmentCode,
    #[serde(default)]
    block_id: BlockId,
    #[serde(default)]
    block_code: BlockCode,
    #[serde(default)]
    is_owner: bool,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: DateTime<Utc>,
}

impl From<ResidentRecord> for Resident {
    fn from(record: ResidentRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name,
            phone: record.phone,
            email: record.email,
            id_number: record.id_number,
            apartment_id: record.apartment_id,
            apartment_code: Denormalized::captured(record.apartment_code),
            block_id: record.block_id,
            block_code: Denormalized::captured(record.block_code),
            is_owner: record.is_owner,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResidentDocument {
    pub full_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    pub apartment_id: ApartmentId,
    pub apartment_code: ApartmentCode,
    pub block_id: BlockId,
    pub block_code: BlockCode,
    pub is_owner: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResidentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<ApartmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_code: Option<ApartmentCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_code: Option<BlockCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_owner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

// Vehicles

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VehicleRecord {
    id: VehicleId,
    plate_number: PlateNumber,
    #[serde(default)]
    resident_id: ResidentId,
    #[serde(default)]
    resident_name: String,
    #[serde(default)]
    apartment_id: ApartmentId,
    #[serde(default)]
    apartment_code: ApartmentCode,
    #[serde(default)]
    block_id: BlockId,
    #[serde(default)]
    block_code: BlockCode,
    #[serde(default, deserialize_with = "lenient::vehicle_type")]
    vehicle_type: VehicleType,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    parking_slot: Option<String>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    is_active: bool,
    #[serde(default)]
    created_at: DateTime<Utc>,
    #[serde(default)]
    updated_at: DateTime<Utc>,
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        Self {
            id: record.id,
            plate_number: record.plate_number,
            resident_id: record.resident_id,
            resident_name: Denormalized::captured(record.resident_name),
            apartment_id: record.apartment_id,
            apartment_code: Denormalized::captured(record.apartment_code),
            block_id: record.block_id,
            block_code: Denormalized::captured(record.block_code),
            vehicle_type: record.vehicle_type,
            brand: record.brand,
            model: record.model,
            color: record.color,
            parking_slot: record.parking_slot,
            notes: record.notes,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VehicleDocument {
    pub plate_number: PlateNumber,
    pub resident_id: ResidentId,
    pub resident_name: String,
    pub apartment_id: ApartmentId,
    pub apartment_code: ApartmentCode,
    pub block_id: BlockId,
    pub block_code: BlockCode,
    pub vehicle_type: VehicleType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VehicleChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plate_number: Option<PlateNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident_id: Option<ResidentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_id: Option<ApartmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_code: Option<ApartmentCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_code: Option<BlockCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<VehicleType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_slot: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

// Admins

/// Decoded admin account. `passwordHash` is never read into a record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AdminRecord {
    id: AdminId,
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
    #[serde(default, deserialize_with = "lenient::admin_role")]
    role: AdminRole,
    #[serde(default)]
    created_at: DateTime<Utc>,
    #[serde(default)]
    last_login_at: Option<DateTime<Utc>>,
}

impl From<AdminRecord> for AdminUser {
    fn from(record: AdminRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            display_name: record.display_name,
            role: record.role,
            created_at: record.created_at,
            last_login_at: record.last_login_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AdminDocument {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: AdminRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AdminChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<AdminRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Field decoders that never reject a stored value.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use crate::domain::import::{DEFAULT_FLOOR, DEFAULT_TOTAL_FLOORS};
    use crate::domain::{AdminRole, VehicleType};

    /// Unknown labels become [`VehicleType::Other`]; non-text becomes the
    /// default type.
    pub(super) fn vehicle_type<'de, D>(deserializer: D) -> Result<VehicleType, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str() {
            Some(label) => VehicleType::from_label(label).unwrap_or(VehicleType::Other),
            None => VehicleType::default(),
        })
    }

    /// Anything but `superadmin` decodes as the ordinary admin role.
    pub(super) fn admin_role<'de, D>(deserializer: D) -> Result<AdminRole, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value.as_str().map(str::trim) {
            Some(label) if label.eq_ignore_ascii_case("superadmin") => AdminRole::Superadmin,
            _ => AdminRole::Admin,
        })
    }

    pub(super) fn floor<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(whole_number(&value).unwrap_or(DEFAULT_FLOOR))
    }

    pub(super) fn total_floors<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(whole_number(&value).unwrap_or(DEFAULT_TOTAL_FLOORS))
    }

    /// Non-negative number or numeric text, truncating fractions.
    fn whole_number(value: &Value) -> Option<u32> {
        if let Some(exact) = value.as_u64() {
            return u32::try_from(exact).ok();
        }
        let number = match value {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        let whole = number.trunc();
        if number.is_finite() && whole >= 0.0 && whole <= f64::from(u32::MAX) {
            // Whole and in range, so the cast is exact.
            Some(whole as u32)
        } else {
            None
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use rstest::rstest;
        use serde_json::json;

        #[rstest]
        #[case(json!(3), Some(3))]
        #[case(json!(2.5), Some(2))]
        #[case(json!("7"), Some(7))]
        #[case(json!(-3), None)]
        #[case(json!("x"), None)]
        #[case(json!(null), None)]
        #[case(json!(5_000_000_000_u64), None)]
        fn whole_number_truncates_and_rejects(#[case] value: Value, #[case] expected: Option<u32>) {
            assert_eq!(whole_number(&value), expected);
        }

        #[rstest]
        #[case(json!("truck"), VehicleType::Other)]
        #[case(json!(" Motorcycle "), VehicleType::Motorcycle)]
        #[case(json!(7), VehicleType::Car)]
        fn vehicle_type_accepts_any_label(#[case] value: Value, #[case] expected: VehicleType) {
            assert_eq!(vehicle_type(value).expect("lenient decode"), expected);
        }

        #[rstest]
        #[case(json!("superadmin"), AdminRole::Superadmin)]
        #[case(json!("owner"), AdminRole::Admin)]
        fn admin_role_falls_back_to_admin(#[case] value: Value, #[case] expected: AdminRole) {
            assert_eq!(admin_role(value).expect("lenient decode"), expected);
        }
    }
}
