//! Apartments and the derived apartment code.

use chrono::{DateTime, Utc};

use super::{ApartmentCode, ApartmentId, BlockCode, BlockId, Denormalized};

/// A stored apartment.
///
/// `code` equals `block_code + "-" + room_number` whenever the last write
/// supplied both parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Apartment {
    pub id: ApartmentId,
    pub code: ApartmentCode,
    pub block_id: BlockId,
    pub block_code: Denormalized<BlockCode>,
    pub floor: u32,
    pub room_number: String,
    pub apartment_type: Option<String>,
    pub area: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating an apartment. The code is derived.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApartment {
    pub block_id: BlockId,
    pub block_code: BlockCode,
    pub floor: u32,
    pub room_number: String,
    pub apartment_type: Option<String>,
    pub area: Option<f64>,
}

impl NewApartment {
    /// Code this apartment will be stored under.
    pub fn code(&self) -> ApartmentCode {
        ApartmentCode::derive(&self.block_code, &self.room_number)
    }
}

/// Partial update of an apartment; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApartmentPatch {
    pub block_id: Option<BlockId>,
    pub block_code: Option<BlockCode>,
    pub floor: Option<u32>,
    pub room_number: Option<String>,
    pub apartment_type: Option<String>,
    pub area: Option<f64>,
}

impl ApartmentPatch {
    /// Recomputed code when the patch carries both components.
    ///
    /// A patch that changes only one component leaves the stored code as it
    /// was, even though it no longer matches.
    pub fn derived_code(&self) -> Option<ApartmentCode> {
        match (&self.block_code, &self.room_number) {
            (Some(block_code), Some(room_number)) => {
                Some(ApartmentCode::derive(block_code, room_number))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("b"), Some("1203"), Some("B-1203"))]
    #[case(Some("b"), None, None)]
    #[case(None, Some("1203"), None)]
    #[case(None, None, None)]
    fn patch_derives_code_only_with_both_parts(
        #[case] block: Option<&str>,
        #[case] room: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let patch = ApartmentPatch {
            block_code: block.map(BlockCode::new),
            room_number: room.map(str::to_owned),
            ..ApartmentPatch::default()
        };
        assert_eq!(
            patch.derived_code().as_ref().map(AsRef::as_ref),
            expected
        );
    }
}
