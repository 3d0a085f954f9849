//! Natural keys: block codes, apartment codes and plate numbers.
//!
//! Each constructor applies the write-time normalisation rule for its key,
//! so a value of these types is always in stored form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Short human key of a block, always upper-cased.
///
/// # Examples
/// ```
/// use platesnap_admin::domain::BlockCode;
///
/// assert_eq!(BlockCode::new("a").as_ref(), "A");
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct BlockCode(String);

impl BlockCode {
    /// Normalise a raw block code.
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_uppercase())
    }
}

impl From<String> for BlockCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<BlockCode> for String {
    fn from(value: BlockCode) -> Self {
        value.0
    }
}

impl AsRef<str> for BlockCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Apartment code in `{blockCode}-{roomNumber}` form.
///
/// Codes are derived, never typed in: [`ApartmentCode::derive`] is the only
/// way to build one for a write. Stored codes read back verbatim.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ApartmentCode(String);

impl ApartmentCode {
    /// Derive the code from its two components.
    ///
    /// # Examples
    /// ```
    /// use platesnap_admin::domain::{ApartmentCode, BlockCode};
    ///
    /// let code = ApartmentCode::derive(&BlockCode::new("b"), "1203");
    /// assert_eq!(code.as_ref(), "B-1203");
    /// ```
    pub fn derive(block_code: &BlockCode, room_number: &str) -> Self {
        Self(format!("{block_code}-{room_number}"))
    }

    /// Wrap a code read from storage or typed by an operator.
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Upper-cased form used for lookups by natural key.
    pub fn lookup_key(raw: &str) -> String {
        raw.to_uppercase()
    }
}

impl AsRef<str> for ApartmentCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApartmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vehicle plate number in normalised form.
///
/// Normalisation upper-cases the input and strips every whitespace
/// character and hyphen, so `"51a-123 45"` and `"51A12345"` are the same
/// plate.
///
/// # Examples
/// ```
/// use platesnap_admin::domain::PlateNumber;
///
/// assert_eq!(PlateNumber::new("51a-123 45").as_ref(), "51A12345");
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub struct PlateNumber(String);

impl PlateNumber {
    /// Normalise a raw plate.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw
            .as_ref()
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        Self(normalized)
    }
}

impl From<String> for PlateNumber {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<PlateNumber> for String {
    fn from(value: PlateNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for PlateNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
