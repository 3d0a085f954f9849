//! Admin accounts and the legacy password hash.
//!
//! [`simple_hash`] reproduces the hash already stored for existing accounts
//! bit for bit. It is a 32-bit rolling hash with no salt and is not a
//! security mechanism.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AdminId;

/// Role granted to an admin account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[default]
    Admin,
    Superadmin,
}

impl AdminRole {
    /// Lower-case label as stored.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An admin account as returned to callers.
///
/// The stored password hash has no field here: every read drops it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Fields supplied when creating an admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub role: AdminRole,
}

/// Partial update of an admin profile; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminPatch {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<AdminRole>,
}

/// Hash a password the way stored admin accounts expect.
///
/// Folds the UTF-16 code units of `input` into a wrapping 32-bit signed
/// accumulator (`hash * 31 + unit`) and renders it in hexadecimal with a
/// leading `-` for negative values.
///
/// # Examples
/// ```
/// use platesnap_admin::domain::simple_hash;
///
/// assert_eq!(simple_hash("admin123"), "-39c43b7d");
/// assert_eq!(simple_hash("a"), "61");
/// assert_eq!(simple_hash(""), "0");
/// ```
pub fn simple_hash(input: &str) -> String {
    let hash = input.encode_utf16().fold(0_i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    if hash < 0 {
        format!("-{:x}", hash.unsigned_abs())
    } else {
        format!("{hash:x}")
    }
}
