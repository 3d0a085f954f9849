//! Store-assigned record identifiers.
//!
//! Ids are opaque strings handed out by the document store. Children hold a
//! parent id as a weak reference; nothing guarantees the parent still
//! exists, and bulk import may even record an empty id when a parent code
//! did not resolve.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw store id.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Whether the id is empty (an unresolved reference).
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

define_id!(
    /// Identifier of a block document.
    BlockId
);
define_id!(
    /// Identifier of an apartment document.
    ApartmentId
);
define_id!(
    /// Identifier of a resident document.
    ResidentId
);
define_id!(
    /// Identifier of a vehicle document.
    VehicleId
);
define_id!(
    /// Identifier of an admin account document.
    AdminId
);
