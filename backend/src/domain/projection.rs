//! Point-in-time projections of parent data cached on child records.
//!
//! Residents and vehicles carry copies of their parents' natural keys for
//! display and search. The copy is taken when the child is written and is
//! never refreshed: editing or deleting the parent leaves it as it was.
//! [`Denormalized`] makes that explicit in the type so readers can tell a
//! cached copy from live data. Detecting drift is the job of
//! [`crate::domain::ReferenceAudit`]; nothing repairs it automatically.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A value copied from a parent record when the child was written.
///
/// # Examples
/// ```
/// use platesnap_admin::domain::{BlockCode, Denormalized};
///
/// let cached = Denormalized::captured(BlockCode::new("A"));
/// assert!(cached.matches(&BlockCode::new("A")));
/// assert!(!cached.matches(&BlockCode::new("B")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Denormalized<T>(T);

impl<T> Denormalized<T> {
    /// Capture a copy of the parent's current value.
    pub fn captured(value: T) -> Self {
        Self(value)
    }

    /// The cached value as it was when captured.
    pub fn cached(&self) -> &T {
        &self.0
    }

    /// Consume the projection and return the cached value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: PartialEq> Denormalized<T> {
    /// Whether the cached copy still equals the live parent value.
    pub fn matches(&self, live: &T) -> bool {
        self.0 == *live
    }
}

impl<T: AsRef<str>> AsRef<str> for Denormalized<T> {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl<T: fmt::Display> fmt::Display for Denormalized<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
