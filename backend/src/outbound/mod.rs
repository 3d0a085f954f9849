//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **store**: schemaless document storage (in-memory or one JSON file per
//!   collection on disk)
//! - **persistence**: entity repositories built on a document store
//! - **session**: storage for the signed-in admin's session payload
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
pub mod session;
pub mod store;
