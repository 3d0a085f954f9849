//! Document store adapters.
//!
//! The registry lives in a schemaless document store: named collections of
//! JSON field maps addressed by store-assigned string ids. [`DocumentStore`]
//! is the narrow surface the persistence adapters need; it knows nothing
//! about blocks, apartments or vehicles.
//!
//! - [`InMemoryDocumentStore`]: process-local, used by tests and demos.
//! - [`DirectoryDocumentStore`]: one JSON file per collection in a
//!   capability directory, rewritten atomically on every mutation.

mod directory;
mod memory;
mod query;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use directory::DirectoryDocumentStore;
pub use memory::InMemoryDocumentStore;
pub use query::{Query, SortDirection};

/// Field map of a stored document, without its id.
pub type Fields = Map<String, Value>;

/// A document together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Fields,
}

/// Errors raised by document store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be opened or reached.
    #[error("document store unavailable: {message}")]
    Unavailable { message: String },

    /// Reading or writing a collection failed.
    #[error("document store I/O failed: {message}")]
    Io { message: String },

    /// A collection's stored contents could not be parsed.
    #[error("collection {collection} is corrupt: {message}")]
    Corrupt { collection: String, message: String },

    /// An update targeted a document that does not exist.
    #[error("document {id} not found in {collection}")]
    NotFound { collection: String, id: String },
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn corrupt(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

/// Schemaless collection storage.
///
/// Collections are created on first write. Every adapter keeps documents in
/// insertion order, which is the tie-breaker for ordered queries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its new id.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    async fn get(&self, collection: &str, id: &str)
    -> Result<Option<StoredDocument>, StoreError>;

    /// Documents matching every filter of `query`, in query order.
    async fn query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, StoreError>;

    /// Shallow-merge `fields` into an existing document.
    ///
    /// Fails with [`StoreError::NotFound`] when the document is absent.
    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError>;

    /// Remove a document; succeeds when it is already gone.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Random id in the store's native format.
pub(crate) fn new_document_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Shallow merge used by every adapter's `update`.
pub(crate) fn merge_fields(target: &mut Fields, patch: Fields) {
    for (key, value) in patch {
        target.insert(key, value);
    }
}
