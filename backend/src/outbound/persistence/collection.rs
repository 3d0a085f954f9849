//! Typed access to one document collection.
//!
//! Repositories describe their documents with serde structs; this wrapper
//! converts them to and from store field maps and maps store failures onto
//! [`RepositoryError`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::domain::ports::RepositoryError;
use crate::outbound::store::{DocumentStore, Fields, Query, StoreError, StoredDocument};

/// Field every decoded record reads its id from.
const ID_FIELD: &str = "id";

pub(super) struct DocumentCollection<S> {
    store: Arc<S>,
    name: &'static str,
}

impl<S> Clone for DocumentCollection<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            name: self.name,
        }
    }
}

impl<S: DocumentStore> DocumentCollection<S> {
    pub(super) fn new(store: Arc<S>, name: &'static str) -> Self {
        Self { store, name }
    }

    pub(super) async fn insert<T: Serialize>(
        &self,
        document: &T,
    ) -> Result<String, RepositoryError> {
        let fields = self.encode(document)?;
        self.store
            .add(self.name, fields)
            .await
            .map_err(|err| self.map_error(err))
    }

    pub(super) async fn fetch<R: DeserializeOwned>(
        &self,
        id: &str,
    ) -> Result<Option<R>, RepositoryError> {
        self.store
            .get(self.name, id)
            .await
            .map_err(|err| self.map_error(err))?
            .map(|document| self.decode(document))
            .transpose()
    }

    pub(super) async fn select<R: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Vec<R>, RepositoryError> {
        self.store
            .query(self.name, query)
            .await
            .map_err(|err| self.map_error(err))?
            .into_iter()
            .map(|document| self.decode(document))
            .collect()
    }

    pub(super) async fn first<R: DeserializeOwned>(
        &self,
        query: &Query,
    ) -> Result<Option<R>, RepositoryError> {
        let documents = self
            .store
            .query(self.name, query)
            .await
            .map_err(|err| self.map_error(err))?;
        documents
            .into_iter()
            .next()
            .map(|document| self.decode(document))
            .transpose()
    }

    /// Raw fields of one document, for values no record exposes.
    pub(super) async fn raw(
        &self,
        query: &Query,
    ) -> Result<Option<StoredDocument>, RepositoryError> {
        let documents = self
            .store
            .query(self.name, query)
            .await
            .map_err(|err| self.map_error(err))?;
        Ok(documents.into_iter().next())
    }

    pub(super) async fn merge<T: Serialize>(
        &self,
        id: &str,
        patch: &T,
    ) -> Result<(), RepositoryError> {
        let fields = self.encode(patch)?;
        self.store
            .update(self.name, id, fields)
            .await
            .map_err(|err| self.map_error(err))
    }

    pub(super) async fn remove(&self, id: &str) -> Result<(), RepositoryError> {
        self.store
            .delete(self.name, id)
            .await
            .map_err(|err| self.map_error(err))
    }

    fn encode<T: Serialize>(&self, document: &T) -> Result<Fields, RepositoryError> {
        match serde_json::to_value(document) {
            Ok(Value::Object(fields)) => Ok(fields),
            Ok(other) => Err(RepositoryError::query(format!(
                "{} document must be an object, got {other}",
                self.name
            ))),
            Err(err) => Err(RepositoryError::query(format!(
                "failed to encode {} document: {err}",
                self.name
            ))),
        }
    }

    fn decode<R: DeserializeOwned>(&self, document: StoredDocument) -> Result<R, RepositoryError> {
        let StoredDocument { id, mut fields } = document;
        fields.insert(ID_FIELD.to_owned(), Value::String(id.clone()));
        serde_json::from_value(Value::Object(fields)).map_err(|err| {
            error!(
                collection = self.name,
                id = %id,
                error = %err,
                "stored document failed to decode"
            );
            RepositoryError::decode(format!("{}/{id}: {err}", self.name))
        })
    }

    fn map_error(&self, error: StoreError) -> RepositoryError {
        map_store_error(error, self.name)
    }
}

/// Map store failures onto the shared repository error.
pub(super) fn map_store_error(error: StoreError, collection: &str) -> RepositoryError {
    match error {
        StoreError::Unavailable { message } => {
            error!(collection, %message, "document store unavailable");
            RepositoryError::connection(message)
        }
        StoreError::Io { message } => {
            error!(collection, %message, "document store I/O failed");
            RepositoryError::query(message)
        }
        StoreError::Corrupt { message, .. } => {
            error!(collection, %message, "collection is corrupt");
            RepositoryError::decode(message)
        }
        StoreError::NotFound { collection, id } => RepositoryError::not_found(collection, id),
    }
}

/// Store empty optional text as absent.
pub(super) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Patch form of optional text: `Some(None)` clears the stored value.
pub(super) fn optional_text_patch(value: Option<String>) -> Option<Option<String>> {
    value.map(|text| blank_to_none(Some(text)))
}
