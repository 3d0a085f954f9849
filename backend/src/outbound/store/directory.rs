//! File-backed document store rooted in a capability directory.
//!
//! Each collection is a JSON array of `{id, fields}` objects stored in
//! `<collection>.json`. Mutations rewrite the whole file through a
//! temporary sibling and a rename, so readers never observe a partial
//! write. All access goes through one async lock.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tokio::sync::Mutex;
use tracing::{debug, error};

use super::{
    DocumentStore, Fields, Query, StoreError, StoredDocument, merge_fields, new_document_id,
};

/// [`DocumentStore`] persisting collections as JSON files.
///
/// File I/O is synchronous and runs on the calling task while the lock is
/// held. That suits the single-threaded console runtime; a store shared by
/// many tasks on a multi-threaded runtime would need to move the reads and
/// writes onto `tokio::task::spawn_blocking`.
#[derive(Debug)]
pub struct DirectoryDocumentStore {
    root: PathBuf,
    dir: Mutex<Dir>,
}

impl DirectoryDocumentStore {
    /// Open (creating if needed) the data directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(root, ambient_authority()))
            .map(|dir| Self {
                root: root.to_path_buf(),
                dir: Mutex::new(dir),
            })
            .map_err(|err| {
                error!(root = %root.display(), error = %err, "failed to open data directory");
                StoreError::unavailable(format!("{}: {err}", root.display()))
            })
    }

    /// Directory the collections are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn file_name(collection: &str) -> String {
    format!("{collection}.json")
}

fn read_collection(dir: &Dir, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
    let contents = match dir.read_to_string(file_name(collection)) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            error!(collection, error = %err, "failed to read collection");
            return Err(StoreError::io(err.to_string()));
        }
    };
    serde_json::from_str(&contents).map_err(|err| StoreError::corrupt(collection, err.to_string()))
}

fn write_collection(
    dir: &Dir,
    collection: &str,
    documents: &[StoredDocument],
) -> Result<(), StoreError> {
    let target = file_name(collection);
    let staging = format!("{target}.tmp");
    let contents = serde_json::to_vec_pretty(documents)
        .map_err(|err| StoreError::io(format!("serialise {collection}: {err}")))?;
    dir.write(&staging, contents)
        .and_then(|()| dir.rename(&staging, dir, &target))
        .map_err(|err| {
            error!(collection, error = %err, "failed to write collection");
            StoreError::io(err.to_string())
        })?;
    debug!(collection, documents = documents.len(), "collection written");
    Ok(())
}

#[async_trait]
impl DocumentStore for DirectoryDocumentStore {
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let dir = self.dir.lock().await;
        let mut documents = read_collection(&dir, collection)?;
        let id = new_document_id();
        documents.push(StoredDocument {
            id: id.clone(),
            fields,
        });
        write_collection(&dir, collection, &documents)?;
        Ok(id)
    }

    async fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let dir = self.dir.lock().await;
        Ok(read_collection(&dir, collection)?
            .into_iter()
            .find(|document| document.id == id))
    }

    async fn query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let dir = self.dir.lock().await;
        let documents = read_collection(&dir, collection)?;
        Ok(query.apply(&documents))
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> Result<(), StoreError> {
        let dir = self.dir.lock().await;
        let mut documents = read_collection(&dir, collection)?;
        let document = documents
            .iter_mut()
            .find(|document| document.id == id)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        merge_fields(&mut document.fields, fields);
        write_collection(&dir, collection, &documents)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let dir = self.dir.lock().await;
        let mut documents = read_collection(&dir, collection)?;
        let before = documents.len();
        documents.retain(|document| document.id != id);
        if documents.len() == before {
            return Ok(());
        }
        write_collection(&dir, collection, &documents)
    }
}
