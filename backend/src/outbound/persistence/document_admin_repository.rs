//! Document-backed `AdminRepository` adapter.
//!
//! Only this adapter reads `passwordHash`; it compares hashes here and hands
//! out [`AdminUser`] values, which have no field for it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::domain::ports::{AdminRepository, RepositoryError};
use crate::domain::{AdminId, AdminPatch, AdminUser, NewAdmin, simple_hash};
use crate::outbound::store::{DocumentStore, Query, SortDirection};

use super::ADMINS;
use super::collection::DocumentCollection;
use super::models::{AdminChanges, AdminDocument, AdminRecord};

const PASSWORD_HASH_FIELD: &str = "passwordHash";

/// Admin accounts stored in the `admins` collection.
pub struct DocumentAdminRepository<S> {
    collection: DocumentCollection<S>,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> DocumentAdminRepository<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            collection: DocumentCollection::new(store, ADMINS),
            clock,
        }
    }

    fn by_username(username: &str) -> Query {
        Query::all().where_eq("username", json!(username))
    }
}

#[async_trait]
impl<S: DocumentStore> AdminRepository for DocumentAdminRepository<S> {
    async fn create(&self, admin: NewAdmin, password: &str) -> Result<AdminId, RepositoryError> {
        let username = admin.username.clone();
        let id = self
            .collection
            .insert(&AdminDocument {
                username: admin.username,
                email: admin.email,
                display_name: admin.display_name,
                role: admin.role,
                password_hash: simple_hash(password),
                created_at: self.clock.utc(),
            })
            .await?;
        info!(admin_id = %id, %username, "admin account created");
        Ok(AdminId::new(id))
    }

    async fn list(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let records: Vec<AdminRecord> = self
            .collection
            .select(&Query::all().order_by("username", SortDirection::Ascending))
            .await?;
        Ok(records.into_iter().map(AdminUser::from).collect())
    }

    async fn find_by_id(&self, id: &AdminId) -> Result<Option<AdminUser>, RepositoryError> {
        let record: Option<AdminRecord> = self.collection.fetch(id.as_ref()).await?;
        Ok(record.map(AdminUser::from))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        let record: Option<AdminRecord> =
            self.collection.first(&Self::by_username(username)).await?;
        Ok(record.map(AdminUser::from))
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        let Some(document) = self.collection.raw(&Self::by_username(username)).await? else {
            return Ok(None);
        };
        let stored_hash = document
            .fields
            .get(PASSWORD_HASH_FIELD)
            .and_then(Value::as_str);
        if stored_hash != Some(simple_hash(password).as_str()) {
            warn!(%username, "password hash mismatch");
            return Ok(None);
        }

        let now = self.clock.utc();
        self.collection
            .merge(
                &document.id,
                &AdminChanges {
                    last_login_at: Some(now),
                    ..AdminChanges::default()
                },
            )
            .await?;
        let record: Option<AdminRecord> = self.collection.fetch(&document.id).await?;
        Ok(record.map(AdminUser::from))
    }

    async fn update(&self, id: &AdminId, patch: AdminPatch) -> Result<(), RepositoryError> {
        self.collection
            .merge(
                id.as_ref(),
                &AdminChanges {
                    email: patch.email,
                    display_name: patch.display_name,
                    role: patch.role,
                    ..AdminChanges::default()
                },
            )
            .await?;
        info!(admin_id = %id, "admin account updated");
        Ok(())
    }

    async fn update_password(&self, id: &AdminId, password: &str) -> Result<(), RepositoryError> {
        self.collection
            .merge(
                id.as_ref(),
                &AdminChanges {
                    password_hash: Some(simple_hash(password)),
                    ..AdminChanges::default()
                },
            )
            .await?;
        info!(admin_id = %id, "admin password changed");
        Ok(())
    }

    async fn delete(&self, id: &AdminId) -> Result<(), RepositoryError> {
        self.collection.remove(id.as_ref()).await?;
        info!(admin_id = %id, "admin account deleted");
        Ok(())
    }

    async fn has_any(&self) -> Result<bool, RepositoryError> {
        Ok(self.collection.raw(&Query::all()).await?.is_some())
    }
}
