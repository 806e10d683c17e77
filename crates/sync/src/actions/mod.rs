//! Asynchronous sync actions, the only writers of the entity store.
//!
//! A [`Syncer`] pairs the shared [`EntityStore`] with a [`DocumentStore`]
//! implementation and exposes fetch/create/update/delete per collection.
//! Every operation has the same shape: call the remote, and only once the
//! remote has acknowledged, apply the matching
//! [`Transition`](crate::store::Transition). Nothing is optimistic, so a
//! failed call leaves the store exactly as it was.

mod customers;
mod deals;
mod tasks;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use opsdeck_core::{DraftRecord, ValidationError};

use crate::remote::{Collection, DecodeError, Document, DocumentStore, Fields, ServiceError};
use crate::store::{CollectionStore, EntityStore, Keyed, Transition};

/// Failure of a mutating sync operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The remote call failed. The store is exactly as it was before.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The draft was incomplete. Nothing was sent and nothing changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Wires an entity type to its collection: which collection it lives in,
/// how it converts to and from the service's fields payload, and which
/// store cell it lands in.
pub(crate) trait Synced: Keyed + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    /// Fields payload in both directions: what create and update send, and
    /// what a listed document's fields decode into.
    type Draft: DraftRecord + Serialize + DeserializeOwned + Send + Sync;

    fn from_parts(id: String, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    fn to_draft(&self) -> Self::Draft;

    fn collection_store(store: &EntityStore) -> &CollectionStore<Self>;
}

/// Convert one listed document into an entity. Timestamp decoding happens
/// here and only here; downstream code sees normalized `DateTime<Utc>`.
fn decode_document<E: Synced>(document: Document) -> Result<E, DecodeError> {
    let created_at = document
        .created_at
        .ok_or_else(|| DecodeError::MissingCreatedAt(document.id.clone()))?
        .to_datetime()
        .ok_or_else(|| DecodeError::TimestampRange(document.id.clone()))?;
    let draft = serde_json::from_value(serde_json::Value::Object(document.fields))?;
    Ok(E::from_parts(document.id, created_at, draft))
}

/// Serialize a draft into the service's fields map.
fn fields_of<T: Serialize>(value: &T) -> Result<Fields, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(fields) => Ok(fields),
        _ => Err(serde::ser::Error::custom("entity fields must serialize to a map")),
    }
}

/// Executes sync operations against the remote service and applies their
/// results to the shared store.
///
/// Cheap to clone; clones share the same store and remote.
#[derive(Clone)]
pub struct Syncer {
    store: Arc<EntityStore>,
    remote: Arc<dyn DocumentStore>,
}

impl Syncer {
    #[must_use]
    pub fn new(store: Arc<EntityStore>, remote: Arc<dyn DocumentStore>) -> Self {
        Self { store, remote }
    }

    /// The store this syncer writes to.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Refresh one collection: `FetchStarted`, list, decode, then
    /// `FetchSucceeded` or `FetchFailed`. Never returns an error; failures
    /// land in the collection's error state. A document that fails to
    /// decode fails the whole refresh, so the collection never holds a
    /// partial listing.
    async fn fetch_collection<E: Synced>(&self) {
        let collection = E::COLLECTION;
        E::collection_store(&self.store).apply(Transition::FetchStarted);

        match self.list_entities::<E>().await {
            Ok(entities) => {
                debug!(%collection, count = entities.len(), "collection refresh settled");
                E::collection_store(&self.store).apply(Transition::FetchSucceeded(entities));
            }
            Err(error) => {
                warn!(%collection, %error, "collection refresh failed");
                E::collection_store(&self.store)
                    .apply(Transition::FetchFailed(format!("Failed to fetch {collection}")));
            }
        }
    }

    async fn list_entities<E: Synced>(&self) -> Result<Vec<E>, ServiceError> {
        let documents = self.remote.list_all(E::COLLECTION).await?;
        documents
            .into_iter()
            .map(|document| decode_document::<E>(document).map_err(ServiceError::from))
            .collect()
    }

    /// Validate a draft, send it, and append the entity the service
    /// acknowledged. The entity's id and creation timestamp come from the
    /// service; the store never invents them.
    async fn create_entity<E: Synced>(&self, draft: E::Draft) -> Result<E, SyncError> {
        draft.validate()?;

        let fields = fields_of(&draft).map_err(ServiceError::from)?;
        let handle = self.remote.add(E::COLLECTION, fields).await?;
        let created_at = handle
            .created_at
            .to_datetime()
            .ok_or_else(|| ServiceError::from(DecodeError::TimestampRange(handle.id.clone())))?;

        let entity = E::from_parts(handle.id, created_at, draft);
        E::collection_store(&self.store).apply(Transition::Created(entity.clone()));
        info!(collection = %E::COLLECTION, id = entity.key(), "created entity");
        Ok(entity)
    }

    /// Full-record update: send the entity's fields, then replace the local
    /// copy. An id no longer in the local collection is a benign stale
    /// reference; the replace is silently skipped.
    async fn update_entity<E: Synced>(&self, entity: E) -> Result<E, SyncError> {
        let fields = fields_of(&entity.to_draft()).map_err(ServiceError::from)?;
        self.remote.update(E::COLLECTION, entity.key(), fields).await?;

        E::collection_store(&self.store).apply(Transition::Updated(entity.clone()));
        info!(collection = %E::COLLECTION, id = entity.key(), "updated entity");
        Ok(entity)
    }

    /// Delete by id, then drop the local copy. Not optimistic: on failure
    /// the item remains and the caller gets the error.
    async fn delete_entity<E: Synced>(&self, id: &str) -> Result<(), SyncError> {
        self.remote.delete(E::COLLECTION, id).await?;

        E::collection_store(&self.store).apply(Transition::Deleted(id.to_owned()));
        info!(collection = %E::COLLECTION, %id, "deleted entity");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::remote::{MemoryDocumentStore, Op};

    use opsdeck_core::{CustomerDraft, TaskDraft};

    fn syncer_over(remote: &Arc<MemoryDocumentStore>) -> Syncer {
        Syncer::new(Arc::new(EntityStore::new()), Arc::clone(remote) as Arc<dyn DocumentStore>)
    }

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected a JSON object, got {other}"),
        }
    }

    fn task_draft(description: &str) -> TaskDraft {
        TaskDraft {
            description: description.to_string(),
            ..TaskDraft::default()
        }
    }

    #[tokio::test]
    async fn test_incomplete_draft_never_reaches_the_remote() {
        let remote = Arc::new(MemoryDocumentStore::new());
        let syncer = syncer_over(&remote);

        let result = syncer.create_customer(CustomerDraft::default()).await;

        assert!(matches!(result, Err(SyncError::Validation(_))));
        assert_eq!(remote.document_count(Collection::Customers), 0);
        assert!(syncer.store().customers.is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_records_collection_message() {
        let remote = Arc::new(MemoryDocumentStore::new());
        remote.fail_next(
            Op::List,
            ServiceError::Api {
                status: 500,
                message: "service down".to_string(),
            },
        );
        let syncer = syncer_over(&remote);

        syncer.fetch_customers().await;

        let customers = syncer.store().customers.snapshot();
        assert!(!customers.loading);
        assert_eq!(customers.error.as_deref(), Some("Failed to fetch customers"));
        assert!(customers.items.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_document_fails_the_whole_fetch() {
        let remote = Arc::new(MemoryDocumentStore::new());
        remote.seed(
            Collection::Tasks,
            fields(serde_json::json!({
                "description": "Order filters",
                "dueDate": { "seconds": 1_764_000_000, "nanos": 0 },
            })),
        );
        // No description, so this one cannot decode
        remote.seed(Collection::Tasks, Fields::new());
        let syncer = syncer_over(&remote);

        syncer.fetch_tasks().await;

        let tasks = syncer.store().tasks.snapshot();
        assert!(tasks.items.is_empty());
        assert_eq!(tasks.error.as_deref(), Some("Failed to fetch tasks"));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_the_item() {
        let remote = Arc::new(MemoryDocumentStore::new());
        let syncer = syncer_over(&remote);
        let task = syncer.create_task(task_draft("Order filters")).await.unwrap();

        remote.fail_next(
            Op::Delete,
            ServiceError::Api {
                status: 503,
                message: "maintenance".to_string(),
            },
        );
        let result = syncer.delete_task(&task.id).await;

        assert!(matches!(result, Err(SyncError::Service(_))));
        assert_eq!(syncer.store().tasks.len(), 1);
        assert_eq!(remote.document_count(Collection::Tasks), 1);
    }

    #[tokio::test]
    async fn test_update_of_stale_local_reference_writes_through_only() {
        let remote = Arc::new(MemoryDocumentStore::new());
        let syncer = syncer_over(&remote);
        let mut task = syncer.create_task(task_draft("Order filters")).await.unwrap();

        // A refresh raced in and replaced the collection without this task
        syncer.store().tasks.apply(Transition::FetchSucceeded(Vec::new()));

        task.description = "Order replacement filters".to_string();
        syncer.update_task(task).await.unwrap();

        // Remote took the write; the local collection stays as the refresh
        // left it instead of resurrecting the entry
        assert!(syncer.store().tasks.is_empty());
        let documents = remote.documents(Collection::Tasks);
        assert_eq!(
            documents.first().unwrap().fields.get("description"),
            Some(&serde_json::json!("Order replacement filters"))
        );
    }

    #[tokio::test]
    async fn test_create_assigns_server_identity() {
        let remote = Arc::new(MemoryDocumentStore::new());
        let syncer = syncer_over(&remote);

        let task = syncer.create_task(task_draft("Confirm appointment")).await.unwrap();

        assert!(!task.id.as_str().is_empty());
        assert_eq!(syncer.store().tasks.items().first().unwrap().id, task.id);
    }
}
