//! Task collection operations.

use chrono::{DateTime, Utc};
use tracing::instrument;

use opsdeck_core::{Task, TaskDraft, TaskId};

use super::{SyncError, Synced, Syncer};
use crate::remote::Collection;
use crate::store::{CollectionStore, EntityStore};

impl Synced for Task {
    const COLLECTION: Collection = Collection::Tasks;

    type Draft = TaskDraft;

    fn from_parts(id: String, created_at: DateTime<Utc>, draft: TaskDraft) -> Self {
        Self {
            id: TaskId::new(id),
            description: draft.description,
            due_date: draft.due_date,
            completed: draft.completed,
            status: draft.status,
            created_at,
        }
    }

    fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            description: self.description.clone(),
            due_date: self.due_date,
            completed: self.completed,
            status: self.status.clone(),
        }
    }

    fn collection_store(store: &EntityStore) -> &CollectionStore<Self> {
        &store.tasks
    }
}

impl Syncer {
    /// Refresh the task collection from the remote service.
    ///
    /// Never fails; a refresh error lands in the collection's error state.
    #[instrument(skip(self))]
    pub async fn fetch_tasks(&self) {
        self.fetch_collection::<Task>().await;
    }

    /// Create a task from a draft and append it to the collection.
    ///
    /// # Errors
    ///
    /// [`SyncError::Validation`] when the description is empty, or
    /// [`SyncError::Service`] when the remote call fails.
    #[instrument(skip(self, draft))]
    pub async fn create_task(&self, draft: TaskDraft) -> Result<Task, SyncError> {
        self.create_entity::<Task>(draft).await
    }

    /// Push an edited task record and replace the local copy.
    ///
    /// Completion toggles go through here as well: the caller flips
    /// `completed` on a copy and dispatches the whole record.
    ///
    /// # Errors
    ///
    /// [`SyncError::Service`] when the remote call fails.
    #[instrument(skip(self, task), fields(id = %task.id))]
    pub async fn update_task(&self, task: Task) -> Result<Task, SyncError> {
        self.update_entity(task).await
    }

    /// Delete a task by id and drop the local copy.
    ///
    /// # Errors
    ///
    /// [`SyncError::Service`] when the remote call fails; the item stays.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_task(&self, id: &TaskId) -> Result<(), SyncError> {
        self.delete_entity::<Task>(id.as_str()).await
    }
}
