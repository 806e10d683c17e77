//! In-memory document service double.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use opsdeck_core::Timestamp;

use super::{Collection, Document, DocumentHandle, DocumentStore, Fields, ServiceError};

/// One of the four document service operations, for injection targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Add,
    Update,
    Delete,
}

/// An in-process stand-in for the hosted document service.
///
/// Mirrors the service's observable behavior: server-assigned ids and
/// creation timestamps, top-level field merge on update, idempotent delete.
/// Latency and failure injection make settlement-order scenarios
/// reproducible; a listed snapshot is taken when the call is issued and
/// delivered after the injected delay, like a response in flight.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    collections: HashMap<Collection, Vec<Document>>,
    latencies: HashMap<Op, VecDeque<Duration>>,
    failures: HashMap<Op, VecDeque<ServiceError>>,
}

impl State {
    fn next_latency(&mut self, op: Op) -> Option<Duration> {
        self.latencies.get_mut(&op).and_then(VecDeque::pop_front)
    }

    fn next_failure(&mut self, op: Op) -> Option<ServiceError> {
        self.failures.get_mut(&op).and_then(VecDeque::pop_front)
    }
}

impl MemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a latency for the next call of `op`. Queued latencies apply in
    /// call order; calls beyond the queue settle immediately.
    pub fn delay_next(&self, op: Op, latency: Duration) {
        self.lock().latencies.entry(op).or_default().push_back(latency);
    }

    /// Queue a failure for the next call of `op`. The call still consumes
    /// its queued latency before failing.
    pub fn fail_next(&self, op: Op, error: ServiceError) {
        self.lock().failures.entry(op).or_default().push_back(error);
    }

    /// Insert a document directly, bypassing latency and failure injection.
    pub fn seed(&self, collection: Collection, fields: Fields) -> DocumentHandle {
        self.seed_at(collection, fields, Timestamp::from_datetime(Utc::now()))
    }

    /// Insert a document with an explicit creation timestamp (for recency
    /// scenarios that need backdated documents).
    pub fn seed_at(
        &self,
        collection: Collection,
        fields: Fields,
        created_at: Timestamp,
    ) -> DocumentHandle {
        let id = Uuid::new_v4().to_string();
        self.lock()
            .collections
            .entry(collection)
            .or_default()
            .push(Document {
                id: id.clone(),
                created_at: Some(created_at),
                fields,
            });
        DocumentHandle { id, created_at }
    }

    /// Current documents of a collection, in insertion order.
    #[must_use]
    pub fn documents(&self, collection: Collection) -> Vec<Document> {
        self.lock()
            .collections
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of documents currently stored in a collection.
    #[must_use]
    pub fn document_count(&self, collection: Collection) -> usize {
        self.lock()
            .collections
            .get(&collection)
            .map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // Nothing panics while holding this lock, so recovered state is
        // always coherent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the injections queued for `op`. The guard is dropped before any
    /// sleeping happens.
    fn take_injections(&self, op: Op) -> (Option<Duration>, Option<ServiceError>) {
        let mut state = self.lock();
        (state.next_latency(op), state.next_failure(op))
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_all(&self, collection: Collection) -> Result<Vec<Document>, ServiceError> {
        let (latency, failure) = self.take_injections(Op::List);

        // Snapshot when the call is issued; writes that land during the
        // simulated flight are not reflected, which is exactly the stale
        // in-flight response the settlement-order scenarios rely on.
        let snapshot = self.documents(collection);

        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match failure {
            Some(error) => Err(error),
            None => Ok(snapshot),
        }
    }

    async fn add(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<DocumentHandle, ServiceError> {
        let (latency, failure) = self.take_injections(Op::Add);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(error) = failure {
            return Err(error);
        }

        let id = Uuid::new_v4().to_string();
        let created_at = Timestamp::from_datetime(Utc::now());
        self.lock()
            .collections
            .entry(collection)
            .or_default()
            .push(Document {
                id: id.clone(),
                created_at: Some(created_at),
                fields,
            });
        Ok(DocumentHandle { id, created_at })
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Fields,
    ) -> Result<(), ServiceError> {
        let (latency, failure) = self.take_injections(Op::Update);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(error) = failure {
            return Err(error);
        }

        let mut state = self.lock();
        let document = state
            .collections
            .get_mut(&collection)
            .and_then(|documents| documents.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| ServiceError::NotFound(format!("{collection}/{id}")))?;

        // Top-level merge, matching the service's update semantics.
        for (key, value) in fields {
            document.fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<(), ServiceError> {
        let (latency, failure) = self.take_injections(Op::Delete);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(error) = failure {
            return Err(error);
        }

        // Idempotent: deleting an id that is already gone succeeds.
        if let Some(documents) = self.lock().collections.get_mut(&collection) {
            documents.retain(|d| d.id != id);
        }
        Ok(())
    }
}
