//! Shared collection state and the transitions that mutate it.
//!
//! Each collection lives behind its own [`CollectionStore`], a small
//! read/write-locked cell holding the items plus fetch status. All writes go
//! through [`Transition`] values so every state change is enumerable and
//! testable in isolation.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use opsdeck_core::{Customer, Deal, Task};

/// Anything stored in a collection, addressable by its server-assigned id.
pub trait Keyed {
    /// The identity a [`Transition`] matches on.
    fn key(&self) -> &str;
}

impl Keyed for Customer {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for Deal {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

impl Keyed for Task {
    fn key(&self) -> &str {
        self.id.as_str()
    }
}

/// Snapshot of one collection: its items plus fetch status.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    /// Items in arrival order. Refreshes replace the whole vector.
    pub items: Vec<T>,
    /// Whether a refresh is in flight.
    pub loading: bool,
    /// Human-readable message from the most recent failed refresh, cleared
    /// when the next refresh starts.
    pub error: Option<String>,
}

// A derived Default would bound T: Default, which the entities don't carry.
impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// One state change of a collection.
///
/// Mutation transitions carry the already-acknowledged result of a remote
/// call; applying one never touches the network.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition<T> {
    /// A refresh was issued. Marks the collection loading and clears any
    /// previous error; current items stay visible until the refresh settles.
    FetchStarted,
    /// A refresh settled with the listed items, which replace the collection
    /// wholesale. Last refresh to settle wins.
    FetchSucceeded(Vec<T>),
    /// A refresh settled with an error. Items are kept as they were.
    FetchFailed(String),
    /// An entity the remote acknowledged creating. Appended, unless an item
    /// with the same key is already present, in which case it is replaced so
    /// the collection never holds duplicate keys.
    Created(T),
    /// An entity the remote acknowledged updating. Replaces the matching
    /// item in place; unknown keys are ignored.
    Updated(T),
    /// A key the remote acknowledged deleting. Removes the matching item;
    /// unknown keys are ignored.
    Deleted(String),
}

impl<T: Keyed> CollectionState<T> {
    fn apply(&mut self, transition: Transition<T>) {
        match transition {
            Transition::FetchStarted => {
                self.loading = true;
                self.error = None;
            }
            Transition::FetchSucceeded(items) => {
                self.items = items;
                self.loading = false;
                self.error = None;
            }
            Transition::FetchFailed(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            Transition::Created(entity) => {
                match self.items.iter_mut().find(|item| item.key() == entity.key()) {
                    Some(existing) => *existing = entity,
                    None => self.items.push(entity),
                }
            }
            Transition::Updated(entity) => {
                match self.items.iter_mut().find(|item| item.key() == entity.key()) {
                    Some(existing) => *existing = entity,
                    None => debug!(key = %entity.key(), "update for an id not in the collection, ignoring"),
                }
            }
            Transition::Deleted(key) => {
                let before = self.items.len();
                self.items.retain(|item| item.key() != key);
                if self.items.len() == before {
                    debug!(%key, "delete for an id not in the collection, ignoring");
                }
            }
        }
    }
}

/// Threadsafe holder of one collection's [`CollectionState`].
#[derive(Debug)]
pub struct CollectionStore<T> {
    state: RwLock<CollectionState<T>>,
}

impl<T> Default for CollectionStore<T> {
    fn default() -> Self {
        Self {
            state: RwLock::new(CollectionState::default()),
        }
    }
}

impl<T> CollectionStore<T> {
    /// Whether a refresh is currently in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.read().loading
    }

    /// Message from the most recent failed refresh, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Number of items currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    /// Whether the collection currently holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, CollectionState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CollectionState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> CollectionStore<T> {
    /// Copy of the full collection state.
    #[must_use]
    pub fn snapshot(&self) -> CollectionState<T> {
        self.read().clone()
    }

    /// Copy of the current items.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.read().items.clone()
    }
}

impl<T: Keyed> CollectionStore<T> {
    pub(crate) fn apply(&self, transition: Transition<T>) {
        self.write().apply(transition);
    }
}

/// All three collections under one roof, shared across the app.
#[derive(Debug, Default)]
pub struct EntityStore {
    pub customers: CollectionStore<Customer>,
    pub deals: CollectionStore<Deal>,
    pub tasks: CollectionStore<Task>,
}

impl EntityStore {
    /// Create a store with all collections empty and idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        id: String,
        label: String,
    }

    impl Widget {
        fn new(id: &str, label: &str) -> Self {
            Self {
                id: id.to_string(),
                label: label.to_string(),
            }
        }
    }

    impl Keyed for Widget {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn store_with(items: Vec<Widget>) -> CollectionStore<Widget> {
        let store = CollectionStore::default();
        store.apply(Transition::FetchSucceeded(items));
        store
    }

    #[test]
    fn test_fetch_started_marks_loading_and_clears_error() {
        let store = store_with(vec![Widget::new("w1", "one")]);
        store.apply(Transition::FetchFailed("boom".to_string()));

        store.apply(Transition::FetchStarted);

        assert!(store.loading());
        assert_eq!(store.error(), None);
        // Items stay visible while the refresh is in flight
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_fetch_succeeded_replaces_items_wholesale() {
        let store = store_with(vec![Widget::new("w1", "one"), Widget::new("w2", "two")]);

        store.apply(Transition::FetchSucceeded(vec![Widget::new("w3", "three")]));

        assert_eq!(store.items(), vec![Widget::new("w3", "three")]);
        assert!(!store.loading());
        assert_eq!(store.error(), None);
    }

    #[test]
    fn test_fetch_failed_keeps_items_and_records_message() {
        let store = store_with(vec![Widget::new("w1", "one")]);
        store.apply(Transition::FetchStarted);

        store.apply(Transition::FetchFailed("Failed to fetch widgets".to_string()));

        assert!(!store.loading());
        assert_eq!(store.error(), Some("Failed to fetch widgets".to_string()));
        assert_eq!(store.items(), vec![Widget::new("w1", "one")]);
    }

    #[test]
    fn test_created_appends() {
        let store = store_with(vec![Widget::new("w1", "one")]);

        store.apply(Transition::Created(Widget::new("w2", "two")));

        assert_eq!(
            store.items(),
            vec![Widget::new("w1", "one"), Widget::new("w2", "two")]
        );
    }

    #[test]
    fn test_created_with_known_key_replaces_instead_of_duplicating() {
        let store = store_with(vec![Widget::new("w1", "one")]);

        store.apply(Transition::Created(Widget::new("w1", "one again")));

        assert_eq!(store.items(), vec![Widget::new("w1", "one again")]);
    }

    #[test]
    fn test_updated_replaces_in_place() {
        let store = store_with(vec![
            Widget::new("w1", "one"),
            Widget::new("w2", "two"),
            Widget::new("w3", "three"),
        ]);

        store.apply(Transition::Updated(Widget::new("w2", "TWO")));

        assert_eq!(
            store.items(),
            vec![
                Widget::new("w1", "one"),
                Widget::new("w2", "TWO"),
                Widget::new("w3", "three"),
            ]
        );
    }

    #[test]
    fn test_updated_unknown_key_is_ignored() {
        let store = store_with(vec![Widget::new("w1", "one")]);

        store.apply(Transition::Updated(Widget::new("w9", "nine")));

        assert_eq!(store.items(), vec![Widget::new("w1", "one")]);
    }

    #[test]
    fn test_deleted_removes_matching_item() {
        let store = store_with(vec![Widget::new("w1", "one"), Widget::new("w2", "two")]);

        store.apply(Transition::Deleted("w1".to_string()));

        assert_eq!(store.items(), vec![Widget::new("w2", "two")]);
    }

    #[test]
    fn test_deleted_unknown_key_is_ignored() {
        let store = store_with(vec![Widget::new("w1", "one")]);

        store.apply(Transition::Deleted("w9".to_string()));

        assert_eq!(store.items(), vec![Widget::new("w1", "one")]);
    }

    #[test]
    fn test_entity_store_starts_empty_and_idle() {
        let store = EntityStore::new();

        assert!(store.customers.is_empty());
        assert!(store.deals.is_empty());
        assert!(store.tasks.is_empty());
        assert!(!store.customers.loading());
        assert_eq!(store.customers.error(), None);
    }
}
