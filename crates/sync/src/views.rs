//! Derived views: pure functions over collection snapshots.
//!
//! Nothing here touches the store or the network. Callers take a snapshot
//! (`items()`) and derive from it; a view over a stale snapshot is just a
//! stale view, recomputed on the next read.

use chrono::{DateTime, Utc};

use opsdeck_core::{Customer, Deal, Task};

use crate::store::EntityStore;

/// An entity with a text form that substring search runs over.
pub trait Searchable {
    fn search_text(&self) -> String;
}

impl Searchable for Customer {
    /// Customers are searched by display name.
    fn search_text(&self) -> String {
        self.display_name()
    }
}

impl Searchable for Deal {
    /// Deals are searched by street address.
    fn search_text(&self) -> String {
        self.street_address.clone()
    }
}

/// An entity with a creation timestamp that recency views order by.
pub trait Recent {
    fn created_at(&self) -> DateTime<Utc>;
}

impl Recent for Customer {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Recent for Deal {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Recent for Task {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Case-insensitive substring filter over the items' search text.
///
/// An empty query matches everything; order is preserved either way.
#[must_use]
pub fn search<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.search_text().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// The `n` most recently created items, newest first.
///
/// Ties keep their snapshot order; `n` past the end returns everything.
#[must_use]
pub fn latest<T: Recent + Clone>(items: &[T], n: usize) -> Vec<T> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    ordered.truncate(n);
    ordered
}

/// Whether a task's due date has passed, strictly: a task due exactly now
/// is not overdue yet. Completion is deliberately not consulted; callers
/// combine the two flags themselves.
#[must_use]
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    task.due_date < now
}

/// The dashboard's completed-work card: completed tasks ordered by due
/// date, most recently due first, capped at `n`.
#[must_use]
pub fn completed_recent(tasks: &[Task], n: usize) -> Vec<Task> {
    let mut completed: Vec<Task> = tasks.iter().filter(|task| task.completed).cloned().collect();
    completed.sort_by(|a, b| b.due_date.cmp(&a.due_date));
    completed.truncate(n);
    completed
}

/// Item counts across all three collections. Zero is valid data, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionCounts {
    pub customers: usize,
    pub deals: usize,
    pub tasks: usize,
}

/// Snapshot the size of every collection.
#[must_use]
pub fn counts(store: &EntityStore) -> CollectionCounts {
    CollectionCounts {
        customers: store.customers.len(),
        deals: store.deals.len(),
        tasks: store.tasks.len(),
    }
}
