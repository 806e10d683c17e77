//! Integration tests for Opsdeck.
//!
//! Scenario tests under `tests/` drive a real [`Syncer`] against the
//! in-memory document service double, so every path from draft to store
//! snapshot runs for real with no network. Tests against a live document
//! service are `#[ignore]`d and configured through the environment.
//!
//! # Running Tests
//!
//! ```bash
//! # Scenario tests (no external services)
//! cargo test -p opsdeck-integration-tests
//!
//! # Live document service tests
//! OPSDECK_DOCSTORE_URL=... OPSDECK_DOCSTORE_API_KEY=... \
//!     cargo test -p opsdeck-integration-tests -- --ignored
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use opsdeck_core::{CustomerDraft, DealDraft, DealStatus, TaskDraft};
use opsdeck_sync::remote::{DocumentStore, Fields, MemoryDocumentStore};
use opsdeck_sync::{EntityStore, Syncer};

/// A syncer wired to an in-memory document service, with handles to both
/// sides so tests can inject faults and inspect state.
pub struct TestHarness {
    pub syncer: Syncer,
    pub remote: Arc<MemoryDocumentStore>,
    pub store: Arc<EntityStore>,
}

impl TestHarness {
    #[must_use]
    pub fn new() -> Self {
        let remote = Arc::new(MemoryDocumentStore::new());
        let store = Arc::new(EntityStore::new());
        let syncer = Syncer::new(
            Arc::clone(&store),
            Arc::clone(&remote) as Arc<dyn DocumentStore>,
        );
        Self {
            syncer,
            remote,
            store,
        }
    }

    /// A second syncer over the same remote but a fresh, empty store.
    /// What it fetches went through the wire encoding both ways.
    #[must_use]
    pub fn rejoining_syncer(&self) -> Syncer {
        Syncer::new(
            Arc::new(EntityStore::new()),
            Arc::clone(&self.remote) as Arc<dyn DocumentStore>,
        )
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete customer draft.
#[must_use]
pub fn customer_draft(first: &str, last: &str) -> CustomerDraft {
    CustomerDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        phone: "555-0100".to_string(),
        address: "12 Main St".to_string(),
        image_url: None,
    }
}

/// A complete deal draft with `customer_name` already filled.
#[must_use]
pub fn deal_draft(customer_name: &str, street_address: &str) -> DealDraft {
    DealDraft {
        customer_name: customer_name.to_string(),
        street_address: street_address.to_string(),
        city: "Portland".to_string(),
        state: "OR".to_string(),
        zip_code: "97201".to_string(),
        room_area: "240".to_string(),
        number_of_people: "3".to_string(),
        appointment_date: NaiveDate::from_ymd_opt(2026, 9, 2).unwrap(),
        special_instructions: None,
        room_access: "Key under mat".to_string(),
        price: Decimal::new(649_900, 2),
        image_url: None,
        status: DealStatus::default(),
    }
}

/// A complete task draft due at the given time.
#[must_use]
pub fn task_draft(description: &str, due_date: DateTime<Utc>) -> TaskDraft {
    TaskDraft {
        description: description.to_string(),
        due_date,
        ..TaskDraft::default()
    }
}

/// A fixed instant for due dates, offset by whole hours.
#[must_use]
pub fn hour(offset: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 2, offset, 0, 0).unwrap()
}

/// Wire fields for seeding the in-memory service directly.
#[must_use]
pub fn wire_fields<T: serde::Serialize>(value: &T) -> Fields {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(fields)) => fields,
        _ => panic!("value must serialize to a JSON object"),
    }
}
