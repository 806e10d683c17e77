//! The customer picker end to end: from a fetched customer snapshot into a
//! created deal.

use opsdeck_core::{DealDraft, ValidationError};
use opsdeck_integration_tests::{TestHarness, customer_draft, deal_draft};
use opsdeck_sync::SyncError;
use opsdeck_sync::picker::{CustomerPicker, PickerStage};
use opsdeck_sync::remote::Collection;

#[tokio::test]
async fn test_picker_selection_flows_into_a_created_deal() {
    let harness = TestHarness::new();
    harness
        .syncer
        .create_customer(customer_draft("Maya", "Stone"))
        .await
        .expect("create customer");
    harness
        .syncer
        .create_customer(customer_draft("Omar", "Reyes"))
        .await
        .expect("create customer");

    // A consumer starts from a fetch, then narrows and selects
    let rejoined = harness.rejoining_syncer();
    rejoined.fetch_customers().await;
    let customers = rejoined.store().customers.items();

    let mut picker = CustomerPicker::new();
    let mut draft = deal_draft("", "12 Main St");
    picker.open();
    picker.set_query("omar");

    let candidates = picker.candidates(&customers);
    assert_eq!(candidates.len(), 1);
    let chosen = candidates.first().expect("one candidate");
    assert!(picker.select(chosen, &mut draft));
    assert_eq!(picker.stage(), PickerStage::Resolved);

    let deal = rejoined.create_deal(draft).await.expect("create deal");
    assert_eq!(deal.customer_name, "Omar Reyes");

    // The denormalized name is in the stored document too
    let documents = harness.remote.documents(Collection::Deals);
    assert_eq!(
        documents.first().expect("one document").fields.get("customerName"),
        Some(&serde_json::json!("Omar Reyes"))
    );
}

#[tokio::test]
async fn test_cancelled_picker_leaves_no_trace() {
    let harness = TestHarness::new();
    harness
        .syncer
        .create_customer(customer_draft("Maya", "Stone"))
        .await
        .expect("create customer");

    let customers = harness.store.customers.items();
    let mut picker = CustomerPicker::new();
    let draft = DealDraft {
        street_address: "12 Main St".to_string(),
        ..DealDraft::default()
    };

    picker.open();
    assert_eq!(picker.candidates(&customers).len(), 1);
    picker.cancel();

    // No selection was written, so the draft cannot create a deal
    assert_eq!(draft.customer_name, "");
    let result = harness.syncer.create_deal(draft).await;
    let Err(SyncError::Validation(ValidationError::MissingFields { fields, .. })) = result else {
        panic!("expected a validation error");
    };
    assert!(fields.contains(&"customer_name"));
    assert_eq!(harness.remote.document_count(Collection::Deals), 0);
}
