//! Customer selection flow for deal drafts.

use opsdeck_core::{Customer, DealDraft};

use crate::views;

/// Where the picker stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickerStage {
    /// Not showing; no candidate view exists.
    #[default]
    Closed,
    /// Showing a filtered, read-only customer view.
    Open,
    /// A selection was written into the draft. Equivalent to closed.
    Resolved,
}

/// The closed, open, resolved flow that lends a read-only customer view to
/// a deal draft.
///
/// The picker owns nothing but its stage and filter text. Candidates are
/// derived on demand from whatever customer snapshot the caller passes in,
/// never from a fetch of its own, and the only thing a selection writes is
/// the denormalized display name on the draft. The customer collection is
/// never touched; nothing persists until the draft is handed to
/// [`create_deal`](crate::Syncer::create_deal).
#[derive(Debug, Clone, Default)]
pub struct CustomerPicker {
    stage: PickerStage,
    query: String,
}

impl CustomerPicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn stage(&self) -> PickerStage {
        self.stage
    }

    /// Open the picker with a fresh, empty filter.
    pub fn open(&mut self) {
        self.stage = PickerStage::Open;
        self.query.clear();
    }

    /// Close without selecting. The draft is left alone.
    pub fn cancel(&mut self) {
        self.stage = PickerStage::Closed;
    }

    /// Update the filter text. Ignored unless the picker is open.
    pub fn set_query(&mut self, query: impl Into<String>) {
        if self.stage == PickerStage::Open {
            self.query = query.into();
        }
    }

    /// The filtered candidate view over `customers`. Empty unless the
    /// picker is open.
    #[must_use]
    pub fn candidates(&self, customers: &[Customer]) -> Vec<Customer> {
        if self.stage != PickerStage::Open {
            return Vec::new();
        }
        views::search(customers, &self.query)
    }

    /// Write the customer's display name into the draft and resolve.
    ///
    /// Returns whether the selection was taken; selecting while not open is
    /// a no-op and returns `false`.
    pub fn select(&mut self, customer: &Customer, draft: &mut DealDraft) -> bool {
        if self.stage != PickerStage::Open {
            return false;
        }
        draft.customer_name = customer.display_name();
        self.stage = PickerStage::Resolved;
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use chrono::{TimeZone, Utc};

    use opsdeck_core::CustomerId;

    fn customer(first: &str, last: &str) -> Customer {
        Customer {
            id: CustomerId::new(format!("c-{first}")),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: "someone@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Main St".to_string(),
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_starts_closed_with_no_candidates() {
        let picker = CustomerPicker::new();
        let customers = vec![customer("Maya", "Stone")];

        assert_eq!(picker.stage(), PickerStage::Closed);
        assert!(picker.candidates(&customers).is_empty());
    }

    #[test]
    fn test_open_picker_filters_candidates_by_query() {
        let customers = vec![customer("Maya", "Stone"), customer("Omar", "Reyes")];
        let mut picker = CustomerPicker::new();

        picker.open();
        assert_eq!(picker.candidates(&customers).len(), 2);

        picker.set_query("reyes");
        let candidates = picker.candidates(&customers);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.first().unwrap().first_name, "Omar");
    }

    #[test]
    fn test_query_is_ignored_while_closed() {
        let mut picker = CustomerPicker::new();

        picker.set_query("maya");
        picker.open();

        // Opening starts from an empty filter
        let customers = vec![customer("Omar", "Reyes")];
        assert_eq!(picker.candidates(&customers).len(), 1);
    }

    #[test]
    fn test_select_writes_display_name_and_resolves() {
        let mut picker = CustomerPicker::new();
        let mut draft = DealDraft::default();
        let chosen = customer("Maya", "Stone");

        picker.open();
        assert!(picker.select(&chosen, &mut draft));

        assert_eq!(draft.customer_name, "Maya Stone");
        assert_eq!(picker.stage(), PickerStage::Resolved);
        // Resolved shows no candidates
        assert!(picker.candidates(&[chosen]).is_empty());
    }

    #[test]
    fn test_select_while_closed_is_refused() {
        let mut picker = CustomerPicker::new();
        let mut draft = DealDraft::default();

        assert!(!picker.select(&customer("Maya", "Stone"), &mut draft));
        assert_eq!(draft.customer_name, "");
        assert_eq!(picker.stage(), PickerStage::Closed);
    }

    #[test]
    fn test_cancel_leaves_the_draft_alone() {
        let mut picker = CustomerPicker::new();
        let mut draft = DealDraft {
            customer_name: "Kept Name".to_string(),
            ..DealDraft::default()
        };

        picker.open();
        picker.cancel();

        assert_eq!(draft.customer_name, "Kept Name");
        assert_eq!(picker.stage(), PickerStage::Closed);
    }

    #[test]
    fn test_reopening_after_resolve_starts_fresh() {
        let mut picker = CustomerPicker::new();
        let mut draft = DealDraft::default();
        let customers = vec![customer("Maya", "Stone")];

        picker.open();
        picker.set_query("maya");
        picker.select(customers.first().unwrap(), &mut draft);

        picker.open();
        assert_eq!(picker.candidates(&customers).len(), 1);
    }
}
