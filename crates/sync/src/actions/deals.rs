//! Deal collection operations.

use chrono::{DateTime, Utc};
use tracing::instrument;

use opsdeck_core::{Deal, DealDraft, DealId};

use super::{SyncError, Synced, Syncer};
use crate::remote::Collection;
use crate::store::{CollectionStore, EntityStore};

impl Synced for Deal {
    const COLLECTION: Collection = Collection::Deals;

    type Draft = DealDraft;

    fn from_parts(id: String, created_at: DateTime<Utc>, draft: DealDraft) -> Self {
        Self {
            id: DealId::new(id),
            customer_name: draft.customer_name,
            street_address: draft.street_address,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            room_area: draft.room_area,
            number_of_people: draft.number_of_people,
            appointment_date: draft.appointment_date,
            special_instructions: draft.special_instructions,
            room_access: draft.room_access,
            price: draft.price,
            image_url: draft.image_url,
            status: draft.status,
            created_at,
        }
    }

    fn to_draft(&self) -> DealDraft {
        DealDraft {
            customer_name: self.customer_name.clone(),
            street_address: self.street_address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            room_area: self.room_area.clone(),
            number_of_people: self.number_of_people.clone(),
            appointment_date: self.appointment_date,
            special_instructions: self.special_instructions.clone(),
            room_access: self.room_access.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            status: self.status,
        }
    }

    fn collection_store(store: &EntityStore) -> &CollectionStore<Self> {
        &store.deals
    }
}

impl Syncer {
    /// Refresh the deal collection from the remote service.
    ///
    /// Never fails; a refresh error lands in the collection's error state.
    #[instrument(skip(self))]
    pub async fn fetch_deals(&self) {
        self.fetch_collection::<Deal>().await;
    }

    /// Create a deal from a draft and append it to the collection.
    ///
    /// The draft's `customer_name` is a point-in-time snapshot, usually
    /// written by [`CustomerPicker::select`](crate::picker::CustomerPicker::select).
    ///
    /// # Errors
    ///
    /// [`SyncError::Validation`] when required fields are missing, or
    /// [`SyncError::Service`] when the remote call fails.
    #[instrument(skip(self, draft))]
    pub async fn create_deal(&self, draft: DealDraft) -> Result<Deal, SyncError> {
        self.create_entity::<Deal>(draft).await
    }

    /// Push an edited deal record and replace the local copy.
    ///
    /// # Errors
    ///
    /// [`SyncError::Service`] when the remote call fails.
    #[instrument(skip(self, deal), fields(id = %deal.id))]
    pub async fn update_deal(&self, deal: Deal) -> Result<Deal, SyncError> {
        self.update_entity(deal).await
    }

    /// Delete a deal by id and drop the local copy.
    ///
    /// # Errors
    ///
    /// [`SyncError::Service`] when the remote call fails; the item stays.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_deal(&self, id: &DealId) -> Result<(), SyncError> {
        self.delete_entity::<Deal>(id.as_str()).await
    }
}
