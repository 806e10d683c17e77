//! Customer collection operations.

use chrono::{DateTime, Utc};
use tracing::instrument;

use opsdeck_core::{Customer, CustomerDraft, CustomerId};

use super::{SyncError, Synced, Syncer};
use crate::remote::Collection;
use crate::store::{CollectionStore, EntityStore};

impl Synced for Customer {
    const COLLECTION: Collection = Collection::Customers;

    type Draft = CustomerDraft;

    fn from_parts(id: String, created_at: DateTime<Utc>, draft: CustomerDraft) -> Self {
        Self {
            id: CustomerId::new(id),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            image_url: draft.image_url,
            created_at,
        }
    }

    fn to_draft(&self) -> CustomerDraft {
        CustomerDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            image_url: self.image_url.clone(),
        }
    }

    fn collection_store(store: &EntityStore) -> &CollectionStore<Self> {
        &store.customers
    }
}

impl Syncer {
    /// Refresh the customer collection from the remote service.
    ///
    /// Never fails; a refresh error lands in the collection's error state
    /// with the current items kept as they were.
    #[instrument(skip(self))]
    pub async fn fetch_customers(&self) {
        self.fetch_collection::<Customer>().await;
    }

    /// Create a customer from a draft and append it to the collection.
    ///
    /// # Errors
    ///
    /// [`SyncError::Validation`] when required fields are missing (nothing
    /// is sent), or [`SyncError::Service`] when the remote call fails (the
    /// store is untouched).
    #[instrument(skip(self, draft))]
    pub async fn create_customer(&self, draft: CustomerDraft) -> Result<Customer, SyncError> {
        self.create_entity::<Customer>(draft).await
    }

    /// Push an edited customer record and replace the local copy.
    ///
    /// # Errors
    ///
    /// [`SyncError::Service`] when the remote call fails.
    #[instrument(skip(self, customer), fields(id = %customer.id))]
    pub async fn update_customer(&self, customer: Customer) -> Result<Customer, SyncError> {
        self.update_entity(customer).await
    }

    /// Delete a customer by id and drop the local copy.
    ///
    /// Deals referencing the customer keep their denormalized
    /// `customer_name` snapshot; deleting a customer never rewrites deals.
    ///
    /// # Errors
    ///
    /// [`SyncError::Service`] when the remote call fails; the item stays.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_customer(&self, id: &CustomerId) -> Result<(), SyncError> {
        self.delete_entity::<Customer>(id.as_str()).await
    }
}
