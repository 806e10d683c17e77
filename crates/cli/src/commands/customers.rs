//! Customer collection commands.
//!
//! # Usage
//!
//! ```bash
//! # List, filtered by name
//! opsdeck customers list -q maya
//!
//! # Create
//! opsdeck customers add -f Maya -l Stone -e maya@example.com -p 555-0100 -a "12 Main St"
//!
//! # Edit one field
//! opsdeck customers update <id> --phone 555-0199
//!
//! # Delete
//! opsdeck customers delete <id>
//! ```

use opsdeck_core::{CustomerDraft, CustomerId};
use opsdeck_sync::views;

use super::CommandError;

/// Field edits for `customers update`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct CustomerEdits {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Refresh and list customers, optionally filtered by display name.
pub async fn list(query: Option<&str>) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.fetch_customers().await;
    if let Some(error) = syncer.store().customers.error() {
        return Err(CommandError::Fetch(error));
    }

    let items = syncer.store().customers.items();
    let customers = views::search(&items, query.unwrap_or_default());

    #[allow(clippy::print_stdout)]
    {
        println!("{} customer(s)", customers.len());
        for customer in &customers {
            println!(
                "  {}  {}  {}  {}",
                customer.id,
                customer.display_name(),
                customer.email,
                customer.phone
            );
        }
    }
    Ok(())
}

/// Create a customer and print the assigned id.
pub async fn add(draft: CustomerDraft) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    let customer = syncer.create_customer(draft).await?;

    tracing::info!("Customer created: {} ({})", customer.display_name(), customer.id);
    #[allow(clippy::print_stdout)]
    {
        println!("{}", customer.id);
    }
    Ok(())
}

/// Apply field edits to an existing customer.
pub async fn update(id: &str, edits: CustomerEdits) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.fetch_customers().await;
    if let Some(error) = syncer.store().customers.error() {
        return Err(CommandError::Fetch(error));
    }

    let mut customer = syncer
        .store()
        .customers
        .items()
        .into_iter()
        .find(|c| c.id.as_str() == id)
        .ok_or_else(|| CommandError::UnknownId {
            kind: "customer",
            id: id.to_owned(),
        })?;

    if let Some(first_name) = edits.first_name {
        customer.first_name = first_name;
    }
    if let Some(last_name) = edits.last_name {
        customer.last_name = last_name;
    }
    if let Some(email) = edits.email {
        customer.email = email;
    }
    if let Some(phone) = edits.phone {
        customer.phone = phone;
    }
    if let Some(address) = edits.address {
        customer.address = address;
    }

    let customer = syncer.update_customer(customer).await?;
    tracing::info!("Customer updated: {}", customer.id);
    Ok(())
}

/// Delete a customer by id.
///
/// Deals keep the customer name they captured at creation.
pub async fn delete(id: &str) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.delete_customer(&CustomerId::from(id)).await?;

    tracing::info!("Customer deleted: {id}");
    Ok(())
}
