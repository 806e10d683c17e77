//! Deal collection commands.
//!
//! # Usage
//!
//! ```bash
//! # List, filtered by street address
//! opsdeck deals list -q "main st"
//!
//! # Create for an existing customer; the customer's display name is
//! # captured into the deal at this moment
//! opsdeck deals add --customer-id <id> --street-address "12 Main St" ...
//!
//! # Close a deal
//! opsdeck deals update <id> --status closed
//!
//! # Delete
//! opsdeck deals delete <id>
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;

use opsdeck_core::{DealDraft, DealId, DealStatus};
use opsdeck_sync::picker::CustomerPicker;
use opsdeck_sync::views;

use super::CommandError;

/// Field edits for `deals update`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct DealEdits {
    pub status: Option<DealStatus>,
    pub price: Option<Decimal>,
    pub appointment_date: Option<NaiveDate>,
    pub special_instructions: Option<String>,
}

/// Refresh and list deals, optionally filtered by street address.
pub async fn list(query: Option<&str>) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.fetch_deals().await;
    if let Some(error) = syncer.store().deals.error() {
        return Err(CommandError::Fetch(error));
    }

    let items = syncer.store().deals.items();
    let deals = views::search(&items, query.unwrap_or_default());

    #[allow(clippy::print_stdout)]
    {
        println!("{} deal(s)", deals.len());
        for deal in &deals {
            println!(
                "  {}  {}  {}, {}  {}  ${}  {}",
                deal.id,
                deal.customer_name,
                deal.street_address,
                deal.city,
                deal.appointment_date,
                deal.price,
                deal.status
            );
        }
    }
    Ok(())
}

/// Create a deal for an existing customer and print the assigned id.
///
/// Runs the picker flow: the customer collection is refreshed, the customer
/// is selected by id, and the selection writes the display name into the
/// draft before it is sent.
pub async fn add(customer_id: &str, mut draft: DealDraft) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.fetch_customers().await;
    if let Some(error) = syncer.store().customers.error() {
        return Err(CommandError::Fetch(error));
    }

    let customers = syncer.store().customers.items();
    let mut picker = CustomerPicker::new();
    picker.open();

    let chosen = picker
        .candidates(&customers)
        .into_iter()
        .find(|c| c.id.as_str() == customer_id)
        .ok_or_else(|| CommandError::UnknownId {
            kind: "customer",
            id: customer_id.to_owned(),
        })?;
    picker.select(&chosen, &mut draft);

    let deal = syncer.create_deal(draft).await?;
    tracing::info!("Deal created for {}: {}", deal.customer_name, deal.id);
    #[allow(clippy::print_stdout)]
    {
        println!("{}", deal.id);
    }
    Ok(())
}

/// Apply field edits to an existing deal.
pub async fn update(id: &str, edits: DealEdits) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.fetch_deals().await;
    if let Some(error) = syncer.store().deals.error() {
        return Err(CommandError::Fetch(error));
    }

    let mut deal = syncer
        .store()
        .deals
        .items()
        .into_iter()
        .find(|d| d.id.as_str() == id)
        .ok_or_else(|| CommandError::UnknownId {
            kind: "deal",
            id: id.to_owned(),
        })?;

    if let Some(status) = edits.status {
        deal.status = status;
    }
    if let Some(price) = edits.price {
        deal.price = price;
    }
    if let Some(appointment_date) = edits.appointment_date {
        deal.appointment_date = appointment_date;
    }
    if let Some(special_instructions) = edits.special_instructions {
        deal.special_instructions = Some(special_instructions);
    }

    let deal = syncer.update_deal(deal).await?;
    tracing::info!("Deal updated: {} ({})", deal.id, deal.status);
    Ok(())
}

/// Delete a deal by id.
pub async fn delete(id: &str) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.delete_deal(&DealId::from(id)).await?;

    tracing::info!("Deal deleted: {id}");
    Ok(())
}
