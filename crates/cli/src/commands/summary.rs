//! Dashboard summary: the read path over every derived view.

use chrono::Utc;

use opsdeck_sync::views;

use super::CommandError;

/// How many recent deals the dashboard shows.
const RECENT_DEALS: usize = 5;
/// How many recent customers the dashboard shows.
const RECENT_CUSTOMERS: usize = 3;
/// How many completed tasks the done-card shows.
const COMPLETED_TASKS: usize = 6;

/// Refresh all three collections and print the dashboard.
pub async fn show() -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.fetch_customers().await;
    syncer.fetch_deals().await;
    syncer.fetch_tasks().await;

    let store = syncer.store();
    if let Some(error) = [
        store.customers.error(),
        store.deals.error(),
        store.tasks.error(),
    ]
    .into_iter()
    .flatten()
    .next()
    {
        return Err(CommandError::Fetch(error));
    }

    let counts = views::counts(store);
    let customers = store.customers.items();
    let deals = store.deals.items();
    let tasks = store.tasks.items();

    let recent_deals = views::latest(&deals, RECENT_DEALS);
    let recent_customers = views::latest(&customers, RECENT_CUSTOMERS);
    let done_card = views::completed_recent(&tasks, COMPLETED_TASKS);
    let now = Utc::now();
    let overdue = tasks
        .iter()
        .filter(|task| !task.completed && views::is_overdue(task, now))
        .count();

    #[allow(clippy::print_stdout)]
    {
        println!(
            "Customers: {}   Deals: {}   Tasks: {}",
            counts.customers, counts.deals, counts.tasks
        );

        println!();
        println!("Recent deals");
        for deal in &recent_deals {
            println!(
                "  {}  {}  ${}  {}",
                deal.appointment_date, deal.customer_name, deal.price, deal.status
            );
        }

        println!();
        println!("Recent customers");
        for customer in &recent_customers {
            println!("  {}  {}", customer.display_name(), customer.email);
        }

        println!();
        println!("Completed tasks");
        for task in &done_card {
            println!(
                "  {}  (due {})",
                task.description,
                task.due_date.format("%Y-%m-%d")
            );
        }

        println!();
        println!("{overdue} open task(s) overdue");
    }
    Ok(())
}
