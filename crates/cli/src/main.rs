//! Opsdeck CLI - dashboard data from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Refresh and list customers, optionally filtered by name
//! opsdeck customers list -q maya
//!
//! # Create a customer
//! opsdeck customers add -f Maya -l Stone -e maya@example.com -p 555-0100 -a "12 Main St"
//!
//! # Create a deal for an existing customer (fills the customer name)
//! opsdeck deals add --customer-id <id> --street-address "12 Main St" \
//!     --city Portland --state OR --zip-code 97201 --room-area 240 \
//!     --number-of-people 3 --appointment-date 2026-09-02 \
//!     --room-access "Key under mat" --price 6000
//!
//! # Toggle a task's completion
//! opsdeck tasks complete <id>
//!
//! # Dashboard read path: counts, recent deals and customers, completed tasks
//! opsdeck summary
//! ```
//!
//! # Commands
//!
//! - `customers` - list, add, update and delete customers
//! - `deals` - list, add, update and delete deals
//! - `tasks` - list, add, complete, update and delete tasks
//! - `summary` - collection counts plus the dashboard's recency cards

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use opsdeck_core::{CustomerDraft, DealDraft, DealStatus, TaskDraft};

mod commands;

use commands::{customers::CustomerEdits, deals::DealEdits, tasks::TaskEdits};

#[derive(Parser)]
#[command(name = "opsdeck")]
#[command(author, version, about = "Opsdeck CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the customer collection
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Manage the deal collection
    Deals {
        #[command(subcommand)]
        action: DealAction,
    },
    /// Manage the task collection
    Tasks {
        #[command(subcommand)]
        action: TaskAction,
    },
    /// Collection counts plus the dashboard's recency cards
    Summary,
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers, optionally filtered by name
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Create a customer
    Add {
        /// First name
        #[arg(short, long)]
        first_name: String,

        /// Last name
        #[arg(short, long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Phone number
        #[arg(short, long)]
        phone: String,

        /// Street address
        #[arg(short, long)]
        address: String,

        /// Profile image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Edit fields of an existing customer
    Update {
        /// Customer id
        id: String,

        /// New first name
        #[arg(long)]
        first_name: Option<String>,

        /// New last name
        #[arg(long)]
        last_name: Option<String>,

        /// New email address
        #[arg(long)]
        email: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// New street address
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a customer
    Delete {
        /// Customer id
        id: String,
    },
}

#[derive(Subcommand)]
enum DealAction {
    /// List deals, optionally filtered by street address
    List {
        /// Case-insensitive address filter
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Create a deal for an existing customer
    Add {
        /// Id of the customer this deal is for
        #[arg(long)]
        customer_id: String,

        /// Street address of the job site
        #[arg(long)]
        street_address: String,

        /// City
        #[arg(long)]
        city: String,

        /// State
        #[arg(long)]
        state: String,

        /// ZIP code
        #[arg(long)]
        zip_code: String,

        /// Room area in square feet
        #[arg(long)]
        room_area: String,

        /// Number of people on site
        #[arg(long)]
        number_of_people: String,

        /// Appointment date (YYYY-MM-DD)
        #[arg(long)]
        appointment_date: NaiveDate,

        /// How to access the rooms
        #[arg(long)]
        room_access: String,

        /// Quoted price
        #[arg(long)]
        price: Decimal,

        /// Special instructions
        #[arg(long)]
        special_instructions: Option<String>,

        /// Image URL for the job site
        #[arg(long)]
        image_url: Option<String>,

        /// Deal status (inprogress, closed, pending, cancelled)
        #[arg(long)]
        status: Option<DealStatus>,
    },
    /// Edit fields of an existing deal
    Update {
        /// Deal id
        id: String,

        /// New status (inprogress, closed, pending, cancelled)
        #[arg(long)]
        status: Option<DealStatus>,

        /// New quoted price
        #[arg(long)]
        price: Option<Decimal>,

        /// New appointment date (YYYY-MM-DD)
        #[arg(long)]
        appointment_date: Option<NaiveDate>,

        /// New special instructions
        #[arg(long)]
        special_instructions: Option<String>,
    },
    /// Delete a deal
    Delete {
        /// Deal id
        id: String,
    },
}

#[derive(Subcommand)]
enum TaskAction {
    /// List tasks with their completion and overdue state
    List,
    /// Create a task
    Add {
        /// What needs doing
        description: String,

        /// Due date, RFC 3339 (e.g. 2026-09-02T17:00:00Z)
        #[arg(long)]
        due: DateTime<Utc>,
    },
    /// Toggle a task's completion
    Complete {
        /// Task id
        id: String,
    },
    /// Edit fields of an existing task
    Update {
        /// Task id
        id: String,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New due date, RFC 3339
        #[arg(long)]
        due: Option<DateTime<Utc>>,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Customers { action } => match action {
            CustomerAction::List { query } => {
                commands::customers::list(query.as_deref()).await?;
            }
            CustomerAction::Add {
                first_name,
                last_name,
                email,
                phone,
                address,
                image_url,
            } => {
                let draft = CustomerDraft {
                    first_name,
                    last_name,
                    email,
                    phone,
                    address,
                    image_url,
                };
                commands::customers::add(draft).await?;
            }
            CustomerAction::Update {
                id,
                first_name,
                last_name,
                email,
                phone,
                address,
            } => {
                let edits = CustomerEdits {
                    first_name,
                    last_name,
                    email,
                    phone,
                    address,
                };
                commands::customers::update(&id, edits).await?;
            }
            CustomerAction::Delete { id } => commands::customers::delete(&id).await?,
        },
        Commands::Deals { action } => match action {
            DealAction::List { query } => commands::deals::list(query.as_deref()).await?,
            DealAction::Add {
                customer_id,
                street_address,
                city,
                state,
                zip_code,
                room_area,
                number_of_people,
                appointment_date,
                room_access,
                price,
                special_instructions,
                image_url,
                status,
            } => {
                let draft = DealDraft {
                    customer_name: String::new(),
                    street_address,
                    city,
                    state,
                    zip_code,
                    room_area,
                    number_of_people,
                    appointment_date,
                    special_instructions,
                    room_access,
                    price,
                    image_url,
                    status: status.unwrap_or_default(),
                };
                commands::deals::add(&customer_id, draft).await?;
            }
            DealAction::Update {
                id,
                status,
                price,
                appointment_date,
                special_instructions,
            } => {
                let edits = DealEdits {
                    status,
                    price,
                    appointment_date,
                    special_instructions,
                };
                commands::deals::update(&id, edits).await?;
            }
            DealAction::Delete { id } => commands::deals::delete(&id).await?,
        },
        Commands::Tasks { action } => match action {
            TaskAction::List => commands::tasks::list().await?,
            TaskAction::Add { description, due } => {
                let draft = TaskDraft {
                    description,
                    due_date: due,
                    ..TaskDraft::default()
                };
                commands::tasks::add(draft).await?;
            }
            TaskAction::Complete { id } => commands::tasks::complete(&id).await?,
            TaskAction::Update {
                id,
                description,
                due,
            } => {
                let edits = TaskEdits {
                    description,
                    due,
                };
                commands::tasks::update(&id, edits).await?;
            }
            TaskAction::Delete { id } => commands::tasks::delete(&id).await?,
        },
        Commands::Summary => commands::summary::show().await?,
    }
    Ok(())
}
