//! Task collection commands.
//!
//! # Usage
//!
//! ```bash
//! # List with completion and overdue state
//! opsdeck tasks list
//!
//! # Create
//! opsdeck tasks add "Order replacement filters" --due 2026-09-02T17:00:00Z
//!
//! # Toggle completion
//! opsdeck tasks complete <id>
//!
//! # Delete
//! opsdeck tasks delete <id>
//! ```

use chrono::{DateTime, Utc};

use opsdeck_core::{Task, TaskDraft, TaskId};
use opsdeck_sync::{Syncer, views};

use super::CommandError;

/// Field edits for `tasks update`; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct TaskEdits {
    pub description: Option<String>,
    pub due: Option<DateTime<Utc>>,
}

/// Refresh and list tasks with their completion and overdue state.
pub async fn list() -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.fetch_tasks().await;
    if let Some(error) = syncer.store().tasks.error() {
        return Err(CommandError::Fetch(error));
    }

    let tasks = syncer.store().tasks.items();
    let now = Utc::now();

    #[allow(clippy::print_stdout)]
    {
        println!("{} task(s)", tasks.len());
        for task in &tasks {
            let check = if task.completed { "x" } else { " " };
            let overdue = if !task.completed && views::is_overdue(task, now) {
                "  (overdue)"
            } else {
                ""
            };
            println!(
                "  [{check}] {}  {}  due {}{overdue}",
                task.id,
                task.description,
                task.due_date.format("%Y-%m-%d %H:%M")
            );
        }
    }
    Ok(())
}

/// Create a task and print the assigned id.
pub async fn add(draft: TaskDraft) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    let task = syncer.create_task(draft).await?;

    tracing::info!("Task created: {} ({})", task.description, task.id);
    #[allow(clippy::print_stdout)]
    {
        println!("{}", task.id);
    }
    Ok(())
}

/// Toggle a task's completion flag.
pub async fn complete(id: &str) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    let mut task = fetch_task(&syncer, id).await?;

    task.completed = !task.completed;
    let task = syncer.update_task(task).await?;

    let state = if task.completed { "completed" } else { "reopened" };
    tracing::info!("Task {state}: {} ({})", task.description, task.id);
    Ok(())
}

/// Apply field edits to an existing task.
pub async fn update(id: &str, edits: TaskEdits) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    let mut task = fetch_task(&syncer, id).await?;

    if let Some(description) = edits.description {
        task.description = description;
    }
    if let Some(due) = edits.due {
        task.due_date = due;
    }

    let task = syncer.update_task(task).await?;
    tracing::info!("Task updated: {}", task.id);
    Ok(())
}

/// Delete a task by id.
pub async fn delete(id: &str) -> Result<(), CommandError> {
    let syncer = super::syncer()?;
    syncer.delete_task(&TaskId::from(id)).await?;

    tracing::info!("Task deleted: {id}");
    Ok(())
}

/// Refresh the task collection and pull one task out of it.
async fn fetch_task(syncer: &Syncer, id: &str) -> Result<Task, CommandError> {
    syncer.fetch_tasks().await;
    if let Some(error) = syncer.store().tasks.error() {
        return Err(CommandError::Fetch(error));
    }

    syncer
        .store()
        .tasks
        .items()
        .into_iter()
        .find(|t| t.id.as_str() == id)
        .ok_or_else(|| CommandError::UnknownId {
            kind: "task",
            id: id.to_owned(),
        })
}
