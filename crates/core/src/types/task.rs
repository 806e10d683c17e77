//! Task records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::draft::DraftRecord;
use super::id::TaskId;

/// Free-form status label assigned to newly created tasks.
pub const NEW_TASK_STATUS: &str = "Pending";

/// A task persisted in the document service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier.
    pub id: TaskId,
    pub description: String,
    /// When the task is due. "Overdue" is never stored; it is always derived
    /// by comparing this against the current time.
    pub due_date: DateTime<Utc>,
    /// Independent of the due date: a task can be completed yet overdue.
    pub completed: bool,
    /// Free-form status label shown on the task board.
    pub status: String,
    /// Assigned by the document service at creation.
    pub created_at: DateTime<Utc>,
}

/// The creatable field set for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub description: String,
    /// Stored as a wire timestamp inside the document fields.
    #[serde(with = "crate::types::timestamp::wire_datetime")]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_status")]
    pub status: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            description: String::new(),
            due_date: DateTime::<Utc>::default(),
            completed: false,
            status: default_status(),
        }
    }
}

fn default_status() -> String {
    NEW_TASK_STATUS.to_owned()
}

impl DraftRecord for TaskDraft {
    const ENTITY: &'static str = "task";

    fn missing_fields(&self) -> Vec<&'static str> {
        if self.description.trim().is_empty() {
            vec!["description"]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_default_draft_is_pending_and_incomplete() {
        let draft = TaskDraft::default();
        assert_eq!(draft.status, "Pending");
        assert!(!draft.completed);
    }

    #[test]
    fn test_description_required() {
        let draft = TaskDraft {
            description: "  ".to_owned(),
            ..TaskDraft::default()
        };
        assert_eq!(draft.missing_fields(), vec!["description"]);
    }

    #[test]
    fn test_due_date_travels_as_wire_timestamp() {
        let due = Utc.with_ymd_and_hms(2025, 9, 30, 17, 0, 0).unwrap();
        let draft = TaskDraft {
            description: "Call back the Hartford site".to_owned(),
            due_date: due,
            ..TaskDraft::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json.get("dueDate"),
            Some(&serde_json::json!({"seconds": due.timestamp(), "nanos": 0}))
        );

        let back: TaskDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back.due_date, due);
    }

    #[test]
    fn test_decoding_tolerates_absent_completed_flag() {
        // Documents written before the first completion toggle have no
        // `completed` field at all.
        let draft: TaskDraft = serde_json::from_value(serde_json::json!({
            "description": "Order filters",
            "dueDate": {"seconds": 1_700_000_000, "nanos": 0},
            "status": "Pending",
        }))
        .unwrap();
        assert!(!draft.completed);
    }
}
