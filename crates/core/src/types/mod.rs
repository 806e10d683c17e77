//! Core types for Opsdeck.
//!
//! Each entity kind has a persisted record (carrying a server-assigned id and
//! creation timestamp) and a draft (the creatable field set, validated before
//! the first create call). Drafts double as the wire `fields` payload: they
//! serialize in the camelCase shape the document service stores.

pub mod customer;
pub mod deal;
pub mod draft;
pub mod id;
pub mod task;
pub mod timestamp;

pub use customer::{Customer, CustomerDraft};
pub use deal::{Deal, DealDraft, DealStatus};
pub use draft::{DraftRecord, ValidationError};
pub use id::*;
pub use task::{NEW_TASK_STATUS, Task, TaskDraft};
pub use timestamp::Timestamp;
