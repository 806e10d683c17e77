//! Opsdeck Sync - entity synchronization engine.
//!
//! Keeps three in-memory collections (customers, deals, tasks) consistent
//! with a remote document service, and derives everything the presentation
//! layer renders from snapshots of that local state.
//!
//! # Modules
//!
//! - [`remote`] - document service client: the [`remote::DocumentStore`]
//!   seam, an HTTP implementation, and an in-memory double for tests
//! - [`store`] - per-collection `{items, loading, error}` state with pure
//!   transitions
//! - [`actions`] - async operations that call the service and apply store
//!   transitions on settlement
//! - [`views`] - pure derived projections: search, recency, overdue, counts
//! - [`picker`] - the customer-selection flow that fills a deal draft
//! - [`config`] - environment configuration for the remote connection
//!
//! # Data flow
//!
//! A caller triggers an action, the action calls the document service, the
//! settlement applies exactly one transition, and views recompute from
//! snapshots. Consumers never see raw wire documents, and nothing outside
//! [`actions`] can transition store state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod config;
pub mod picker;
pub mod remote;
pub mod store;
pub mod views;

pub use actions::{SyncError, Syncer};
pub use store::{CollectionState, EntityStore};
