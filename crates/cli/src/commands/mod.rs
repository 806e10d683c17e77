//! Command implementations for the Opsdeck CLI.
//!
//! Each command builds a fresh [`Syncer`] against the configured document
//! service, refreshes whatever collections it reads, and prints from store
//! snapshots. A refresh failure surfaces as [`CommandError::Fetch`] with
//! the collection's recorded error message.

pub mod customers;
pub mod deals;
pub mod summary;
pub mod tasks;

use std::sync::Arc;

use thiserror::Error;

use opsdeck_sync::config::{ConfigError, RemoteConfig};
use opsdeck_sync::remote::{HttpDocumentStore, ServiceError};
use opsdeck_sync::{EntityStore, SyncError, Syncer};

/// Errors shared by all CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The document service client could not be built.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A sync mutation failed.
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// A collection refresh failed; carries the store's error message.
    #[error("{0}")]
    Fetch(String),

    /// The freshly fetched collection has no entity with this id.
    #[error("No {kind} found with id {id}")]
    UnknownId { kind: &'static str, id: String },
}

/// Build a syncer against the configured document service.
pub fn syncer() -> Result<Syncer, CommandError> {
    let config = RemoteConfig::from_env()?;
    let remote = HttpDocumentStore::new(&config)?;
    Ok(Syncer::new(Arc::new(EntityStore::new()), Arc::new(remote)))
}
