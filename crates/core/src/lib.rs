//! Opsdeck Core - Shared entity types.
//!
//! This crate provides the entity records used across all Opsdeck components:
//! - `sync` - Remote synchronization engine, stores, and derived views
//! - `cli` - Command-line dashboard and management tools
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no locks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Entity records, creation drafts, type-safe IDs, and the wire
//!   timestamp encoding

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
