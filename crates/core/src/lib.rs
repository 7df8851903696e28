//! Catalog Sync Core - Shared types library.
//!
//! This crate provides common types used across all catalog-sync components:
//! - `server` - Sync engine, HTTP API, and remote adapters
//! - `cli` - Command-line tools for migrations and connection management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, catalog products, partial updates, units, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
