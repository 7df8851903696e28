//! Catalog Sync server library.
//!
//! Keeps a tenant's storefront catalog consistent with its inventory system:
//! a one-time reconciliation when the tenant connects, then incremental
//! commands driven by inventory events.
//!
//! # Layout
//!
//! - [`sync`] - Engine: ports, reconciliation, command handlers, report
//! - [`db`] - `PostgreSQL` connection registry and sync index
//! - [`inventory`], [`woocommerce`], [`notifications`] - Remote adapters
//! - [`routes`] - axum HTTP surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod decimal;
pub mod error;
pub mod http;
pub mod inventory;
pub mod notifications;
pub mod routes;
pub mod state;
pub mod sync;
pub mod woocommerce;
