//! Inventory service adapter.
//!
//! The inventory service exposes Spring Data REST search endpoints returning
//! HAL documents. Lookups are scoped to the connection's tenant via the
//! `companyId` query parameter and are case-insensitive on the server side.

mod client;
mod types;

pub use client::HalInventoryClient;
pub use types::{HalProduct, SearchResult};
