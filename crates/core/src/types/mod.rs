//! Core types for the catalog synchronizer.
//!
//! This module provides type-safe wrappers for the domain concepts shared by
//! the sync engine, its adapters, and the CLI.

pub mod id;
pub mod product;
pub mod status;
pub mod uom;

pub use id::*;
pub use product::{
    CatalogProduct, FieldUpdate, InventoryProduct, ProductDraft, ProductPatch, StorefrontProduct,
    eq_ignore_case,
};
pub use status::{CommandOutcome, SyncStatus};
pub use uom::{UnitOfMeasure, UnknownUnitError};
