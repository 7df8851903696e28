//! WooCommerce storefront adapter.
//!
//! # API Reference
//!
//! - Base URL: `{storefront_url}/wc-api/v2/products`
//! - Authentication: HTTP Basic with the connection's consumer key/secret
//! - Pagination: `?page=N`, page count in the `X-WC-TotalPages` header
//! - Bodies: single products wrapped in `{"product": {...}}`

mod client;
mod types;

pub use client::WooCommerceClient;
pub use types::{ProductEnvelope, ProductList, WooProduct, WooProductBody};
