// storefront/src/gateway/mod.rs

//! Typed REST gateways. Each trait is the transport-agnostic port; the `Http*`
//! structs are the reqwest adapters. Every operation is exactly one round trip
//! and is never retried here.

pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod orders;

pub use addresses::{AddressGateway, HttpAddressGateway};
pub use cart::{CartGateway, HttpCartGateway};
pub use catalog::{CatalogGateway, HttpCatalogGateway, ProductListing};
pub use client::ApiClient;
pub use orders::{HttpOrderGateway, OrderGateway};
