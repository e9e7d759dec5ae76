// src/lib.rs

//! Storefront: an async client for a storefront REST backend.
//!
//! The crate keeps a client-side projection of the user's cart in sync with the
//! server and drives the pages that consume it:
//!  - Typed REST gateways for the cart, orders, addresses and catalog.
//!  - A replay-latest `CartBroadcaster` holding the last known cart.
//!  - A `CartStore`, the only writer of that cache.
//!  - Page models (header badge, cart, checkout, product detail, order history)
//!    that talk to the front end through the `Prompt` and `Navigator` traits.
//!  - A small step engine (`Flow`) used to run the checkout submission.

pub mod broadcast;
pub mod config;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod models;
pub mod store;
pub mod views;

// --- Re-exports for the Public API ---

pub use crate::broadcast::{CartBroadcaster, CartObserver, Subscription};
pub use crate::config::ClientConfig;
pub use crate::error::{FlowError, RemoteError, Result, StorefrontError};
pub use crate::flow::{ContextData, Flow, FlowControl, FlowOutcome, StepMode};
pub use crate::gateway::{
  AddressGateway, ApiClient, CartGateway, CatalogGateway, HttpAddressGateway, HttpCartGateway, HttpCatalogGateway,
  HttpOrderGateway, OrderGateway, ProductListing,
};
pub use crate::models::{Address, Cart, CartItem, Category, Order, OrderStatus, Product, TaxBreakdown};
pub use crate::store::CartStore;
pub use crate::views::{ActionOutcome, Navigator, Notice, Prompt, Route};

/*
    Typical wiring:
    1. `ClientConfig::from_env()` and `ApiClient::from_config(&config)`.
    2. Build the gateways over clones of the `ApiClient`.
    3. Create one `CartBroadcaster` and a `CartStore` pairing it with the cart gateway.
    4. `store.load().await` at start-up, then activate pages with clones of the store.
*/
