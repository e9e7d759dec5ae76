// storefront/src/models/mod.rs

//! Wire models for the storefront backend. Field names on the wire are the
//! backend's camelCase Spanish names; the Rust side uses English names.

pub mod address;
pub mod cart;
pub mod money;
pub mod order;
pub mod product;

pub use address::Address;
pub use cart::{AddToCartRequest, Cart, CartItem};
pub use money::{round_currency, TaxBreakdown, DEFAULT_TAX_RATE};
pub use order::{CreateOrderRequest, Order, OrderItem, OrderStatus};
pub use product::{Category, Product, ProductImage};
