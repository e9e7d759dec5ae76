// storefront/src/store.rs

//! `CartStore` pairs the cart gateway with the broadcaster.
//!
//! It is the only writer of the cached cart: every operation performs one
//! gateway call and publishes the response only when the call succeeds. A
//! failed call returns the `RemoteError` and leaves the cache untouched.
//!
//! Overlapping calls are not sequenced; whichever response arrives last is the
//! value subscribers end up with.

use crate::broadcast::{CartBroadcaster, Subscription};
use crate::error::RemoteError;
use crate::gateway::CartGateway;
use crate::models::Cart;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct CartStore {
  gateway: Arc<dyn CartGateway>,
  broadcaster: CartBroadcaster,
}

impl CartStore {
  pub fn new(gateway: Arc<dyn CartGateway>, broadcaster: CartBroadcaster) -> Self {
    Self { gateway, broadcaster }
  }

  pub fn broadcaster(&self) -> &CartBroadcaster {
    &self.broadcaster
  }

  pub fn current(&self) -> Option<Cart> {
    self.broadcaster.current()
  }

  pub fn item_count(&self) -> u32 {
    self.broadcaster.item_count()
  }

  pub fn subscribe(&self, observer: impl Fn(Option<&Cart>) + Send + Sync + 'static) -> Subscription {
    self.broadcaster.subscribe(observer)
  }

  /// Fetches the cart and publishes whatever the backend returned, including `None`.
  #[instrument(name = "CartStore::refresh", skip_all, err(Display))]
  pub async fn refresh(&self) -> Result<Option<Cart>, RemoteError> {
    let cart = self.gateway.fetch().await?;
    event!(Level::DEBUG, has_cart = cart.is_some(), "cart refreshed");
    self.broadcaster.publish(cart.clone());
    Ok(cart)
  }

  /// Start-up load. Unlike `refresh`, a failure publishes `None` so that
  /// subscribers stop waiting on a cart that will not arrive.
  #[instrument(name = "CartStore::load", skip_all)]
  pub async fn load(&self) -> Option<Cart> {
    match self.gateway.fetch().await {
      Ok(cart) => {
        self.broadcaster.publish(cart.clone());
        cart
      }
      Err(e) => {
        event!(Level::WARN, error = %e, "initial cart load failed");
        self.broadcaster.publish(None);
        None
      }
    }
  }

  #[instrument(name = "CartStore::add_item", skip(self), err(Display))]
  pub async fn add_item(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError> {
    let cart = self.gateway.add_item(product_id, quantity).await?;
    self.broadcaster.publish(Some(cart.clone()));
    Ok(cart)
  }

  #[instrument(name = "CartStore::set_quantity", skip(self), err(Display))]
  pub async fn set_quantity(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError> {
    let cart = self.gateway.set_quantity(product_id, quantity).await?;
    self.broadcaster.publish(Some(cart.clone()));
    Ok(cart)
  }

  #[instrument(name = "CartStore::remove_item", skip(self), err(Display))]
  pub async fn remove_item(&self, product_id: i64) -> Result<Cart, RemoteError> {
    let cart = self.gateway.remove_item(product_id).await?;
    self.broadcaster.publish(Some(cart.clone()));
    Ok(cart)
  }

  #[instrument(name = "CartStore::clear", skip_all, err(Display))]
  pub async fn clear(&self) -> Result<(), RemoteError> {
    self.gateway.clear().await?;
    self.broadcaster.publish(None);
    Ok(())
  }
}

impl std::fmt::Debug for CartStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartStore").field("broadcaster", &self.broadcaster).finish_non_exhaustive()
  }
}
