// storefront/src/gateway/cart.rs

use super::client::ApiClient;
use crate::error::RemoteError;
use crate::models::{AddToCartRequest, Cart};
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

/// Remote cart operations. Quantities must be ≥ 1; clamping is the caller's job.
#[async_trait]
pub trait CartGateway: Send + Sync {
  /// `None` when the user has no cart yet.
  async fn fetch(&self) -> Result<Option<Cart>, RemoteError>;
  async fn add_item(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError>;
  async fn set_quantity(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError>;
  async fn remove_item(&self, product_id: i64) -> Result<Cart, RemoteError>;
  async fn clear(&self) -> Result<(), RemoteError>;
}

pub struct HttpCartGateway {
  client: ApiClient,
}

impl HttpCartGateway {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl CartGateway for HttpCartGateway {
  #[instrument(name = "storefront.http.cart.fetch", skip_all)]
  async fn fetch(&self) -> Result<Option<Cart>, RemoteError> {
    let req = self.client.request(Method::GET, &["api", "carrito"])?;
    self.client.send_optional_json(req).await
  }

  #[instrument(name = "storefront.http.cart.add_item", skip(self))]
  async fn add_item(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError> {
    let req = self
      .client
      .request(Method::POST, &["api", "carrito", "items"])?
      .json(&AddToCartRequest { product_id, quantity });
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.cart.set_quantity", skip(self))]
  async fn set_quantity(&self, product_id: i64, quantity: u32) -> Result<Cart, RemoteError> {
    let id = product_id.to_string();
    let req = self
      .client
      .request(Method::PUT, &["api", "carrito", "items", &id])?
      .query(&[("cantidad", quantity)]);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.cart.remove_item", skip(self))]
  async fn remove_item(&self, product_id: i64) -> Result<Cart, RemoteError> {
    let id = product_id.to_string();
    let req = self.client.request(Method::DELETE, &["api", "carrito", "items", &id])?;
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.cart.clear", skip_all)]
  async fn clear(&self) -> Result<(), RemoteError> {
    let req = self.client.request(Method::DELETE, &["api", "carrito"])?;
    self.client.send_empty(req).await
  }
}
