// storefront/src/gateway/orders.rs

use super::client::ApiClient;
use crate::error::RemoteError;
use crate::models::{CreateOrderRequest, Order, OrderStatus};
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

#[async_trait]
pub trait OrderGateway: Send + Sync {
  /// Orders of the signed-in user.
  async fn list_mine(&self) -> Result<Vec<Order>, RemoteError>;
  /// Every order (admin).
  async fn list_all(&self) -> Result<Vec<Order>, RemoteError>;
  async fn get(&self, id: i64) -> Result<Order, RemoteError>;
  async fn get_by_number(&self, order_number: &str) -> Result<Order, RemoteError>;
  async fn list_by_status(&self, status: &OrderStatus) -> Result<Vec<Order>, RemoteError>;
  async fn create(&self, request: &CreateOrderRequest) -> Result<Order, RemoteError>;
  async fn update_status(&self, id: i64, status: &OrderStatus) -> Result<Order, RemoteError>;
}

pub struct HttpOrderGateway {
  client: ApiClient,
}

impl HttpOrderGateway {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
  #[instrument(name = "storefront.http.orders.list_mine", skip_all)]
  async fn list_mine(&self) -> Result<Vec<Order>, RemoteError> {
    let req = self.client.request(Method::GET, &["api", "ordenes"])?;
    Ok(self.client.send_optional_json(req).await?.unwrap_or_default())
  }

  #[instrument(name = "storefront.http.orders.list_all", skip_all)]
  async fn list_all(&self) -> Result<Vec<Order>, RemoteError> {
    let req = self.client.request(Method::GET, &["api", "ordenes", "todas"])?;
    Ok(self.client.send_optional_json(req).await?.unwrap_or_default())
  }

  #[instrument(name = "storefront.http.orders.get", skip(self))]
  async fn get(&self, id: i64) -> Result<Order, RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::GET, &["api", "ordenes", &id])?;
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.orders.get_by_number", skip(self))]
  async fn get_by_number(&self, order_number: &str) -> Result<Order, RemoteError> {
    let req = self.client.request(Method::GET, &["api", "ordenes", "numero", order_number])?;
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.orders.list_by_status", skip(self, status), fields(status = %status))]
  async fn list_by_status(&self, status: &OrderStatus) -> Result<Vec<Order>, RemoteError> {
    let req = self.client.request(Method::GET, &["api", "ordenes", "estado", status.as_str()])?;
    Ok(self.client.send_optional_json(req).await?.unwrap_or_default())
  }

  #[instrument(
    name = "storefront.http.orders.create",
    skip_all,
    fields(address_id = request.shipping_address_id, payment_method = %request.payment_method)
  )]
  async fn create(&self, request: &CreateOrderRequest) -> Result<Order, RemoteError> {
    let req = self.client.request(Method::POST, &["api", "ordenes"])?.json(request);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.orders.update_status", skip(self, status), fields(status = %status))]
  async fn update_status(&self, id: i64, status: &OrderStatus) -> Result<Order, RemoteError> {
    let id = id.to_string();
    let req = self
      .client
      .request(Method::PATCH, &["api", "ordenes", &id, "estado"])?
      .query(&[("estado", status.as_str())]);
    self.client.send_json(req).await
  }
}
