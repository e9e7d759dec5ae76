// storefront/src/gateway/addresses.rs

use super::client::ApiClient;
use crate::error::RemoteError;
use crate::models::Address;
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

#[async_trait]
pub trait AddressGateway: Send + Sync {
  async fn list_mine(&self) -> Result<Vec<Address>, RemoteError>;
  async fn get(&self, id: i64) -> Result<Address, RemoteError>;
  async fn get_default(&self) -> Result<Option<Address>, RemoteError>;
  async fn create(&self, address: &Address) -> Result<Address, RemoteError>;
  async fn update(&self, id: i64, address: &Address) -> Result<Address, RemoteError>;
  async fn set_default(&self, id: i64) -> Result<Address, RemoteError>;
  async fn delete(&self, id: i64) -> Result<(), RemoteError>;
}

pub struct HttpAddressGateway {
  client: ApiClient,
}

impl HttpAddressGateway {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl AddressGateway for HttpAddressGateway {
  #[instrument(name = "storefront.http.addresses.list_mine", skip_all)]
  async fn list_mine(&self) -> Result<Vec<Address>, RemoteError> {
    let req = self.client.request(Method::GET, &["api", "direcciones"])?;
    Ok(self.client.send_optional_json(req).await?.unwrap_or_default())
  }

  #[instrument(name = "storefront.http.addresses.get", skip(self))]
  async fn get(&self, id: i64) -> Result<Address, RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::GET, &["api", "direcciones", &id])?;
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.addresses.get_default", skip_all)]
  async fn get_default(&self) -> Result<Option<Address>, RemoteError> {
    let req = self.client.request(Method::GET, &["api", "direcciones", "predeterminada"])?;
    self.client.send_optional_json(req).await
  }

  #[instrument(name = "storefront.http.addresses.create", skip_all)]
  async fn create(&self, address: &Address) -> Result<Address, RemoteError> {
    let req = self.client.request(Method::POST, &["api", "direcciones"])?.json(address);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.addresses.update", skip(self, address))]
  async fn update(&self, id: i64, address: &Address) -> Result<Address, RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::PUT, &["api", "direcciones", &id])?.json(address);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.addresses.set_default", skip(self))]
  async fn set_default(&self, id: i64) -> Result<Address, RemoteError> {
    let id = id.to_string();
    let req = self
      .client
      .request(Method::PATCH, &["api", "direcciones", &id, "predeterminada"])?;
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.addresses.delete", skip(self))]
  async fn delete(&self, id: i64) -> Result<(), RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::DELETE, &["api", "direcciones", &id])?;
    self.client.send_empty(req).await
  }
}
