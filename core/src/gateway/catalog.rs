// storefront/src/gateway/catalog.rs

use super::client::ApiClient;
use crate::error::RemoteError;
use crate::models::{Category, Product};
use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

/// Which product listing to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductListing {
  All,
  Active,
  Featured,
  New,
  OnSale,
  Category(i64),
  Search(String),
}

#[async_trait]
pub trait CatalogGateway: Send + Sync {
  async fn list_products(&self, listing: &ProductListing) -> Result<Vec<Product>, RemoteError>;
  async fn get_product(&self, id: i64) -> Result<Product, RemoteError>;
  async fn create_product(&self, product: &Product) -> Result<Product, RemoteError>;
  async fn update_product(&self, id: i64, product: &Product) -> Result<Product, RemoteError>;
  async fn delete_product(&self, id: i64) -> Result<(), RemoteError>;
  async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, RemoteError>;
  async fn get_category(&self, id: i64) -> Result<Category, RemoteError>;
  async fn create_category(&self, category: &Category) -> Result<Category, RemoteError>;
  async fn update_category(&self, id: i64, category: &Category) -> Result<Category, RemoteError>;
  async fn delete_category(&self, id: i64) -> Result<(), RemoteError>;
}

pub struct HttpCatalogGateway {
  client: ApiClient,
}

impl HttpCatalogGateway {
  pub fn new(client: ApiClient) -> Self {
    Self { client }
  }
}

#[async_trait]
impl CatalogGateway for HttpCatalogGateway {
  #[instrument(name = "storefront.http.catalog.list_products", skip(self))]
  async fn list_products(&self, listing: &ProductListing) -> Result<Vec<Product>, RemoteError> {
    let category_id;
    let req = match listing {
      ProductListing::All => self.client.request(Method::GET, &["api", "productos"])?,
      ProductListing::Active => self.client.request(Method::GET, &["api", "productos", "activos"])?,
      ProductListing::Featured => self.client.request(Method::GET, &["api", "productos", "destacados"])?,
      ProductListing::New => self.client.request(Method::GET, &["api", "productos", "nuevos"])?,
      ProductListing::OnSale => self.client.request(Method::GET, &["api", "productos", "ofertas"])?,
      ProductListing::Category(id) => {
        category_id = id.to_string();
        self.client.request(Method::GET, &["api", "productos", "categoria", &category_id])?
      }
      ProductListing::Search(term) => self
        .client
        .request(Method::GET, &["api", "productos", "buscar"])?
        .query(&[("q", term.as_str())]),
    };
    Ok(self.client.send_optional_json(req).await?.unwrap_or_default())
  }

  #[instrument(name = "storefront.http.catalog.get_product", skip(self))]
  async fn get_product(&self, id: i64) -> Result<Product, RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::GET, &["api", "productos", &id])?;
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.catalog.create_product", skip_all)]
  async fn create_product(&self, product: &Product) -> Result<Product, RemoteError> {
    let req = self.client.request(Method::POST, &["api", "productos"])?.json(product);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.catalog.update_product", skip(self, product))]
  async fn update_product(&self, id: i64, product: &Product) -> Result<Product, RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::PUT, &["api", "productos", &id])?.json(product);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.catalog.delete_product", skip(self))]
  async fn delete_product(&self, id: i64) -> Result<(), RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::DELETE, &["api", "productos", &id])?;
    self.client.send_empty(req).await
  }

  #[instrument(name = "storefront.http.catalog.list_categories", skip(self))]
  async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, RemoteError> {
    let req = if active_only {
      self.client.request(Method::GET, &["api", "categorias", "activas"])?
    } else {
      self.client.request(Method::GET, &["api", "categorias"])?
    };
    Ok(self.client.send_optional_json(req).await?.unwrap_or_default())
  }

  #[instrument(name = "storefront.http.catalog.get_category", skip(self))]
  async fn get_category(&self, id: i64) -> Result<Category, RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::GET, &["api", "categorias", &id])?;
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.catalog.create_category", skip_all)]
  async fn create_category(&self, category: &Category) -> Result<Category, RemoteError> {
    let req = self.client.request(Method::POST, &["api", "categorias"])?.json(category);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.catalog.update_category", skip(self, category))]
  async fn update_category(&self, id: i64, category: &Category) -> Result<Category, RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::PUT, &["api", "categorias", &id])?.json(category);
    self.client.send_json(req).await
  }

  #[instrument(name = "storefront.http.catalog.delete_category", skip(self))]
  async fn delete_category(&self, id: i64) -> Result<(), RemoteError> {
    let id = id.to_string();
    let req = self.client.request(Method::DELETE, &["api", "categorias", &id])?;
    self.client.send_empty(req).await
  }
}
