// storefront/src/models/product.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  pub url: String,
  #[serde(rename = "esPrincipal", default)]
  pub is_main: bool,
  #[serde(rename = "orden", default)]
  pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(rename = "nombre")]
  pub name: String,
  #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "precio")]
  pub price: Decimal,
  #[serde(rename = "precioOferta", default, skip_serializing_if = "Option::is_none")]
  pub offer_price: Option<Decimal>,
  pub stock: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sku: Option<String>,
  #[serde(rename = "peso", default, skip_serializing_if = "Option::is_none")]
  pub weight: Option<Decimal>,
  #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
  pub brand: Option<String>,
  #[serde(rename = "activo", default, skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
  #[serde(rename = "destacado", default, skip_serializing_if = "Option::is_none")]
  pub featured: Option<bool>,
  #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<NaiveDateTime>,
  #[serde(rename = "categoriaId", default, skip_serializing_if = "Option::is_none")]
  pub category_id: Option<i64>,
  #[serde(rename = "categoriaNombre", default, skip_serializing_if = "Option::is_none")]
  pub category_name: Option<String>,
  #[serde(rename = "imagenes", default, skip_serializing_if = "Option::is_none")]
  pub images: Option<Vec<ProductImage>>,
  #[serde(rename = "imagenPrincipal", default, skip_serializing_if = "Option::is_none")]
  pub main_image: Option<String>,
}

impl Product {
  /// Offer price when one is set and lower than the list price.
  pub fn effective_price(&self) -> Decimal {
    match self.offer_price {
      Some(offer) if offer < self.price => offer,
      _ => self.price,
    }
  }

  pub fn in_stock(&self) -> bool {
    self.stock > 0
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(rename = "nombre")]
  pub name: String,
  #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "imagenUrl", default, skip_serializing_if = "Option::is_none")]
  pub image_url: Option<String>,
  #[serde(rename = "activo", default, skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
  #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<NaiveDateTime>,
  #[serde(rename = "cantidadProductos", default, skip_serializing_if = "Option::is_none")]
  pub product_count: Option<u32>,
}
