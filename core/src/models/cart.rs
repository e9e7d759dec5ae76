// storefront/src/models/cart.rs

use super::money::round_currency;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(rename = "productoId")]
  pub product_id: i64,
  #[serde(rename = "productoNombre")]
  pub product_name: String,
  #[serde(rename = "productoImagen", default, skip_serializing_if = "Option::is_none")]
  pub product_image: Option<String>,
  #[serde(rename = "cantidad")]
  pub quantity: u32,
  /// Price captured when the cart was fetched; not necessarily the live price.
  #[serde(rename = "precioUnitario")]
  pub unit_price: Decimal,
  pub subtotal: Decimal,
  /// Stock bound at last sync, used to clamp quantity controls.
  #[serde(rename = "stockDisponible")]
  pub stock_available: u32,
}

impl CartItem {
  /// Builds a line whose subtotal is derived from quantity and unit price.
  pub fn new(product_id: i64, product_name: impl Into<String>, quantity: u32, unit_price: Decimal, stock_available: u32) -> Self {
    Self {
      id: None,
      product_id,
      product_name: product_name.into(),
      product_image: None,
      quantity,
      unit_price,
      subtotal: round_currency(unit_price * Decimal::from(quantity)),
      stock_available,
    }
  }

  pub fn expected_subtotal(&self) -> Decimal {
    round_currency(self.unit_price * Decimal::from(self.quantity))
  }

  /// Returns the requested quantity if it lies in `[1, stock_available]`.
  pub fn accepts_quantity(&self, requested: i64) -> Option<u32> {
    if requested >= 1 && requested <= i64::from(self.stock_available) {
      u32::try_from(requested).ok()
    } else {
      None
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(rename = "usuarioId")]
  pub user_id: i64,
  #[serde(default)]
  pub items: Vec<CartItem>,
  pub total: Decimal,
  /// Units across all lines, as reported by the backend.
  #[serde(rename = "cantidadItems", default)]
  pub item_count: u32,
  #[serde(rename = "fechaActualizacion", default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<NaiveDateTime>,
}

impl Cart {
  /// Builds a cart whose total and unit count are derived from its lines.
  pub fn from_items(user_id: i64, items: Vec<CartItem>) -> Self {
    let mut cart = Self {
      id: None,
      user_id,
      items,
      total: Decimal::ZERO,
      item_count: 0,
      updated_at: None,
    };
    cart.total = cart.computed_total();
    cart.item_count = cart.unit_count();
    cart
  }

  pub fn computed_total(&self) -> Decimal {
    self.items.iter().map(|item| item.subtotal).sum()
  }

  /// `total == Σ subtotal` and every `subtotal == quantity × unit_price` (rounded).
  pub fn is_consistent(&self) -> bool {
    self.items.iter().all(|item| item.subtotal == item.expected_subtotal()) && self.total == self.computed_total()
  }

  /// Distinct lines, which is what the header badge shows.
  pub fn line_count(&self) -> usize {
    self.items.len()
  }

  pub fn unit_count(&self) -> u32 {
    self.items.iter().map(|item| item.quantity).sum()
  }

  pub fn item(&self, product_id: i64) -> Option<&CartItem> {
    self.items.iter().find(|item| item.product_id == product_id)
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
  #[serde(rename = "productoId")]
  pub product_id: i64,
  #[serde(rename = "cantidad")]
  pub quantity: u32,
}
