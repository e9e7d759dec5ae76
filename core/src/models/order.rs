// storefront/src/models/order.rs

use super::address::Address;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status. Statuses this client does not know about are kept
/// verbatim in `Other` so they survive a round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
  Returned,
  Other(String),
}

impl OrderStatus {
  pub const KNOWN: [OrderStatus; 7] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
    OrderStatus::Returned,
  ];

  pub fn as_str(&self) -> &str {
    match self {
      OrderStatus::Pending => "PENDIENTE",
      OrderStatus::Confirmed => "CONFIRMADA",
      OrderStatus::Processing => "PROCESANDO",
      OrderStatus::Shipped => "ENVIADA",
      OrderStatus::Delivered => "ENTREGADA",
      OrderStatus::Cancelled => "CANCELADA",
      OrderStatus::Returned => "DEVUELTA",
      OrderStatus::Other(raw) => raw,
    }
  }

  /// Display label; unknown statuses show their raw value.
  pub fn label(&self) -> &str {
    match self {
      OrderStatus::Pending => "Pendiente",
      OrderStatus::Confirmed => "Confirmada",
      OrderStatus::Processing => "Procesando",
      OrderStatus::Shipped => "Enviada",
      OrderStatus::Delivered => "Entregada",
      OrderStatus::Cancelled => "Cancelada",
      OrderStatus::Returned => "Devuelta",
      OrderStatus::Other(raw) => raw,
    }
  }

  /// Badge class used by the order-history list.
  pub fn badge_class(&self) -> &'static str {
    match self {
      OrderStatus::Pending => "bg-warning",
      OrderStatus::Confirmed => "bg-info",
      OrderStatus::Processing => "bg-primary",
      OrderStatus::Shipped | OrderStatus::Delivered => "bg-success",
      OrderStatus::Cancelled => "bg-danger",
      OrderStatus::Returned | OrderStatus::Other(_) => "bg-secondary",
    }
  }

  /// Accent colour used by the admin order table.
  pub fn color(&self) -> &'static str {
    match self {
      OrderStatus::Pending | OrderStatus::Cancelled | OrderStatus::Returned => "warn",
      OrderStatus::Confirmed | OrderStatus::Delivered => "accent",
      OrderStatus::Processing | OrderStatus::Shipped | OrderStatus::Other(_) => "primary",
    }
  }
}

impl From<String> for OrderStatus {
  fn from(raw: String) -> Self {
    match raw.as_str() {
      "PENDIENTE" => OrderStatus::Pending,
      "CONFIRMADA" => OrderStatus::Confirmed,
      "PROCESANDO" => OrderStatus::Processing,
      "ENVIADA" => OrderStatus::Shipped,
      "ENTREGADA" => OrderStatus::Delivered,
      "CANCELADA" => OrderStatus::Cancelled,
      "DEVUELTA" => OrderStatus::Returned,
      _ => OrderStatus::Other(raw),
    }
  }
}

impl From<&str> for OrderStatus {
  fn from(raw: &str) -> Self {
    OrderStatus::from(raw.to_string())
  }
}

impl From<OrderStatus> for String {
  fn from(status: OrderStatus) -> Self {
    match status {
      OrderStatus::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
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
  #[serde(rename = "precioUnitario")]
  pub unit_price: Decimal,
  pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(rename = "numeroOrden", default, skip_serializing_if = "Option::is_none")]
  pub order_number: Option<String>,
  #[serde(rename = "usuarioId", default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<i64>,
  #[serde(rename = "usuarioNombre", default, skip_serializing_if = "Option::is_none")]
  pub user_name: Option<String>,
  #[serde(rename = "estado")]
  pub status: OrderStatus,
  pub subtotal: Decimal,
  #[serde(rename = "costoEnvio", default)]
  pub shipping_cost: Decimal,
  #[serde(rename = "impuestos", default)]
  pub taxes: Decimal,
  pub total: Decimal,
  #[serde(rename = "metodoPago", default, skip_serializing_if = "Option::is_none")]
  pub payment_method: Option<String>,
  #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
  #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<NaiveDateTime>,
  #[serde(rename = "fechaActualizacion", default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<NaiveDateTime>,
  #[serde(rename = "direccionEnvio", default, skip_serializing_if = "Option::is_none")]
  pub shipping_address: Option<Address>,
  #[serde(default)]
  pub items: Vec<OrderItem>,
}

impl Order {
  /// Units across all lines.
  pub fn unit_count(&self) -> u32 {
    self.items.iter().map(|item| item.quantity).sum()
  }

  /// Order number for display, falling back to the numeric id.
  pub fn display_number(&self) -> String {
    match (&self.order_number, self.id) {
      (Some(number), _) => number.clone(),
      (None, Some(id)) => format!("#{}", id),
      (None, None) => "(sin número)".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
  #[serde(rename = "direccionEnvioId")]
  pub shipping_address_id: i64,
  #[serde(rename = "metodoPago")]
  pub payment_method: String,
  #[serde(rename = "notas")]
  pub notes: String,
}
