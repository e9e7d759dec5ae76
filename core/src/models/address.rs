// storefront/src/models/address.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Shipping address.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<i64>,
  #[serde(rename = "usuarioId", default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<i64>,
  #[serde(rename = "nombreCompleto")]
  pub full_name: String,
  #[serde(rename = "telefono")]
  pub phone: String,
  #[serde(rename = "direccionLinea1")]
  pub line1: String,
  #[serde(rename = "direccionLinea2", default, skip_serializing_if = "Option::is_none")]
  pub line2: Option<String>,
  #[serde(rename = "ciudad")]
  pub city: String,
  #[serde(rename = "estadoProvincia")]
  pub state: String,
  #[serde(rename = "codigoPostal")]
  pub postal_code: String,
  #[serde(rename = "pais")]
  pub country: String,
  #[serde(rename = "esPredeterminada", default)]
  pub is_default: bool,
  #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
  pub created_at: Option<NaiveDateTime>,
}

impl Address {
  /// Names the required fields that are blank.
  pub fn missing_fields(&self) -> Vec<&'static str> {
    [
      ("full_name", &self.full_name),
      ("phone", &self.phone),
      ("line1", &self.line1),
      ("city", &self.city),
      ("state", &self.state),
      ("postal_code", &self.postal_code),
      ("country", &self.country),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect()
  }

  pub fn one_line(&self) -> String {
    let mut parts = vec![self.line1.as_str()];
    if let Some(line2) = self.line2.as_deref().filter(|l| !l.is_empty()) {
      parts.push(line2);
    }
    parts.extend([self.city.as_str(), self.state.as_str(), self.postal_code.as_str(), self.country.as_str()]);
    parts.join(", ")
  }
}
