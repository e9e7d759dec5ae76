// storefront/src/config.rs

use crate::error::{Result, StorefrontError};
use crate::models::money::DEFAULT_TAX_RATE;
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub api_base_url: Url,
  /// Sent as `Authorization: Bearer <token>` when present.
  pub api_token: Option<String>,
  /// `None` leaves the transport default in place.
  pub request_timeout: Option<Duration>,
  pub tax_rate: Decimal,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
      api_token: None,
      request_timeout: None,
      tax_rate: DEFAULT_TAX_RATE,
    }
  }
}

impl ClientConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    let config = Self::from_lookup(|name| env::var(name).ok())?;
    tracing::info!(api_base_url = %config.api_base_url, "Storefront client configuration loaded.");
    Ok(config)
  }

  /// Builds a configuration from an arbitrary variable source.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    let api_base_url = match non_empty("STOREFRONT_API_URL") {
      Some(raw) => parse_base_url(&raw)?,
      None => parse_base_url(DEFAULT_API_URL)?,
    };

    let api_token = non_empty("STOREFRONT_API_TOKEN");

    let request_timeout = non_empty("STOREFRONT_TIMEOUT_SECS")
      .map(|raw| {
        raw
          .trim()
          .parse::<u64>()
          .map(Duration::from_secs)
          .map_err(|e| StorefrontError::Config(format!("Invalid STOREFRONT_TIMEOUT_SECS '{}': {}", raw, e)))
      })
      .transpose()?;

    let tax_rate = match non_empty("STOREFRONT_TAX_RATE") {
      Some(raw) => parse_tax_rate(&raw)?,
      None => DEFAULT_TAX_RATE,
    };

    Ok(Self {
      api_base_url,
      api_token,
      request_timeout,
      tax_rate,
    })
  }
}

pub fn parse_base_url(raw: &str) -> Result<Url> {
  let url = Url::parse(raw.trim())
    .map_err(|e| StorefrontError::Config(format!("Invalid STOREFRONT_API_URL '{}': {}", raw, e)))?;
  if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
    return Err(StorefrontError::Config(format!(
      "STOREFRONT_API_URL must be an http(s) URL, got '{}'",
      raw
    )));
  }
  Ok(url)
}

/// Parses a tax rate in `[0, 1)`.
pub fn parse_tax_rate(raw: &str) -> Result<Decimal> {
  let rate = Decimal::from_str(raw.trim())
    .map_err(|e| StorefrontError::Config(format!("Invalid STOREFRONT_TAX_RATE '{}': {}", raw, e)))?;
  if rate.is_sign_negative() || rate >= Decimal::ONE {
    return Err(StorefrontError::Config(format!(
      "STOREFRONT_TAX_RATE must be in [0, 1), got {}",
      rate
    )));
  }
  Ok(rate)
}
