// storefront/src/gateway/client.rs

use crate::config::ClientConfig;
use crate::error::{RemoteError, Result, StorefrontError};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{field, info_span, Instrument};
use url::Url;

/// Shape of server-originated error bodies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: Option<String>,
}

/// Thin wrapper around `reqwest::Client` bound to the storefront base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
  http: reqwest::Client,
  base: Url,
  token: Option<String>,
}

impl ApiClient {
  pub fn from_config(config: &ClientConfig) -> Result<Self> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout {
      builder = builder.timeout(timeout);
    }
    let http = builder
      .build()
      .map_err(|e| StorefrontError::Config(format!("Failed to build HTTP client: {}", e)))?;
    Ok(Self::new(http, config.api_base_url.clone(), config.api_token.clone()))
  }

  pub fn new(http: reqwest::Client, base: Url, token: Option<String>) -> Self {
    Self { http, base, token }
  }

  pub fn base_url(&self) -> &Url {
    &self.base
  }

  /// Joins `segments` onto the base URL, keeping any path prefix the base already has.
  pub fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
    let mut url = self.base.clone();
    url
      .path_segments_mut()
      .map_err(|_| RemoteError::transport(format!("base URL '{}' cannot carry a path", self.base)))?
      .pop_if_empty()
      .extend(segments);
    Ok(url)
  }

  pub fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, RemoteError> {
    let url = self.endpoint(segments)?;
    let builder = self.http.request(method, url);
    Ok(match &self.token {
      Some(token) => builder.bearer_auth(token),
      None => builder,
    })
  }

  /// Sends the request and turns non-2xx answers into `RemoteError`.
  pub async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
    let request = builder.build().map_err(RemoteError::transport)?;
    let span = info_span!(
      "outgoing_http",
      http.method = %request.method(),
      http.url = %request.url(),
      http.status_code = field::Empty,
    );

    async move {
      let response = self.http.execute(request).await.map_err(|e| {
        tracing::warn!(error = %e, "request did not complete");
        RemoteError::transport(e)
      })?;

      let status = response.status();
      tracing::Span::current().record("http.status_code", status.as_u16());
      if status.is_success() {
        return Ok(response);
      }

      let body = response.bytes().await.unwrap_or_default();
      let server_message = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty());
      tracing::warn!(status = status.as_u16(), server_message = ?server_message, "request failed");
      Err(RemoteError::server(status.as_u16(), server_message))
    }
    .instrument(span)
    .await
  }

  pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, RemoteError> {
    self
      .send_optional_json(builder)
      .await?
      .ok_or_else(|| decode_failure("empty body where a JSON document was expected"))
  }

  /// Like `send_json`, but an empty body, a `null` document or a 204 yields `None`.
  pub async fn send_optional_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Option<T>, RemoteError> {
    let response = self.send(builder).await?;
    let status = response.status();
    let body = response.bytes().await.map_err(RemoteError::transport)?;
    if status == reqwest::StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
      return Ok(None);
    }
    serde_json::from_slice::<Option<T>>(&body).map_err(decode_failure)
  }

  pub async fn send_empty(&self, builder: RequestBuilder) -> Result<(), RemoteError> {
    self.send(builder).await.map(|_| ())
  }
}

fn decode_failure(detail: impl std::fmt::Display) -> RemoteError {
  tracing::warn!(%detail, "could not decode response");
  RemoteError {
    status: None,
    server_message: None,
    fallback: "The store service sent a response this client could not read.".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn endpoint_keeps_base_prefix() {
    let client = ApiClient::new(
      reqwest::Client::new(),
      Url::parse("https://shop.example.com/backend/").unwrap(),
      None,
    );
    let url = client.endpoint(&["api", "carrito", "items", "42"]).unwrap();
    assert_eq!(url.as_str(), "https://shop.example.com/backend/api/carrito/items/42");
  }

  #[test]
  fn endpoint_on_bare_host() {
    let client = ApiClient::new(reqwest::Client::new(), Url::parse("http://localhost:8080").unwrap(), None);
    let url = client.endpoint(&["api", "ordenes", "todas"]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/ordenes/todas");
  }
}
