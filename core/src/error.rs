// storefront/src/error.rs
use std::fmt;
use thiserror::Error;

/// Message shown when the backend could not be reached or answered without an `error` field.
pub const GENERIC_TRANSPORT_MESSAGE: &str = "Could not reach the store service. Please try again.";

/// Failure of a single remote call.
///
/// The backend reports errors as `{"error": "..."}`. When that message is present it is
/// surfaced verbatim; otherwise `fallback` is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
  /// HTTP status, absent for transport-level failures (connection refused, DNS, ...).
  pub status: Option<u16>,
  pub server_message: Option<String>,
  pub fallback: String,
}

impl RemoteError {
  pub fn transport(detail: impl fmt::Display) -> Self {
    tracing::debug!(%detail, "transport failure");
    Self {
      status: None,
      server_message: None,
      fallback: GENERIC_TRANSPORT_MESSAGE.to_string(),
    }
  }

  pub fn server(status: u16, server_message: Option<String>) -> Self {
    Self {
      status: Some(status),
      server_message,
      fallback: format!("The store service answered with HTTP {}.", status),
    }
  }

  /// The text a user should see: the server-supplied message, or the fallback.
  pub fn user_message(&self) -> &str {
    self.server_message.as_deref().unwrap_or(&self.fallback)
  }
}

impl fmt::Display for RemoteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.status {
      Some(status) => write!(f, "remote error (HTTP {}): {}", status, self.user_message()),
      None => write!(f, "remote error: {}", self.user_message()),
    }
  }
}

impl std::error::Error for RemoteError {}

/// Errors raised by the flow engine itself rather than by step handlers.
#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Step not found: {step_name}")]
  StepNotFound { step_name: String },

  #[error("Handler missing for required step: {step_name}")]
  HandlerMissing { step_name: String },
}

#[derive(Debug, Error)]
pub enum StorefrontError {
  /// Client-side validation; never reaches the network.
  #[error("Validation error: {0}")]
  Validation(String),

  #[error(transparent)]
  Remote(#[from] RemoteError),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("A checkout submission is already in progress")]
  SubmissionInProgress,

  #[error("Flow error: {source}")]
  Flow {
    #[from]
    source: FlowError,
  },

  #[error("Internal error: {0}")]
  Internal(#[from] anyhow::Error),
}

impl StorefrontError {
  /// Text suitable for a dismissible notification.
  pub fn user_message(&self) -> String {
    match self {
      StorefrontError::Validation(m) => m.clone(),
      StorefrontError::Remote(remote) => remote.user_message().to_string(),
      other => other.to_string(),
    }
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, StorefrontError::Validation(_))
  }
}

pub type Result<T, E = StorefrontError> = std::result::Result<T, E>;
