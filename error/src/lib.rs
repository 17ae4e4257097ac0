// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use std::fmt;
use thiserror::Error as ThisError;

pub const BAD_REQUEST: u16 = 400;
pub const INTERNAL_SERVER_ERROR: u16 = 500;
pub const BAD_GATEWAY: u16 = 502;

/// Which of the two upstream calls an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Current,
  Forecast,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Phase::Current => write!(f, "current"),
      Phase::Forecast => write!(f, "forecast"),
    }
  }
}

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("Invalid request: {0}")]
  Validation(String),
  #[error("Upstream {phase} request failed: {message}")]
  UpstreamUnavailable {
    phase: Phase,
    status: Option<u16>,
    message: String,
  },
  #[error("Malformed upstream response: {0}")]
  MalformedResponse(String),
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("Invalid API key")]
  InvalidApiKey,
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("HTTP error: {0}")]
  HttpError(#[from] reqwest::Error),
  #[error("Internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn upstream(phase: Phase, status: Option<u16>, message: impl Into<String>) -> Self {
    Error::UpstreamUnavailable {
      phase,
      status,
      message: message.into(),
    }
  }

  /// HTTP status reported to the caller.
  ///
  /// Upstream failures mirror the provider's status when one exists; a
  /// transport failure or timeout has none and becomes 502.
  pub fn status_code(&self) -> u16 {
    match self {
      Error::Validation(_) => BAD_REQUEST,
      Error::UpstreamUnavailable { status, .. } => match status {
        Some(code) if (400..=599).contains(code) => *code,
        _ => BAD_GATEWAY,
      },
      Error::MalformedResponse(_) => BAD_GATEWAY,
      _ => INTERNAL_SERVER_ERROR,
    }
  }

  /// Short label used as the `error` field of the response body.
  pub fn label(&self) -> &'static str {
    match self {
      Error::Validation(_) => "Invalid request",
      Error::UpstreamUnavailable {
        phase: Phase::Current,
        ..
      } => "Weather data not found",
      Error::UpstreamUnavailable {
        phase: Phase::Forecast,
        ..
      } => "Forecast data not found",
      Error::MalformedResponse(_) => "Malformed upstream response",
      _ => "Internal server error",
    }
  }

  /// Message safe to hand back to a caller. Internal failures are masked.
  pub fn public_message(&self) -> String {
    match self {
      Error::Validation(msg) => msg.clone(),
      Error::UpstreamUnavailable { message, .. } => message.clone(),
      Error::MalformedResponse(msg) => msg.clone(),
      _ => "An unexpected error occurred".to_string(),
    }
  }
}
