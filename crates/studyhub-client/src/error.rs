//! Error taxonomy for the gateway and session layers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Network/connectivity failure, or a non-2xx reply with no structured
  /// error body.
  #[error("transport failure: {0}")]
  Transport(String),

  /// Structured `{error: {code, message}}` reply from the backend.
  #[error("{message}")]
  Remote { code: u16, message: String },

  /// The backend rejected the credential. By the time this surfaces, the
  /// gateway has already cleared the session vault; callers route back to
  /// the login screen.
  #[error("session expired: {message}")]
  AuthExpired { message: String },

  #[error("decoding response: {0}")]
  Decode(#[from] serde_json::Error),

  /// Reading or writing the durable session state.
  #[error("session storage: {0}")]
  Vault(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
  fn from(err: reqwest::Error) -> Self {
    Self::Transport(err.to_string())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
