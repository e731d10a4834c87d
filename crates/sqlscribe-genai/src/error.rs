//! Error type for `sqlscribe-genai`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport-level failure: connect, timeout, body read, JSON decode.
  #[error("request error: {0}")]
  Http(#[from] reqwest::Error),

  /// The endpoint answered with a non-success status.
  #[error("endpoint returned {0}")]
  Status(reqwest::StatusCode),

  /// The response decoded, but held no candidate text at the expected path.
  #[error("response held no candidate text")]
  UnexpectedShape,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
