//! Request and response shapes for the `generateContent` endpoint.
//!
//! Only the consumed path is modelled; unknown response fields are ignored.
//! Missing structure decodes to empty collections so the caller can fail
//! explicitly instead of faulting on field access.

use serde::{Deserialize, Serialize};

// ─── Request ─────────────────────────────────────────────────────────────────

/// Request body: a list of content blocks, each a list of text parts.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
  pub contents: Vec<Content>,
}

impl GenerateContentRequest {
  /// Wrap a fully-rendered instruction as the sole content part.
  pub fn single_text(text: impl Into<String>) -> Self {
    Self {
      contents: vec![Content {
        parts: vec![Part { text: text.into() }],
      }],
    }
  }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Content {
  #[serde(default)]
  pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
  pub text: String,
}

// ─── Response ────────────────────────────────────────────────────────────────

/// Response body. The first candidate's first text part is the only field
/// this system consumes.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
  #[serde(default)]
  pub content: Content,
}

impl GenerateContentResponse {
  /// The first candidate's first text part, if the response has one.
  pub fn first_text(&self) -> Option<&str> {
    self
      .candidates
      .first()?
      .content
      .parts
      .first()
      .map(|part| part.text.as_str())
  }
}
