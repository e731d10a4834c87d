//! Async HTTP client for the generative text endpoint.

use std::time::Duration;

use reqwest::Client;

use crate::{
  Error, Result,
  template::render_instruction,
  wire::{GenerateContentRequest, GenerateContentResponse},
};

/// Default endpoint. Overridable for tests or a different model.
pub const DEFAULT_API_URL: &str =
  "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Connection settings for the generative endpoint.
///
/// The key is provisioned externally before startup; no rotation or
/// validation logic exists.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
  pub api_url: String,
  pub api_key: String,
}

/// Async client for the `generateContent` endpoint.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GenAiClient {
  client: Client,
  config: GenAiConfig,
}

impl GenAiClient {
  pub fn new(config: GenAiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  /// Ask the model to translate `prompt` into SQL.
  ///
  /// Returns the first candidate's first text part verbatim. Any
  /// non-success status, transport failure, or missing structure is an
  /// error; the caller decides what to show and whether to persist.
  /// Callers gate empty input — this method never sees it.
  pub async fn translate(&self, prompt: &str) -> Result<String> {
    let body = GenerateContentRequest::single_text(render_instruction(prompt));

    let resp = self
      .client
      .post(&self.config.api_url)
      .query(&[("key", self.config.api_key.as_str())])
      .json(&body)
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }

    let decoded: GenerateContentResponse = resp.json().await?;
    decoded
      .first_text()
      .map(str::to_owned)
      .ok_or(Error::UnexpectedShape)
  }
}
