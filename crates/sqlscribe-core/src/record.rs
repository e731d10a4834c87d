//! Translation record — the sole persisted entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored English-prompt-to-SQL-text pairing.
///
/// `timestamp` serialises as integer Unix milliseconds so the on-disk JSON
/// keeps the `{id, prompt, sql, timestamp}` slot layout with a numeric
/// timestamp field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
  pub id:        Uuid,
  /// Original English input, non-empty after trimming.
  pub prompt:    String,
  /// Generated output text, stored verbatim as returned by the model.
  pub sql:       String,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub timestamp: DateTime<Utc>,
}

impl Translation {
  /// Build a record for `prompt` and `sql`, stamped with the current time.
  pub fn new(prompt: impl Into<String>, sql: impl Into<String>) -> Self {
    Self {
      id:        Uuid::new_v4(),
      prompt:    prompt.into(),
      sql:       sql.into(),
      timestamp: Utc::now(),
    }
  }
}
