//! Tests for the instruction template and wire shapes.

use crate::{
  template::render_instruction,
  wire::{GenerateContentRequest, GenerateContentResponse},
};

// ─── Template ────────────────────────────────────────────────────────────────

#[test]
fn instruction_embeds_prompt_verbatim() {
  let rendered = render_instruction("show all users older than 30");
  assert_eq!(
    rendered,
    "Convert the following English text to a SQL query. Only return the \
     SQL query without any explanation: \"show all users older than 30\""
  );
}

#[test]
fn instruction_does_not_escape_prompt_contents() {
  // The prompt is embedded as-is, quotes and all.
  let rendered = render_instruction("find \"orphaned\" rows");
  assert!(rendered.ends_with(": \"find \"orphaned\" rows\""));
}

// ─── Request shape ───────────────────────────────────────────────────────────

#[test]
fn request_serialises_one_content_block_with_one_part() {
  let body = GenerateContentRequest::single_text("instruction text");
  let value = serde_json::to_value(&body).unwrap();

  assert_eq!(
    value,
    serde_json::json!({
      "contents": [{ "parts": [{ "text": "instruction text" }] }]
    })
  );
}

// ─── Response shape ──────────────────────────────────────────────────────────

#[test]
fn first_text_extracts_first_candidate_first_part() {
  let decoded: GenerateContentResponse = serde_json::from_value(serde_json::json!({
    "candidates": [
      {
        "content": {
          "parts": [
            { "text": "SELECT * FROM users WHERE age > 30;" },
            { "text": "-- ignored second part" }
          ]
        }
      },
      { "content": { "parts": [{ "text": "ignored second candidate" }] } }
    ]
  }))
  .unwrap();

  assert_eq!(
    decoded.first_text(),
    Some("SELECT * FROM users WHERE age > 30;")
  );
}

#[test]
fn response_without_candidates_has_no_text() {
  let decoded: GenerateContentResponse =
    serde_json::from_value(serde_json::json!({})).unwrap();
  assert_eq!(decoded.first_text(), None);
}

#[test]
fn candidate_without_parts_has_no_text() {
  let decoded: GenerateContentResponse = serde_json::from_value(serde_json::json!({
    "candidates": [{ "content": {} }]
  }))
  .unwrap();
  assert_eq!(decoded.first_text(), None);
}

#[test]
fn unknown_response_fields_are_ignored() {
  let decoded: GenerateContentResponse = serde_json::from_value(serde_json::json!({
    "candidates": [{
      "content": { "parts": [{ "text": "SELECT 1;" }], "role": "model" },
      "finishReason": "STOP"
    }],
    "usageMetadata": { "totalTokenCount": 12 }
  }))
  .unwrap();
  assert_eq!(decoded.first_text(), Some("SELECT 1;"));
}
