//! Integration tests for `SqliteStore` against an in-memory database.

use sqlscribe_core::{Translation, store::HistoryStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(prompt: &str, sql: &str) -> Translation {
  Translation::new(prompt, sql)
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_store_reads_empty() {
  let s = store().await;
  let history = s.read_all().await.unwrap();
  assert!(history.is_empty());
}

#[tokio::test]
async fn append_then_read_roundtrip() {
  let s = store().await;

  let r = record("show all users older than 30", "SELECT * FROM users WHERE age > 30;");
  s.append(r.clone()).await.unwrap();

  let history = s.read_all().await.unwrap();
  assert_eq!(history.len(), 1);
  assert_eq!(history.translations[0].id, r.id);
  assert_eq!(history.translations[0].prompt, r.prompt);
  assert_eq!(history.translations[0].sql, r.sql);
  // Millisecond precision is the persisted granularity.
  assert_eq!(
    history.translations[0].timestamp.timestamp_millis(),
    r.timestamp.timestamp_millis()
  );
}

// ─── Append ordering ─────────────────────────────────────────────────────────

#[tokio::test]
async fn append_prepends_newest_first() {
  let s = store().await;

  let r1 = record("count the orders", "SELECT COUNT(*) FROM orders;");
  let r2 = record("list products", "SELECT * FROM products;");

  s.append(r1.clone()).await.unwrap();
  let after_second = s.append(r2.clone()).await.unwrap();

  // append returns the history exactly as written.
  assert_eq!(after_second.len(), 2);
  assert_eq!(after_second.translations[0].id, r2.id);
  assert_eq!(after_second.translations[1].id, r1.id);

  let read_back = s.read_all().await.unwrap();
  assert_eq!(read_back.translations[0].id, r2.id);
  assert_eq!(read_back.translations[1].id, r1.id);
}

#[tokio::test]
async fn append_same_record_twice_keeps_both() {
  let s = store().await;

  let r = record("list products", "SELECT * FROM products;");
  s.append(r.clone()).await.unwrap();
  let history = s.append(r.clone()).await.unwrap();

  // No deduplication: two identical entries.
  assert_eq!(history.len(), 2);
  assert_eq!(history.translations[0].id, r.id);
  assert_eq!(history.translations[1].id, r.id);
}

// ─── Clear ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn clear_empties_regardless_of_prior_contents() {
  let s = store().await;

  s.append(record("a", "SELECT 1;")).await.unwrap();
  s.append(record("b", "SELECT 2;")).await.unwrap();

  s.clear().await.unwrap();
  assert!(s.read_all().await.unwrap().is_empty());

  // Clearing an already-empty store is fine too.
  s.clear().await.unwrap();
  assert!(s.read_all().await.unwrap().is_empty());
}

// ─── Persisted layout ────────────────────────────────────────────────────────

#[test]
fn persisted_shape_matches_slot_layout() {
  let r = record("show all users older than 30", "SELECT * FROM users WHERE age > 30;");
  let value = serde_json::to_value(&r).unwrap();

  assert!(value["id"].is_string());
  assert_eq!(value["prompt"], "show all users older than 30");
  assert_eq!(value["sql"], "SELECT * FROM users WHERE age > 30;");
  assert!(value["timestamp"].is_number());
}

#[tokio::test]
async fn corrupt_slot_surfaces_as_json_error() {
  let s = store().await;
  s.write_slot("not a history blob".into()).await.unwrap();

  let err = s.read_all().await.unwrap_err();
  assert!(matches!(err, crate::Error::Json(_)));
}
