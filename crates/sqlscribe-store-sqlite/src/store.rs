//! [`SqliteStore`] — the SQLite implementation of [`HistoryStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use sqlscribe_core::{History, Translation, store::HistoryStore};

use crate::{
  Error, Result,
  schema::{HISTORY_SLOT, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A translation history backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn =
      tokio_rusqlite::Connection::open(path.as_ref().to_path_buf()).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read the raw slot value, or `None` if the slot has never been written.
  async fn read_slot(&self) -> Result<Option<String>> {
    let raw = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT value FROM slots WHERE slot_key = ?1",
              rusqlite::params![HISTORY_SLOT],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(raw)
  }

  /// Replace the slot value wholesale.
  pub(crate) async fn write_slot(&self, value: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO slots (slot_key, value) VALUES (?1, ?2)
           ON CONFLICT (slot_key) DO UPDATE SET value = excluded.value",
          rusqlite::params![HISTORY_SLOT, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── HistoryStore impl ───────────────────────────────────────────────────────

impl HistoryStore for SqliteStore {
  type Error = Error;

  async fn read_all(&self) -> Result<History> {
    match self.read_slot().await? {
      Some(raw) => Ok(serde_json::from_str(&raw)?),
      None => Ok(History::default()),
    }
  }

  async fn append(&self, record: Translation) -> Result<History> {
    // Read-modify-write of the whole blob. Not atomic across process
    // crashes; the store is only ever touched from one interaction loop.
    let mut history = self.read_all().await?;
    history.prepend(record);
    self.write_slot(serde_json::to_string(&history)?).await?;
    Ok(history)
  }

  async fn clear(&self) -> Result<()> {
    self
      .write_slot(serde_json::to_string(&History::default())?)
      .await
  }
}
