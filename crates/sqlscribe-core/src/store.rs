//! The `HistoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `sqlscribe-store-sqlite`). The view layer depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{history::History, record::Translation};

/// Abstraction over the persisted translation history.
///
/// The backing store holds one serialised [`History`] in a single named
/// slot; every write replaces the whole value. The store is the single
/// source of truth — callers adopt what it returns instead of maintaining
/// a hand-synced duplicate.
///
/// All methods return `Send` futures so the trait can be used from spawned
/// tasks.
pub trait HistoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the full persisted history, newest first. An absent slot reads
  /// as an empty history.
  fn read_all(
    &self,
  ) -> impl Future<Output = Result<History, Self::Error>> + Send + '_;

  /// Prepend `record` and write the full history back, replacing the prior
  /// serialised value. Returns the history exactly as written.
  fn append(
    &self,
    record: Translation,
  ) -> impl Future<Output = Result<History, Self::Error>> + Send + '_;

  /// Overwrite the slot with an explicitly empty history. Irreversible; a
  /// confirmation step, if any, belongs to the interaction layer.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
