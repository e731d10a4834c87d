//! History — the ordered collection of translation records, newest first.

use serde::{Deserialize, Serialize};

use crate::record::Translation;

/// All recorded translations, newest first.
///
/// Insertion always prepends. No reordering, no deduplication, no size cap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
  pub translations: Vec<Translation>,
}

impl History {
  /// Insert `record` at the front (most recent first).
  pub fn prepend(&mut self, record: Translation) {
    self.translations.insert(0, record);
  }

  pub fn len(&self) -> usize {
    self.translations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.translations.is_empty()
  }
}
