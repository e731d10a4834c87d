//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use sqlscribe_core::{History, Translation, store::HistoryStore};
use sqlscribe_genai::GenAiClient;
use sqlscribe_store_sqlite::SqliteStore;
use tokio::sync::oneshot;

/// The static message shown when generation fails.
pub const GENERATION_ERROR_MSG: &str =
  "Error generating SQL query. Please try again.";

/// Outcome of a spawned translation: the submitted prompt plus the result.
type TranslationOutcome = (String, sqlscribe_genai::Result<String>);

// ─── Focus ────────────────────────────────────────────────────────────────────

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  /// Typing into the English prompt box.
  Prompt,
  /// Navigating the history list.
  History,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current keyboard focus.
  pub focus: Focus,

  /// Text in the English prompt box.
  pub input: String,

  /// Last-produced result text (generated SQL, or the static error message).
  pub result: Option<String>,

  /// Whether `result` holds the static error message rather than SQL.
  pub result_is_error: bool,

  /// True from submission until the outcome arrives. Blocks re-submission
  /// while a call is outstanding.
  pub in_flight: bool,

  /// Cached view of the persisted history. Re-adopted from the store after
  /// every mutation — never hand-edited.
  pub history: History,

  /// Current fuzzy-filter string (being edited while `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* history list.
  pub list_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Armed by the first clear-history keypress; the next key resolves it.
  pub confirm_clear: bool,

  /// Shared HTTP client.
  client: Arc<GenAiClient>,

  /// Persisted history store — the single source of truth.
  store: SqliteStore,

  /// Receiver for the in-flight translation, if any.
  pending: Option<oneshot::Receiver<TranslationOutcome>>,
}

impl App {
  /// Create an [`App`] with an empty history view.
  pub fn new(client: GenAiClient, store: SqliteStore) -> Self {
    Self {
      focus: Focus::Prompt,
      input: String::new(),
      result: None,
      result_is_error: false,
      in_flight: false,
      history: History::default(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      status_msg: String::new(),
      confirm_clear: false,
      client: Arc::new(client),
      store,
      pending: None,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Populate the view from the store. Called once at startup; a failure
  /// (e.g. a corrupt slot) leaves the view empty and is not fatal.
  pub async fn load_history(&mut self) {
    match self.store.read_all().await {
      Ok(history) => {
        self.history = history;
        self.list_cursor = 0;
      }
      Err(e) => {
        tracing::warn!(error = %e, "failed to load history");
        self.status_msg = format!("History unavailable: {e}");
      }
    }
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// History records matching the current filter query, newest first.
  pub fn filtered(&self) -> Vec<&Translation> {
    if self.filter.is_empty() {
      return self.history.translations.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .history
      .translations
      .iter()
      .filter(|t| {
        matcher.fuzzy_match(&t.prompt, &self.filter).is_some()
          || matcher.fuzzy_match(&t.sql, &self.filter).is_some()
      })
      .collect()
  }

  /// The record under the list cursor in the filtered view, if any.
  pub fn selected(&self) -> Option<&Translation> {
    self.filtered().get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return Ok(false);
    }

    // An armed clear-history is resolved by the next keypress.
    if self.confirm_clear {
      self.confirm_clear = false;
      if key.code == KeyCode::Char('d') {
        self.clear_history().await;
      } else {
        self.status_msg.clear();
      }
      return Ok(true);
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      return Ok(self.handle_filter_key(key));
    }

    match self.focus {
      Focus::Prompt => Ok(self.handle_prompt_key(key)),
      Focus::History => Ok(self.handle_history_key(key)),
    }
  }

  fn handle_prompt_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Tab => self.focus = Focus::History,
      KeyCode::Enter => self.submit(),
      KeyCode::Backspace => {
        self.input.pop();
      }
      KeyCode::Esc => self.input.clear(),
      KeyCode::Char(c) => self.input.push(c),
      _ => {}
    }
    true
  }

  fn handle_history_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Back to the prompt box
      KeyCode::Tab | KeyCode::Esc => self.focus = Focus::Prompt,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
        }
      }

      // Copy the selected record's SQL
      KeyCode::Char('y') => self.copy_selected(),

      // Clear history (armed; the next `d` confirms)
      KeyCode::Char('d') => {
        if !self.history.is_empty() {
          self.confirm_clear = true;
          self.status_msg = "Press d again to clear all history".into();
        }
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }

      _ => {}
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    true
  }

  // ── Translation ───────────────────────────────────────────────────────────

  /// Issue the translation call, if the input qualifies.
  ///
  /// Empty or whitespace-only input is a no-op (no network call is made),
  /// as is a submission while a call is already in flight.
  fn submit(&mut self) {
    let prompt = self.input.trim().to_string();
    if prompt.is_empty() || self.in_flight {
      return;
    }

    self.in_flight = true;
    self.status_msg = "Translating…".into();

    let (tx, rx) = oneshot::channel();
    self.pending = Some(rx);

    let client = Arc::clone(&self.client);
    tokio::spawn(async move {
      let outcome = client.translate(&prompt).await;
      // The receiver is gone if the app already quit; nothing to do then.
      let _ = tx.send((prompt, outcome));
    });
  }

  /// Adopt the outcome of a finished translation, if one is ready.
  ///
  /// Called once per event-loop tick. Success appends to the store and
  /// adopts the history it returns; failure shows the static message and
  /// leaves the history untouched.
  pub async fn poll_translation(&mut self) {
    let Some(rx) = self.pending.as_mut() else {
      return;
    };

    let (prompt, outcome) = match rx.try_recv() {
      Ok(msg) => msg,
      Err(oneshot::error::TryRecvError::Empty) => return,
      Err(oneshot::error::TryRecvError::Closed) => {
        // The task died before sending; treat it like any other failure.
        tracing::warn!("translation task dropped its result channel");
        self.pending = None;
        self.in_flight = false;
        self.result = Some(GENERATION_ERROR_MSG.into());
        self.result_is_error = true;
        self.status_msg.clear();
        return;
      }
    };

    self.pending = None;
    self.in_flight = false;
    self.status_msg.clear();

    match outcome {
      Ok(sql) => {
        self.result = Some(sql.clone());
        self.result_is_error = false;
        match self.store.append(Translation::new(prompt, sql)).await {
          Ok(history) => {
            self.history = history;
            self.list_cursor = 0;
          }
          Err(e) => {
            tracing::warn!(error = %e, "failed to persist translation");
            self.status_msg = format!("History not saved: {e}");
          }
        }
      }
      Err(e) => {
        tracing::warn!(error = %e, "translation failed");
        self.result = Some(GENERATION_ERROR_MSG.into());
        self.result_is_error = true;
      }
    }
  }

  // ── History actions ───────────────────────────────────────────────────────

  /// Clear the persisted history, then re-read it from the store.
  async fn clear_history(&mut self) {
    if let Err(e) = self.store.clear().await {
      tracing::warn!(error = %e, "failed to clear history");
      self.status_msg = format!("Clear failed: {e}");
      return;
    }
    match self.store.read_all().await {
      Ok(history) => {
        self.history = history;
        self.list_cursor = 0;
        self.filter.clear();
        self.status_msg = "History cleared".into();
      }
      Err(e) => {
        tracing::warn!(error = %e, "failed to re-read history");
        self.status_msg = format!("History unavailable: {e}");
      }
    }
  }

  /// Copy the selected record's SQL to the system clipboard.
  fn copy_selected(&mut self) {
    let Some(sql) = self.selected().map(|t| t.sql.clone()) else {
      return;
    };
    match cli_clipboard::set_contents(sql) {
      Ok(()) => self.status_msg = "Copied to clipboard".into(),
      Err(e) => {
        tracing::warn!(error = %e, "clipboard write failed");
        self.status_msg = "Clipboard unavailable".into();
      }
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use sqlscribe_genai::{GenAiClient, GenAiConfig};
  use sqlscribe_store_sqlite::SqliteStore;

  use super::App;

  async fn app() -> App {
    let client = GenAiClient::new(GenAiConfig {
      api_url: "http://localhost:9".into(),
      api_key: "test-key".into(),
    })
    .expect("client");
    let store = SqliteStore::open_in_memory().await.expect("store");
    App::new(client, store)
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn empty_input_submits_nothing() {
    let mut a = app().await;
    a.input = "   ".into();
    a.submit();
    assert!(!a.in_flight);
    assert!(a.pending.is_none());
    assert!(a.history.is_empty());
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn in_flight_blocks_resubmission() {
    let mut a = app().await;
    a.in_flight = true;
    a.input = "list products".into();
    a.submit();
    assert!(a.pending.is_none());
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn successful_translation_prepends_history() {
    let mut a = app().await;
    let (tx, rx) = tokio::sync::oneshot::channel();
    a.pending = Some(rx);
    a.in_flight = true;
    tx.send((
      "show all users older than 30".into(),
      Ok("SELECT * FROM users WHERE age > 30;".into()),
    ))
    .unwrap();

    a.poll_translation().await;

    assert!(!a.in_flight);
    assert_eq!(
      a.result.as_deref(),
      Some("SELECT * FROM users WHERE age > 30;")
    );
    assert!(!a.result_is_error);
    assert_eq!(a.history.len(), 1);
    assert_eq!(a.history.translations[0].prompt, "show all users older than 30");
    assert_eq!(a.history.translations[0].sql, "SELECT * FROM users WHERE age > 30;");
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn failed_translation_shows_message_and_skips_history() {
    let mut a = app().await;
    let (tx, rx) = tokio::sync::oneshot::channel();
    a.pending = Some(rx);
    a.in_flight = true;
    tx.send((
      "list users".into(),
      Err(sqlscribe_genai::Error::UnexpectedShape),
    ))
    .unwrap();

    a.poll_translation().await;

    assert!(!a.in_flight);
    assert_eq!(a.result.as_deref(), Some(super::GENERATION_ERROR_MSG));
    assert!(a.result_is_error);
    assert!(a.history.is_empty());
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn clear_requires_confirmation() {
    use crossterm::event::{KeyCode, KeyEvent};

    let mut a = app().await;
    a.focus = super::Focus::History;
    a.history.prepend(sqlscribe_core::Translation::new("a", "SELECT 1;"));

    // First `d` only arms the confirmation.
    a.handle_key(KeyEvent::from(KeyCode::Char('d'))).await.unwrap();
    assert!(a.confirm_clear);
    assert!(!a.history.is_empty());

    // Any other key cancels.
    a.handle_key(KeyEvent::from(KeyCode::Char('j'))).await.unwrap();
    assert!(!a.confirm_clear);
    assert!(!a.history.is_empty());
  }
}
