//! `sqlscribe` — terminal UI for English-to-SQL translation.
//!
//! # Usage
//!
//! ```
//! sqlscribe --api-key <KEY>
//! sqlscribe --config ~/.config/sqlscribe/config.toml
//! ```

mod app;
mod ui;

use std::{
  fs, io,
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use sqlscribe_genai::{DEFAULT_API_URL, GenAiClient, GenAiConfig};
use sqlscribe_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sqlscribe", about = "Terminal UI for English-to-SQL translation")]
struct Args {
  /// Path to a TOML config file (api_key, api_url, db_path).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// API key for the generative endpoint.
  #[arg(long, env = "SQLSCRIBE_API_KEY")]
  api_key: Option<String>,

  /// Endpoint URL (default: the hosted generateContent endpoint).
  #[arg(long, env = "SQLSCRIBE_API_URL")]
  api_url: Option<String>,

  /// Path to the history database
  /// (default: ~/.local/share/sqlscribe/history.db).
  #[arg(long, env = "SQLSCRIBE_DB", value_name = "FILE")]
  db: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  api_key: String,
  #[serde(default)]
  api_url: String,
  #[serde(default)]
  db_path: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_key = args
    .api_key
    .or_else(|| (!file_cfg.api_key.is_empty()).then(|| file_cfg.api_key.clone()))
    .unwrap_or_default();
  if api_key.is_empty() {
    anyhow::bail!(
      "no API key configured; pass --api-key, set SQLSCRIBE_API_KEY, \
       or add api_key to the config file"
    );
  }

  let api_url = args
    .api_url
    .or_else(|| (!file_cfg.api_url.is_empty()).then(|| file_cfg.api_url.clone()))
    .unwrap_or_else(|| DEFAULT_API_URL.to_string());

  let db_path = args
    .db
    .or_else(|| {
      (!file_cfg.db_path.is_empty()).then(|| PathBuf::from(&file_cfg.db_path))
    })
    .unwrap_or_else(|| PathBuf::from("~/.local/share/sqlscribe/history.db"));
  let db_path = expand_tilde(&db_path);

  let data_dir = db_path
    .parent()
    .map(Path::to_path_buf)
    .unwrap_or_else(|| PathBuf::from("."));
  fs::create_dir_all(&data_dir)
    .with_context(|| format!("creating data directory {data_dir:?}"))?;

  init_tracing(&data_dir.join("sqlscribe.log"))?;

  // Open the history store and build the endpoint client.
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open history store at {db_path:?}"))?;
  let client = GenAiClient::new(GenAiConfig { api_url, api_key })
    .context("failed to build HTTP client")?;

  let mut app = App::new(client, store);
  app.load_history().await;

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Adopt the outcome of a finished translation, if one arrived.
    app.poll_translation().await;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Initialise tracing to a log file — the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<()> {
  let file = fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("opening log file {path:?}"))?;
  let file = Arc::new(file);

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(move || Arc::clone(&file))
    .with_ansi(false)
    .init();
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
