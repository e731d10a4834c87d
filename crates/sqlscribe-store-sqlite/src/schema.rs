//! SQL schema for the sqlscribe SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One serialised History JSON blob per named slot. Writes always replace
-- the whole value; no row-level history operations exist.
CREATE TABLE IF NOT EXISTS slots (
    slot_key  TEXT PRIMARY KEY,
    value     TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// The single slot holding the translation history.
pub const HISTORY_SLOT: &str = "sql_translator_history";
