//! Client for the generative-text endpoint that turns English into SQL.
//!
//! One request, one response: render the fixed instruction template, POST
//! it, extract the first candidate's first text part. No retries, no
//! backoff, no validation of the returned SQL.

mod client;
mod template;
mod wire;

pub mod error;

pub use client::{DEFAULT_API_URL, GenAiClient, GenAiConfig};
pub use error::{Error, Result};
pub use template::render_instruction;

#[cfg(test)]
mod tests;
