//! The fixed instruction template sent to the model.

/// Render the instruction for `prompt`, embedding it verbatim.
///
/// The template asks for bare SQL; whatever extra prose the model returns
/// anyway is passed through to the caller untouched.
pub fn render_instruction(prompt: &str) -> String {
  format!(
    "Convert the following English text to a SQL query. \
     Only return the SQL query without any explanation: \"{prompt}\""
  )
}
