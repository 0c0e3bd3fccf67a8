use serde_json::Value;

use crate::models::{ParseError, ValidationOutcome};

/// One document: user-supplied text plus the result of the latest parse.
///
/// Invariant: once `raw_text` is non-empty, exactly one of `parsed` /
/// `parse_error` is set. Whitespace-only text counts as empty and clears
/// both.
#[derive(Debug, Clone, Default)]
pub struct JsonDocument {
  raw_text: String,
  parsed: Option<Value>,
  parse_error: Option<ParseError>,
}

impl JsonDocument {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_text(text: impl Into<String>) -> Self {
    let mut doc = Self::default();
    doc.set_text(text.into());
    doc
  }

  /// Replace the text and re-parse.
  pub fn set_text(&mut self, text: String) -> ValidationOutcome {
    self.raw_text = text;
    if self.raw_text.trim().is_empty() {
      self.parsed = None;
      self.parse_error = None;
      return ValidationOutcome::Empty;
    }
    match serde_json::from_str::<Value>(&self.raw_text) {
      Ok(value) => {
        self.parsed = Some(value);
        self.parse_error = None;
        ValidationOutcome::Valid
      }
      Err(e) => {
        let error = ParseError {
          line: e.line(),
          column: e.column(),
          message: e.to_string(),
        };
        self.parsed = None;
        self.parse_error = Some(error.clone());
        ValidationOutcome::Invalid { error }
      }
    }
  }

  /// Replace the document with an already-parsed value; the text becomes the
  /// pretty rendering at the given indent.
  pub fn set_value(&mut self, value: Value, indent: usize) {
    self.raw_text = crate::transform::to_pretty(&value, indent);
    self.parsed = Some(value);
    self.parse_error = None;
  }

  pub fn raw_text(&self) -> &str {
    &self.raw_text
  }

  pub fn parsed(&self) -> Option<&Value> {
    self.parsed.as_ref()
  }

  pub fn parse_error(&self) -> Option<&ParseError> {
    self.parse_error.as_ref()
  }

  pub fn is_empty(&self) -> bool {
    self.raw_text.trim().is_empty()
  }
}
