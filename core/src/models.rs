use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which half of a comparison a document belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Side {
  A,
  B,
}

impl fmt::Display for Side {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Side::A => write!(f, "A"),
      Side::B => write!(f, "B"),
    }
  }
}

/// Position and message of a failed parse, 1-based.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseError {
  pub line: usize,
  pub column: usize,
  pub message: String,
}

/// Result of feeding text into a tab or a comparison side. Never an error:
/// invalid input is a value, not a failure of the operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ValidationOutcome {
  /// Text was empty (or whitespace only); neither a value nor an error is held.
  Empty,
  Valid,
  Invalid { error: ParseError },
}

impl ValidationOutcome {
  pub fn is_valid(&self) -> bool {
    matches!(self, ValidationOutcome::Valid)
  }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
  Unchanged,
  Added,
  Removed,
  Modified,
}

/// One row of a computed comparison, as seen from one side.
///
/// `line_number` is 1-based within this side's serialization; `pair_index`
/// is the 0-based row in the aligned array shared by both sides. A row that
/// exists on one side only carries empty `content` on the other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffLine {
  pub line_number: usize,
  pub kind: DiffKind,
  pub content: String,
  pub pair_index: usize,
}

/// Summary returned by a compare.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSummary {
  pub has_differences: bool,
  pub difference_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
  pub text: String,
  pub case_sensitive: bool,
  /// Max number of matches to collect before flagging truncation.
  pub max_hits: usize,
}

impl Default for SearchQuery {
  fn default() -> Self {
    Self {
      text: String::new(),
      case_sensitive: false,
      max_hits: 1_000,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMatch {
  /// Dotted/indexed path from the root, `$`-prefixed.
  pub path: String,
  /// Object key or array index the match sits under.
  pub key: String,
  pub value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
  pub hits: Vec<SearchMatch>,
  pub truncated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
  /// Length of the minified serialization, in bytes.
  pub total_size: usize,
  pub key_count: usize,
  pub value_count: usize,
  pub max_depth: usize,
  pub type_distribution: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabInfo {
  pub tab_id: String,
  pub label: String,
  pub dirty: bool,
  /// Present when the tab was opened from a file.
  pub source_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
  Json,
  Yaml,
  Toml,
  Csv,
  Xml,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CodeLanguage {
  Typescript,
  Javascript,
  Python,
  Java,
  Csharp,
  Go,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
  pub output_path: String,
  pub bytes_written: u64,
}

/// Best-effort repair of malformed JSON text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairOutcome {
  pub repaired: bool,
  pub data: Option<Value>,
  /// Human-readable descriptions of the fixes that were applied.
  pub suggestions: Vec<String>,
}

/// A value that occurs at more than one path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateValue {
  pub value: Value,
  pub paths: Vec<String>,
}
