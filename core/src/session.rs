use serde::Serialize;
use thiserror::Error;

use crate::diff::{compute_diff, DiffNavigator};
use crate::document::JsonDocument;
use crate::models::{DiffLine, DiffSummary, Side, ValidationOutcome};
use crate::transform;

/// Indent used when serializing both sides before diffing. Fixed regardless
/// of the display indent setting, so edits that only reformat never show up
/// as differences.
const CANONICAL_INDENT: usize = 2;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompareError {
  /// `compare` was invoked before both sides held valid JSON.
  #[error("both sides must hold valid JSON before comparing (missing: {sides:?})")]
  IncompleteInput { sides: Vec<Side> },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
  Empty,
  Editing,
  Validated,
  Compared,
}

/// One comparison: two documents, the latest computed diff, and a cursor
/// over its changed rows.
///
/// A session is single-threaded state for exactly one comparison at a time;
/// concurrent comparisons get independent sessions. All operations are
/// synchronous and bounded by total line count. Callers debounce; the
/// session does not.
#[derive(Debug, Clone, Default)]
pub struct DiffSession {
  doc_a: JsonDocument,
  doc_b: JsonDocument,
  lines_a: Vec<DiffLine>,
  lines_b: Vec<DiffLine>,
  navigator: DiffNavigator,
  compared: bool,
  stale: bool,
}

impl DiffSession {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace one side's text and re-parse it. Never fails as an operation;
  /// a parse failure is carried in the outcome. An edit after a compare
  /// leaves the previous diff in place until the next `compare`.
  pub fn set_side(&mut self, side: Side, text: impl Into<String>) -> ValidationOutcome {
    let outcome = self.document_mut(side).set_text(text.into());
    if self.compared {
      self.stale = true;
    }
    outcome
  }

  /// Replace one side with an already-parsed value.
  pub fn set_side_value(&mut self, side: Side, value: serde_json::Value) {
    self.document_mut(side).set_value(value, CANONICAL_INDENT);
    if self.compared {
      self.stale = true;
    }
  }

  pub fn document(&self, side: Side) -> &JsonDocument {
    match side {
      Side::A => &self.doc_a,
      Side::B => &self.doc_b,
    }
  }

  fn document_mut(&mut self, side: Side) -> &mut JsonDocument {
    match side {
      Side::A => &mut self.doc_a,
      Side::B => &mut self.doc_b,
    }
  }

  /// Serialize both sides canonically, rebuild the line classification and
  /// the navigator (cursor back to the first difference).
  pub fn compare(&mut self) -> Result<DiffSummary, CompareError> {
    let (value_a, value_b) = match (self.doc_a.parsed(), self.doc_b.parsed()) {
      (Some(a), Some(b)) => (a, b),
      (a, b) => {
        let mut sides = Vec::new();
        if a.is_none() {
          sides.push(Side::A);
        }
        if b.is_none() {
          sides.push(Side::B);
        }
        return Err(CompareError::IncompleteInput { sides });
      }
    };

    let text_a = transform::to_pretty(value_a, CANONICAL_INDENT);
    let text_b = transform::to_pretty(value_b, CANONICAL_INDENT);
    let (lines_a, lines_b) = compute_diff(&text_a, &text_b);

    self.navigator = DiffNavigator::build(&lines_a);
    self.lines_a = lines_a;
    self.lines_b = lines_b;
    self.compared = true;
    self.stale = false;

    let n = self.navigator.total_differences();
    Ok(DiffSummary {
      has_differences: n > 0,
      difference_count: n,
    })
  }

  /// Same operation as `compare`, callable repeatedly as either side is
  /// edited. Idempotent: unchanged inputs yield an identical diff.
  pub fn recompare(&mut self) -> Result<DiffSummary, CompareError> {
    self.compare()
  }

  /// The latest computed line arrays (A, B), if a compare has run.
  pub fn lines(&self) -> Option<(&[DiffLine], &[DiffLine])> {
    if self.compared {
      Some((&self.lines_a, &self.lines_b))
    } else {
      None
    }
  }

  pub fn summary(&self) -> Option<DiffSummary> {
    if self.compared {
      let n = self.navigator.total_differences();
      Some(DiffSummary {
        has_differences: n > 0,
        difference_count: n,
      })
    } else {
      None
    }
  }

  pub fn navigator(&self) -> &DiffNavigator {
    &self.navigator
  }

  pub fn navigator_mut(&mut self) -> &mut DiffNavigator {
    &mut self.navigator
  }

  pub fn phase(&self) -> SessionPhase {
    if self.compared && !self.stale {
      SessionPhase::Compared
    } else if self.doc_a.parsed().is_some() && self.doc_b.parsed().is_some() {
      SessionPhase::Validated
    } else if !self.doc_a.is_empty() || !self.doc_b.is_empty() {
      SessionPhase::Editing
    } else {
      SessionPhase::Empty
    }
  }
}
