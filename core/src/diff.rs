use thiserror::Error;

use crate::models::{DiffKind, DiffLine};

/// Classify two serialized documents line by line.
///
/// The comparison is positional: line `i` of A against line `i` of B, no
/// edit-distance alignment. A line inserted in the middle of a document
/// therefore shifts everything below it into `Modified` rows. Both returned
/// vectors have length `max(lines_a, lines_b)`; a row that exists on one
/// side only is padded with empty content on the other (`Removed` on A,
/// `Added` on B).
///
/// Callers are expected to serialize both inputs with the same canonical
/// printer first; this function compares text, not values.
pub fn compute_diff(text_a: &str, text_b: &str) -> (Vec<DiffLine>, Vec<DiffLine>) {
  let lines_a = split_lines(text_a);
  let lines_b = split_lines(text_b);
  let n = lines_a.len().max(lines_b.len());

  let mut out_a = Vec::with_capacity(n);
  let mut out_b = Vec::with_capacity(n);
  for i in 0..n {
    let (kind_a, content_a, kind_b, content_b) = match (lines_a.get(i), lines_b.get(i)) {
      (None, Some(b)) => (DiffKind::Removed, String::new(), DiffKind::Added, (*b).to_string()),
      (Some(a), None) => (DiffKind::Removed, (*a).to_string(), DiffKind::Added, String::new()),
      (Some(a), Some(b)) if a == b => (
        DiffKind::Unchanged,
        (*a).to_string(),
        DiffKind::Unchanged,
        (*b).to_string(),
      ),
      (Some(a), Some(b)) => (
        DiffKind::Modified,
        (*a).to_string(),
        DiffKind::Modified,
        (*b).to_string(),
      ),
      (None, None) => unreachable!("i < max(len_a, len_b)"),
    };
    out_a.push(DiffLine {
      line_number: i + 1,
      kind: kind_a,
      content: content_a,
      pair_index: i,
    });
    out_b.push(DiffLine {
      line_number: i + 1,
      kind: kind_b,
      content: content_b,
      pair_index: i,
    });
  }
  (out_a, out_b)
}

// An empty document has zero lines, not one empty line.
fn split_lines(text: &str) -> Vec<&str> {
  if text.is_empty() {
    Vec::new()
  } else {
    text.split('\n').collect()
  }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("difference ordinal {ordinal} out of range (total {total})")]
pub struct OutOfRange {
  pub ordinal: usize,
  pub total: usize,
}

/// Movable cursor over the changed rows of a computed diff.
///
/// Holds the pair indices of every non-`Unchanged` row, in ascending order,
/// and a position into that list. Returned pair indices are navigation
/// targets for the presentation layer (scroll/highlight both sides at that
/// row); how the target is realized is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct DiffNavigator {
  diff_indices: Vec<usize>,
  current_position: usize,
}

impl DiffNavigator {
  /// Index the changed rows. Side A is authoritative; classification is
  /// symmetric, so side B would produce the same indices.
  pub fn build(lines_a: &[DiffLine]) -> Self {
    let diff_indices = lines_a
      .iter()
      .filter(|l| l.kind != DiffKind::Unchanged)
      .map(|l| l.pair_index)
      .collect();
    Self {
      diff_indices,
      current_position: 0,
    }
  }

  pub fn total_differences(&self) -> usize {
    self.diff_indices.len()
  }

  /// Zero-based ordinal of the difference under the cursor.
  pub fn current_position(&self) -> usize {
    self.current_position
  }

  /// Pair index under the cursor, if any rows differ.
  pub fn current(&self) -> Option<usize> {
    self.diff_indices.get(self.current_position).copied()
  }

  pub fn diff_indices(&self) -> &[usize] {
    &self.diff_indices
  }

  /// Advance to the next difference. At the last one this is a no-op and
  /// returns `None`.
  #[allow(clippy::should_implement_trait)]
  pub fn next(&mut self) -> Option<usize> {
    if self.current_position + 1 < self.diff_indices.len() {
      self.current_position += 1;
      Some(self.diff_indices[self.current_position])
    } else {
      None
    }
  }

  /// Step back to the previous difference. At the first one this is a no-op
  /// and returns `None`.
  pub fn previous(&mut self) -> Option<usize> {
    if self.current_position > 0 {
      self.current_position -= 1;
      Some(self.diff_indices[self.current_position])
    } else {
      None
    }
  }

  /// Move straight to the nth difference (zero-based).
  pub fn jump_to(&mut self, diff_ordinal: usize) -> Result<usize, OutOfRange> {
    if diff_ordinal >= self.diff_indices.len() {
      return Err(OutOfRange {
        ordinal: diff_ordinal,
        total: self.diff_indices.len(),
      });
    }
    self.current_position = diff_ordinal;
    Ok(self.diff_indices[diff_ordinal])
  }
}
