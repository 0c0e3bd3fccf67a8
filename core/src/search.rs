use serde_json::Value;

use crate::models::{SearchMatch, SearchQuery, SearchResult};
use crate::transform;

#[derive(Debug, Clone)]
struct PreparedQuery {
  q: String,
  case_sensitive: bool,
  max_hits: usize,
}

impl PreparedQuery {
  fn new(query: &SearchQuery) -> Option<Self> {
    let t = query.text.trim();
    if t.is_empty() {
      return None;
    }
    Some(Self {
      q: if query.case_sensitive {
        t.to_string()
      } else {
        t.to_lowercase()
      },
      case_sensitive: query.case_sensitive,
      max_hits: query.max_hits.max(1),
    })
  }

  fn matches(&self, hay: &str) -> bool {
    if self.case_sensitive {
      hay.contains(&self.q)
    } else {
      hay.to_lowercase().contains(&self.q)
    }
  }
}

/// Substring search over keys and leaf values. Matches report the entry's
/// path, key (or array index) and value; collection stops at `max_hits`
/// with the result flagged truncated.
pub fn search(value: &Value, query: &SearchQuery) -> SearchResult {
  let Some(prepared) = PreparedQuery::new(query) else {
    return SearchResult {
      hits: Vec::new(),
      truncated: false,
    };
  };

  let mut hits = Vec::new();
  let mut truncated = false;
  walk(value, "$", "", &prepared, &mut hits, &mut truncated);
  SearchResult { hits, truncated }
}

fn walk(
  value: &Value,
  path: &str,
  key: &str,
  prepared: &PreparedQuery,
  hits: &mut Vec<SearchMatch>,
  truncated: &mut bool,
) {
  if *truncated {
    return;
  }

  let key_hit = !key.is_empty() && prepared.matches(key);
  let value_hit = match value {
    Value::Array(_) | Value::Object(_) => false,
    Value::String(s) => prepared.matches(s),
    leaf => prepared.matches(&transform::to_minified(leaf)),
  };
  if key_hit || value_hit {
    if hits.len() >= prepared.max_hits {
      *truncated = true;
      return;
    }
    hits.push(SearchMatch {
      path: path.to_string(),
      key: key.to_string(),
      value: value.clone(),
    });
  }

  match value {
    Value::Array(items) => {
      for (i, item) in items.iter().enumerate() {
        walk(
          item,
          &format!("{path}[{i}]"),
          &i.to_string(),
          prepared,
          hits,
          truncated,
        );
      }
    }
    Value::Object(map) => {
      for (k, v) in map {
        walk(v, &format!("{path}.{k}"), k, prepared, hits, truncated);
      }
    }
    _ => {}
  }
}
