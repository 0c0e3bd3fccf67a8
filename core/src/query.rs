use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors from the simplified path language. Each names the segment that
/// failed so the caller can point at it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
  #[error("query cannot be empty")]
  Empty,
  #[error("key '{0}' not found")]
  KeyNotFound(String),
  #[error("array index {index} not found in {key}")]
  IndexNotFound { key: String, index: usize },
}

/// Evaluate a simplified JSONPath: `$`, dotted keys, and `key[idx]`
/// segments. No wildcards, slices, filters or recursive descent.
pub fn eval_path<'a>(value: &'a Value, path: &str) -> Result<&'a Value, QueryError> {
  let path = path.trim();
  if path.is_empty() {
    return Err(QueryError::Empty);
  }
  if path == "$" {
    return Ok(value);
  }

  let rest = path
    .strip_prefix('$')
    .map(|r| r.strip_prefix('.').unwrap_or(r))
    .unwrap_or(path);

  let mut current = value;
  for segment in rest.split('.') {
    if segment.is_empty() {
      continue;
    }
    current = match parse_indexed(segment) {
      Some((key, index)) => {
        let arr = current
          .as_object()
          .and_then(|o| o.get(key))
          .ok_or_else(|| QueryError::KeyNotFound(key.to_string()))?;
        arr
          .as_array()
          .and_then(|a| a.get(index))
          .ok_or(QueryError::IndexNotFound {
            key: key.to_string(),
            index,
          })?
      }
      None => current
        .as_object()
        .and_then(|o| o.get(segment))
        .ok_or_else(|| QueryError::KeyNotFound(segment.to_string()))?,
    };
  }
  Ok(current)
}

// `name[digits]` with a word-character name; anything else is a plain key.
fn parse_indexed(segment: &str) -> Option<(&str, usize)> {
  let open = segment.find('[')?;
  let inner = segment.strip_suffix(']')?.get(open + 1..)?;
  let key = &segment[..open];
  if key.is_empty()
    || !key
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '_')
    || inner.is_empty()
    || !inner.chars().all(|c| c.is_ascii_digit())
  {
    return None;
  }
  Some((key, inner.parse().ok()?))
}

/// Best-effort JSON Schema inference from a sample document. Array item
/// schemas come from the first element only.
pub fn infer_schema(value: &Value) -> Value {
  match value {
    Value::Null => json!({ "type": "null" }),
    Value::Bool(_) => json!({ "type": "boolean" }),
    Value::Number(n) => {
      if n.is_i64() || n.is_u64() {
        json!({ "type": "integer" })
      } else {
        json!({ "type": "number" })
      }
    }
    Value::String(_) => json!({ "type": "string" }),
    Value::Array(items) => {
      let item_schema = items.first().map(infer_schema).unwrap_or_else(|| json!({}));
      json!({
        "type": "array",
        "items": item_schema,
        "minItems": 0,
        "maxItems": items.len(),
      })
    }
    Value::Object(map) => {
      let mut properties = Map::new();
      let mut required = Vec::new();
      for (key, v) in map {
        properties.insert(key.clone(), infer_schema(v));
        required.push(Value::String(key.clone()));
      }
      json!({
        "type": "object",
        "properties": Value::Object(properties),
        "required": Value::Array(required),
        "additionalProperties": false,
      })
    }
  }
}
