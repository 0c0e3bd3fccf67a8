use serde_json::Value;

use crate::models::Statistics;
use crate::transform;

/// Size, key/value counts, depth and type distribution of a document.
///
/// Containers count once per occurrence under `object`/`array`; leaves count
/// under `null`/`boolean`/`number`/`string`. `total_size` is the minified
/// serialization length.
pub fn statistics(value: &Value) -> Statistics {
  let mut stats = Statistics {
    total_size: transform::to_minified(value).len(),
    key_count: 0,
    value_count: 0,
    max_depth: 0,
    type_distribution: Default::default(),
  };
  traverse(value, 0, &mut stats);
  stats
}

fn traverse(value: &Value, depth: usize, stats: &mut Statistics) {
  stats.max_depth = stats.max_depth.max(depth);

  match value {
    Value::Array(items) => {
      bump(stats, "array");
      for item in items {
        traverse(item, depth + 1, stats);
      }
    }
    Value::Object(map) => {
      bump(stats, "object");
      for (_key, v) in map {
        stats.key_count += 1;
        traverse(v, depth + 1, stats);
      }
    }
    leaf => {
      stats.value_count += 1;
      let kind = match leaf {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        _ => "string",
      };
      bump(stats, kind);
    }
  }
}

fn bump(stats: &mut Statistics, kind: &str) {
  *stats.type_distribution.entry(kind.to_string()).or_insert(0) += 1;
}
