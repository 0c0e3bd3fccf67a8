use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{DuplicateValue, ParseError, RepairOutcome};

/// Pretty-print with the given indent width. Key order is the value's own
/// (insertion) order; the serializer never reorders.
pub fn to_pretty(value: &Value, indent: usize) -> String {
  if indent == 2 {
    return serde_json::to_string_pretty(value).unwrap_or_default();
  }
  let indent_str = " ".repeat(indent);
  let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
  let mut buf = Vec::new();
  let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
  if value.serialize(&mut ser).is_err() {
    return String::new();
  }
  String::from_utf8(buf).unwrap_or_default()
}

pub fn to_minified(value: &Value) -> String {
  serde_json::to_string(value).unwrap_or_default()
}

/// Alphabetically sort object keys; with `recursive`, descend into nested
/// objects and arrays as well.
pub fn sort_keys(value: &Value, recursive: bool) -> Value {
  match value {
    Value::Array(items) => {
      if recursive {
        Value::Array(items.iter().map(|v| sort_keys(v, true)).collect())
      } else {
        value.clone()
      }
    }
    Value::Object(map) => {
      let mut keys: Vec<&String> = map.keys().collect();
      keys.sort();
      let mut out = Map::new();
      for k in keys {
        if let Some(v) = map.get(k.as_str()) {
          let v = if recursive { sort_keys(v, true) } else { v.clone() };
          out.insert(k.clone(), v);
        }
      }
      Value::Object(out)
    }
    other => other.clone(),
  }
}

/// Flatten to leaf paths: objects contribute `prefix.key`, arrays
/// `prefix[idx]`. Empty containers contribute nothing; a scalar root lands
/// under the empty path.
pub fn flatten(value: &Value) -> Map<String, Value> {
  let mut out = Map::new();
  flatten_into(value, "", &mut out);
  out
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Map<String, Value>) {
  match value {
    Value::Array(items) => {
      for (i, item) in items.iter().enumerate() {
        flatten_into(item, &format!("{prefix}[{i}]"), out);
      }
    }
    Value::Object(map) => {
      for (key, v) in map {
        let next = if prefix.is_empty() {
          key.clone()
        } else {
          format!("{prefix}.{key}")
        };
        flatten_into(v, &next, out);
      }
    }
    leaf => {
      out.insert(prefix.to_string(), leaf.clone());
    }
  }
}

/// Inverse of `flatten`. Numeric path segments rebuild arrays (padding gaps
/// with null), everything else rebuilds objects.
pub fn unflatten(flat: &Map<String, Value>) -> Value {
  let mut root = Value::Null;
  for (path, value) in flat {
    let segments: Vec<&str> = path
      .split(['.', '[', ']'])
      .filter(|s| !s.is_empty())
      .collect();
    if segments.is_empty() {
      root = value.clone();
      continue;
    }
    insert_path(&mut root, &segments, value.clone());
  }
  root
}

fn insert_path(node: &mut Value, segments: &[&str], value: Value) {
  let seg = segments[0];
  let rest = &segments[1..];
  let index = if seg.chars().all(|c| c.is_ascii_digit()) {
    seg.parse::<usize>().ok()
  } else {
    None
  };

  match index {
    Some(i) => {
      if !matches!(node, Value::Array(_)) {
        *node = Value::Array(Vec::new());
      }
      if let Value::Array(arr) = node {
        while arr.len() <= i {
          arr.push(Value::Null);
        }
        if rest.is_empty() {
          arr[i] = value;
        } else {
          insert_path(&mut arr[i], rest, value);
        }
      }
    }
    None => {
      if !matches!(node, Value::Object(_)) {
        *node = Value::Object(Map::new());
      }
      if let Value::Object(map) = node {
        if rest.is_empty() {
          map.insert(seg.to_string(), value);
        } else {
          let child = map.entry(seg.to_string()).or_insert(Value::Null);
          insert_path(child, rest, value);
        }
      }
    }
  }
}

/// Escape backslashes, quotes and control whitespace inside every string
/// leaf.
pub fn escape_strings(value: &Value) -> Value {
  map_strings(value, &|s| {
    s.replace('\\', "\\\\")
      .replace('"', "\\\"")
      .replace('\n', "\\n")
      .replace('\r', "\\r")
      .replace('\t', "\\t")
  })
}

/// Inverse of `escape_strings`.
pub fn unescape_strings(value: &Value) -> Value {
  map_strings(value, &|s| {
    s.replace("\\n", "\n")
      .replace("\\r", "\r")
      .replace("\\t", "\t")
      .replace("\\\"", "\"")
      .replace("\\\\", "\\")
  })
}

fn map_strings(value: &Value, f: &dyn Fn(&str) -> String) -> Value {
  match value {
    Value::String(s) => Value::String(f(s)),
    Value::Array(items) => Value::Array(items.iter().map(|v| map_strings(v, f)).collect()),
    Value::Object(map) => Value::Object(
      map
        .iter()
        .map(|(k, v)| (k.clone(), map_strings(v, f)))
        .collect(),
    ),
    other => other.clone(),
  }
}

/// Remove `//` and `/* */` comments outside of string literals.
pub fn strip_jsonc(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  let mut in_string = false;
  let mut escaped = false;

  while let Some(c) = chars.next() {
    if in_string {
      out.push(c);
      if escaped {
        escaped = false;
      } else if c == '\\' {
        escaped = true;
      } else if c == '"' {
        in_string = false;
      }
      continue;
    }
    match c {
      '"' => {
        in_string = true;
        out.push(c);
      }
      '/' if chars.peek() == Some(&'/') => {
        for n in chars.by_ref() {
          if n == '\n' {
            out.push('\n');
            break;
          }
        }
      }
      '/' if chars.peek() == Some(&'*') => {
        chars.next();
        let mut prev = ' ';
        for n in chars.by_ref() {
          if prev == '*' && n == '/' {
            break;
          }
          prev = n;
        }
      }
      _ => out.push(c),
    }
  }
  out
}

/// Parse JSON-with-comments text.
pub fn parse_jsonc(text: &str) -> Result<Value, ParseError> {
  serde_json::from_str(&strip_jsonc(text)).map_err(|e| ParseError {
    line: e.line(),
    column: e.column(),
    message: e.to_string(),
  })
}

/// Best-effort repair of malformed JSON: quote bare keys, drop trailing
/// commas, turn single quotes into double quotes. Reports the fixes applied
/// and whether the result finally parses.
pub fn repair(text: &str) -> RepairOutcome {
  let mut suggestions = Vec::new();
  let mut s = text.trim().to_string();

  if s.contains('{') || s.contains('[') {
    let quoted = quote_bare_keys(&s);
    if quoted != s {
      s = quoted;
      suggestions.push("Added quotes around unquoted keys".to_string());
    }
  }

  let dropped = drop_trailing_commas(&s);
  if dropped != s {
    s = dropped;
    suggestions.push("Removed trailing commas".to_string());
  }

  if s.contains('\'') {
    s = s.replace('\'', "\"");
    suggestions.push("Converted single quotes to double quotes".to_string());
  }

  match serde_json::from_str(&s) {
    Ok(data) => RepairOutcome {
      repaired: true,
      data: Some(data),
      suggestions,
    },
    Err(_) => RepairOutcome {
      repaired: false,
      data: None,
      suggestions,
    },
  }
}

// Quote identifier-looking keys that follow `{` or `,`.
fn quote_bare_keys(text: &str) -> String {
  let chars: Vec<char> = text.chars().collect();
  let mut out = String::with_capacity(text.len());
  let mut in_string = false;
  let mut escaped = false;
  let mut i = 0;

  while i < chars.len() {
    let c = chars[i];
    if in_string {
      out.push(c);
      if escaped {
        escaped = false;
      } else if c == '\\' {
        escaped = true;
      } else if c == '"' {
        in_string = false;
      }
      i += 1;
      continue;
    }
    if c == '"' {
      in_string = true;
      out.push(c);
      i += 1;
      continue;
    }
    out.push(c);
    i += 1;
    if c != '{' && c != ',' {
      continue;
    }
    // Skip whitespace, then try to read `ident :`.
    let mut j = i;
    while j < chars.len() && chars[j].is_whitespace() {
      j += 1;
    }
    let start = j;
    if j < chars.len() && (chars[j].is_ascii_alphabetic() || chars[j] == '_' || chars[j] == '$') {
      j += 1;
      while j < chars.len()
        && (chars[j].is_ascii_alphanumeric() || chars[j] == '_' || chars[j] == '$')
      {
        j += 1;
      }
      let end = j;
      while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
      }
      if j < chars.len() && chars[j] == ':' {
        for k in i..start {
          out.push(chars[k]);
        }
        out.push('"');
        for k in start..end {
          out.push(chars[k]);
        }
        out.push('"');
        for k in end..j {
          out.push(chars[k]);
        }
        i = j;
      }
    }
  }
  out
}

// Drop a `,` when the next non-whitespace character closes the container.
fn drop_trailing_commas(text: &str) -> String {
  let chars: Vec<char> = text.chars().collect();
  let mut out = String::with_capacity(text.len());
  let mut in_string = false;
  let mut escaped = false;

  for (i, &c) in chars.iter().enumerate() {
    if in_string {
      out.push(c);
      if escaped {
        escaped = false;
      } else if c == '\\' {
        escaped = true;
      } else if c == '"' {
        in_string = false;
      }
      continue;
    }
    if c == '"' {
      in_string = true;
      out.push(c);
      continue;
    }
    if c == ',' {
      let mut j = i + 1;
      while j < chars.len() && chars[j].is_whitespace() {
        j += 1;
      }
      if j < chars.len() && (chars[j] == '}' || chars[j] == ']') {
        continue;
      }
    }
    out.push(c);
  }
  out
}

/// Paths of nulls, empty strings and empty containers, `$`-rooted.
pub fn find_empty_values(value: &Value) -> Vec<String> {
  let mut paths = Vec::new();
  find_empty_into(value, "$", &mut paths);
  paths
}

fn find_empty_into(value: &Value, path: &str, paths: &mut Vec<String>) {
  match value {
    Value::Null => paths.push(path.to_string()),
    Value::String(s) if s.is_empty() => paths.push(path.to_string()),
    Value::Array(items) => {
      if items.is_empty() {
        paths.push(path.to_string());
      }
      for (i, item) in items.iter().enumerate() {
        find_empty_into(item, &format!("{path}[{i}]"), paths);
      }
    }
    Value::Object(map) => {
      if map.is_empty() {
        paths.push(path.to_string());
      }
      for (key, v) in map {
        find_empty_into(v, &format!("{path}.{key}"), paths);
      }
    }
    _ => {}
  }
}

/// Values (containers included) that occur at more than one path.
pub fn find_duplicate_values(value: &Value) -> Vec<DuplicateValue> {
  let mut order: Vec<String> = Vec::new();
  let mut seen: std::collections::HashMap<String, (Value, Vec<String>)> =
    std::collections::HashMap::new();
  collect_values(value, "$", &mut order, &mut seen);

  order
    .into_iter()
    .filter_map(|key| {
      let (value, paths) = seen.remove(&key)?;
      if paths.len() > 1 {
        Some(DuplicateValue { value, paths })
      } else {
        None
      }
    })
    .collect()
}

fn collect_values(
  value: &Value,
  path: &str,
  order: &mut Vec<String>,
  seen: &mut std::collections::HashMap<String, (Value, Vec<String>)>,
) {
  let rendered = to_minified(value);
  match seen.get_mut(&rendered) {
    Some((_, paths)) => paths.push(path.to_string()),
    None => {
      order.push(rendered.clone());
      seen.insert(rendered, (value.clone(), vec![path.to_string()]));
    }
  }

  match value {
    Value::Array(items) => {
      for (i, item) in items.iter().enumerate() {
        collect_values(item, &format!("{path}[{i}]"), order, seen);
      }
    }
    Value::Object(map) => {
      for (key, v) in map {
        collect_values(v, &format!("{path}.{key}"), order, seen);
      }
    }
    _ => {}
  }
}
