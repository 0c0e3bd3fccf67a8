use serde_json::Value;

use super::ConvertError;
use crate::transform;

/// Render an array of objects as CSV. The header is the union of row keys
/// in first-seen order; nested containers render as minified JSON cell
/// text; missing cells are empty. An empty array renders as an empty
/// string.
pub fn to_csv(value: &Value) -> Result<String, ConvertError> {
  let Value::Array(rows) = value else {
    return Err(ConvertError::CsvNotArray);
  };
  if rows.is_empty() {
    return Ok(String::new());
  }

  let mut headers: Vec<String> = Vec::new();
  for row in rows {
    if let Value::Object(map) = row {
      for key in map.keys() {
        if !headers.iter().any(|h| h == key) {
          headers.push(key.clone());
        }
      }
    }
  }
  if headers.is_empty() {
    return Err(ConvertError::CsvNotArray);
  }

  let mut out = String::new();
  write_record(&mut out, headers.iter().map(String::as_str));
  for row in rows {
    let cells: Vec<String> = headers
      .iter()
      .map(|h| match row.get(h) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => transform::to_minified(other),
      })
      .collect();
    write_record(&mut out, cells.iter().map(String::as_str));
  }
  Ok(out)
}

fn write_record<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
  for (i, field) in fields.enumerate() {
    if i > 0 {
      out.push(',');
    }
    write_field(out, field);
  }
  out.push_str("\r\n");
}

// Quote per RFC 4180: only when the field contains a comma, quote or line
// break; embedded quotes are doubled.
fn write_field(out: &mut String, field: &str) {
  if field.contains([',', '"', '\n', '\r']) {
    out.push('"');
    for c in field.chars() {
      if c == '"' {
        out.push('"');
      }
      out.push(c);
    }
    out.push('"');
  } else {
    out.push_str(field);
  }
}
