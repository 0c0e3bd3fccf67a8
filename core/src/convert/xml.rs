use serde_json::Value;

/// Render a document as compact XML under a `root` element. Objects become
/// child elements per key, arrays repeat the enclosing element name, and
/// scalars become text content.
pub fn to_xml(value: &Value) -> String {
  let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
  element(&mut out, "root", value, 0);
  out
}

fn element(out: &mut String, name: &str, value: &Value, depth: usize) {
  match value {
    // An array repeats the element, one per item, at the same level.
    Value::Array(items) => {
      if items.is_empty() {
        indent(out, depth);
        out.push_str(&format!("<{name}/>\n"));
        return;
      }
      for item in items {
        element(out, name, item, depth);
      }
    }
    Value::Object(map) => {
      indent(out, depth);
      if map.is_empty() {
        out.push_str(&format!("<{name}/>\n"));
        return;
      }
      out.push_str(&format!("<{name}>\n"));
      for (key, v) in map {
        element(out, key, v, depth + 1);
      }
      indent(out, depth);
      out.push_str(&format!("</{name}>\n"));
    }
    Value::Null => {
      indent(out, depth);
      out.push_str(&format!("<{name}/>\n"));
    }
    scalar => {
      indent(out, depth);
      let text = match scalar {
        Value::String(s) => escape_text(s),
        other => other.to_string(),
      };
      out.push_str(&format!("<{name}>{text}</{name}>\n"));
    }
  }
}

fn indent(out: &mut String, depth: usize) {
  for _ in 0..depth {
    out.push_str("  ");
  }
}

fn escape_text(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&apos;"),
      other => escaped.push(other),
    }
  }
  escaped
}
