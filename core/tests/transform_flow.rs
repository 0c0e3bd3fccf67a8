use jl_core::{
  escape_strings, eval_path, find_duplicate_values, find_empty_values, flatten, generate_code,
  infer_schema, parse_jsonc, repair, sort_keys, strip_jsonc, to_csv, to_pretty, to_toml, to_xml,
  to_yaml, unescape_strings, unflatten, CodeLanguage, JsonDocument, QueryError,
};
use serde_json::json;

#[test]
fn document_holds_value_xor_error() {
  let mut doc = JsonDocument::new();
  assert!(doc.parsed().is_none());
  assert!(doc.parse_error().is_none());

  doc.set_text(r#"{"a":1}"#.to_string());
  assert!(doc.parsed().is_some());
  assert!(doc.parse_error().is_none());

  doc.set_text("{broken".to_string());
  assert!(doc.parsed().is_none());
  let err = doc.parse_error().unwrap();
  assert_eq!(err.line, 1);
  assert!(err.column > 0);

  doc.set_text(String::new());
  assert!(doc.parsed().is_none());
  assert!(doc.parse_error().is_none());
}

#[test]
fn pretty_printing_keeps_insertion_order() {
  let value = serde_json::from_str::<serde_json::Value>(r#"{"z":1,"a":2}"#).unwrap();
  assert_eq!(to_pretty(&value, 2), "{\n  \"z\": 1,\n  \"a\": 2\n}");
  assert_eq!(to_pretty(&value, 4), "{\n    \"z\": 1,\n    \"a\": 2\n}");
}

#[test]
fn sort_keys_top_level_and_recursive() {
  let value = json!({"b": {"d": 1, "c": 2}, "a": 3});

  let top = sort_keys(&value, false);
  let keys: Vec<&String> = top.as_object().unwrap().keys().collect();
  assert_eq!(keys, ["a", "b"]);
  // Non-recursive leaves nested objects untouched.
  let inner: Vec<&String> = top["b"].as_object().unwrap().keys().collect();
  assert_eq!(inner, ["d", "c"]);

  let deep = sort_keys(&value, true);
  let inner: Vec<&String> = deep["b"].as_object().unwrap().keys().collect();
  assert_eq!(inner, ["c", "d"]);
}

#[test]
fn flatten_unflatten_round_trip() {
  let value = json!({"a": {"b": [1, {"c": 2}]}, "d": true});

  let flat = flatten(&value);
  assert_eq!(flat["a.b[0]"], 1);
  assert_eq!(flat["a.b[1].c"], 2);
  assert_eq!(flat["d"], true);

  assert_eq!(unflatten(&flat), value);
}

#[test]
fn escape_unescape_round_trip() {
  let value = json!({"text": "line1\nline2\t\"quoted\""});
  let escaped = escape_strings(&value);
  assert_eq!(escaped["text"], "line1\\nline2\\t\\\"quoted\\\"");
  assert_eq!(unescape_strings(&escaped), value);
}

#[test]
fn jsonc_comments_are_stripped_outside_strings() {
  let text = r#"{
  // a comment
  "url": "http://example.com", /* inline */ "n": 1
}"#;
  let value = parse_jsonc(text).unwrap();
  assert_eq!(value["url"], "http://example.com");
  assert_eq!(value["n"], 1);

  // A slash inside a string survives.
  let kept = strip_jsonc(r#"{"path": "a//b"}"#);
  assert_eq!(kept, r#"{"path": "a//b"}"#);
}

#[test]
fn repair_fixes_the_common_mistakes() {
  let outcome = repair("{name: 'Ada', age: 30,}");
  assert!(outcome.repaired);
  assert_eq!(outcome.suggestions.len(), 3);
  let data = outcome.data.unwrap();
  assert_eq!(data["name"], "Ada");
  assert_eq!(data["age"], 30);

  let hopeless = repair("{{{");
  assert!(!hopeless.repaired);
  assert!(hopeless.data.is_none());
}

#[test]
fn empty_and_duplicate_values_report_paths() {
  let value = json!({"a": null, "b": "", "c": [], "d": {"e": 1, "f": 1}});

  let empties = find_empty_values(&value);
  assert_eq!(empties, ["$.a", "$.b", "$.c"]);

  let dups = find_duplicate_values(&value);
  let ones = dups.iter().find(|d| d.value == json!(1)).unwrap();
  assert_eq!(ones.paths, ["$.d.e", "$.d.f"]);
}

#[test]
fn path_subset_hits_and_misses() {
  let value = json!({"users": [{"name": "Ada"}, {"name": "Brian"}], "total": 2});

  assert_eq!(eval_path(&value, "$").unwrap(), &value);
  assert_eq!(eval_path(&value, "$.total").unwrap(), 2);
  assert_eq!(eval_path(&value, "$.users[1].name").unwrap(), "Brian");
  // The `$.` prefix is optional.
  assert_eq!(eval_path(&value, "users[0].name").unwrap(), "Ada");

  assert_eq!(
    eval_path(&value, "$.missing").unwrap_err(),
    QueryError::KeyNotFound("missing".to_string())
  );
  assert_eq!(
    eval_path(&value, "$.users[5]").unwrap_err(),
    QueryError::IndexNotFound {
      key: "users".to_string(),
      index: 5
    }
  );
  assert_eq!(eval_path(&value, "  ").unwrap_err(), QueryError::Empty);
}

#[test]
fn schema_inference_covers_the_sample() {
  let schema = infer_schema(&json!({"id": 1, "score": 1.5, "tags": ["a"]}));
  assert_eq!(schema["type"], "object");
  assert_eq!(schema["properties"]["id"]["type"], "integer");
  assert_eq!(schema["properties"]["score"]["type"], "number");
  assert_eq!(schema["properties"]["tags"]["type"], "array");
  assert_eq!(schema["properties"]["tags"]["items"]["type"], "string");
  assert_eq!(schema["properties"]["tags"]["maxItems"], 1);
  assert_eq!(schema["required"], json!(["id", "score", "tags"]));
}

#[test]
fn csv_quotes_per_rfc4180() {
  let value = json!([{"a": "x,y", "b": "He said \"hi\""}]);
  let csv = to_csv(&value).unwrap();
  assert_eq!(csv, "a,b\r\n\"x,y\",\"He said \"\"hi\"\"\"\r\n");

  assert!(to_csv(&json!({"not": "an array"})).is_err());
  assert_eq!(to_csv(&json!([])).unwrap(), "");
}

#[test]
fn xml_repeats_elements_and_escapes_text() {
  let xml = to_xml(&json!({"tags": ["a", "b"], "note": "1 < 2"}));
  assert!(xml.contains("<tags>a</tags>"));
  assert!(xml.contains("<tags>b</tags>"));
  assert!(xml.contains("<note>1 &lt; 2</note>"));
  assert!(xml.starts_with("<?xml"));
}

#[test]
fn yaml_and_toml_render() {
  let yaml = to_yaml(&json!({"a": [1, 2]})).unwrap();
  assert!(yaml.contains("a:"));
  assert!(yaml.contains("- 1"));

  let toml = to_toml(&json!({"title": "x", "server": {"port": 8080}})).unwrap();
  assert!(toml.contains("title = \"x\""));
  assert!(toml.contains("[server]"));
  assert!(toml.contains("port = 8080"));
}

#[test]
fn codegen_shapes_per_language() {
  let value = json!({"id": 1, "name": "Ada", "meta": {"active": true}});

  let ts = generate_code(&value, CodeLanguage::Typescript, "Root");
  assert!(ts.contains("export interface Root {"));
  assert!(ts.contains("meta: Meta;"));
  assert!(ts.contains("export interface Meta {"));

  let py = generate_code(&value, CodeLanguage::Python, "Root");
  assert!(py.contains("@dataclass"));
  assert!(py.contains("id: int"));
  assert!(py.contains("meta: Dict[str, Any]"));

  let go = generate_code(&value, CodeLanguage::Go, "Root");
  assert!(go.contains("type Root struct {"));
  assert!(go.contains("`json:\"id\"`"));

  let java = generate_code(&value, CodeLanguage::Java, "Root");
  assert!(java.contains("public class Root {"));
  assert!(java.contains("public String getName()"));

  // Non-object roots degrade the way the UI expects.
  assert!(generate_code(&json!([1]), CodeLanguage::Python, "X").starts_with('#'));
  assert_eq!(generate_code(&json!([1]), CodeLanguage::Typescript, "X"), "");
}
