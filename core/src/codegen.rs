use serde_json::Value;

use crate::models::CodeLanguage;

/// Generate a type definition in the requested language from a sample
/// document. Only object roots produce a definition; the field types are
/// inferred from the sample's values (first element for arrays).
pub fn generate(value: &Value, language: CodeLanguage, name: &str) -> String {
  match language {
    CodeLanguage::Typescript => typescript(value, name),
    CodeLanguage::Javascript => javascript(value, name),
    CodeLanguage::Python => python(value, name),
    CodeLanguage::Java => java(value, name),
    CodeLanguage::Csharp => csharp(value, name),
    CodeLanguage::Go => go(value, name),
  }
}

fn capitalize(s: &str) -> String {
  let mut chars = s.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    None => String::new(),
  }
}

fn is_integer(n: &serde_json::Number) -> bool {
  n.is_i64() || n.is_u64()
}

fn typescript(value: &Value, name: &str) -> String {
  let Value::Object(map) = value else {
    return String::new();
  };

  let mut code = format!("export interface {name} {{\n");
  for (key, v) in map {
    code.push_str(&format!("  {key}: {};\n", ts_type(v, key)));
  }
  code.push_str("}\n\n");

  // Nested interfaces for direct object values.
  for (key, v) in map {
    if v.is_object() {
      code.push_str(&typescript(v, &capitalize(key)));
    }
  }
  code
}

fn ts_type(value: &Value, key: &str) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::Bool(_) => "boolean".to_string(),
    Value::Number(_) => "number".to_string(),
    Value::String(_) => "string".to_string(),
    Value::Array(items) => match items.first() {
      Some(first) => format!("{}[]", ts_type(first, key)),
      None => "any[]".to_string(),
    },
    Value::Object(_) => capitalize(key),
  }
}

fn javascript(value: &Value, name: &str) -> String {
  let Value::Object(map) = value else {
    return "// Cannot generate class from non-object data".to_string();
  };

  let mut code = format!("class {name} {{\n");
  code.push_str("  constructor(data = {}) {\n");
  for key in map.keys() {
    code.push_str(&format!("    this.{key} = data.{key};\n"));
  }
  code.push_str("  }\n\n");

  code.push_str("  toJSON() {\n    return {\n");
  for key in map.keys() {
    code.push_str(&format!("      {key}: this.{key},\n"));
  }
  code.push_str("    };\n  }\n}\n\n");
  code.push_str(&format!("export default {name};"));
  code
}

fn python(value: &Value, name: &str) -> String {
  let Value::Object(map) = value else {
    return "# Cannot generate dataclass from non-object data".to_string();
  };

  let mut code = String::from(
    "from dataclasses import dataclass\nfrom typing import Optional, List, Dict, Any\n\n",
  );
  code.push_str(&format!("@dataclass\nclass {name}:\n"));
  for (key, v) in map {
    code.push_str(&format!("    {key}: {}\n", python_type(v)));
  }
  code
}

fn python_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "Optional[Any]",
    Value::Bool(_) => "bool",
    Value::Number(n) => {
      if is_integer(n) {
        "int"
      } else {
        "float"
      }
    }
    Value::String(_) => "str",
    Value::Array(_) => "List[Any]",
    Value::Object(_) => "Dict[str, Any]",
  }
}

fn java(value: &Value, name: &str) -> String {
  let Value::Object(map) = value else {
    return "// Cannot generate class from non-object data".to_string();
  };

  let mut code = format!("public class {name} {{\n");
  for (key, v) in map {
    code.push_str(&format!("    private {} {key};\n", java_type(v)));
  }
  code.push('\n');
  code.push_str(&format!("    public {name}() {{}}\n\n"));

  for (key, v) in map {
    let ty = java_type(v);
    let cap = capitalize(key);
    code.push_str(&format!(
      "    public {ty} get{cap}() {{\n        return {key};\n    }}\n\n"
    ));
    code.push_str(&format!(
      "    public void set{cap}({ty} {key}) {{\n        this.{key} = {key};\n    }}\n\n"
    ));
  }
  code.push('}');
  code
}

fn java_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "Object",
    Value::Bool(_) => "boolean",
    Value::Number(n) => {
      if is_integer(n) {
        "int"
      } else {
        "double"
      }
    }
    Value::String(_) => "String",
    Value::Array(_) => "List<Object>",
    Value::Object(_) => "Map<String, Object>",
  }
}

fn csharp(value: &Value, name: &str) -> String {
  let Value::Object(map) = value else {
    return "// Cannot generate class from non-object data".to_string();
  };

  let mut code = format!("public class {name}\n{{\n");
  for (key, v) in map {
    code.push_str(&format!(
      "    public {} {} {{ get; set; }}\n",
      csharp_type(v),
      capitalize(key)
    ));
  }
  code.push('}');
  code
}

fn csharp_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "object",
    Value::Bool(_) => "bool",
    Value::Number(n) => {
      if is_integer(n) {
        "int"
      } else {
        "double"
      }
    }
    Value::String(_) => "string",
    Value::Array(_) => "List<object>",
    Value::Object(_) => "Dictionary<string, object>",
  }
}

fn go(value: &Value, name: &str) -> String {
  let Value::Object(map) = value else {
    return "// Cannot generate struct from non-object data".to_string();
  };

  let mut code = format!("type {name} struct {{\n");
  for (key, v) in map {
    code.push_str(&format!(
      "    {} {} `json:\"{key}\"`\n",
      capitalize(key),
      go_type(v)
    ));
  }
  code.push('}');
  code
}

fn go_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "interface{}",
    Value::Bool(_) => "bool",
    Value::Number(n) => {
      if is_integer(n) {
        "int"
      } else {
        "float64"
      }
    }
    Value::String(_) => "string",
    Value::Array(_) => "[]interface{}",
    Value::Object(_) => "map[string]interface{}",
  }
}
