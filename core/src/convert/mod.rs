mod csv;
mod xml;

use serde_json::Value;
use thiserror::Error;

use crate::models::ExportFormat;
use crate::transform;

#[derive(Debug, Error)]
pub enum ConvertError {
  #[error("csv conversion requires an array of objects")]
  CsvNotArray,
  #[error("failed to convert to yaml: {0}")]
  Yaml(#[from] serde_yaml::Error),
  #[error("failed to convert to toml: {0}")]
  Toml(#[from] toml::ser::Error),
}

/// Render a document in the requested output format. JSON renders at the
/// given indent; the other formats ignore it.
pub fn render(value: &Value, format: ExportFormat, indent: usize) -> Result<String, ConvertError> {
  match format {
    ExportFormat::Json => Ok(transform::to_pretty(value, indent)),
    ExportFormat::Yaml => to_yaml(value),
    ExportFormat::Toml => to_toml(value),
    ExportFormat::Csv => csv::to_csv(value),
    ExportFormat::Xml => Ok(xml::to_xml(value)),
  }
}

pub fn to_yaml(value: &Value) -> Result<String, ConvertError> {
  Ok(serde_yaml::to_string(value)?)
}

/// TOML requires a table root and has no null; non-conforming documents
/// surface the serializer's error.
pub fn to_toml(value: &Value) -> Result<String, ConvertError> {
  Ok(toml::to_string_pretty(value)?)
}

pub use csv::to_csv;
pub use xml::to_xml;
