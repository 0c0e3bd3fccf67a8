use std::{
  fs::File,
  io::{BufWriter, Write},
  path::Path,
};

use serde_json::Value;

use crate::{
  convert,
  engine::CoreError,
  models::{ExportFormat, ExportResult},
};

/// Render a document in the requested format and write it to disk, creating
/// parent directories as needed.
pub(crate) fn export_value(
  value: &Value,
  format: ExportFormat,
  output_path: &Path,
  indent: usize,
) -> Result<ExportResult, CoreError> {
  if let Some(parent) = output_path.parent() {
    std::fs::create_dir_all(parent)?;
  }

  let rendered = convert::render(value, format, indent)?;

  let out_file = File::create(output_path)?;
  let mut writer = BufWriter::new(out_file);
  writer.write_all(rendered.as_bytes())?;
  writer.flush()?;

  Ok(ExportResult {
    output_path: output_path.to_string_lossy().to_string(),
    bytes_written: rendered.len() as u64,
  })
}
