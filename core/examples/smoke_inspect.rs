use jl_core::{EngineOptions, JsonEngine, StorageOptions, ValidationOutcome};

fn main() -> Result<(), String> {
  let path = std::env::args()
    .nth(1)
    .ok_or_else(|| "usage: cargo run -p jl_core --example smoke_inspect -- <file.json>".to_string())?;

  let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
  let sqlite = dir.path().join("smoke.sqlite");

  let eng = JsonEngine::new(EngineOptions {
    storage: StorageOptions {
      sqlite_path: Some(sqlite),
    },
    ..Default::default()
  })
  .map_err(|e| e.to_string())?;

  let (tab, outcome) = eng.open_file(&path).map_err(|e| e.to_string())?;
  if let ValidationOutcome::Invalid { error } = outcome {
    return Err(format!(
      "line {}, column {}: {}",
      error.line, error.column, error.message
    ));
  }

  let stats = eng.statistics(&tab.tab_id).map_err(|e| e.to_string())?;
  println!("size={}", stats.total_size);
  println!("keys={}", stats.key_count);
  println!("values={}", stats.value_count);
  println!("depth={}", stats.max_depth);
  for (kind, count) in &stats.type_distribution {
    println!("{kind}={count}");
  }
  Ok(())
}
