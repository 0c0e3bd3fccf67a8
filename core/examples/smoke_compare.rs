use jl_core::{DiffKind, DiffSession, Side, ValidationOutcome};

fn main() -> Result<(), String> {
  let mut args = std::env::args().skip(1);
  let (path_a, path_b) = match (args.next(), args.next()) {
    (Some(a), Some(b)) => (a, b),
    _ => {
      return Err("usage: cargo run -p jl_core --example smoke_compare -- <a.json> <b.json>".into())
    }
  };

  let text_a = std::fs::read_to_string(&path_a).map_err(|e| e.to_string())?;
  let text_b = std::fs::read_to_string(&path_b).map_err(|e| e.to_string())?;

  let mut session = DiffSession::new();
  for (side, text, path) in [(Side::A, text_a, &path_a), (Side::B, text_b, &path_b)] {
    if let ValidationOutcome::Invalid { error } = session.set_side(side, text) {
      return Err(format!(
        "{path}: line {}, column {}: {}",
        error.line, error.column, error.message
      ));
    }
  }

  let summary = session.compare().map_err(|e| e.to_string())?;
  println!("differences={}", summary.difference_count);

  if let Some((lines_a, lines_b)) = session.lines() {
    for (la, lb) in lines_a.iter().zip(lines_b) {
      if la.kind != DiffKind::Unchanged {
        println!("row {}: '{}' | '{}'", la.pair_index, la.content, lb.content);
      }
    }
  }
  Ok(())
}
