use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use jl_core::{
  DiffKind, DiffLine, EngineOptions, JsonEngine, SearchQuery, Side, ValidationOutcome,
};

use crate::cli::{Cli, Command};

pub fn run_command(cli: Cli) -> Result<()> {
  match cli.command {
    Command::Compare {
      file_a,
      file_b,
      summary,
    } => compare(&file_a, &file_b, summary),
    Command::Fmt {
      file,
      indent,
      minify,
      sort_keys,
      recursive,
    } => {
      let engine = engine_with_indent(indent)?;
      let tab = open_tab(&engine, &file)?;
      if sort_keys {
        engine.sort_tab_keys(&tab, recursive)?;
      }
      let out = if minify {
        engine.minify_tab(&tab)?
      } else {
        engine.format_tab(&tab)?
      };
      println!("{out}");
      Ok(())
    }
    Command::Stats { file } => {
      let engine = default_engine()?;
      let tab = open_tab(&engine, &file)?;
      let stats = engine.statistics(&tab)?;
      println!("size:   {} bytes", stats.total_size);
      println!("keys:   {}", stats.key_count);
      println!("values: {}", stats.value_count);
      println!("depth:  {}", stats.max_depth);
      println!("types:");
      for (kind, count) in &stats.type_distribution {
        println!("  {kind:<8} {count}");
      }
      Ok(())
    }
    Command::Convert { file, to, output } => {
      let engine = default_engine()?;
      let tab = open_tab(&engine, &file)?;
      match output {
        Some(path) => {
          let result = engine.export_tab(&tab, to.into(), &path)?;
          println!("wrote {} ({} bytes)", result.output_path, result.bytes_written);
        }
        None => {
          print!("{}", engine.convert_tab(&tab, to.into())?);
        }
      }
      Ok(())
    }
    Command::Query { file, path } => {
      let engine = default_engine()?;
      let tab = open_tab(&engine, &file)?;
      let value = engine.query_tab(&tab, &path)?;
      println!("{}", jl_core::to_pretty(&value, 2));
      Ok(())
    }
    Command::Search {
      file,
      text,
      case_sensitive,
    } => {
      let engine = default_engine()?;
      let tab = open_tab(&engine, &file)?;
      let result = engine.search_tab(
        &tab,
        &SearchQuery {
          text,
          case_sensitive,
          ..Default::default()
        },
      )?;
      for hit in &result.hits {
        println!("{} = {}", hit.path.cyan(), jl_core::to_minified(&hit.value));
      }
      if result.truncated {
        println!("{}", "(result truncated)".yellow());
      }
      println!(
        "{} match{}",
        result.hits.len(),
        if result.hits.len() == 1 { "" } else { "es" }
      );
      Ok(())
    }
    Command::Codegen { file, lang, name } => {
      let engine = default_engine()?;
      let tab = open_tab(&engine, &file)?;
      println!("{}", engine.generate_code_tab(&tab, lang.into(), &name)?);
      Ok(())
    }
    Command::Schema { file } => {
      let engine = default_engine()?;
      let tab = open_tab(&engine, &file)?;
      let schema = engine.infer_schema_tab(&tab)?;
      println!("{}", jl_core::to_pretty(&schema, 2));
      Ok(())
    }
    Command::Recent => {
      let engine = default_engine()?;
      for doc in engine.recent_docs()? {
        println!("{}  {}", doc.last_opened_at_ms, doc.name);
      }
      Ok(())
    }
  }
}

fn default_engine() -> Result<JsonEngine> {
  Ok(JsonEngine::new(EngineOptions::default())?)
}

fn engine_with_indent(indent: usize) -> Result<JsonEngine> {
  Ok(JsonEngine::new(EngineOptions {
    indent,
    ..Default::default()
  })?)
}

fn open_tab(engine: &JsonEngine, file: &Path) -> Result<String> {
  let (info, outcome) = engine
    .open_file(file)
    .with_context(|| format!("failed to open {}", file.display()))?;
  match outcome {
    ValidationOutcome::Valid => Ok(info.tab_id),
    ValidationOutcome::Empty => bail!("{}: file holds no JSON", file.display()),
    ValidationOutcome::Invalid { error } => bail!(
      "{}: invalid JSON at line {}, column {}: {}",
      file.display(),
      error.line,
      error.column,
      error.message
    ),
  }
}

fn compare(file_a: &Path, file_b: &Path, summary_only: bool) -> Result<()> {
  let engine = default_engine()?;
  let session = engine.diff_new();
  set_side(&engine, &session, Side::A, file_a)?;
  set_side(&engine, &session, Side::B, file_b)?;

  let summary = engine.diff_compare(&session)?;
  if !summary_only {
    let (lines_a, lines_b) = engine.diff_lines(&session)?;
    render_diff(&lines_a, &lines_b);
  }

  if summary.has_differences {
    println!(
      "{}",
      format!(
        "Found {} difference{}",
        summary.difference_count,
        if summary.difference_count == 1 { "" } else { "s" }
      )
      .yellow()
    );
    std::process::exit(1);
  }
  println!("{}", "No differences found".green());
  Ok(())
}

fn set_side(engine: &JsonEngine, session: &str, side: Side, file: &Path) -> Result<()> {
  let text = std::fs::read_to_string(file)
    .with_context(|| format!("failed to read {}", file.display()))?;
  match engine.diff_set_side(session, side, &text)? {
    ValidationOutcome::Valid => Ok(()),
    ValidationOutcome::Empty => bail!("{}: file holds no JSON", file.display()),
    ValidationOutcome::Invalid { error } => bail!(
      "{} (side {side}): invalid JSON at line {}, column {}: {}",
      file.display(),
      error.line,
      error.column,
      error.message
    ),
  }
}

fn render_diff(lines_a: &[DiffLine], lines_b: &[DiffLine]) {
  for (la, lb) in lines_a.iter().zip(lines_b) {
    match la.kind {
      DiffKind::Unchanged => println!("  {:4}  {}", la.line_number, la.content),
      DiffKind::Modified => {
        println!("{}", format!("- {:4}  {}", la.line_number, la.content).red());
        println!("{}", format!("+ {:4}  {}", lb.line_number, lb.content).green());
      }
      DiffKind::Removed | DiffKind::Added => {
        if !la.content.is_empty() {
          println!("{}", format!("- {:4}  {}", la.line_number, la.content).red());
        }
        if !lb.content.is_empty() {
          println!("{}", format!("+ {:4}  {}", lb.line_number, lb.content).green());
        }
      }
    }
  }
}
