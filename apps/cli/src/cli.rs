use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jl_core::{CodeLanguage, ExportFormat};

#[derive(Parser)]
#[command(author, version, about = "Inspect, transform and compare JSON documents")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
  /// Compare two JSON files line by line
  Compare {
    file_a: PathBuf,
    file_b: PathBuf,
    /// Only print the summary line
    #[arg(long)]
    summary: bool,
  },
  /// Pretty-print, minify or key-sort a JSON file
  Fmt {
    file: PathBuf,
    /// Indent width for pretty output
    #[arg(long, default_value_t = 2)]
    indent: usize,
    /// Emit the compact rendering instead
    #[arg(long)]
    minify: bool,
    /// Sort object keys alphabetically first
    #[arg(long)]
    sort_keys: bool,
    /// With --sort-keys, recurse into nested values
    #[arg(long, requires = "sort_keys")]
    recursive: bool,
  },
  /// Print statistics for a JSON file
  Stats { file: PathBuf },
  /// Convert a JSON file to another format
  Convert {
    file: PathBuf,
    /// Target format
    #[arg(long, value_enum)]
    to: Format,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
  },
  /// Evaluate a simplified JSONPath (e.g. $.users[0].name)
  Query { file: PathBuf, path: String },
  /// Search keys and values for a substring
  Search {
    file: PathBuf,
    text: String,
    #[arg(long)]
    case_sensitive: bool,
  },
  /// Generate a type definition from a JSON sample
  Codegen {
    file: PathBuf,
    #[arg(long, value_enum)]
    lang: Lang,
    /// Name of the generated type
    #[arg(long, default_value = "Root")]
    name: String,
  },
  /// Infer a JSON Schema from a sample
  Schema { file: PathBuf },
  /// List recently opened documents
  Recent,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
  Json,
  Yaml,
  Toml,
  Csv,
  Xml,
}

impl From<Format> for ExportFormat {
  fn from(f: Format) -> Self {
    match f {
      Format::Json => ExportFormat::Json,
      Format::Yaml => ExportFormat::Yaml,
      Format::Toml => ExportFormat::Toml,
      Format::Csv => ExportFormat::Csv,
      Format::Xml => ExportFormat::Xml,
    }
  }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Lang {
  Typescript,
  Javascript,
  Python,
  Java,
  Csharp,
  Go,
}

impl From<Lang> for CodeLanguage {
  fn from(l: Lang) -> Self {
    match l {
      Lang::Typescript => CodeLanguage::Typescript,
      Lang::Javascript => CodeLanguage::Javascript,
      Lang::Python => CodeLanguage::Python,
      Lang::Java => CodeLanguage::Java,
      Lang::Csharp => CodeLanguage::Csharp,
      Lang::Go => CodeLanguage::Go,
    }
  }
}
