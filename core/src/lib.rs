mod codegen;
mod convert;
mod diff;
mod document;
mod engine;
mod export;
mod models;
mod query;
mod search;
mod session;
mod stats;
mod storage;
mod transform;

pub use crate::codegen::generate as generate_code;
pub use crate::convert::{render, to_csv, to_toml, to_xml, to_yaml, ConvertError};
pub use crate::diff::{compute_diff, DiffNavigator, OutOfRange};
pub use crate::document::JsonDocument;
pub use crate::engine::{CoreError, EngineOptions, JsonEngine};
pub use crate::models::{
  CodeLanguage, DiffKind, DiffLine, DiffSummary, DuplicateValue, ExportFormat, ExportResult,
  ParseError, RepairOutcome, SearchMatch, SearchQuery, SearchResult, Side, Statistics, TabInfo,
  ValidationOutcome,
};
pub use crate::query::{eval_path, infer_schema, QueryError};
pub use crate::search::search;
pub use crate::session::{CompareError, DiffSession, SessionPhase};
pub use crate::stats::statistics;
pub use crate::storage::{RecentDoc, Storage, StorageOptions};
pub use crate::transform::{
  escape_strings, find_duplicate_values, find_empty_values, flatten, parse_jsonc, repair,
  sort_keys, strip_jsonc, to_minified, to_pretty, unescape_strings, unflatten,
};
