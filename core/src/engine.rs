use std::{collections::HashMap, path::Path, sync::Arc};

use parking_lot::Mutex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::{
  codegen,
  convert::{self, ConvertError},
  diff::OutOfRange,
  document::JsonDocument,
  export as export_impl,
  models::{
    CodeLanguage, DiffLine, DiffSummary, ExportFormat, ExportResult, ParseError, SearchQuery,
    SearchResult, Side, Statistics, TabInfo, ValidationOutcome,
  },
  query::{self, QueryError},
  search,
  session::{CompareError, DiffSession, SessionPhase},
  stats,
  storage::{RecentDoc, Storage, StorageOptions},
  transform,
};

#[derive(Debug, Error)]
pub enum CoreError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("unknown tab: {0}")]
  UnknownTab(String),
  #[error("unknown comparison session: {0}")]
  UnknownSession(String),
  #[error("invalid argument: {0}")]
  InvalidArg(String),
  #[error("parse error at line {}, column {}: {}", .0.line, .0.column, .0.message)]
  Parse(ParseError),
  #[error(transparent)]
  Compare(#[from] CompareError),
  #[error(transparent)]
  Navigate(#[from] OutOfRange),
  #[error(transparent)]
  Query(#[from] QueryError),
  #[error(transparent)]
  Convert(#[from] ConvertError),
  #[error("storage error: {0}")]
  Storage(String),
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
  /// Display indent for pretty output (2 or 4).
  pub indent: usize,
  /// Undo/redo states kept per tab.
  pub history_cap: usize,
  /// Recent documents kept in the session store.
  pub recent_cap: usize,
  pub storage: StorageOptions,
}

impl Default for EngineOptions {
  fn default() -> Self {
    Self {
      indent: 2,
      history_cap: 50,
      recent_cap: 10,
      storage: StorageOptions::default(),
    }
  }
}

struct TabState {
  label: String,
  dirty: bool,
  source_path: Option<String>,
  doc: JsonDocument,
  history: Vec<Value>,
  history_index: usize,
}

impl TabState {
  fn new(label: String, text: String, source_path: Option<String>) -> (Self, ValidationOutcome) {
    let mut doc = JsonDocument::new();
    let outcome = doc.set_text(text);
    let history = doc.parsed().cloned().into_iter().collect();
    (
      Self {
        label,
        dirty: false,
        source_path,
        doc,
        history,
        history_index: 0,
      },
      outcome,
    )
  }

  fn push_history(&mut self, value: Value, cap: usize) {
    self.history.truncate(self.history_index + 1);
    self.history.push(value);
    if self.history.len() > cap {
      self.history.remove(0);
    }
    self.history_index = self.history.len() - 1;
  }
}

#[derive(Default)]
struct Tabs {
  order: Vec<String>,
  map: HashMap<String, TabState>,
  active: Option<String>,
}

impl Tabs {
  fn get_mut(&mut self, tab_id: &str) -> Result<&mut TabState, CoreError> {
    self
      .map
      .get_mut(tab_id)
      .ok_or_else(|| CoreError::UnknownTab(tab_id.to_string()))
  }

  fn info(&self, tab_id: &str) -> Option<TabInfo> {
    self.map.get(tab_id).map(|t| TabInfo {
      tab_id: tab_id.to_string(),
      label: t.label.clone(),
      dirty: t.dirty,
      source_path: t.source_path.clone(),
    })
  }

  fn add(&mut self, label: String, text: String, source_path: Option<String>) -> (TabInfo, ValidationOutcome) {
    let tab_id = Uuid::new_v4().to_string();
    let (state, outcome) = TabState::new(label, text, source_path);
    let info = TabInfo {
      tab_id: tab_id.clone(),
      label: state.label.clone(),
      dirty: state.dirty,
      source_path: state.source_path.clone(),
    };
    self.map.insert(tab_id.clone(), state);
    self.order.push(tab_id.clone());
    self.active = Some(tab_id);
    (info, outcome)
  }
}

/// The application-state object: tabs of documents, per-tab history,
/// comparison sessions addressed by id, and the recent-document store.
///
/// Cloning yields another handle onto the same state. All operations are
/// synchronous; callers needing rate limiting (e.g. re-validate on every
/// keystroke) debounce on their side.
#[derive(Clone)]
pub struct JsonEngine {
  options: EngineOptions,
  tabs: Arc<Mutex<Tabs>>,
  diffs: Arc<Mutex<HashMap<String, DiffSession>>>,
  storage: Storage,
}

impl JsonEngine {
  pub fn new(options: EngineOptions) -> Result<Self, CoreError> {
    let storage = Storage::new(options.storage.clone()).map_err(CoreError::Storage)?;
    let engine = Self {
      options,
      tabs: Arc::new(Mutex::new(Tabs::default())),
      diffs: Arc::new(Mutex::new(HashMap::new())),
      storage,
    };
    // Start with one empty untitled tab.
    engine.tabs.lock().add("Untitled".to_string(), String::new(), None);
    Ok(engine)
  }

  pub fn storage(&self) -> &Storage {
    &self.storage
  }

  // ---- tabs ----

  /// Open raw text in a new tab and make it active.
  pub fn open_text(&self, label: &str, text: &str) -> (TabInfo, ValidationOutcome) {
    let (info, outcome) = self
      .tabs
      .lock()
      .add(label.to_string(), text.to_string(), None);
    debug!(tab = %info.tab_id, label, valid = outcome.is_valid(), "opened text tab");
    (info, outcome)
  }

  /// Open a file in a new tab; valid documents are remembered in the recent
  /// list.
  pub fn open_file(&self, path: impl AsRef<Path>) -> Result<(TabInfo, ValidationOutcome), CoreError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let label = path
      .file_name()
      .and_then(|s| s.to_str())
      .unwrap_or("Untitled")
      .to_string();

    let (info, outcome) = self.tabs.lock().add(
      label.clone(),
      text,
      Some(path.to_string_lossy().to_string()),
    );
    debug!(tab = %info.tab_id, %label, valid = outcome.is_valid(), "opened file tab");

    if outcome.is_valid() {
      if let Ok(Some(value)) = self.tab_value(&info.tab_id) {
        self
          .storage
          .touch_recent(&label, &transform::to_minified(&value), self.options.recent_cap)
          .map_err(CoreError::Storage)?;
      }
    }
    Ok((info, outcome))
  }

  pub fn list_tabs(&self) -> Vec<TabInfo> {
    let tabs = self.tabs.lock();
    tabs
      .order
      .iter()
      .filter_map(|id| tabs.info(id))
      .collect()
  }

  pub fn active_tab(&self) -> Option<TabInfo> {
    let tabs = self.tabs.lock();
    tabs.active.as_ref().and_then(|id| tabs.info(id))
  }

  pub fn set_active_tab(&self, tab_id: &str) -> Result<(), CoreError> {
    let mut tabs = self.tabs.lock();
    if !tabs.map.contains_key(tab_id) {
      return Err(CoreError::UnknownTab(tab_id.to_string()));
    }
    tabs.active = Some(tab_id.to_string());
    Ok(())
  }

  pub fn rename_tab(&self, tab_id: &str, label: &str) -> Result<(), CoreError> {
    let mut tabs = self.tabs.lock();
    tabs.get_mut(tab_id)?.label = label.to_string();
    Ok(())
  }

  /// Close a tab. Closing the last one leaves a fresh untitled tab so there
  /// is always somewhere to type.
  pub fn close_tab(&self, tab_id: &str) -> Result<(), CoreError> {
    let mut tabs = self.tabs.lock();
    if tabs.map.remove(tab_id).is_none() {
      return Err(CoreError::UnknownTab(tab_id.to_string()));
    }
    tabs.order.retain(|id| id != tab_id);
    if tabs.order.is_empty() {
      tabs.add("Untitled".to_string(), String::new(), None);
    } else if tabs.active.as_deref() == Some(tab_id) {
      tabs.active = tabs.order.first().cloned();
    }
    Ok(())
  }

  pub fn tab_text(&self, tab_id: &str) -> Result<String, CoreError> {
    let mut tabs = self.tabs.lock();
    Ok(tabs.get_mut(tab_id)?.doc.raw_text().to_string())
  }

  pub fn tab_value(&self, tab_id: &str) -> Result<Option<Value>, CoreError> {
    let mut tabs = self.tabs.lock();
    Ok(tabs.get_mut(tab_id)?.doc.parsed().cloned())
  }

  pub fn tab_parse_error(&self, tab_id: &str) -> Result<Option<ParseError>, CoreError> {
    let mut tabs = self.tabs.lock();
    Ok(tabs.get_mut(tab_id)?.doc.parse_error().cloned())
  }

  /// Replace a tab's text and re-parse. Valid parses become an undo state.
  pub fn update_text(&self, tab_id: &str, text: &str) -> Result<ValidationOutcome, CoreError> {
    let history_cap = self.options.history_cap;
    let mut tabs = self.tabs.lock();
    let tab = tabs.get_mut(tab_id)?;
    let outcome = tab.doc.set_text(text.to_string());
    tab.dirty = true;
    if let Some(value) = tab.doc.parsed().cloned() {
      tab.push_history(value, history_cap);
    }
    Ok(outcome)
  }

  pub fn undo(&self, tab_id: &str) -> Result<Option<Value>, CoreError> {
    let indent = self.options.indent;
    let mut tabs = self.tabs.lock();
    let tab = tabs.get_mut(tab_id)?;
    if tab.history_index == 0 {
      return Ok(None);
    }
    tab.history_index -= 1;
    let value = tab.history[tab.history_index].clone();
    tab.doc.set_value(value.clone(), indent);
    tab.dirty = true;
    Ok(Some(value))
  }

  pub fn redo(&self, tab_id: &str) -> Result<Option<Value>, CoreError> {
    let indent = self.options.indent;
    let mut tabs = self.tabs.lock();
    let tab = tabs.get_mut(tab_id)?;
    if tab.history_index + 1 >= tab.history.len() {
      return Ok(None);
    }
    tab.history_index += 1;
    let value = tab.history[tab.history_index].clone();
    tab.doc.set_value(value.clone(), indent);
    tab.dirty = true;
    Ok(Some(value))
  }

  // ---- document operations ----

  /// Pretty-print the tab at the configured indent; the tab's text is
  /// rewritten to the result.
  pub fn format_tab(&self, tab_id: &str) -> Result<String, CoreError> {
    let value = self.parsed_value(tab_id)?;
    let indent = self.options.indent;
    let mut tabs = self.tabs.lock();
    let tab = tabs.get_mut(tab_id)?;
    tab.doc.set_value(value, indent);
    Ok(tab.doc.raw_text().to_string())
  }

  /// Compact the tab's text to the minified rendering.
  pub fn minify_tab(&self, tab_id: &str) -> Result<String, CoreError> {
    let value = self.parsed_value(tab_id)?;
    let minified = transform::to_minified(&value);
    let mut tabs = self.tabs.lock();
    tabs.get_mut(tab_id)?.doc.set_text(minified.clone());
    Ok(minified)
  }

  /// Alphabetically sort the tab's object keys (optionally recursive) and
  /// record an undo state.
  pub fn sort_tab_keys(&self, tab_id: &str, recursive: bool) -> Result<Value, CoreError> {
    let value = self.parsed_value(tab_id)?;
    let sorted = transform::sort_keys(&value, recursive);
    let history_cap = self.options.history_cap;
    let indent = self.options.indent;
    let mut tabs = self.tabs.lock();
    let tab = tabs.get_mut(tab_id)?;
    tab.push_history(sorted.clone(), history_cap);
    tab.doc.set_value(sorted.clone(), indent);
    tab.dirty = true;
    Ok(sorted)
  }

  pub fn statistics(&self, tab_id: &str) -> Result<Statistics, CoreError> {
    Ok(stats::statistics(&self.parsed_value(tab_id)?))
  }

  pub fn search_tab(&self, tab_id: &str, query: &SearchQuery) -> Result<SearchResult, CoreError> {
    Ok(search::search(&self.parsed_value(tab_id)?, query))
  }

  pub fn query_tab(&self, tab_id: &str, path: &str) -> Result<Value, CoreError> {
    let value = self.parsed_value(tab_id)?;
    Ok(query::eval_path(&value, path)?.clone())
  }

  pub fn infer_schema_tab(&self, tab_id: &str) -> Result<Value, CoreError> {
    Ok(query::infer_schema(&self.parsed_value(tab_id)?))
  }

  pub fn generate_code_tab(
    &self,
    tab_id: &str,
    language: CodeLanguage,
    name: &str,
  ) -> Result<String, CoreError> {
    Ok(codegen::generate(&self.parsed_value(tab_id)?, language, name))
  }

  pub fn convert_tab(&self, tab_id: &str, format: ExportFormat) -> Result<String, CoreError> {
    Ok(convert::render(
      &self.parsed_value(tab_id)?,
      format,
      self.options.indent,
    )?)
  }

  pub fn export_tab(
    &self,
    tab_id: &str,
    format: ExportFormat,
    output_path: impl AsRef<Path>,
  ) -> Result<ExportResult, CoreError> {
    let value = self.parsed_value(tab_id)?;
    let result = export_impl::export_value(&value, format, output_path.as_ref(), self.options.indent)?;
    debug!(tab = tab_id, ?format, path = %result.output_path, "exported tab");
    Ok(result)
  }

  // ---- recent documents ----

  pub fn recent_docs(&self) -> Result<Vec<RecentDoc>, CoreError> {
    self
      .storage
      .list_recent(self.options.recent_cap)
      .map_err(CoreError::Storage)
  }

  /// Re-open a remembered document in a new tab.
  pub fn load_recent(&self, name: &str) -> Result<(TabInfo, ValidationOutcome), CoreError> {
    let doc = self
      .storage
      .get_recent(name)
      .map_err(CoreError::Storage)?
      .ok_or_else(|| CoreError::InvalidArg(format!("no recent document named '{name}'")))?;
    Ok(self.open_text(&doc.name, &doc.content_json))
  }

  // ---- comparison sessions ----

  /// Create an empty comparison session and return its id.
  pub fn diff_new(&self) -> String {
    let session_id = Uuid::new_v4().to_string();
    self.diffs.lock().insert(session_id.clone(), DiffSession::new());
    debug!(session = %session_id, "created comparison session");
    session_id
  }

  pub fn diff_close(&self, session_id: &str) -> Result<(), CoreError> {
    self
      .diffs
      .lock()
      .remove(session_id)
      .map(|_| ())
      .ok_or_else(|| CoreError::UnknownSession(session_id.to_string()))
  }

  fn with_diff<T>(
    &self,
    session_id: &str,
    f: impl FnOnce(&mut DiffSession) -> T,
  ) -> Result<T, CoreError> {
    let mut diffs = self.diffs.lock();
    let session = diffs
      .get_mut(session_id)
      .ok_or_else(|| CoreError::UnknownSession(session_id.to_string()))?;
    Ok(f(session))
  }

  pub fn diff_set_side(
    &self,
    session_id: &str,
    side: Side,
    text: &str,
  ) -> Result<ValidationOutcome, CoreError> {
    self.with_diff(session_id, |s| s.set_side(side, text))
  }

  /// Pre-fill one side from a tab's parsed value.
  pub fn diff_set_side_from_tab(
    &self,
    session_id: &str,
    side: Side,
    tab_id: &str,
  ) -> Result<(), CoreError> {
    let value = self.parsed_value(tab_id)?;
    self.with_diff(session_id, |s| s.set_side_value(side, value))
  }

  pub fn diff_compare(&self, session_id: &str) -> Result<DiffSummary, CoreError> {
    let summary = self.with_diff(session_id, |s| s.compare())??;
    debug!(
      session = session_id,
      differences = summary.difference_count,
      "compared"
    );
    Ok(summary)
  }

  pub fn diff_recompare(&self, session_id: &str) -> Result<DiffSummary, CoreError> {
    Ok(self.with_diff(session_id, |s| s.recompare())??)
  }

  /// Both sides' line arrays from the latest compare.
  pub fn diff_lines(&self, session_id: &str) -> Result<(Vec<DiffLine>, Vec<DiffLine>), CoreError> {
    self.with_diff(session_id, |s| {
      s.lines().map(|(a, b)| (a.to_vec(), b.to_vec()))
    })?
    .ok_or_else(|| CoreError::InvalidArg("no comparison computed yet".to_string()))
  }

  pub fn diff_phase(&self, session_id: &str) -> Result<SessionPhase, CoreError> {
    self.with_diff(session_id, |s| s.phase())
  }

  pub fn diff_total(&self, session_id: &str) -> Result<usize, CoreError> {
    self.with_diff(session_id, |s| s.navigator().total_differences())
  }

  pub fn diff_current(&self, session_id: &str) -> Result<Option<usize>, CoreError> {
    self.with_diff(session_id, |s| s.navigator().current())
  }

  pub fn diff_next(&self, session_id: &str) -> Result<Option<usize>, CoreError> {
    self.with_diff(session_id, |s| s.navigator_mut().next())
  }

  pub fn diff_previous(&self, session_id: &str) -> Result<Option<usize>, CoreError> {
    self.with_diff(session_id, |s| s.navigator_mut().previous())
  }

  pub fn diff_jump(&self, session_id: &str, diff_ordinal: usize) -> Result<usize, CoreError> {
    Ok(self.with_diff(session_id, |s| s.navigator_mut().jump_to(diff_ordinal))??)
  }

  // The tab's parsed value, or the reason there is none.
  fn parsed_value(&self, tab_id: &str) -> Result<Value, CoreError> {
    let mut tabs = self.tabs.lock();
    let tab = tabs.get_mut(tab_id)?;
    if let Some(value) = tab.doc.parsed() {
      return Ok(value.clone());
    }
    match tab.doc.parse_error() {
      Some(err) => Err(CoreError::Parse(err.clone())),
      None => Err(CoreError::InvalidArg("tab holds no JSON value".to_string())),
    }
  }
}
