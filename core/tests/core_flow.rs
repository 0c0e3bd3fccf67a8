use std::path::PathBuf;

use jl_core::{
  CodeLanguage, CoreError, EngineOptions, ExportFormat, JsonEngine, SearchQuery, Side,
  StorageOptions, ValidationOutcome,
};

fn engine_with_sqlite(sqlite_path: PathBuf) -> JsonEngine {
  JsonEngine::new(EngineOptions {
    storage: StorageOptions {
      sqlite_path: Some(sqlite_path),
    },
    ..Default::default()
  })
  .unwrap()
}

#[test]
fn starts_with_an_untitled_tab_and_tracks_active() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let tabs = eng.list_tabs();
  assert_eq!(tabs.len(), 1);
  assert_eq!(tabs[0].label, "Untitled");

  let (info, outcome) = eng.open_text("payload", r#"{"a":1}"#);
  assert_eq!(outcome, ValidationOutcome::Valid);
  assert_eq!(eng.list_tabs().len(), 2);
  assert_eq!(eng.active_tab().unwrap().tab_id, info.tab_id);

  eng.close_tab(&info.tab_id).unwrap();
  assert_eq!(eng.list_tabs().len(), 1);

  // Closing the last tab leaves a fresh untitled one.
  let last = eng.list_tabs()[0].tab_id.clone();
  eng.close_tab(&last).unwrap();
  let tabs = eng.list_tabs();
  assert_eq!(tabs.len(), 1);
  assert_eq!(tabs[0].label, "Untitled");
}

#[test]
fn unknown_ids_are_structured_errors() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  assert!(matches!(
    eng.set_active_tab("nope"),
    Err(CoreError::UnknownTab(_))
  ));
  assert!(matches!(
    eng.diff_compare("nope"),
    Err(CoreError::UnknownSession(_))
  ));
}

#[test]
fn update_undo_redo_round_trip() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let (info, _) = eng.open_text("doc", r#"{"v":1}"#);
  eng.update_text(&info.tab_id, r#"{"v":2}"#).unwrap();

  let undone = eng.undo(&info.tab_id).unwrap().unwrap();
  assert_eq!(undone["v"], 1);
  // At the oldest state undo is a no-op.
  assert!(eng.undo(&info.tab_id).unwrap().is_none());

  let redone = eng.redo(&info.tab_id).unwrap().unwrap();
  assert_eq!(redone["v"], 2);
  assert!(eng.redo(&info.tab_id).unwrap().is_none());
}

#[test]
fn invalid_edits_surface_in_the_outcome_not_as_errors() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let (info, _) = eng.open_text("doc", r#"{"v":1}"#);
  let outcome = eng.update_text(&info.tab_id, "{broken").unwrap();
  let ValidationOutcome::Invalid { error } = outcome else {
    panic!("expected invalid outcome");
  };
  assert_eq!(error.line, 1);

  // Value-consuming operations now report the parse failure.
  assert!(matches!(
    eng.statistics(&info.tab_id),
    Err(CoreError::Parse(_))
  ));
}

#[test]
fn open_file_touches_recents_and_reloads() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let file = dir.path().join("a.json");
  std::fs::write(&file, r#"{"name":"jsonlens"}"#).unwrap();

  let (info, outcome) = eng.open_file(&file).unwrap();
  assert_eq!(outcome, ValidationOutcome::Valid);
  assert_eq!(info.label, "a.json");
  assert!(info.source_path.is_some());

  let recents = eng.recent_docs().unwrap();
  assert_eq!(recents.len(), 1);
  assert_eq!(recents[0].name, "a.json");

  let (reloaded, outcome) = eng.load_recent("a.json").unwrap();
  assert_eq!(outcome, ValidationOutcome::Valid);
  let value = eng.tab_value(&reloaded.tab_id).unwrap().unwrap();
  assert_eq!(value["name"], "jsonlens");

  assert!(matches!(
    eng.load_recent("missing.json"),
    Err(CoreError::InvalidArg(_))
  ));
}

#[test]
fn format_minify_and_sort_keys() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let (info, _) = eng.open_text("doc", r#"{"b":1,"a":{"d":2,"c":3}}"#);

  let pretty = eng.format_tab(&info.tab_id).unwrap();
  assert!(pretty.contains('\n'));
  assert!(pretty.contains("  \"b\": 1"));

  let minified = eng.minify_tab(&info.tab_id).unwrap();
  assert_eq!(minified, r#"{"b":1,"a":{"d":2,"c":3}}"#);

  let sorted = eng.sort_tab_keys(&info.tab_id, true).unwrap();
  let keys: Vec<&String> = sorted.as_object().unwrap().keys().collect();
  assert_eq!(keys, ["a", "b"]);
  let inner: Vec<&String> = sorted["a"].as_object().unwrap().keys().collect();
  assert_eq!(inner, ["c", "d"]);

  // Sorting is undoable.
  let undone = eng.undo(&info.tab_id).unwrap().unwrap();
  let keys: Vec<&String> = undone.as_object().unwrap().keys().collect();
  assert_eq!(keys, ["b", "a"]);
}

#[test]
fn statistics_search_query_and_schema() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let (info, _) = eng.open_text(
    "users",
    r#"{"users":[{"name":"Ada","active":true},{"name":"Brian","active":false}],"total":2}"#,
  );

  let stats = eng.statistics(&info.tab_id).unwrap();
  assert_eq!(stats.key_count, 6);
  assert_eq!(stats.max_depth, 3);
  assert_eq!(stats.type_distribution["string"], 2);
  assert_eq!(stats.type_distribution["boolean"], 2);

  let result = eng
    .search_tab(
      &info.tab_id,
      &SearchQuery {
        text: "ada".to_string(),
        ..Default::default()
      },
    )
    .unwrap();
  assert_eq!(result.hits.len(), 1);
  assert_eq!(result.hits[0].path, "$.users[0].name");

  let name = eng.query_tab(&info.tab_id, "$.users[0].name").unwrap();
  assert_eq!(name, "Ada");
  assert!(matches!(
    eng.query_tab(&info.tab_id, "$.missing"),
    Err(CoreError::Query(_))
  ));

  let schema = eng.infer_schema_tab(&info.tab_id).unwrap();
  assert_eq!(schema["type"], "object");
  assert_eq!(schema["properties"]["total"]["type"], "integer");
}

#[test]
fn codegen_convert_and_export() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let (info, _) = eng.open_text("doc", r#"{"id":1,"name":"Ada","tags":["a","b"]}"#);

  let ts = eng
    .generate_code_tab(&info.tab_id, CodeLanguage::Typescript, "Root")
    .unwrap();
  assert!(ts.contains("export interface Root {"));
  assert!(ts.contains("name: string;"));
  assert!(ts.contains("tags: string[];"));

  let yaml = eng.convert_tab(&info.tab_id, ExportFormat::Yaml).unwrap();
  assert!(yaml.contains("name: Ada"));

  let xml = eng.convert_tab(&info.tab_id, ExportFormat::Xml).unwrap();
  assert!(xml.contains("<name>Ada</name>"));
  assert!(xml.contains("<tags>a</tags>"));

  // CSV needs an array root.
  assert!(matches!(
    eng.convert_tab(&info.tab_id, ExportFormat::Csv),
    Err(CoreError::Convert(_))
  ));

  let out = dir.path().join("out").join("doc.yaml");
  let exported = eng
    .export_tab(&info.tab_id, ExportFormat::Yaml, &out)
    .unwrap();
  assert!(exported.bytes_written > 0);
  let written = std::fs::read_to_string(out).unwrap();
  assert_eq!(written, yaml);
}

#[test]
fn csv_export_of_an_array_tab() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let (info, _) = eng.open_text(
    "rows",
    r#"[{"id":1,"name":"Alice"},{"id":2,"name":"Bob","extra":true}]"#,
  );

  let csv = eng.convert_tab(&info.tab_id, ExportFormat::Csv).unwrap();
  let mut lines = csv.lines();
  assert_eq!(lines.next(), Some("id,name,extra"));
  assert_eq!(lines.next(), Some("1,Alice,"));
  assert_eq!(lines.next(), Some("2,Bob,true"));
}

#[test]
fn diff_sessions_through_the_engine() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let session = eng.diff_new();

  // Compare before both sides are set: structured failure.
  assert!(matches!(
    eng.diff_compare(&session),
    Err(CoreError::Compare(_))
  ));

  eng.diff_set_side(&session, Side::A, r#"{"a":1,"b":2}"#).unwrap();
  eng.diff_set_side(&session, Side::B, r#"{"a":1,"b":3}"#).unwrap();

  let summary = eng.diff_compare(&session).unwrap();
  assert!(summary.has_differences);
  assert_eq!(summary.difference_count, 1);
  assert_eq!(eng.diff_total(&session).unwrap(), 1);

  let (lines_a, lines_b) = eng.diff_lines(&session).unwrap();
  assert_eq!(lines_a.len(), lines_b.len());

  assert_eq!(eng.diff_current(&session).unwrap(), Some(2));
  assert_eq!(eng.diff_next(&session).unwrap(), None);
  assert_eq!(eng.diff_previous(&session).unwrap(), None);
  assert_eq!(eng.diff_jump(&session, 0).unwrap(), 2);
  assert!(matches!(
    eng.diff_jump(&session, 7),
    Err(CoreError::Navigate(_))
  ));

  eng.diff_close(&session).unwrap();
  assert!(matches!(
    eng.diff_close(&session),
    Err(CoreError::UnknownSession(_))
  ));
}

#[test]
fn diff_side_prefilled_from_a_tab() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let (info, _) = eng.open_text("doc", r#"{"a":1}"#);
  let session = eng.diff_new();
  eng.diff_set_side_from_tab(&session, Side::A, &info.tab_id).unwrap();
  eng.diff_set_side(&session, Side::B, r#"{"a":1}"#).unwrap();

  let summary = eng.diff_compare(&session).unwrap();
  assert!(!summary.has_differences);
}

#[test]
fn independent_sessions_do_not_share_state() {
  let dir = tempfile::tempdir().unwrap();
  let eng = engine_with_sqlite(dir.path().join("t.sqlite"));

  let s1 = eng.diff_new();
  let s2 = eng.diff_new();

  eng.diff_set_side(&s1, Side::A, "[1]").unwrap();
  eng.diff_set_side(&s1, Side::B, "[2]").unwrap();
  eng.diff_set_side(&s2, Side::A, "[1]").unwrap();
  eng.diff_set_side(&s2, Side::B, "[1]").unwrap();

  assert!(eng.diff_compare(&s1).unwrap().has_differences);
  assert!(!eng.diff_compare(&s2).unwrap().has_differences);
}
