use std::{
  fs,
  path::PathBuf,
  time::{SystemTime, UNIX_EPOCH},
};

use rusqlite::{params, Connection};

#[derive(Debug, Clone, Default)]
pub struct StorageOptions {
  /// Path to the SQLite file. If None, defaults to ~/.jsonlens/storage.sqlite
  /// (or %USERPROFILE% on Windows).
  pub sqlite_path: Option<PathBuf>,
}

/// Local session store: recently opened documents (content inline, capped)
/// and JSON-valued settings.
#[derive(Clone)]
pub struct Storage {
  path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RecentDoc {
  pub name: String,
  pub content_json: String,
  pub last_opened_at_ms: i64,
}

impl Storage {
  pub fn new(opts: StorageOptions) -> Result<Self, String> {
    let path = opts.sqlite_path.unwrap_or_else(default_sqlite_path);

    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let conn = Connection::open(&path).map_err(|e| e.to_string())?;
    migrate(&conn).map_err(|e| e.to_string())?;
    Ok(Self { path })
  }

  fn open(&self) -> Result<Connection, String> {
    Connection::open(&self.path).map_err(|e| e.to_string())
  }

  /// Add or refresh a recent document, then prune beyond `cap` entries
  /// (oldest first).
  pub fn touch_recent(&self, name: &str, content_json: &str, cap: usize) -> Result<(), String> {
    let conn = self.open()?;
    let now = now_ms();

    conn
      .execute(
        r#"
INSERT INTO recent_docs(name, content_json, last_opened_at)
VALUES(?1, ?2, ?3)
ON CONFLICT(name) DO UPDATE SET
  content_json=excluded.content_json,
  last_opened_at=excluded.last_opened_at
        "#,
        params![name, content_json, now],
      )
      .map_err(|e| e.to_string())?;

    conn
      .execute(
        r#"
DELETE FROM recent_docs
WHERE name NOT IN (
  SELECT name FROM recent_docs ORDER BY last_opened_at DESC LIMIT ?1
)
        "#,
        params![cap as i64],
      )
      .map_err(|e| e.to_string())?;
    Ok(())
  }

  pub fn list_recent(&self, limit: usize) -> Result<Vec<RecentDoc>, String> {
    let conn = self.open()?;
    let mut stmt = conn
      .prepare(
        r#"
SELECT name, content_json, last_opened_at
FROM recent_docs
ORDER BY last_opened_at DESC
LIMIT ?1
        "#,
      )
      .map_err(|e| e.to_string())?;

    let rows = stmt
      .query_map(params![limit as i64], |row| {
        Ok(RecentDoc {
          name: row.get(0)?,
          content_json: row.get(1)?,
          last_opened_at_ms: row.get(2)?,
        })
      })
      .map_err(|e| e.to_string())?;

    let mut out = Vec::new();
    for r in rows {
      out.push(r.map_err(|e| e.to_string())?);
    }
    Ok(out)
  }

  pub fn get_recent(&self, name: &str) -> Result<Option<RecentDoc>, String> {
    let conn = self.open()?;
    let mut stmt = conn
      .prepare("SELECT name, content_json, last_opened_at FROM recent_docs WHERE name=?1")
      .map_err(|e| e.to_string())?;
    let mut rows = stmt.query(params![name]).map_err(|e| e.to_string())?;
    if let Some(row) = rows.next().map_err(|e| e.to_string())? {
      Ok(Some(RecentDoc {
        name: row.get(0).map_err(|e| e.to_string())?,
        content_json: row.get(1).map_err(|e| e.to_string())?,
        last_opened_at_ms: row.get(2).map_err(|e| e.to_string())?,
      }))
    } else {
      Ok(None)
    }
  }

  pub fn set_setting_json(&self, key: &str, value_json: &str) -> Result<(), String> {
    let conn = self.open()?;
    conn
      .execute(
        r#"
INSERT INTO settings(key, value_json)
VALUES(?1, ?2)
ON CONFLICT(key) DO UPDATE SET value_json=excluded.value_json
        "#,
        params![key, value_json],
      )
      .map_err(|e| e.to_string())?;
    Ok(())
  }

  pub fn get_setting_json(&self, key: &str) -> Result<Option<String>, String> {
    let conn = self.open()?;
    let mut stmt = conn
      .prepare("SELECT value_json FROM settings WHERE key=?1")
      .map_err(|e| e.to_string())?;
    let mut rows = stmt.query(params![key]).map_err(|e| e.to_string())?;
    if let Some(row) = rows.next().map_err(|e| e.to_string())? {
      let v: String = row.get(0).map_err(|e| e.to_string())?;
      Ok(Some(v))
    } else {
      Ok(None)
    }
  }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
  conn.execute_batch(
    r#"
CREATE TABLE IF NOT EXISTS recent_docs(
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL UNIQUE,
  content_json TEXT NOT NULL,
  last_opened_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS settings(
  key TEXT PRIMARY KEY,
  value_json TEXT NOT NULL
);
    "#,
  )?;
  Ok(())
}

fn default_sqlite_path() -> PathBuf {
  // - macOS/Linux: $HOME/.jsonlens/storage.sqlite
  // - Windows: %USERPROFILE%\.jsonlens\storage.sqlite
  let base = std::env::var_os("HOME")
    .or_else(|| std::env::var_os("USERPROFILE"))
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("."));
  base.join(".jsonlens").join("storage.sqlite")
}

fn now_ms() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .unwrap_or_default()
    .as_millis() as i64
}
