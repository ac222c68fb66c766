// Snapshot persistence using SQLite

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use countboard_stats::{CategoryStats, Snapshot, SnapshotSummary};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS snapshots (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    date TEXT NOT NULL,           -- RFC 3339
    week_number INTEGER,          -- NULL when saved outside a target week
    ira_stats TEXT NOT NULL,      -- CategoryStats as JSON
    cc_stats TEXT NOT NULL
);
"#;

/// Keyed storage of immutable snapshots.
pub trait SnapshotStore {
    /// Store a new snapshot. Fails if the id is already taken.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), String>;
    /// Summaries, newest first. Ids are epoch milliseconds, so order follows them.
    fn list(&self) -> Result<Vec<SnapshotSummary>, String>;
    fn get(&self, id: &str) -> Result<Option<Snapshot>, String>;
    /// Returns whether a snapshot was removed.
    fn delete(&mut self, id: &str) -> Result<bool, String>;
}

pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    pub fn open(path: &Path) -> Result<Self, String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
        }
        let conn = Connection::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, String> {
        conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;
        Ok(Self { conn })
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), String> {
        let ira = serde_json::to_string(&snapshot.ira_stats).map_err(|e| e.to_string())?;
        let cc = serde_json::to_string(&snapshot.cc_stats).map_err(|e| e.to_string())?;

        let inserted = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO snapshots (id, name, date, week_number, ira_stats, cc_stats)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![snapshot.id, snapshot.name, snapshot.date, snapshot.week_number, ira, cc],
            )
            .map_err(|e| e.to_string())?;

        if inserted == 0 {
            return Err(format!("snapshot '{}' already exists", snapshot.id));
        }
        log::debug!("saved snapshot {} ({})", snapshot.id, snapshot.name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SnapshotSummary>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, date FROM snapshots ORDER BY CAST(id AS INTEGER) DESC, id DESC")
            .map_err(|e| e.to_string())?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SnapshotSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    date: row.get(2)?,
                })
            })
            .map_err(|e| e.to_string())?;

        rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
    }

    fn get(&self, id: &str) -> Result<Option<Snapshot>, String> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, date, week_number, ira_stats, cc_stats FROM snapshots WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<u8>>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()
            .map_err(|e| e.to_string())?;

        let Some((id, name, date, week_number, ira, cc)) = row else {
            return Ok(None);
        };

        Ok(Some(Snapshot {
            ira_stats: parse_stats(&id, "IRA", &ira)?,
            cc_stats: parse_stats(&id, "CC", &cc)?,
            id,
            name,
            date,
            week_number,
        }))
    }

    fn delete(&mut self, id: &str) -> Result<bool, String> {
        let removed = self
            .conn
            .execute("DELETE FROM snapshots WHERE id = ?1", params![id])
            .map_err(|e| e.to_string())?;
        Ok(removed > 0)
    }
}

fn parse_stats(id: &str, label: &str, json: &str) -> Result<CategoryStats, String> {
    serde_json::from_str(json).map_err(|e| format!("snapshot '{id}' has malformed {label} stats: {e}"))
}
