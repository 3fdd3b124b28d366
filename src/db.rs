// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A SQLite-backed document table for session summaries.

use std::path::Path;

use kotoba_core::error::ErrorReport;
use kotoba_core::error::Fallible;
use kotoba_core::store::SummaryStore;
use kotoba_core::summary::StoredSummary;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

const SCHEMA: &str = "
create table if not exists summaries (
    key text primary key,
    doc text not null
) strict;
";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_error)?;
        conn.execute_batch(SCHEMA).map_err(db_error)?;
        log::debug!("Opened summary database at {}", path.display());
        Ok(Self { conn })
    }
}

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

impl SummaryStore for Database {
    fn get(&self, key: &str) -> Fallible<Option<StoredSummary>> {
        let doc: Option<String> = self
            .conn
            .query_row(
                "select doc from summaries where key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_error)?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &str, summary: &StoredSummary) -> Fallible<()> {
        let doc = serde_json::to_string(summary)?;
        self.conn
            .execute(
                "insert into summaries (key, doc) values (?1, ?2)
                 on conflict (key) do update set doc = excluded.doc",
                params![key, doc],
            )
            .map_err(db_error)?;
        Ok(())
    }

    fn keys(&self) -> Fallible<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("select key from summaries order by key")
            .map_err(db_error)?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(db_error)?
            .collect::<Result<Vec<String>, _>>()
            .map_err(db_error)?;
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use kotoba_core::summary::FirstPassStats;
    use kotoba_core::summary::SessionSnapshot;
    use kotoba_core::types::quiz_key::QuizKey;
    use kotoba_core::types::timestamp::Timestamp;
    use tempfile::tempdir;

    use super::*;

    fn summary(score: usize) -> StoredSummary {
        StoredSummary {
            quiz: QuizKey::of_text("verbs"),
            title: "N5 verbs".to_string(),
            deck_size: 3,
            snapshot: SessionSnapshot {
                score,
                total: score + 1,
                total_incorrect: 1,
                mastered: 1,
                unseen: 0,
            },
            first_pass: Some(FirstPassStats { score: 2, total: 3 }),
            complete: false,
            recorded_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_round_trip() -> Fallible<()> {
        let dir = tempdir()?;
        let mut db = Database::new(&dir.path().join("kotoba.db"))?;
        assert_eq!(db.get("missing")?, None);
        let stored = summary(2);
        db.put("verbs", &stored)?;
        assert_eq!(db.get("verbs")?, Some(stored));
        Ok(())
    }

    #[test]
    fn test_put_replaces() -> Fallible<()> {
        let dir = tempdir()?;
        let mut db = Database::new(&dir.path().join("kotoba.db"))?;
        db.put("verbs", &summary(1))?;
        db.put("verbs", &summary(5))?;
        assert_eq!(db.keys()?, vec!["verbs".to_string()]);
        assert_eq!(db.get("verbs")?.map(|s| s.snapshot.score), Some(5));
        Ok(())
    }

    #[test]
    fn test_persists_across_connections() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("kotoba.db");
        {
            let mut db = Database::new(&path)?;
            db.put("b", &summary(1))?;
            db.put("a", &summary(1))?;
        }
        let db = Database::new(&path)?;
        assert_eq!(db.keys()?, vec!["a".to_string(), "b".to_string()]);
        Ok(())
    }
}
