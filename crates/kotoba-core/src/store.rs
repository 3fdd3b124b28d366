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

//! Where callers keep session summaries between runs. The scheduler never
//! touches a store.

use std::collections::BTreeMap;

use crate::error::Fallible;
use crate::summary::StoredSummary;

/// A key-value document store holding one summary per quiz.
pub trait SummaryStore {
    fn get(&self, key: &str) -> Fallible<Option<StoredSummary>>;

    /// Insert or replace the summary stored under `key`.
    fn put(&mut self, key: &str, summary: &StoredSummary) -> Fallible<()>;

    /// All keys, sorted.
    fn keys(&self) -> Fallible<Vec<String>>;
}

#[derive(Default)]
pub struct MemoryStore {
    docs: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SummaryStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<StoredSummary>> {
        match self.docs.get(key) {
            Some(doc) => Ok(Some(serde_json::from_str(doc)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &str, summary: &StoredSummary) -> Fallible<()> {
        let doc = serde_json::to_string(summary)?;
        self.docs.insert(key.to_string(), doc);
        Ok(())
    }

    fn keys(&self) -> Fallible<Vec<String>> {
        Ok(self.docs.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SessionSnapshot;
    use crate::types::quiz_key::QuizKey;
    use crate::types::timestamp::Timestamp;

    fn summary(title: &str, score: usize) -> Fallible<StoredSummary> {
        Ok(StoredSummary {
            quiz: QuizKey::of_text(title),
            title: title.to_string(),
            deck_size: 3,
            snapshot: SessionSnapshot {
                score,
                total: score,
                ..SessionSnapshot::default()
            },
            first_pass: None,
            complete: false,
            recorded_at: Timestamp::try_from("2026-05-05T10:00:00.000".to_string())?,
        })
    }

    #[test]
    fn test_put_get_replace() -> Fallible<()> {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a")?, None);
        store.put("a", &summary("a", 1)?)?;
        store.put("a", &summary("a", 2)?)?;
        assert_eq!(store.get("a")?.map(|s| s.snapshot.score), Some(2));
        Ok(())
    }

    #[test]
    fn test_keys_sorted() -> Fallible<()> {
        let mut store = MemoryStore::new();
        store.put("b", &summary("b", 0)?)?;
        store.put("a", &summary("a", 0)?)?;
        assert_eq!(store.keys()?, vec!["a".to_string(), "b".to_string()]);
        Ok(())
    }
}
