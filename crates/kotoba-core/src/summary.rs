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

use serde::Deserialize;
use serde::Serialize;

use crate::types::quiz_key::QuizKey;
use crate::types::timestamp::Timestamp;

/// Score at the moment every card had been seen once.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FirstPassStats {
    pub score: usize,
    pub total: usize,
}

/// Summary counters for a session, in the shape callers persist.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Correct answers so far.
    pub score: usize,
    /// Answers so far.
    pub total: usize,
    pub total_incorrect: usize,
    pub mastered: usize,
    /// Cards not presented yet.
    pub unseen: usize,
}

impl SessionSnapshot {
    /// Fraction of answers that were correct, or `None` before any answer.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.score as f64 / self.total as f64)
        }
    }
}

/// The document written to a summary store after each answer.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSummary {
    pub quiz: QuizKey,
    pub title: String,
    pub deck_size: usize,
    pub snapshot: SessionSnapshot,
    pub first_pass: Option<FirstPassStats>,
    pub complete: bool,
    pub recorded_at: Timestamp,
}
