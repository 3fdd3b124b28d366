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

//! kotoba-core: Core library for the kotoba quiz tool.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - The mastery-streak scheduler (first pass, learning queue, review rounds)
//! - Quiz kinds that turn card payloads into prompts and options
//! - Loading quiz files from TOML or JSON
//! - Session summaries and the store seam callers persist them through

pub mod config;
pub mod error;
pub mod loader;
pub mod quiz;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;

// Re-exports for convenience
pub use config::{InitialOrder, QuizConfig, SchedulerConfig};
pub use error::{ErrorReport, Fallible, fail};
pub use loader::{LoadError, LoadedQuiz, QuizFile};
pub use quiz::QuizKind;
pub use scheduler::{AnswerOutcome, Phase, Scheduler, SchedulerError};
pub use session::{Drill, Question, QuizSession};
pub use store::{MemoryStore, SummaryStore};
pub use summary::{FirstPassStats, SessionSnapshot, StoredSummary};
pub use types::card::{Card, CardId, MASTERY_THRESHOLD};
pub use types::quiz_key::QuizKey;
pub use types::timestamp::Timestamp;
