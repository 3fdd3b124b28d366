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

//! WASM bindings for kotoba - runs a quiz session in the browser.

use wasm_bindgen::prelude::*;
use web_sys::console;

use kotoba_core::config::QuizConfig;
use kotoba_core::error::ErrorReport;
use kotoba_core::loader::LoadedQuiz;
use kotoba_core::scheduler::Phase;
use kotoba_core::session::Drill;
use kotoba_core::store::SummaryStore;
use kotoba_core::summary::StoredSummary;
use kotoba_core::types::quiz_key::QuizKey;
use kotoba_core::types::timestamp::Timestamp;

mod storage;

use storage::Storage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"kotoba WASM initialized".into());
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One quiz session, driven from JavaScript.
#[wasm_bindgen]
pub struct QuizApp {
    config: QuizConfig,
    storage: Storage,
    /// The loaded quiz, if any
    quiz: Option<LoadedSession>,
}

struct LoadedSession {
    key: QuizKey,
    title: String,
    drill: Box<dyn Drill>,
}

#[wasm_bindgen]
impl QuizApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: QuizConfig::default(),
            storage: Storage::new(),
            quiz: None,
        }
    }

    /// Settings for sessions started after this call, as JSON with the same
    /// fields as `kotoba.toml`.
    #[wasm_bindgen]
    pub fn set_config(&mut self, config_json: &str) -> Result<(), JsValue> {
        self.config = serde_json::from_str(config_json)
            .map_err(|e| js_err(format!("Failed to parse config: {e}")))?;
        Ok(())
    }

    /// Load a quiz file and start a session over it. Returns the number of
    /// cards.
    #[wasm_bindgen]
    pub fn load_quiz(&mut self, source_path: &str, text: &str) -> Result<usize, JsValue> {
        let loaded = LoadedQuiz::parse(source_path, text).map_err(js_err)?;
        for warning in loaded.file.validate() {
            console::warn_1(&format!("{source_path}: {warning}").into());
        }
        let title = loaded.file.title().to_string();
        let drill = loaded.file.into_drill(self.config, random_seed()?);
        let size = drill.deck_size();
        self.quiz = Some(LoadedSession {
            key: loaded.key,
            title,
            drill,
        });
        Ok(size)
    }

    /// The presented question as JSON (`{card, prompt, options}`), or `null`.
    #[wasm_bindgen]
    pub fn question_json(&self) -> Result<String, JsValue> {
        let question = self.session()?.drill.question();
        serde_json::to_string(&question).map_err(js_err)
    }

    /// Answer with an option's text. Returns whether it was correct.
    #[wasm_bindgen]
    pub fn choose(&mut self, option: &str) -> Result<bool, JsValue> {
        let session = self.session_mut()?;
        let outcome = session.drill.choose(option).map_err(js_err)?;
        self.save()?;
        Ok(outcome.correct)
    }

    /// Answer with a correctness judgement made by the page.
    #[wasm_bindgen]
    pub fn answer(&mut self, correct: bool) -> Result<(), JsValue> {
        let session = self.session_mut()?;
        session.drill.answer(correct).map_err(js_err)?;
        self.save()
    }

    /// The correct option for the presented card, to show after a miss.
    #[wasm_bindgen]
    pub fn correct_answer(&self) -> Result<Option<String>, JsValue> {
        Ok(self.session()?.drill.correct_answer())
    }

    #[wasm_bindgen]
    pub fn acknowledge_first_pass(&mut self) -> Result<(), JsValue> {
        self.session_mut()?.drill.acknowledge_first_pass();
        Ok(())
    }

    /// One of "uninitialized", "empty", "presenting", "first-pass-gate",
    /// "complete".
    #[wasm_bindgen]
    pub fn phase(&self) -> String {
        let phase = match &self.quiz {
            Some(session) => session.drill.phase(),
            None => Phase::Uninitialized,
        };
        match phase {
            Phase::Uninitialized => "uninitialized",
            Phase::Empty => "empty",
            Phase::Presenting => "presenting",
            Phase::FirstPassGate => "first-pass-gate",
            Phase::Complete => "complete",
        }
        .to_string()
    }

    #[wasm_bindgen]
    pub fn deck_size(&self) -> usize {
        self.quiz.as_ref().map_or(0, |s| s.drill.deck_size())
    }

    /// `{score, total, totalIncorrect, mastered, unseen}` as JSON.
    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session()?.drill.snapshot()).map_err(js_err)
    }

    /// `{score, total}` once every card has been seen, otherwise `null`.
    #[wasm_bindgen]
    pub fn first_pass_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.session()?.drill.first_pass()).map_err(js_err)
    }

    /// The summary saved by the last session of the loaded quiz, or `null`.
    #[wasm_bindgen]
    pub fn previous_summary_json(&self) -> Result<String, JsValue> {
        let key = self.session()?.key.to_hex();
        let summary = self.storage.get(&key).map_err(js_err)?;
        serde_json::to_string(&summary).map_err(js_err)
    }

    // Private helper methods

    fn session(&self) -> Result<&LoadedSession, JsValue> {
        self.quiz
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No quiz loaded"))
    }

    fn session_mut(&mut self) -> Result<&mut LoadedSession, JsValue> {
        self.quiz
            .as_mut()
            .ok_or_else(|| JsValue::from_str("No quiz loaded"))
    }

    fn save(&mut self) -> Result<(), JsValue> {
        let session = self
            .quiz
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No quiz loaded"))?;
        let summary = StoredSummary {
            quiz: session.key,
            title: session.title.clone(),
            deck_size: session.drill.deck_size(),
            snapshot: session.drill.snapshot(),
            first_pass: session.drill.first_pass(),
            complete: session.drill.is_complete(),
            recorded_at: now().map_err(js_err)?,
        };
        self.storage
            .put(&session.key.to_hex(), &summary)
            .map_err(js_err)
    }
}

impl Default for QuizApp {
    fn default() -> Self {
        Self::new()
    }
}

fn random_seed() -> Result<u64, JsValue> {
    let mut buf = [0u8; 8];
    getrandom::getrandom(&mut buf).map_err(|e| js_err(format!("No randomness: {e}")))?;
    Ok(u64::from_le_bytes(buf))
}

/// The current local time, read from the JS clock.
fn now() -> Result<Timestamp, ErrorReport> {
    let date = js_sys::Date::new_0();
    let text = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}",
        date.get_full_year(),
        date.get_month() + 1,
        date.get_date(),
        date.get_hours(),
        date.get_minutes(),
        date.get_seconds(),
        date.get_milliseconds()
    );
    Timestamp::try_from(text)
}
