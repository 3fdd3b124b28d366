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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Identifies a quiz in the summary store: the blake3 hash of the quiz
/// file's text. Editing a file gives it a new key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuizKey {
    inner: blake3::Hash,
}

impl QuizKey {
    pub fn of_text(text: &str) -> Self {
        Self {
            inner: blake3::hash(text.as_bytes()),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::new(format!("invalid quiz key: '{s}'")))?;
        Ok(Self { inner })
    }

    /// First twelve hex digits, for display.
    pub fn short(self) -> String {
        self.to_hex()[..12].to_string()
    }
}

impl Display for QuizKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for QuizKey {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        QuizKey::from_hex(&value)
    }
}

impl From<QuizKey> for String {
    fn from(key: QuizKey) -> String {
        key.to_hex()
    }
}
