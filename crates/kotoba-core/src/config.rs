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

//! Session settings. A collection can carry a `kotoba.toml` with these
//! fields; anything missing takes the default.

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;

/// The name of the optional settings file at the collection root.
pub const CONFIG_FILE_NAME: &str = "kotoba.toml";

/// The number of wrong options offered next to the right one.
pub const DEFAULT_DISTRACTORS: usize = 3;

/// Order in which never-seen cards are first presented.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialOrder {
    /// Input order.
    #[default]
    Sequential,
    /// A uniform random permutation of the input.
    Shuffled,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SchedulerConfig {
    pub initial_order: InitialOrder,
    /// When a card is missed, reshuffle the whole learning queue rather than
    /// only appending the missed card to it.
    pub reshuffle_on_miss: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_order: InitialOrder::Sequential,
            reshuffle_on_miss: true,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct QuizConfig {
    #[serde(flatten)]
    pub scheduler: SchedulerConfig,
    pub distractors: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            distractors: DEFAULT_DISTRACTORS,
        }
    }
}

impl QuizConfig {
    pub fn from_toml(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() -> Fallible<()> {
        assert_eq!(QuizConfig::from_toml("")?, QuizConfig::default());
        Ok(())
    }

    #[test]
    fn test_defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.scheduler.initial_order, InitialOrder::Sequential);
        assert!(config.scheduler.reshuffle_on_miss);
        assert_eq!(config.distractors, 3);
    }

    #[test]
    fn test_parse_all_fields() -> Fallible<()> {
        let config = QuizConfig::from_toml(
            r#"
initial-order = "shuffled"
reshuffle-on-miss = false
distractors = 5
"#,
        )?;
        assert_eq!(config.scheduler.initial_order, InitialOrder::Shuffled);
        assert!(!config.scheduler.reshuffle_on_miss);
        assert_eq!(config.distractors, 5);
        Ok(())
    }

    #[test]
    fn test_bad_value() {
        let result = QuizConfig::from_toml("initial-order = \"backwards\"");
        assert!(result.is_err());
    }
}
