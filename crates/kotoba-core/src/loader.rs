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

//! Quiz files. A quiz is a TOML (or JSON) document with a `kind`, a `title`
//! and a `cards` array whose fields depend on the kind:
//!
//! ```toml
//! kind = "vocabulary"
//! title = "N5 verbs"
//!
//! [[cards]]
//! word = "食べる"
//! reading = "たべる"
//! meaning = "to eat"
//! ```

use std::collections::HashSet;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::config::QuizConfig;
use crate::quiz::Basic;
use crate::quiz::BasicCard;
use crate::quiz::Direction;
use crate::quiz::Grammar;
use crate::quiz::GrammarCard;
use crate::quiz::Kanji;
use crate::quiz::KanjiCard;
use crate::quiz::QuizKind;
use crate::quiz::Reading;
use crate::quiz::ReadingCard;
use crate::quiz::Vocabulary;
use crate::quiz::VocabularyCard;
use crate::session::Drill;
use crate::session::QuizSession;
use crate::types::quiz_key::QuizKey;

#[derive(Debug, PartialEq)]
pub struct LoadError {
    message: String,
    source_path: String,
}

impl LoadError {
    fn new(message: impl Into<String>, source_path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source_path: source_path.into(),
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.source_path, self.message.trim_end())
    }
}

impl Error for LoadError {}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum QuizFile {
    Vocabulary {
        title: String,
        #[serde(default)]
        direction: Direction,
        #[serde(default)]
        cards: Vec<VocabularyCard>,
    },
    Kanji {
        title: String,
        #[serde(default)]
        cards: Vec<KanjiCard>,
    },
    Reading {
        title: String,
        #[serde(default)]
        cards: Vec<ReadingCard>,
    },
    Grammar {
        title: String,
        #[serde(default)]
        cards: Vec<GrammarCard>,
    },
    Basic {
        title: String,
        #[serde(default)]
        cards: Vec<BasicCard>,
    },
}

impl QuizFile {
    pub fn from_toml(text: &str, source_path: &str) -> Result<Self, LoadError> {
        toml::from_str(text).map_err(|e| LoadError::new(e.to_string(), source_path))
    }

    pub fn from_json(text: &str, source_path: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::new(e.to_string(), source_path))
    }

    pub fn title(&self) -> &str {
        match self {
            QuizFile::Vocabulary { title, .. }
            | QuizFile::Kanji { title, .. }
            | QuizFile::Reading { title, .. }
            | QuizFile::Grammar { title, .. }
            | QuizFile::Basic { title, .. } => title,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            QuizFile::Vocabulary { direction, .. } => Vocabulary {
                direction: *direction,
            }
            .name(),
            QuizFile::Kanji { .. } => Kanji.name(),
            QuizFile::Reading { .. } => Reading.name(),
            QuizFile::Grammar { .. } => Grammar.name(),
            QuizFile::Basic { .. } => Basic.name(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            QuizFile::Vocabulary { cards, .. } => cards.len(),
            QuizFile::Kanji { cards, .. } => cards.len(),
            QuizFile::Reading { cards, .. } => cards.len(),
            QuizFile::Grammar { cards, .. } => cards.len(),
            QuizFile::Basic { cards, .. } => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Problems with the card data that make a quiz awkward or impossible to
    /// finish. None of them stop the quiz from loading.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.is_empty() {
            warnings.push("quiz has no cards".to_string());
            return warnings;
        }
        match self {
            QuizFile::Vocabulary {
                direction, cards, ..
            } => {
                let kind = Vocabulary {
                    direction: *direction,
                };
                check_answers(&kind, cards, &mut warnings);
            }
            QuizFile::Kanji { cards, .. } => check_answers(&Kanji, cards, &mut warnings),
            QuizFile::Basic { cards, .. } => check_answers(&Basic, cards, &mut warnings),
            QuizFile::Reading { cards, .. } => {
                for (index, card) in cards.iter().enumerate() {
                    check_options(index, &card.options, &card.answer, &mut warnings);
                }
            }
            QuizFile::Grammar { cards, .. } => {
                for (index, card) in cards.iter().enumerate() {
                    check_options(index, &card.options, &card.answer, &mut warnings);
                }
            }
        }
        warnings
    }

    /// Start a session over this quiz's cards.
    pub fn into_drill(self, config: QuizConfig, seed: u64) -> Box<dyn Drill> {
        match self {
            QuizFile::Vocabulary {
                direction, cards, ..
            } => Box::new(QuizSession::new(
                Vocabulary { direction },
                cards,
                config,
                seed,
            )),
            QuizFile::Kanji { cards, .. } => Box::new(QuizSession::new(Kanji, cards, config, seed)),
            QuizFile::Reading { cards, .. } => {
                Box::new(QuizSession::new(Reading, cards, config, seed))
            }
            QuizFile::Grammar { cards, .. } => {
                Box::new(QuizSession::new(Grammar, cards, config, seed))
            }
            QuizFile::Basic { cards, .. } => Box::new(QuizSession::new(Basic, cards, config, seed)),
        }
    }
}

fn check_answers<K: QuizKind>(kind: &K, cards: &[K::Payload], warnings: &mut Vec<String>) {
    let mut distinct: HashSet<&str> = HashSet::new();
    for (index, card) in cards.iter().enumerate() {
        let answer = kind.answer(card);
        if answer.trim().is_empty() {
            warnings.push(format!("card {index}: answer is blank"));
        }
        distinct.insert(answer);
    }
    if cards.len() > 1 && distinct.len() < 2 {
        warnings.push("every card has the same answer, so there are no distractors".to_string());
    }
}

fn check_options(index: usize, options: &[String], answer: &str, warnings: &mut Vec<String>) {
    if answer.trim().is_empty() {
        warnings.push(format!("card {index}: answer is blank"));
    }
    if !options.iter().any(|option| option == answer) {
        warnings.push(format!(
            "card {index}: options do not include the answer '{answer}'"
        ));
    }
    let distinct: HashSet<&String> = options.iter().collect();
    if distinct.len() != options.len() {
        warnings.push(format!("card {index}: options contain duplicates"));
    }
}

/// A parsed quiz file together with where it came from.
#[derive(Clone, Debug)]
pub struct LoadedQuiz {
    pub key: QuizKey,
    pub source_path: String,
    pub file: QuizFile,
}

impl LoadedQuiz {
    /// Parse `text`, as JSON if `source_path` ends in `.json` and as TOML
    /// otherwise.
    pub fn parse(source_path: &str, text: &str) -> Result<Self, LoadError> {
        let file = if source_path.ends_with(".json") {
            QuizFile::from_json(text, source_path)?
        } else {
            QuizFile::from_toml(text, source_path)?
        };
        Ok(Self {
            key: QuizKey::of_text(text),
            source_path: source_path.to_string(),
            file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::scheduler::Phase;

    const VOCAB: &str = r#"
kind = "vocabulary"
title = "N5 verbs"

[[cards]]
word = "食べる"
reading = "たべる"
meaning = "to eat"

[[cards]]
word = "飲む"
reading = "のむ"
meaning = "to drink"
"#;

    #[test]
    fn test_parse_vocabulary() -> Fallible<()> {
        let quiz = QuizFile::from_toml(VOCAB, "verbs.toml")?;
        assert_eq!(quiz.title(), "N5 verbs");
        assert_eq!(quiz.kind_name(), "vocabulary");
        assert_eq!(quiz.len(), 2);
        match quiz {
            QuizFile::Vocabulary {
                direction, cards, ..
            } => {
                assert_eq!(direction, Direction::WordToMeaning);
                assert_eq!(cards[1].meaning, "to drink");
                assert_eq!(cards[0].reading.as_deref(), Some("たべる"));
            }
            _ => panic!("wrong kind"),
        }
        Ok(())
    }

    #[test]
    fn test_parse_direction() -> Fallible<()> {
        let text = "kind = \"vocabulary\"\ntitle = \"t\"\ndirection = \"meaning-to-word\"\n";
        let quiz = QuizFile::from_toml(text, "t.toml")?;
        assert!(matches!(
            quiz,
            QuizFile::Vocabulary {
                direction: Direction::MeaningToWord,
                ..
            }
        ));
        assert!(quiz.is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_kanji() -> Fallible<()> {
        let text = r#"
kind = "kanji"
title = "Nature"

[[cards]]
kanji = "山"
meaning = "mountain"
onyomi = ["サン"]
kunyomi = ["やま"]

[[cards]]
kanji = "川"
meaning = "river"
"#;
        let quiz = QuizFile::from_toml(text, "kanji.toml")?;
        assert_eq!(quiz.kind_name(), "kanji");
        assert_eq!(quiz.len(), 2);
        assert!(quiz.validate().is_empty());
        Ok(())
    }

    #[test]
    fn test_parse_grammar_json() -> Fallible<()> {
        let text = r#"{
  "kind": "grammar",
  "title": "N4 particles",
  "cards": [
    {"sentence": "駅＿＿行きます。", "options": ["に", "を", "が", "で"], "answer": "に"}
  ]
}"#;
        let loaded = LoadedQuiz::parse("particles.json", text)?;
        assert_eq!(loaded.file.kind_name(), "grammar");
        assert_eq!(loaded.key, QuizKey::of_text(text));
        let mut drill = loaded.file.into_drill(QuizConfig::default(), 1);
        let question = drill.question().unwrap();
        assert_eq!(question.prompt, "駅＿＿行きます。");
        assert_eq!(question.options.len(), 4);
        drill.choose("に")?;
        drill.choose("に")?;
        assert_eq!(drill.phase(), Phase::Complete);
        Ok(())
    }

    #[test]
    fn test_parse_reading() -> Fallible<()> {
        let text = r#"
kind = "reading"
title = "Short passages"

[[cards]]
passage = "きのうは雨でした。"
question = "きのうの天気は？"
options = ["雨", "晴れ", "雪"]
answer = "雨"
"#;
        let quiz = QuizFile::from_toml(text, "reading.toml")?;
        assert_eq!(quiz.kind_name(), "reading");
        assert!(quiz.validate().is_empty());
        Ok(())
    }

    #[test]
    fn test_unknown_kind() {
        let err = QuizFile::from_toml("kind = \"audio\"\ntitle = \"x\"\n", "x.toml").unwrap_err();
        assert!(err.to_string().starts_with("x.toml: "));
        assert!(err.to_string().contains("audio"));
    }

    #[test]
    fn test_missing_field() {
        let text = "kind = \"basic\"\ntitle = \"x\"\n[[cards]]\nquestion = \"q\"\n";
        let err = QuizFile::from_toml(text, "x.toml").unwrap_err();
        assert!(err.to_string().contains("answer"));
    }

    #[test]
    fn test_validate_empty() -> Fallible<()> {
        let quiz = QuizFile::from_toml("kind = \"basic\"\ntitle = \"x\"\n", "x.toml")?;
        assert_eq!(quiz.validate(), vec!["quiz has no cards".to_string()]);
        Ok(())
    }

    #[test]
    fn test_validate_options_without_answer() {
        let quiz = QuizFile::Grammar {
            title: "x".to_string(),
            cards: vec![GrammarCard {
                sentence: "s".to_string(),
                options: vec!["a".to_string(), "b".to_string(), "b".to_string()],
                answer: "c".to_string(),
            }],
        };
        assert_eq!(
            quiz.validate(),
            vec![
                "card 0: options do not include the answer 'c'".to_string(),
                "card 0: options contain duplicates".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_shared_answers() {
        let card = |q: &str| BasicCard {
            question: q.to_string(),
            answer: "same".to_string(),
        };
        let quiz = QuizFile::Basic {
            title: "x".to_string(),
            cards: vec![card("a"), card("b")],
        };
        assert_eq!(quiz.validate().len(), 1);
    }

    #[test]
    fn test_loaded_quiz_defaults_to_toml() -> Fallible<()> {
        let loaded = LoadedQuiz::parse("decks/verbs.toml", VOCAB)?;
        assert_eq!(loaded.source_path, "decks/verbs.toml");
        assert_eq!(loaded.file.len(), 2);
        Ok(())
    }
}
