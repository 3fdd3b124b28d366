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

//! Quiz kinds: how a card payload becomes a prompt and a list of options.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::rng::TinyRng;
use crate::rng::sample;
use crate::rng::shuffle;
use crate::types::card::Card;
use crate::types::card::CardId;

pub trait QuizKind {
    type Payload;

    /// The `kind` value used in quiz files.
    fn name(&self) -> &'static str;

    fn prompt(&self, payload: &Self::Payload) -> String;

    /// The option text that counts as correct.
    fn answer<'a>(&self, payload: &'a Self::Payload) -> &'a str;

    /// Options for the card `current`. By default, the correct answer plus up
    /// to `distractors` answers of other cards, in random order.
    fn options(
        &self,
        cards: &[Card<Self::Payload>],
        current: CardId,
        distractors: usize,
        rng: &mut TinyRng,
    ) -> Vec<String> {
        let correct = self.answer(cards[current.index()].payload());
        let pool = cards
            .iter()
            .filter(|card| card.id() != current)
            .map(|card| self.answer(card.payload()));
        multiple_choice(correct, pool, distractors, rng)
    }
}

/// The correct answer plus up to `distractors` distinct wrong answers drawn
/// without replacement from `pool`, shuffled.
pub fn multiple_choice<'a>(
    correct: &str,
    pool: impl Iterator<Item = &'a str>,
    distractors: usize,
    rng: &mut TinyRng,
) -> Vec<String> {
    let mut distinct: HashSet<&str> = HashSet::new();
    let candidates: Vec<&str> = pool
        .filter(|answer| *answer != correct && distinct.insert(*answer))
        .collect();
    let mut options: Vec<String> = sample(candidates, distractors, rng)
        .into_iter()
        .map(str::to_string)
        .collect();
    options.push(correct.to_string());
    shuffle(&mut options, rng);
    options
}

/// Options supplied by the card itself, shuffled. The correct answer is not
/// added if the card left it out.
pub fn fixed_options(options: &[String], rng: &mut TinyRng) -> Vec<String> {
    let mut options = options.to_vec();
    shuffle(&mut options, rng);
    options
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Show the word, ask for the meaning.
    #[default]
    WordToMeaning,
    /// Show the meaning, ask for the word.
    MeaningToWord,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct VocabularyCard {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    pub meaning: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Vocabulary {
    pub direction: Direction,
}

impl QuizKind for Vocabulary {
    type Payload = VocabularyCard;

    fn name(&self) -> &'static str {
        "vocabulary"
    }

    fn prompt(&self, card: &VocabularyCard) -> String {
        match (self.direction, &card.reading) {
            (Direction::WordToMeaning, Some(reading)) if reading != &card.word => {
                format!("{} ({})", card.word, reading)
            }
            (Direction::WordToMeaning, _) => card.word.clone(),
            (Direction::MeaningToWord, _) => card.meaning.clone(),
        }
    }

    fn answer<'a>(&self, card: &'a VocabularyCard) -> &'a str {
        match self.direction {
            Direction::WordToMeaning => &card.meaning,
            Direction::MeaningToWord => &card.word,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct KanjiCard {
    pub kanji: String,
    pub meaning: String,
    #[serde(default)]
    pub onyomi: Vec<String>,
    #[serde(default)]
    pub kunyomi: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Kanji;

impl QuizKind for Kanji {
    type Payload = KanjiCard;

    fn name(&self) -> &'static str {
        "kanji"
    }

    fn prompt(&self, card: &KanjiCard) -> String {
        let readings: Vec<&str> = card
            .onyomi
            .iter()
            .chain(card.kunyomi.iter())
            .map(String::as_str)
            .collect();
        if readings.is_empty() {
            card.kanji.clone()
        } else {
            format!("{} [{}]", card.kanji, readings.join(", "))
        }
    }

    fn answer<'a>(&self, card: &'a KanjiCard) -> &'a str {
        &card.meaning
    }
}

/// A passage with a comprehension question and its own options.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ReadingCard {
    pub passage: String,
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Reading;

impl QuizKind for Reading {
    type Payload = ReadingCard;

    fn name(&self) -> &'static str {
        "reading"
    }

    fn prompt(&self, card: &ReadingCard) -> String {
        format!("{}\n\n{}", card.passage.trim_end(), card.question)
    }

    fn answer<'a>(&self, card: &'a ReadingCard) -> &'a str {
        &card.answer
    }

    fn options(
        &self,
        cards: &[Card<ReadingCard>],
        current: CardId,
        _distractors: usize,
        rng: &mut TinyRng,
    ) -> Vec<String> {
        fixed_options(&cards[current.index()].payload().options, rng)
    }
}

/// A JLPT-style fill-in-the-blank question with its own options.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GrammarCard {
    pub sentence: String,
    pub options: Vec<String>,
    pub answer: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Grammar;

impl QuizKind for Grammar {
    type Payload = GrammarCard;

    fn name(&self) -> &'static str {
        "grammar"
    }

    fn prompt(&self, card: &GrammarCard) -> String {
        card.sentence.clone()
    }

    fn answer<'a>(&self, card: &'a GrammarCard) -> &'a str {
        &card.answer
    }

    fn options(
        &self,
        cards: &[Card<GrammarCard>],
        current: CardId,
        _distractors: usize,
        rng: &mut TinyRng,
    ) -> Vec<String> {
        fixed_options(&cards[current.index()].payload().options, rng)
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct BasicCard {
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Basic;

impl QuizKind for Basic {
    type Payload = BasicCard;

    fn name(&self) -> &'static str {
        "basic"
    }

    fn prompt(&self, card: &BasicCard) -> String {
        card.question.clone()
    }

    fn answer<'a>(&self, card: &'a BasicCard) -> &'a str {
        &card.answer
    }
}
