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

use serde::Serialize;

use crate::config::QuizConfig;
use crate::quiz::QuizKind;
use crate::rng::TinyRng;
use crate::scheduler::AnswerOutcome;
use crate::scheduler::Phase;
use crate::scheduler::Scheduler;
use crate::scheduler::SchedulerError;
use crate::summary::FirstPassStats;
use crate::summary::SessionSnapshot;
use crate::types::card::CardId;

/// Mixed into the seed so the scheduler and the option builder draw from
/// different streams.
const OPTIONS_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// The presented card, ready to show.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Question {
    pub card: CardId,
    pub prompt: String,
    pub options: Vec<String>,
}

/// A scheduler paired with the quiz kind that renders its cards.
pub struct QuizSession<K: QuizKind> {
    kind: K,
    scheduler: Scheduler<K::Payload>,
    distractors: usize,
    rng: TinyRng,
    options: Vec<String>,
}

impl<K: QuizKind> QuizSession<K> {
    pub fn new(kind: K, cards: Vec<K::Payload>, config: QuizConfig, seed: u64) -> Self {
        let scheduler = Scheduler::with_deck(config.scheduler, TinyRng::from_seed(seed), cards);
        let mut session = Self {
            kind,
            scheduler,
            distractors: config.distractors,
            rng: TinyRng::from_seed(seed ^ OPTIONS_STREAM),
            options: Vec::new(),
        };
        session.refresh_options();
        session
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn scheduler(&self) -> &Scheduler<K::Payload> {
        &self.scheduler
    }

    /// Options are built once per presentation, so a card that comes back
    /// gets a new set.
    fn refresh_options(&mut self) {
        self.options = match self.scheduler.current_id() {
            Some(id) => self
                .kind
                .options(self.scheduler.cards(), id, self.distractors, &mut self.rng),
            None => Vec::new(),
        };
    }
}

/// A quiz session with the card type erased.
pub trait Drill {
    fn kind_name(&self) -> &'static str;

    fn question(&self) -> Option<Question>;

    /// The option text that would count as correct for the presented card.
    fn correct_answer(&self) -> Option<String>;

    /// Answer with an option's text. Only an exact match is correct.
    fn choose(&mut self, choice: &str) -> Result<AnswerOutcome, SchedulerError>;

    /// Answer with a correctness judgement made by the caller.
    fn answer(&mut self, correct: bool) -> Result<AnswerOutcome, SchedulerError>;

    fn acknowledge_first_pass(&mut self);

    fn phase(&self) -> Phase;

    fn is_complete(&self) -> bool;

    fn deck_size(&self) -> usize;

    fn first_pass(&self) -> Option<FirstPassStats>;

    fn snapshot(&self) -> SessionSnapshot;
}

impl<K: QuizKind> Drill for QuizSession<K> {
    fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    fn question(&self) -> Option<Question> {
        let card = self.scheduler.current()?;
        Some(Question {
            card: card.id(),
            prompt: self.kind.prompt(card.payload()),
            options: self.options.clone(),
        })
    }

    fn correct_answer(&self) -> Option<String> {
        self.scheduler
            .current()
            .map(|card| self.kind.answer(card.payload()).to_string())
    }

    fn choose(&mut self, choice: &str) -> Result<AnswerOutcome, SchedulerError> {
        let card = self
            .scheduler
            .current()
            .ok_or(SchedulerError::NoCurrentCard)?;
        let correct = self.kind.answer(card.payload()) == choice;
        self.answer(correct)
    }

    fn answer(&mut self, correct: bool) -> Result<AnswerOutcome, SchedulerError> {
        let outcome = self.scheduler.answer(correct)?;
        self.refresh_options();
        Ok(outcome)
    }

    fn acknowledge_first_pass(&mut self) {
        self.scheduler.acknowledge_first_pass();
    }

    fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    fn is_complete(&self) -> bool {
        self.scheduler.is_complete()
    }

    fn deck_size(&self) -> usize {
        self.scheduler.deck_size()
    }

    fn first_pass(&self) -> Option<FirstPassStats> {
        self.scheduler.first_pass()
    }

    fn snapshot(&self) -> SessionSnapshot {
        self.scheduler.snapshot()
    }
}
