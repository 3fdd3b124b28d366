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

//! The mastery-streak scheduler.
//!
//! A session walks the deck once in order (the first pass), re-presenting
//! missed cards from a learning queue as soon as they are missed. Once every
//! card has been seen, review rounds cycle through the unmastered cards in a
//! fresh random order until each one has been answered correctly twice in a
//! row.

use std::collections::VecDeque;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::config::InitialOrder;
use crate::config::SchedulerConfig;
use crate::rng::TinyRng;
use crate::rng::shuffle;
use crate::summary::FirstPassStats;
use crate::summary::SessionSnapshot;
use crate::types::card::Card;
use crate::types::card::CardId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    /// `answer` was called while no card was being presented.
    NoCurrentCard,
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulerError::NoCurrentCard => write!(f, "no card is being presented"),
        }
    }
}

impl Error for SchedulerError {}

/// Where a session stands, as far as a caller is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `initialize` has not been called.
    Uninitialized,
    /// The deck has no cards. Never completes.
    Empty,
    /// A card is being presented.
    Presenting,
    /// Every card has been seen once and the caller has not acknowledged it
    /// yet. A card is still presented and can be answered.
    FirstPassGate,
    /// Every card is mastered.
    Complete,
}

/// What happened to the card that was just answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub card: CardId,
    pub correct: bool,
    pub streak: u32,
    pub newly_mastered: bool,
}

pub struct Scheduler<P> {
    config: SchedulerConfig,
    rng: TinyRng,
    initialized: bool,
    cards: Vec<Card<P>>,
    unseen: VecDeque<CardId>,
    learning: VecDeque<CardId>,
    current: Option<CardId>,
    mastered_count: usize,
    total_correct: usize,
    total_incorrect: usize,
    first_pass: Option<FirstPassStats>,
    first_pass_acknowledged: bool,
}

impl<P> Scheduler<P> {
    /// An uninitialized scheduler. Call [`Scheduler::initialize`] to load a
    /// deck.
    pub fn new(config: SchedulerConfig, rng: TinyRng) -> Self {
        Self {
            config,
            rng,
            initialized: false,
            cards: Vec::new(),
            unseen: VecDeque::new(),
            learning: VecDeque::new(),
            current: None,
            mastered_count: 0,
            total_correct: 0,
            total_incorrect: 0,
            first_pass: None,
            first_pass_acknowledged: false,
        }
    }

    pub fn with_deck(
        config: SchedulerConfig,
        rng: TinyRng,
        inputs: impl IntoIterator<Item = P>,
    ) -> Self {
        let mut scheduler = Self::new(config, rng);
        scheduler.initialize(inputs);
        scheduler
    }

    /// Build a fresh deck from `inputs`, discarding all previous session
    /// state, and present the first card.
    pub fn initialize(&mut self, inputs: impl IntoIterator<Item = P>) {
        self.cards = inputs
            .into_iter()
            .enumerate()
            .map(|(index, payload)| Card::new(CardId::new(index), payload))
            .collect();
        let mut unseen: Vec<CardId> = self.cards.iter().map(Card::id).collect();
        if self.config.initial_order == InitialOrder::Shuffled {
            shuffle(&mut unseen, &mut self.rng);
        }
        self.unseen = unseen.into();
        self.learning.clear();
        self.current = None;
        self.mastered_count = 0;
        self.total_correct = 0;
        self.total_incorrect = 0;
        self.first_pass = None;
        self.first_pass_acknowledged = false;
        self.initialized = true;
        log::debug!("Initialized deck of {} cards", self.cards.len());
        self.select_next();
    }

    /// Record an answer for the presented card and move on to the next one.
    ///
    /// Without a presented card this changes nothing and returns
    /// [`SchedulerError::NoCurrentCard`].
    pub fn answer(&mut self, is_correct: bool) -> Result<AnswerOutcome, SchedulerError> {
        let id = self.current.ok_or(SchedulerError::NoCurrentCard)?;
        if is_correct {
            self.total_correct += 1;
        } else {
            self.total_incorrect += 1;
        }
        let card = &mut self.cards[id.index()];
        let newly_mastered = card.record(is_correct);
        let streak = card.correct_streak();
        if newly_mastered {
            self.mastered_count += 1;
        }
        if !is_correct {
            self.learning.push_back(id);
            if self.config.reshuffle_on_miss {
                shuffle(self.learning.make_contiguous(), &mut self.rng);
            }
        }
        self.select_next();
        Ok(AnswerOutcome {
            card: id,
            correct: is_correct,
            streak,
            newly_mastered,
        })
    }

    /// Stop reporting [`Phase::FirstPassGate`] for the rest of the session.
    pub fn acknowledge_first_pass(&mut self) {
        self.first_pass_acknowledged = true;
    }

    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.mastered_count == self.cards.len()
    }

    pub fn phase(&self) -> Phase {
        if !self.initialized {
            Phase::Uninitialized
        } else if self.cards.is_empty() {
            Phase::Empty
        } else if self.is_complete() {
            Phase::Complete
        } else if self.first_pass.is_some() && !self.first_pass_acknowledged {
            Phase::FirstPassGate
        } else {
            Phase::Presenting
        }
    }

    pub fn current(&self) -> Option<&Card<P>> {
        self.current.map(|id| &self.cards[id.index()])
    }

    pub fn current_id(&self) -> Option<CardId> {
        self.current
    }

    pub fn card(&self, id: CardId) -> Option<&Card<P>> {
        self.cards.get(id.index())
    }

    pub fn cards(&self) -> &[Card<P>] {
        &self.cards
    }

    pub fn deck_size(&self) -> usize {
        self.cards.len()
    }

    pub fn mastered_count(&self) -> usize {
        self.mastered_count
    }

    pub fn total_correct(&self) -> usize {
        self.total_correct
    }

    pub fn total_incorrect(&self) -> usize {
        self.total_incorrect
    }

    pub fn first_pass(&self) -> Option<FirstPassStats> {
        self.first_pass
    }

    pub fn first_pass_acknowledged(&self) -> bool {
        self.first_pass_acknowledged
    }

    /// Cards never presented, in the order they will be presented.
    pub fn unseen(&self) -> impl Iterator<Item = CardId> + '_ {
        self.unseen.iter().copied()
    }

    /// Cards queued for re-presentation ahead of unseen cards.
    pub fn learning(&self) -> impl Iterator<Item = CardId> + '_ {
        self.learning.iter().copied()
    }

    /// Unmastered cards waiting for the next review round: last answered
    /// correctly, and neither presented nor queued.
    pub fn pending_review(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|card| !card.is_mastered())
            .map(Card::id)
            .filter(|id| {
                Some(*id) != self.current && !self.unseen.contains(id) && !self.learning.contains(id)
            })
            .collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.total_correct,
            total: self.total_correct + self.total_incorrect,
            total_incorrect: self.total_incorrect,
            mastered: self.mastered_count,
            unseen: self.unseen.len(),
        }
    }

    fn select_next(&mut self) {
        self.current = None;

        // The answer to the last unseen card has just been recorded.
        if self.first_pass.is_none() && self.unseen.is_empty() && !self.cards.is_empty() {
            let stats = FirstPassStats {
                score: self.total_correct,
                total: self.total_correct + self.total_incorrect,
            };
            log::debug!("First pass complete: {}/{}", stats.score, stats.total);
            self.first_pass = Some(stats);
        }

        if let Some(id) = self.learning.pop_front() {
            self.current = Some(id);
            return;
        }
        if let Some(id) = self.unseen.pop_front() {
            self.current = Some(id);
            return;
        }

        let mut round: Vec<CardId> = self
            .cards
            .iter()
            .filter(|card| !card.is_mastered())
            .map(Card::id)
            .collect();
        if round.is_empty() {
            if !self.cards.is_empty() {
                log::debug!("All {} cards mastered", self.cards.len());
            }
            return;
        }
        shuffle(&mut round, &mut self.rng);
        log::debug!("Starting review round with {} cards", round.len());
        self.learning = round.into();
        self.current = self.learning.pop_front();
    }
}
