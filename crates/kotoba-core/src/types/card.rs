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

/// The streak at which a card counts as learned.
pub const MASTERY_THRESHOLD: u32 = 2;

/// A card's position in the input list the deck was built from.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(usize);

impl CardId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One question unit in a deck. The payload is opaque to the scheduler.
#[derive(Clone, Debug, PartialEq)]
pub struct Card<P> {
    id: CardId,
    payload: P,
    correct_streak: u32,
    mastered: bool,
}

impl<P> Card<P> {
    pub fn new(id: CardId, payload: P) -> Self {
        Self {
            id,
            payload,
            correct_streak: 0,
            mastered: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    pub fn is_mastered(&self) -> bool {
        self.mastered
    }

    /// Apply one answer. Returns true if this answer made the card mastered.
    ///
    /// A miss resets the streak but never un-masters the card.
    pub(crate) fn record(&mut self, correct: bool) -> bool {
        if !correct {
            self.correct_streak = 0;
            return false;
        }
        self.correct_streak += 1;
        if !self.mastered && self.correct_streak >= MASTERY_THRESHOLD {
            self.mastered = true;
            return true;
        }
        false
    }
}
