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

/// A minimal, zero-dependency, completely insecure PRNG for shuffling queues
/// and picking distractors.
#[derive(Clone, Debug)]
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a random index in `[0, max)`. `max` must be non-zero.
    pub fn below(&mut self, max: usize) -> usize {
        // Widening multiply instead of modulo: less bias for small ranges.
        ((self.next_u32() as u64 * max as u64) >> 32) as usize
    }
}

/// Fisher-Yates shuffle, in place.
pub fn shuffle<T>(v: &mut [T], rng: &mut TinyRng) {
    for i in (1..v.len()).rev() {
        let j = rng.below(i + 1);
        v.swap(i, j);
    }
}

/// Draw up to `n` items uniformly without replacement. When fewer than `n`
/// items are available, all of them are returned (in random order).
pub fn sample<T>(items: Vec<T>, n: usize, rng: &mut TinyRng) -> Vec<T> {
    let mut items = items;
    let n = n.min(items.len());
    // Partial Fisher-Yates: the first `n` slots end up as the sample.
    for i in 0..n {
        let j = i + rng.below(items.len() - i);
        items.swap(i, j);
    }
    items.truncate(n);
    items
}
