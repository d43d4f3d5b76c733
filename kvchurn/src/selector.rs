// Copyright 2026 kvchurn Project Authors
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

use itertools::Itertools;

use crate::rng::{Minstd, MODULUS};

/// Seeded discrete sampler over an ordered weight vector.
///
/// Cumulative weight sums are scaled into the generator range `[0, 2^31 - 1]` as monotonic
/// cutoffs, rounding each cutoff up. A draw returns the index of the first cutoff strictly above
/// one raw generator value.
///
/// Weights need not be normalized. When they under-sum the range, draws past the last cutoff
/// return the sentinel index equal to the weight count; callers treat that as "no category
/// selected" (an idle tick), not an error. This is how an operation mix like `(0.2, 0.3, 0.1)`
/// leaves 40% of ticks doing nothing.
#[derive(Debug)]
pub struct WeightedSelector {
    rng: Minstd,
    cutoffs: Vec<u64>,
}

impl WeightedSelector {
    /// Build a selector over `weights` with its own generator seeded by `seed`.
    pub fn new(seed: u64, weights: &[f64]) -> Self {
        let mut sum = 0.0;
        let cutoffs = weights
            .iter()
            .map(|weight| {
                sum += weight;
                (sum * MODULUS as f64).ceil() as u64
            })
            .collect_vec();
        Self {
            rng: Minstd::new(seed),
            cutoffs,
        }
    }

    /// Draw one index in `[0, weight count]`, where the top value is the sentinel.
    #[expect(clippy::should_implement_trait)]
    pub fn next(&mut self) -> usize {
        let draw = self.rng.next();
        self.cutoffs
            .iter()
            .position(|&cutoff| draw < cutoff)
            .unwrap_or(self.cutoffs.len())
    }

    /// The sentinel index returned when no category matches a draw.
    pub fn sentinel(&self) -> usize {
        self.cutoffs.len()
    }
}
