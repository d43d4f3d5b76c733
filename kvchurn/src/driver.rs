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

use std::{
    cmp,
    time::{Duration, Instant},
};

use crate::{
    error::{Error, Result},
    recorder::{LatencyReport, Op, WindowedRecorder},
    rng::Minstd,
    selector::WeightedSelector,
    store::Store,
};

/// Default operations per digest chunk.
pub const DEFAULT_CHUNK_SIZE: u64 = 1_000_000;

/// Default wall-clock budget for a run.
pub const DEFAULT_MAX_TIME: Duration = Duration::from_secs(3600);

/// Parameters of one workload run.
///
/// The three operation probabilities need not sum to 1: the uncovered remainder of the range
/// turns into idle ticks, which still count against `op_count`. Over-summed weights saturate in
/// declaration order instead.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Steady-state operations to attempt. Only whole chunks run: when `op_count` is at least
    /// `chunk_size`, the remainder beyond the last whole chunk is not executed.
    pub op_count: u64,
    /// Keys inserted during the populate phase, before anything is measured.
    pub initial_size: u64,
    /// Live-range size cap. Inserts that would grow the range beyond it are skipped.
    pub max_size: u64,
    /// Size of the working set, the hot prefix of the live range.
    pub working_size: u64,
    /// Probability that a tick is an insert.
    pub p_insert: f64,
    /// Probability that a tick is a lookup.
    pub p_lookup: f64,
    /// Probability that a tick is a remove.
    pub p_remove: f64,
    /// Probability that a hit lookup targets the working set. Removes reuse this draw to choose
    /// the eviction end: working-set draws evict the oldest key, the rest evict the newest.
    pub p_working: f64,
    /// Probability that a lookup targets a key beyond the live range, a guaranteed miss.
    pub p_miss: f64,
    /// Seed for the generator and all selectors.
    pub seed: u64,
    /// Operations per digest chunk, counted across all kinds combined.
    pub chunk_size: u64,
    /// Wall-clock budget. Exceeding it truncates the run; the report still covers what ran.
    pub max_time: Duration,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            op_count: 1_000_000,
            initial_size: 10_000,
            max_size: 100_000,
            working_size: 1_000,
            p_insert: 0.25,
            p_lookup: 0.5,
            p_remove: 0.25,
            p_working: 0.9,
            p_miss: 0.05,
            seed: 1,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_time: DEFAULT_MAX_TIME,
        }
    }
}

impl WorkloadConfig {
    /// Reject parameter combinations the harness cannot run.
    pub fn validate(&self) -> Result<()> {
        if self.initial_size > self.max_size {
            return Err(Error::Config(format!(
                "initial size {} exceeds max size {}",
                self.initial_size, self.max_size
            )));
        }
        if self.working_size > self.max_size {
            return Err(Error::Config(format!(
                "working size {} exceeds max size {}",
                self.working_size, self.max_size
            )));
        }
        if !(0.0..=1.0).contains(&self.p_working) {
            return Err(Error::Config(format!(
                "p_working must be within [0, 1], got {}",
                self.p_working
            )));
        }
        if !(0.0..=1.0).contains(&self.p_miss) {
            return Err(Error::Config(format!(
                "p_miss must be within [0, 1], got {}",
                self.p_miss
            )));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk size must be positive".to_string()));
        }
        Ok(())
    }
}

/// Drives one synthetic workload run against a store and measures per-operation latency.
///
/// The driver tracks the live key range `[min_element, max_element)` it believes is present in
/// the store. Inserts extend the upper end with fresh keys, removes shrink either end, and
/// lookups target the range with working-set skew. Store results that contradict this
/// bookkeeping abort the run.
pub struct Driver {
    config: WorkloadConfig,
    store: Box<dyn Store>,
    rng: Minstd,
    operations: WeightedSelector,
    working: WeightedSelector,
    miss: WeightedSelector,
    recorder: WindowedRecorder,
    min_element: u64,
    max_element: u64,
}

impl Driver {
    /// Build a driver for `config` over a freshly opened `store`.
    ///
    /// All randomness is seeded from `config.seed`, so a seed pins the full operation and key
    /// sequence regardless of backend.
    pub fn new(config: WorkloadConfig, store: Box<dyn Store>) -> Result<Self> {
        config.validate()?;
        let operations =
            WeightedSelector::new(config.seed, &[config.p_insert, config.p_lookup, config.p_remove]);
        let working = WeightedSelector::new(config.seed, &[1.0 - config.p_working, config.p_working]);
        let miss = WeightedSelector::new(config.seed, &[1.0 - config.p_miss, config.p_miss]);
        Ok(Self {
            rng: Minstd::new(config.seed),
            operations,
            working,
            miss,
            recorder: WindowedRecorder::new()?,
            store,
            config,
            min_element: 1,
            max_element: 1,
        })
    }

    /// Populate the store, run the steady-state loop, and report window percentiles.
    pub fn run(mut self) -> Result<LatencyReport> {
        self.populate()?;
        self.steady_state()?;
        self.recorder.finish()
    }

    /// Insert the initial keys `1..=initial_size`, untimed and unrecorded.
    ///
    /// Every key is fresh by construction, so a rejection here is fatal.
    fn populate(&mut self) -> Result<()> {
        tracing::info!(initial_size = self.config.initial_size, "populating store");
        for _ in 0..self.config.initial_size {
            let key = self.max_element;
            self.max_element += 1;
            if !self.store.insert(key, key) {
                return Err(Error::InsertRejected {
                    key,
                    min: self.min_element,
                    max: self.max_element,
                });
            }
        }
        Ok(())
    }

    fn steady_state(&mut self) -> Result<()> {
        let started = Instant::now();
        let chunks = cmp::max(self.config.op_count / self.config.chunk_size, 1);
        tracing::info!(
            op_count = self.config.op_count,
            chunks,
            chunk_size = self.config.chunk_size,
            "starting steady-state loop"
        );

        for chunk in 0..chunks {
            let quota = cmp::min(
                self.config.chunk_size,
                self.config.op_count - chunk * self.config.chunk_size,
            );
            for step in 0..quota {
                // The operation code is drawn before the budget check so the selector stream
                // stays aligned with runs that do not hit the budget.
                let code = self.operations.next();
                if started.elapsed() > self.config.max_time {
                    tracing::warn!(chunk, step, "wall-clock budget exceeded, truncating run");
                    break;
                }
                // Rotate when a chunk actually processes its first operation. Chunks that die on
                // the budget check must not rotate, or they would wipe the measured window
                // before the report.
                if step == 0 && chunk > 0 {
                    tracing::debug!(chunk, "digest rollover");
                    self.recorder.rollover();
                }
                self.dispatch(code)?;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, code: usize) -> Result<()> {
        match code {
            0 => self.insert(),
            1 => self.lookup(),
            2 => self.remove(),
            // Sentinel draw from an under-summed operation mix: an idle tick.
            _ => Ok(()),
        }
    }

    fn insert(&mut self) -> Result<()> {
        if self.max_element - self.min_element >= self.config.max_size {
            return Ok(());
        }

        let key = self.max_element;
        self.max_element += 1;

        let start = Instant::now();
        let inserted = self.store.insert(key, key);
        let elapsed = start.elapsed();

        if !inserted {
            return Err(Error::InsertRejected {
                key,
                min: self.min_element,
                max: self.max_element,
            });
        }
        self.recorder.record(Op::Insert, elapsed.as_nanos() as u64);
        Ok(())
    }

    fn lookup(&mut self) -> Result<()> {
        let barrier = cmp::min(
            self.min_element.saturating_add(self.config.working_size),
            self.max_element,
        );
        let hot = barrier - self.min_element;
        let cold = self.max_element - barrier;

        let key = if self.miss.next() != 0 {
            // Beyond the live range, guaranteed absent. The offset is a raw draw on purpose:
            // miss keys are probed and discarded, so their magnitude costs nothing.
            self.max_element + self.rng.next()
        } else if self.working.next() != 0 {
            self.min_element + self.rng.next_in_range(hot)
        } else if cold != 0 {
            barrier + self.rng.next_in_range(cold)
        } else {
            self.min_element + self.rng.next_in_range(hot)
        };

        let start = Instant::now();
        let _ = self.store.lookup(key);
        let elapsed = start.elapsed();

        // Hits and misses both count: the probe cost is the datum, not the outcome.
        self.recorder.record(Op::Lookup, elapsed.as_nanos() as u64);
        Ok(())
    }

    fn remove(&mut self) -> Result<()> {
        if self.min_element >= self.max_element {
            return Ok(());
        }

        let key = if self.working.next() != 0 {
            let key = self.min_element;
            self.min_element += 1;
            key
        } else {
            self.max_element -= 1;
            self.max_element
        };

        let start = Instant::now();
        let removed = self.store.remove(key);
        let elapsed = start.elapsed();

        if !removed {
            return Err(Error::RemoveRejected {
                key,
                min: self.min_element,
                max: self.max_element,
            });
        }
        self.recorder.record(Op::Remove, elapsed.as_nanos() as u64);
        Ok(())
    }
}
