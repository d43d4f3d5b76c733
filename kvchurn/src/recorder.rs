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

use std::fmt::{self, Display};

use hdrhistogram::Histogram;
use itertools::Itertools;
use serde::Serialize;

use crate::error::Result;

/// Highest latency a digest tracks, in nanoseconds (one minute). Samples above it saturate.
pub const MAX_TRACKED_NANOS: u64 = 60_000_000_000;

/// Significant decimal digits a digest keeps per sample.
pub const DIGEST_SIGFIG: u8 = 3;

/// The measured operation kinds, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Op {
    /// Key insertion.
    Insert,
    /// Key lookup, hit or miss.
    Lookup,
    /// Key removal.
    Remove,
}

impl Op {
    /// All kinds, in report order.
    pub const ALL: [Op; 3] = [Op::Insert, Op::Lookup, Op::Remove];
}

/// One kind's digest pair: the in-progress chunk and the completed chunk before it.
struct Window {
    current: Histogram<u64>,
    previous: Option<Histogram<u64>>,
}

impl Window {
    fn new() -> Result<Self> {
        Ok(Self {
            current: Histogram::new_with_max(MAX_TRACKED_NANOS, DIGEST_SIGFIG)?,
            previous: None,
        })
    }

    fn record(&mut self, nanos: u64) {
        self.current.saturating_record(nanos);
    }

    fn rollover(&mut self) {
        let fresh = Histogram::new_from(&self.current);
        // Overwriting `previous` releases the chunk before last; at most two chunks stay resident.
        self.previous = Some(std::mem::replace(&mut self.current, fresh));
    }

    fn merged(mut self) -> Result<Histogram<u64>> {
        if let Some(previous) = self.previous {
            self.current.add(&previous)?;
        }
        Ok(self.current)
    }
}

/// Double-buffered latency digests, one pair per operation kind.
///
/// A single unbounded digest would grow with total operation count over a long run. Retaining
/// exactly two chunk digests caps memory while still answering percentiles over the most recent
/// `[chunk_size, 2 x chunk_size]` operations, which is the view that matters for steady-state
/// latency. The window is fixed at two chunks; only the chunk size is configurable.
pub struct WindowedRecorder {
    windows: [Window; 3],
}

impl WindowedRecorder {
    /// Create a recorder with empty digests for every kind.
    pub fn new() -> Result<Self> {
        Ok(Self {
            windows: [Window::new()?, Window::new()?, Window::new()?],
        })
    }

    /// Add one latency sample for `op` to its in-progress digest.
    pub fn record(&mut self, op: Op, nanos: u64) {
        self.windows[op as usize].record(nanos);
    }

    /// Rotate every kind's digest pair: drop the chunk before last, demote the in-progress
    /// digest, start a fresh one.
    pub fn rollover(&mut self) {
        for window in &mut self.windows {
            window.rollover();
        }
    }

    /// Merge each kind's pair and summarize the retained window.
    pub fn finish(self) -> Result<LatencyReport> {
        let [insert, lookup, remove] = self.windows;
        Ok(LatencyReport {
            insert: OpSummary::from_digest(&insert.merged()?),
            lookup: OpSummary::from_digest(&lookup.merged()?),
            remove: OpSummary::from_digest(&remove.merged()?),
        })
    }
}

/// Percentile summary of one operation kind over the retained window.
///
/// Percentiles are approximate within the digest's precision ([`DIGEST_SIGFIG`]). A kind that
/// recorded nothing reports zero for every field.
#[derive(Debug, Clone, Serialize)]
pub struct OpSummary {
    /// Samples in the window.
    pub count: u64,
    /// Median latency in nanoseconds.
    pub p50: u64,
    /// 95th percentile latency in nanoseconds.
    pub p95: u64,
    /// 99th percentile latency in nanoseconds.
    pub p99: u64,
    /// 99.9th percentile latency in nanoseconds.
    pub p999: u64,
}

impl OpSummary {
    fn from_digest(digest: &Histogram<u64>) -> Self {
        Self {
            count: digest.len(),
            p50: digest.value_at_quantile(0.5),
            p95: digest.value_at_quantile(0.95),
            p99: digest.value_at_quantile(0.99),
            p999: digest.value_at_quantile(0.999),
        }
    }
}

/// Final run report, one summary per operation kind.
///
/// `Display` renders the process-interface line: twelve comma-separated percentile values,
/// p50/p95/p99/p99.9 for inserts, then lookups, then removes.
#[derive(Debug, Clone, Serialize)]
pub struct LatencyReport {
    /// Insert latency summary.
    pub insert: OpSummary,
    /// Lookup latency summary.
    pub lookup: OpSummary,
    /// Remove latency summary.
    pub remove: OpSummary,
}

impl Display for LatencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = [&self.insert, &self.lookup, &self.remove]
            .into_iter()
            .flat_map(|summary| [summary.p50, summary.p95, summary.p99, summary.p999])
            .join(",");
        write!(f, "{line}")
    }
}
