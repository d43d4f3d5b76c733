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

//! A latency profiling harness for associative stores.
//!
//! `kvchurn` replays a deterministic seeded churn workload (inserts, skewed lookups, removes)
//! against interchangeable hash table backends and reports per-operation latency percentiles
//! over a window of the most recent operations.
//!
//! The same seed always produces the same operation and key sequence, so two backends measured
//! with one seed see bit-identical workloads and their numbers are directly comparable.

mod driver;
mod error;
mod recorder;
mod rng;
mod selector;
mod store;

/// The crate's public surface in one import.
pub mod prelude;

pub use prelude::*;
