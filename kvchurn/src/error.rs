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

/// Harness error type.
///
/// Store results that contradict the driver's bookkeeping are not recoverable: the driver only
/// inserts keys it allocated as fresh and only removes keys it tracks as live, so a rejection
/// means either the driver or the store under test is broken, and the run aborts immediately.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Rejected run configuration, caught before any work starts.
    #[error("config error: {0}")]
    Config(String),
    /// The store rejected an insert of a key the driver allocated as fresh.
    #[error("failed to insert {key} with range ({min}, {max})")]
    InsertRejected {
        /// The freshly allocated key.
        key: u64,
        /// Live range lower bound when the insert failed.
        min: u64,
        /// Live range upper bound when the insert failed.
        max: u64,
    },
    /// The store reported absence for a key the driver tracks as live.
    #[error("failed to remove {key} with range ({min}, {max})")]
    RemoveRejected {
        /// The key chosen for eviction.
        key: u64,
        /// Live range lower bound when the remove failed.
        min: u64,
        /// Live range upper bound when the remove failed.
        max: u64,
    },
    /// Latency digest allocation failed.
    #[error("digest creation error: {0}")]
    DigestCreation(#[from] hdrhistogram::CreationError),
    /// Latency digest merge failed.
    #[error("digest merge error: {0}")]
    DigestMerge(#[from] hdrhistogram::AdditionError),
}

/// Harness result type.
pub type Result<T> = std::result::Result<T, Error>;
