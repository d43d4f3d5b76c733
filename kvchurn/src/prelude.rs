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

pub use crate::{
    driver::{Driver, WorkloadConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TIME},
    error::{Error, Result},
    recorder::{LatencyReport, Op, OpSummary, WindowedRecorder, DIGEST_SIGFIG, MAX_TRACKED_NANOS},
    rng::{Minstd, MODULUS},
    selector::WeightedSelector,
    store::{Backend, HashbrownStore, Key, SeededState, StdStore, Store, Value, HASH_SEED},
};
