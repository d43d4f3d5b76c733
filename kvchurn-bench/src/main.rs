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

use clap::Parser;
use kvchurn::{Backend, Driver, WorkloadConfig, DEFAULT_CHUNK_SIZE};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Store backend: 0 for the std hash map, any other value for hashbrown.
    backend: u64,

    /// Steady-state operations to attempt.
    op_count: u64,

    /// Keys inserted before measurement starts.
    initial_size: u64,

    /// Live-range size cap; inserts beyond it are skipped.
    max_size: u64,

    /// Working-set size, the hot prefix of the live range.
    working_size: u64,

    /// Probability that an operation is an insert.
    p_insert: f64,

    /// Probability that an operation is a lookup.
    p_lookup: f64,

    /// Probability that an operation is a remove.
    p_remove: f64,

    /// Probability that a hit lookup targets the working set.
    p_working: f64,

    /// Probability that a lookup targets an absent key.
    p_miss: f64,

    /// Seed for the workload generator.
    seed: u64,

    /// Operations per latency digest chunk.
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Wall-clock budget for the whole run.
    #[arg(long, default_value = "1h")]
    max_time: humantime::Duration,
}

fn init_logger() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    // Logs go to stderr; stdout carries nothing but the result line.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::from_default_env())
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();
    tracing::debug!(?args, "parsed arguments");

    let config = WorkloadConfig {
        op_count: args.op_count,
        initial_size: args.initial_size,
        max_size: args.max_size,
        working_size: args.working_size,
        p_insert: args.p_insert,
        p_lookup: args.p_lookup,
        p_remove: args.p_remove,
        p_working: args.p_working,
        p_miss: args.p_miss,
        seed: args.seed,
        chunk_size: args.chunk_size,
        max_time: args.max_time.into(),
    };

    let store = Backend::from_flag(args.backend).open(args.initial_size as usize);
    let report = Driver::new(config, store)?.run()?;

    // One CSV line: insert, lookup, remove percentiles (p50, p95, p99, p99.9), in nanoseconds.
    println!("{report}");
    Ok(())
}
