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
    collections::{hash_map, HashMap},
    hash::BuildHasher,
};

use twox_hash::XxHash64;

/// Key type the harness feeds the stores under test.
pub type Key = u64;

/// Value type the harness feeds the stores under test.
pub type Value = u64;

/// Seed shared by every hashed backend.
///
/// Fixed so the key-to-slot mapping is identical across backends and across runs; latency
/// differences are then attributable to table mechanics rather than hash placement luck.
pub const HASH_SEED: u64 = 0xdead_beef_dead_beef;

/// A `BuildHasher` producing [`XxHash64`] hashers with a fixed seed.
#[derive(Debug, Clone)]
pub struct SeededState {
    seed: u64,
}

impl SeededState {
    /// Create a state hashing with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for SeededState {
    fn default() -> Self {
        Self::new(HASH_SEED)
    }
}

impl BuildHasher for SeededState {
    type Hasher = XxHash64;

    fn build_hasher(&self) -> Self::Hasher {
        XxHash64::with_seed(self.seed)
    }
}

/// An associative store under test.
///
/// Object safe so backends are picked at run time and any number of variants can be compared
/// without touching the driver. Keys compare by value; both provided backends hash through
/// [`SeededState`] and therefore agree on placement.
pub trait Store {
    /// Return the value for `key` if present. Never mutates; absence is not an error.
    fn lookup(&self, key: Key) -> Option<Value>;

    /// Insert `key` with `value`. Returns `false` and leaves the store untouched when the key is
    /// already present.
    fn insert(&mut self, key: Key, value: Value) -> bool;

    /// Remove `key`. Returns `false` when the key was absent.
    fn remove(&mut self, key: Key) -> bool;
}

/// Baseline backend on `std::collections::HashMap`.
#[derive(Debug)]
pub struct StdStore {
    map: HashMap<Key, Value, SeededState>,
}

impl StdStore {
    /// Create an empty store with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, SeededState::default()),
        }
    }
}

impl Store for StdStore {
    fn lookup(&self, key: Key) -> Option<Value> {
        self.map.get(&key).copied()
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        match self.map.entry(key) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    fn remove(&mut self, key: Key) -> bool {
        self.map.remove(&key).is_some()
    }
}

/// Alternate backend on `hashbrown::HashMap`.
#[derive(Debug)]
pub struct HashbrownStore {
    map: hashbrown::HashMap<Key, Value, SeededState>,
}

impl HashbrownStore {
    /// Create an empty store with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: hashbrown::HashMap::with_capacity_and_hasher(capacity, SeededState::default()),
        }
    }
}

impl Store for HashbrownStore {
    fn lookup(&self, key: Key) -> Option<Value> {
        self.map.get(&key).copied()
    }

    fn insert(&mut self, key: Key, value: Value) -> bool {
        match self.map.entry(key) {
            hashbrown::hash_map::Entry::Occupied(_) => false,
            hashbrown::hash_map::Entry::Vacant(entry) => {
                entry.insert(value);
                true
            }
        }
    }

    fn remove(&mut self, key: Key) -> bool {
        self.map.remove(&key).is_some()
    }
}

/// Backend selection for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// The baseline `std` table.
    Std,
    /// The `hashbrown` table.
    Hashbrown,
}

impl Backend {
    /// Map the process-interface flag: zero selects the baseline, anything else the alternate.
    pub fn from_flag(flag: u64) -> Self {
        if flag == 0 {
            Backend::Std
        } else {
            Backend::Hashbrown
        }
    }

    /// Open an empty store of this backend with room for `capacity` keys.
    pub fn open(&self, capacity: usize) -> Box<dyn Store> {
        match self {
            Backend::Std => Box::new(StdStore::with_capacity(capacity)),
            Backend::Hashbrown => Box::new(HashbrownStore::with_capacity(capacity)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state_is_stable() {
        let a = SeededState::default();
        let b = SeededState::default();
        for key in 0..1000u64 {
            assert_eq!(a.hash_one(key), b.hash_one(key));
        }
    }

    #[test]
    fn test_insert_rejects_duplicate_without_overwrite() {
        for backend in [Backend::Std, Backend::Hashbrown] {
            let mut store = backend.open(16);
            assert!(store.insert(1, 10));
            assert!(!store.insert(1, 20));
            assert_eq!(store.lookup(1), Some(10));
        }
    }

    #[test]
    fn test_remove_reports_absence() {
        for backend in [Backend::Std, Backend::Hashbrown] {
            let mut store = backend.open(16);
            assert!(store.insert(1, 1));
            assert!(store.remove(1));
            assert!(!store.remove(1));
            assert_eq!(store.lookup(1), None);
        }
    }

    #[test]
    fn test_backends_agree_on_scripted_history() {
        let mut std_store = Backend::Std.open(64);
        let mut hb_store = Backend::Hashbrown.open(64);

        for key in 0..100 {
            assert_eq!(std_store.insert(key, key * 2), hb_store.insert(key, key * 2));
        }
        for key in 50..150 {
            assert_eq!(std_store.lookup(key), hb_store.lookup(key));
        }
        for key in (0..100).step_by(3) {
            assert_eq!(std_store.remove(key), hb_store.remove(key));
        }
        for key in 0..150 {
            assert_eq!(std_store.lookup(key), hb_store.lookup(key));
        }
    }

    #[test]
    fn test_backend_from_flag() {
        assert_eq!(Backend::from_flag(0), Backend::Std);
        assert_eq!(Backend::from_flag(1), Backend::Hashbrown);
        assert_eq!(Backend::from_flag(42), Backend::Hashbrown);
    }
}
