//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store against a simple reference model.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheStore, ManualClock};

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(900);

// == Strategies ==
/// Generates cache keys from a small domain so puts collide often
fn key_strategy() -> impl Strategy<Value = u64> {
    0u64..40
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u64, value: String },
    Get { key: u64 },
    Advance { secs: u64 },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Put { key, value }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        1 => (0u64..600).prop_map(|secs| CacheOp::Advance { secs }),
    ]
}

/// Reference model: insertion-ordered map with explicit timestamps.
struct Model {
    capacity: usize,
    now: u64,
    order: VecDeque<u64>,
    values: HashMap<u64, (String, u64)>,
}

impl Model {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            now: 0,
            order: VecDeque::new(),
            values: HashMap::new(),
        }
    }

    fn put(&mut self, key: u64, value: String) {
        if self.values.contains_key(&key) {
            self.order.retain(|k| *k != key);
        } else if self.values.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.values.remove(&oldest);
            }
        }
        self.order.push_back(key);
        self.values.insert(key, (value, self.now));
    }

    fn get(&self, key: u64) -> Option<String> {
        self.values
            .get(&key)
            .filter(|(_, at)| self.now - at < TEST_TTL.as_secs())
            .map(|(v, _)| v.clone())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every read agrees with the reference model, and the store never grows
    // past its capacity.
    #[test]
    fn prop_store_matches_model(
        capacity in 1usize..12,
        ops in prop::collection::vec(cache_op_strategy(), 1..120)
    ) {
        let clock = Arc::new(ManualClock::new());
        let mut store = CacheStore::with_clock(capacity, TEST_TTL, clock.clone());
        let mut model = Model::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key, value.clone());
                    model.put(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(key), "Mismatch on key {}", key);
                }
                CacheOp::Advance { secs } => {
                    clock.advance(Duration::from_secs(secs));
                    model.now += secs;
                }
            }
            prop_assert!(
                store.len() <= capacity,
                "Cache size {} exceeds capacity {}",
                store.len(),
                capacity
            );
        }
    }

    // Inserting N+1 distinct keys into a store of capacity N drops exactly
    // the first one.
    #[test]
    fn prop_capacity_evicts_first_inserted(
        keys in prop::collection::hash_set(key_strategy(), 2..20)
    ) {
        let keys: Vec<u64> = keys.into_iter().collect();
        let capacity = keys.len() - 1;
        let mut store = CacheStore::new(capacity, TEST_TTL);

        for key in &keys {
            store.put(*key, format!("value_{}", key));
        }

        prop_assert_eq!(store.get(&keys[0]), None);
        for key in keys.iter().skip(1) {
            prop_assert_eq!(store.get(key), Some(format!("value_{}", key)));
        }
    }

    // Reads never change which key is evicted next.
    #[test]
    fn prop_reads_do_not_refresh_recency(
        keys in prop::collection::hash_set(key_strategy(), 3..10),
        reads in prop::collection::vec(0usize..10, 0..20)
    ) {
        let keys: Vec<u64> = keys.into_iter().collect();
        let mut store = CacheStore::new(keys.len(), TEST_TTL);
        for key in &keys {
            store.put(*key, key.to_string());
        }

        for idx in reads {
            let _ = store.get(&keys[idx % keys.len()]);
        }

        let fresh = (0u64..).find(|k| !keys.contains(k)).unwrap();
        store.put(fresh, fresh.to_string());

        prop_assert_eq!(store.get(&keys[0]), None);
        prop_assert!(store.get(&keys[1]).is_some());
    }

    // Nothing inserted is ever served once a full TTL has elapsed.
    #[test]
    fn prop_nothing_outlives_ttl(
        keys in prop::collection::vec(key_strategy(), 1..30),
        extra in 0u64..10_000
    ) {
        let clock = Arc::new(ManualClock::new());
        let mut store = CacheStore::with_clock(64, TEST_TTL, clock.clone());
        let distinct: HashSet<u64> = keys.iter().copied().collect();

        for key in keys {
            store.put(key, "v".to_string());
        }
        clock.advance(TEST_TTL + Duration::from_secs(extra));

        for key in distinct {
            prop_assert_eq!(store.get(&key), None);
        }
    }
}

// == Concurrency ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Concurrent puts and gets through a shared mutex leave the store
    // consistent and every read returns a value that some put wrote.
    #[test]
    fn prop_concurrent_operation_correctness(
        operations in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        use tokio::sync::Mutex;

        let rt = tokio::runtime::Runtime::new().unwrap();

        rt.block_on(async {
            let store = Arc::new(Mutex::new(CacheStore::new(8, TEST_TTL)));
            let written: HashSet<String> = operations
                .iter()
                .filter_map(|op| match op {
                    CacheOp::Put { value, .. } => Some(value.clone()),
                    _ => None,
                })
                .collect();

            let mut handles = vec![];
            for op in operations {
                let store = Arc::clone(&store);
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Put { key, value } => {
                            store.lock().await.put(key, value);
                            None
                        }
                        CacheOp::Get { key } => store.lock().await.get(&key),
                        CacheOp::Advance { .. } => None,
                    }
                }));
            }

            for handle in handles {
                let read = handle.await.expect("Task should not panic");
                if let Some(value) = read {
                    prop_assert!(written.contains(&value), "Read unknown value {:?}", value);
                }
            }

            let cache = store.lock().await;
            prop_assert!(cache.len() <= 8, "Cache should not exceed capacity");
            prop_assert_eq!(cache.stats().total_entries, cache.len());

            Ok(())
        })?;
    }
}
