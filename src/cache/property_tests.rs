//! Property-Based Tests for the Response Cache
//!
//! Uses proptest to check capacity and FIFO eviction guarantees.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::cache::{CacheKey, ResponseCache};

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ ]{1,32}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,!?]{0,128}"
}

/// Distinct keys, in generation order.
fn distinct_keys(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(key_strategy(), min..max).prop_map(|keys| {
        let mut seen = HashSet::new();
        keys.into_iter()
            .filter(|key| seen.insert(key.clone()))
            .collect()
    })
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: String },
    Get { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // N+1 distinct puts into a cache of capacity N leave exactly the last N.
    #[test]
    fn prop_fifo_evicts_first_inserted(keys in distinct_keys(2, 40)) {
        prop_assume!(keys.len() >= 2);

        let capacity = keys.len() - 1;
        let mut cache = ResponseCache::new(capacity);

        for key in &keys {
            cache.put(key.clone(), format!("value_{}", key));
        }

        prop_assert!(!cache.contains(&keys[0]), "first key '{}' should be evicted", keys[0]);
        for key in &keys[1..] {
            prop_assert!(cache.contains(key), "key '{}' should still be cached", key);
        }
        prop_assert_eq!(cache.len(), capacity);
    }

    // Reading the oldest key before overflowing does not save it.
    #[test]
    fn prop_reads_do_not_protect_from_eviction(keys in distinct_keys(3, 20), extra in key_strategy()) {
        prop_assume!(keys.len() >= 2);
        prop_assume!(!keys.contains(&extra));

        let mut cache = ResponseCache::new(keys.len());
        for key in &keys {
            cache.put(key.clone(), "v");
        }
        for _ in 0..3 {
            prop_assert!(cache.get(&keys[0]).is_some());
        }

        cache.put(extra.clone(), "new");

        prop_assert!(!cache.contains(&keys[0]));
        prop_assert!(cache.contains(&extra));
    }

    // The store never grows beyond its capacity.
    #[test]
    fn prop_capacity_enforced(
        capacity in 0usize..20,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let mut cache = ResponseCache::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key } => { cache.get(&key); }
            }
            prop_assert!(cache.len() <= capacity, "size {} exceeds capacity {}", cache.len(), capacity);
        }
    }

    // Hit and miss counters match the observed lookups.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut cache = ResponseCache::new(16);
        let mut hits = 0u64;
        let mut misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => cache.put(key, value),
                CacheOp::Get { key } => match cache.get(&key) {
                    Some(_) => hits += 1,
                    None => misses += 1,
                },
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, hits);
        prop_assert_eq!(stats.misses, misses);
        prop_assert_eq!(stats.total_entries, cache.len());
    }

    // A cached value is returned unchanged until it is evicted.
    #[test]
    fn prop_cached_value_is_stable(
        category in "[A-Za-z]{0,12}",
        prompt in ".{1,64}",
        value in value_strategy()
    ) {
        let mut cache = ResponseCache::new(4);
        let key = CacheKey::chat(Some(&category), &prompt);

        cache.put(key.as_str(), value.clone());

        prop_assert_eq!(cache.get(key.as_str()), Some(value.clone()));
        prop_assert_eq!(cache.get(CacheKey::chat(Some(&category), &prompt).as_str()), Some(value));
    }
}
