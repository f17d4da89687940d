use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

/// Checks occupancy bookkeeping and that every stored key is reachable from
/// its home slot without crossing an empty slot.
fn validate_table<S: BuildHasher>(t: &ProbeTable<S>) {
    let occupied = t.slots.iter().filter(|s| !s.is_empty()).count();
    assert_eq!(occupied, t.len, "len must match occupied slot count");
    assert!(t.len <= t.capacity());

    let capacity = t.capacity();
    for (at, slot) in t.slots.iter().enumerate() {
        let Slot::Occupied { key, .. } = *slot else {
            continue;
        };
        let mut idx = t.home(key);
        let mut steps = 0;
        while idx != at {
            assert!(
                !t.slots[idx].is_empty(),
                "probe chain of slot {at} crosses empty slot {idx}"
            );
            idx = next_slot(idx, capacity);
            steps += 1;
            assert!(steps < capacity, "slot {at} unreachable from its home");
        }
    }
}

fn key_strategy() -> impl Strategy<Value = f64> + Clone {
    // A narrow pool keeps duplicates and collisions frequent.
    prop_oneof![
        4 => (0u32..24).prop_map(|i| f64::from(i) * 0.25),
        1 => any::<f64>(),
    ]
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 3)]
    Insert(#[proptest(strategy = "key_strategy()")] f64, u64),
    #[proptest(weight = 2)]
    Get(#[proptest(strategy = "key_strategy()")] f64),
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_matches_first_insert_model(
        capacity in 0usize..=32,
        ops in prop::collection::vec(any::<Op>(), 0..=96),
    ) {
        let mut t = ProbeTable::new(capacity);
        // Accepted inserts, in insertion order.
        let mut model: Vec<(f64, u64)> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let accepted = t.insert(key, value);
                    prop_assert_eq!(accepted, model.len() < capacity);
                    if accepted {
                        model.push((key, value));
                    }
                }
                Op::Get(key) => {
                    let expected = model
                        .iter()
                        .find(|(k, _)| same_key(*k, key))
                        .map(|&(_, v)| v);
                    prop_assert_eq!(t.get(key), expected);
                }
            }
            prop_assert_eq!(t.len(), model.len());
        }

        validate_table(&t);
        let mut got: Vec<u64> = t.iter().map(|(_, v)| v).collect();
        let mut expected: Vec<u64> = model.iter().map(|&(_, v)| v).collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_distinct_keys_below_capacity_are_retrievable(
        keys in prop::collection::hash_set(any::<u64>(), 0..=256),
        slack in 0usize..8,
    ) {
        let keys: Vec<f64> = keys.into_iter().map(f64::from_bits).collect();
        let mut t = ProbeTable::new(keys.len() + slack);
        for (i, &k) in keys.iter().enumerate() {
            prop_assert!(t.insert(k, i as u64));
        }
        for (i, &k) in keys.iter().enumerate() {
            prop_assert_eq!(t.get(k), Some(i as u64));
        }
        validate_table(&t);
    }
}

#[test]
fn full_table_rejects_every_key() {
    for capacity in 1..=16usize {
        let mut t = ProbeTable::new(capacity);
        for i in 0..capacity {
            assert!(t.insert(i as f64 + 0.5, i as u64));
        }
        for probe in 0..64u64 {
            let key = probe as f64 * 1.75;
            assert!(!t.insert(key, probe));
        }
        assert_eq!(t.len(), capacity);
        validate_table(&t);
    }
}
