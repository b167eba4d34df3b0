#![cfg(test)]

// Property tests for U64HashMap kept inside the crate so they can also
// observe capacity, which is not part of the public contract checked by
// the integration suite.

use crate::map::U64HashMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    GetStray(u64),
    Mutate(usize, i32),
    Retain(u32),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u64>, Vec<OpI>)> {
    proptest::collection::btree_set(any::<u64>(), 1..=8).prop_flat_map(|pool| {
        let pool: Vec<u64> = pool.into_iter().collect();
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            3 => idx.clone().prop_map(OpI::Get),
            1 => any::<u64>().prop_map(OpI::GetStray),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => any::<u32>().prop_map(OpI::Retain),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `insert` returns the model's previous value; `remove`/`get` parity.
// - `len` parity after every operation.
// - The load-factor threshold holds after every operation:
//   `len() * 4 <= capacity() * 3` (tombstones only tighten this bound).
// - `iter` yields each live entry exactly once, matching the model.
// - `retain`/`clear` parity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: U64HashMap<i32> = U64HashMap::new();
        let mut model: HashMap<u64, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Insert(i, v) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.insert(k, v), model.insert(k, v));
                }
                OpI::Remove(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(&k));
                }
                OpI::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.get(k), model.get(&k));
                    prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
                }
                OpI::GetStray(k) => {
                    prop_assert_eq!(sut.get(k), model.get(&k));
                }
                OpI::Mutate(i, d) => {
                    let k = pool[i];
                    let a = sut.get_mut(k).map(|v| { *v = v.wrapping_add(d); *v });
                    let b = model.get_mut(&k).map(|v| { *v = v.wrapping_add(d); *v });
                    prop_assert_eq!(a, b);
                }
                OpI::Retain(seed) => {
                    sut.retain(|k, _| k.wrapping_mul(u64::from(seed) | 1) % 2 == 0);
                    model.retain(|k, _| k.wrapping_mul(u64::from(seed) | 1) % 2 == 0);
                }
                OpI::Iterate => {
                    let a: BTreeMap<u64, i32> = sut.iter().map(|(k, v)| (k, *v)).collect();
                    let b: BTreeMap<u64, i32> = model.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(a, b);
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert!(sut.len() * 4 <= sut.capacity() * 3);
        }

        // Final full-content parity.
        let a: BTreeMap<u64, i32> = sut.iter().map(|(k, v)| (k, *v)).collect();
        let b: BTreeMap<u64, i32> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(a, b);
    }
}
