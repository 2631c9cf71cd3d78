#![cfg(test)]

// Property tests for OrderedChain kept inside the crate so the node arena
// can be cross-checked against the public iteration order.

use crate::chain::{DeepChain, OrderedChain};
use crate::error::InsertError;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Remove(i16),
    Find(i16),
    DequeueFront,
    DequeueBack,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    // A narrow key range keeps duplicates and hits frequent.
    let key = -20i16..20;
    let op = prop_oneof![
        3 => key.clone().prop_map(Op::Insert),
        2 => key.clone().prop_map(Op::Remove),
        2 => key.prop_map(Op::Find),
        1 => Just(Op::DequeueFront),
        1 => Just(Op::DequeueBack),
    ];
    proptest::collection::vec(op, 1..120)
}

fn strictly_ascending<C>(chain: &OrderedChain<i16, i16, C>) -> bool {
    let forward: Vec<i16> = chain.iter().copied().collect();
    let mut backward: Vec<i16> = chain.iter().rev().copied().collect();
    backward.reverse();
    forward.windows(2).all(|w| w[0] < w[1]) && forward == backward
}

// Property: state-machine equivalence against BTreeSet.
// - insert succeeds iff the key is new; duplicates leave membership alone.
// - remove/find agree with the model and remove hands back the key.
// - dequeue_front/back return the model's min/max.
// - after every op: forward and backward traversal agree, entries are
//   strictly ascending, and len/front/back match the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_matches_btreeset(ops in arb_ops()) {
        let mut sut: DeepChain<i16> = DeepChain::default();
        let mut model: BTreeSet<i16> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    let fresh = !model.contains(&k);
                    match sut.insert(k) {
                        Ok(()) => {
                            prop_assert!(fresh, "insert must reject duplicates");
                            model.insert(k);
                        }
                        Err(InsertError::DuplicateKey) => prop_assert!(!fresh),
                    }
                }
                Op::Remove(k) => {
                    prop_assert_eq!(sut.remove(&k), model.take(&k));
                }
                Op::Find(k) => {
                    prop_assert_eq!(sut.find(&k), model.get(&k));
                    prop_assert_eq!(sut.contains(&k), model.contains(&k));
                }
                Op::DequeueFront => {
                    prop_assert_eq!(sut.dequeue_front(), model.pop_first());
                }
                Op::DequeueBack => {
                    prop_assert_eq!(sut.dequeue_back(), model.pop_last());
                }
            }

            prop_assert!(strictly_ascending(&sut));
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.front(), model.first());
            prop_assert_eq!(sut.back(), model.last());
        }

        let drained: Vec<i16> = sut.into_iter().collect();
        let expected: Vec<i16> = model.into_iter().collect();
        prop_assert_eq!(drained, expected);
    }
}

// Property: a reversed comparator produces the reversed model order, and
// the early-exit searches stay correct under it.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_chain_descending_comparator(keys in proptest::collection::vec(-50i16..50, 0..80), lookups in proptest::collection::vec(-60i16..60, 0..20)) {
        let mut sut: DeepChain<i16, _> = OrderedChain::new(|a: &i16, b: &i16| b.cmp(a));
        let mut model = BTreeSet::new();
        for k in keys {
            prop_assert_eq!(sut.insert(k).is_ok(), model.insert(k));
        }
        let got: Vec<i16> = sut.iter().copied().collect();
        let want: Vec<i16> = model.iter().rev().copied().collect();
        prop_assert_eq!(got, want);

        for p in lookups {
            prop_assert_eq!(sut.contains(&p), model.contains(&p));
            prop_assert_eq!(sut.remove(&p), model.take(&p));
        }
    }
}
