// HashTab and OrderedChain scenario tests.
//
// Each test documents the behavior verified and the invariants assumed.
// The core invariants exercised:
// - Capacity: initial capacity is the smallest ladder prime above the
//   expected count; rehash moves exactly one rung up.
// - Uniqueness: duplicate insert is rejected; `len` counts only real
//   insertions.
// - Lookup: every inserted key is findable until removed.
// - Ownership: rehash leaves the source table intact; the caller decides
//   when each table is dropped.
use chain_hashtab::{
    hash_words, DeepChain, DeepHashTab, HashTab, InsertError, NaturalOrder, OrderedChain,
    ShallowHashTab, WordsHash, LADDER,
};
use std::cmp::Ordering;
use std::ops::ControlFlow;

// Test: construct, insert, find.
// Verifies: expected 5 -> capacity 11; three distinct keys are findable,
// an absent key is not.
#[test]
fn small_table_insert_and_find() {
    let mut t: DeepHashTab<i32> = HashTab::with_expected(5).unwrap();
    assert_eq!(t.capacity(), 11);
    for x in [5, 1, 3] {
        t.insert(x).unwrap();
    }
    assert_eq!(t.len(), 3);
    for x in [1, 3, 5] {
        assert_eq!(t.find(&x), Some(&x));
    }
    assert!(t.find(&2).is_none());
}

// Test: duplicate insert.
// Assumes: the counting inconsistency of chained tables is corrected.
// Verifies: the duplicate is reported, exactly one 3 remains, len stays 3.
#[test]
fn duplicate_insert_is_rejected_and_not_counted() {
    let mut t: DeepHashTab<i32> = HashTab::with_expected(5).unwrap();
    for x in [5, 1, 3] {
        t.insert(x).unwrap();
    }
    assert_eq!(t.insert(3), Err(InsertError::DuplicateKey));

    let slot = t.slot_of(&3);
    let chain = t.chain(slot).expect("chain holding 3");
    assert_eq!(chain.iter().filter(|&&x| x == 3).count(), 1);
    assert_eq!(t.iter().filter(|&&x| x == 3).count(), 1);
    assert_eq!(t.len(), 3);
}

// Test: remove.
// Verifies: removed key is no longer findable; len drops by exactly one.
#[test]
fn remove_makes_key_unfindable() {
    let mut t: DeepHashTab<i32> = HashTab::with_expected(5).unwrap();
    for x in [5, 1, 3] {
        t.insert(x).unwrap();
    }
    let before = t.len();
    assert_eq!(t.remove(&1), Some(1));
    assert!(t.find(&1).is_none());
    assert_eq!(t.len(), before - 1);
    assert_eq!(t.remove(&1), None);
    assert_eq!(t.len(), before - 1);
}

// Test: explicit rehash.
// Verifies: expected 200 -> capacity 227; after rehash capacity is 347
// and all 150 keys remain findable; the source can be dropped afterwards.
#[test]
fn rehash_moves_to_next_ladder_prime() {
    let mut t: DeepHashTab<u64> = HashTab::with_expected(200).unwrap();
    assert_eq!(t.capacity(), 227);
    for k in 0..150u64 {
        t.insert(k * 7919).unwrap();
    }

    let next = t.rehash().unwrap();
    assert_eq!(next.capacity(), 347);
    assert_eq!(next.len(), 150);
    for k in 0..150u64 {
        assert!(next.contains(&(k * 7919)));
    }
    drop(t);
    assert_eq!(next.len(), 150);
}

// Test: build-then-swap.
// Verifies: a replacement built beside the live table can be published
// with a plain handle swap; the retired table is still intact.
#[test]
fn rehash_then_swap_handles() {
    let mut live: DeepHashTab<u32> = HashTab::new();
    for k in 0..40 {
        live.insert(k).unwrap();
    }
    let replacement = live.rehash().unwrap();
    let retired = std::mem::replace(&mut live, replacement);

    assert_eq!(retired.capacity(), LADDER[0]);
    assert_eq!(live.capacity(), LADDER[1]);
    let mut a: Vec<u32> = retired.iter().copied().collect();
    let mut b: Vec<u32> = live.iter().copied().collect();
    a.sort_unstable();
    b.sort_unstable();
    assert_eq!(a, b);
}

// Test: chain dequeue from both ends.
// Verifies: {1,3,5} dequeues 1 then 3 from the front, 5 then 3 from the back.
#[test]
fn chain_dequeue_both_ends() {
    let mut front: DeepChain<i32> = OrderedChain::default();
    let mut back: DeepChain<i32> = OrderedChain::default();
    for x in [1, 3, 5] {
        front.insert(x).unwrap();
        back.insert(x).unwrap();
    }
    assert_eq!(front.dequeue_front(), Some(1));
    assert_eq!(front.dequeue_front(), Some(3));
    assert_eq!(back.dequeue_back(), Some(5));
    assert_eq!(back.dequeue_back(), Some(3));
}

// Test: records keyed by one field.
// Verifies: rehash preserves the value associated with each key.
#[test]
fn rehash_preserves_associated_values() {
    #[derive(Clone, Debug, PartialEq)]
    struct Rec {
        key: u32,
        value: String,
    }
    fn by_key(a: &Rec, b: &Rec) -> Ordering {
        a.key.cmp(&b.key)
    }
    fn hash_key(r: &Rec) -> u64 {
        u64::from(r.key).wrapping_mul(0x9e37_79b9_7f4a_7c15)
    }
    fn key_only(key: u32) -> Rec {
        Rec {
            key,
            value: String::new(),
        }
    }

    let mut t: DeepHashTab<Rec, _, _> = HashTab::with_strategy(
        10,
        by_key as fn(&Rec, &Rec) -> Ordering,
        hash_key as fn(&Rec) -> u64,
    )
    .unwrap();
    for key in 0..60 {
        t.insert(Rec {
            key,
            value: format!("v{}", key),
        })
        .unwrap();
    }
    // Same key, different value: rejected, original value kept.
    assert!(t
        .insert(Rec {
            key: 7,
            value: "other".into()
        })
        .is_err());

    let u = t.rehash().unwrap().rehash().unwrap();
    assert_eq!(u.capacity(), 29);
    for key in 0..60 {
        let old = t.find(&key_only(key)).unwrap();
        let new = u.find(&key_only(key)).unwrap();
        assert_eq!(old, new);
        assert_eq!(new.value, format!("v{}", key));
    }
}

// Test: load factor across a rehash.
// Assumes: identity hash, so multiples of 11 all collide at capacity 11.
// Verifies: load factor grows while entries pile into one chain and drops
// after rehash spreads them.
#[test]
fn load_factor_grows_then_drops_after_rehash() {
    let mut t: DeepHashTab<u64, NaturalOrder, fn(&u64) -> u64> =
        HashTab::with_strategy(0, NaturalOrder, (|x: &u64| *x) as fn(&u64) -> u64).unwrap();
    let mut last = 0;
    for i in 0..12 {
        t.insert(i * 11).unwrap();
        assert!(t.load_factor() >= last);
        last = t.load_factor();
    }
    assert_eq!(last, 12);
    let u = t.rehash().unwrap();
    assert_eq!(u.len(), t.len());
    assert!(u.load_factor() < t.load_factor());
}

// Test: shallow table over caller-owned data with a capturing comparator.
// Verifies: the table never takes ownership; a comparator closure can carry
// context (here a case-folding flag).
#[test]
fn shallow_table_with_capturing_comparator() {
    let fold = true;
    let words = vec!["Delta".to_string(), "alpha".to_string(), "Charlie".to_string()];
    let shouted = "DELTA".to_string();
    let cmp = move |a: &String, b: &String| {
        if fold {
            a.to_lowercase().cmp(&b.to_lowercase())
        } else {
            a.cmp(b)
        }
    };
    let hash = |s: &String| s.len() as u64;
    let mut t: ShallowHashTab<'_, String, _, _> = HashTab::with_strategy(3, cmp, hash).unwrap();
    for w in &words {
        t.insert(w).unwrap();
    }
    assert_eq!(t.insert(&shouted), Err(InsertError::DuplicateKey));
    assert!(t.contains(&"ALPHA".to_string()));
    let removed = t.remove(&"charlie".to_string()).unwrap();
    assert!(std::ptr::eq(removed, &words[2]));
    assert_eq!(t.len(), 2);
}

// Test: early-abort traversal.
// Verifies: a Break stops the walk and is returned; a full walk visits
// every entry exactly once.
#[test]
fn traversal_reports_early_termination() {
    let mut t: DeepHashTab<u32> = HashTab::with_expected(50).unwrap();
    for k in 0..50 {
        t.insert(k).unwrap();
    }
    let mut count = 0;
    let full: ControlFlow<()> = t.try_for_each(|_| {
        count += 1;
        ControlFlow::Continue(())
    });
    assert_eq!(full, ControlFlow::Continue(()));
    assert_eq!(count, 50);

    let mut count = 0;
    let stopped = t.try_for_each(|&k| {
        count += 1;
        if count == 10 {
            ControlFlow::Break(k)
        } else {
            ControlFlow::Continue(())
        }
    });
    assert!(matches!(stopped, ControlFlow::Break(_)));
    assert_eq!(count, 10);
}

// Test: the standard word-array hash used as a table strategy.
// Verifies: permutations stay distinct entries and are findable.
#[test]
fn word_array_hash_as_strategy() {
    let mut t: DeepHashTab<Vec<u32>, NaturalOrder, WordsHash> =
        HashTab::with_strategy(16, NaturalOrder, WordsHash).unwrap();
    let perms = [
        vec![0, 1, 2],
        vec![0, 2, 1],
        vec![1, 0, 2],
        vec![1, 2, 0],
        vec![2, 0, 1],
        vec![2, 1, 0],
    ];
    for p in &perms {
        t.insert(p.clone()).unwrap();
    }
    assert_eq!(t.len(), 6);
    for p in &perms {
        assert!(t.contains(p));
        assert_eq!(t.slot_of(p), (hash_words(p) % 17) as usize);
    }
}

// Test: in-place updates through the mutable accessors.
// Assumes: records compare and hash by `key` only.
// Verifies: values changed via find_mut and try_for_each_mut are seen by
// find, survive rehash, and leave len/load untouched.
#[test]
fn records_update_in_place() {
    #[derive(Clone, Debug, PartialEq)]
    struct Rec {
        key: u32,
        hits: u32,
    }
    fn by_key(a: &Rec, b: &Rec) -> Ordering {
        a.key.cmp(&b.key)
    }
    fn hash_key(r: &Rec) -> u64 {
        u64::from(r.key)
    }
    fn key_only(key: u32) -> Rec {
        Rec { key, hits: 0 }
    }

    let mut t: DeepHashTab<Rec, _, _> = HashTab::with_strategy(
        5,
        by_key as fn(&Rec, &Rec) -> Ordering,
        hash_key as fn(&Rec) -> u64,
    )
    .unwrap();
    for key in 0..30 {
        t.insert(key_only(key)).unwrap();
    }
    let (len, load) = (t.len(), t.load());

    t.find_mut(&key_only(7)).unwrap().hits = 40;
    assert!(t.find_mut(&key_only(99)).is_none());
    assert_eq!(t.find(&key_only(7)).map(|r| r.hits), Some(40));

    let bumped = t.try_for_each_mut(|r| {
        r.hits += 1;
        ControlFlow::<()>::Continue(())
    });
    assert_eq!(bumped, ControlFlow::Continue(()));
    assert_eq!((t.len(), t.load()), (len, load));

    let mut u = t.rehash().unwrap();
    for key in 0..30 {
        let want = if key == 7 { 41 } else { 1 };
        assert_eq!(t.find(&key_only(key)).map(|r| r.hits), Some(want));
        assert_eq!(u.find(&key_only(key)).map(|r| r.hits), Some(want));
    }

    // Break stops the walk after the first entry.
    let mut seen = 0;
    let stopped = u.try_for_each_mut(|r| {
        seen += 1;
        r.hits = 0;
        ControlFlow::Break(r.key)
    });
    assert!(matches!(stopped, ControlFlow::Break(_)));
    assert_eq!(seen, 1);
    assert_eq!(u.iter().filter(|r| r.hits == 0).count(), 1);
}

// Test: a hasher that agrees with a case-folding comparator.
// Verifies: comparator-equal spellings land in one chain, so the second
// spelling is rejected and lookups by either spelling succeed.
#[test]
fn case_folding_comparator_needs_case_folding_hash() {
    let fold = |a: &str, b: &str| a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase());
    let folded_hash = |s: &str| {
        let words: Vec<u32> = s.bytes().map(|b| u32::from(b.to_ascii_lowercase())).collect();
        hash_words(&words)
    };
    let words = ["a", "A", "b", "B", "c", "C", "d", "D", "e", "E"];
    let mut t: ShallowHashTab<'_, str, _, _> = HashTab::with_strategy(10, fold, folded_hash).unwrap();

    let accepted = words.iter().filter(|w| t.insert(*w).is_ok()).count();
    assert_eq!(accepted, 5);
    assert_eq!(t.len(), 5);
    assert_eq!(t.find("C"), Some(&"c"));
    assert_eq!(t.insert("e"), Err(InsertError::DuplicateKey));
}
