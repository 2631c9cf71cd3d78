//! chain-hashtab: hash tables whose buckets are sorted association chains,
//! sized from a fixed prime ladder and grown by non-mutating rehash.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: predictable, duplicate-free containers for latency-sensitive
//!   combinatorial code, built in two layers that can be tested apart.
//! - Layers:
//!   - OrderedChain<T, E, C>: strictly ascending, doubly linked chain of
//!     entries under comparator `C`. Nodes live in a `SlotMap` arena and
//!     link to each other by key. Insert tries the tail, then the head,
//!     then scans, so sorted feeds cost one comparison per entry. Find and
//!     remove stop as soon as they pass the key's position.
//!   - HashTab<T, E, C, H>: boxed slice of lazily allocated chains indexed
//!     by `hash % capacity`. Tracks `len` (entries) and `load` (non-empty
//!     chains). Uses chains only through their public API.
//!
//! Ownership
//! - `E = T` (Deep*): the container owns its entries; removal hands them
//!   back, drop releases them, rehash clones them.
//! - `E = &'a T` (Shallow*): the container stores references to
//!   caller-owned data; rehash copies the references.
//!
//! Strategies
//! - Comparators and hashers are values implementing `Comparator<T>` and
//!   `KeyHasher<T>`. Closures implement both, so extra context is captured
//!   rather than passed per call.
//!
//! Growth
//! - Capacities are the primes in `ladder::LADDER`. A table built for `n`
//!   expected entries starts at the smallest prime above `n`.
//! - `HashTab::rehash(&self)` builds a new table one rung up and leaves the
//!   source untouched. Publishing the new table is a handle swap:
//!
//! ```rust
//! use chain_hashtab::DeepHashTab;
//!
//! let mut live = DeepHashTab::<u32>::with_expected(5).unwrap();
//! for k in 0..20 {
//!     live.insert(k).unwrap();
//! }
//! let grown = live.rehash().unwrap();
//! let retired = std::mem::replace(&mut live, grown);
//! assert_eq!((retired.capacity(), live.capacity()), (11, 17));
//! assert!(live.contains(&19));
//! ```
//!
//! Counting
//! - A rejected duplicate leaves `len` and `load` alone; `len` always equals
//!   the number of reachable entries.
//!
//! Lookup
//! - find/remove hash straight to the owning chain. Strategies are fixed at
//!   construction, so a key always hashes to the slot it was inserted in.
//! - The hasher must agree with the comparator: entries that compare equal
//!   hash equal. Otherwise equal entries can land in different chains and
//!   the duplicate check never sees them.
//! - `find_mut`/`try_for_each_mut` hand out entries mutably; callers may
//!   change payload fields but not the parts that compare or hash.
//!
//! Constraints
//! - Single-threaded: no locks or atomics; tables are `!Send`/`!Sync`.
//! - Reentrancy: in debug builds, a comparator or hasher that calls back
//!   into the same table panics; release builds skip the check.
//! - Allocation failure aborts, as with every std collection.

pub mod chain;
mod chain_proptest;
mod error;
pub mod ladder;
mod reentrancy;
pub mod strategy;
pub mod table;

// Public surface
pub use chain::{DeepChain, OrderedChain, ShallowChain};
pub use error::{CapacityError, InsertError};
pub use ladder::LADDER;
pub use strategy::{hash_words, Comparator, KeyHasher, NaturalOrder, StdHash, WordsHash};
pub use table::{DeepHashTab, HashTab, ShallowHashTab};
