//! Caller-supplied ordering and hashing strategies.
//!
//! A strategy is any value implementing [`Comparator`] or [`KeyHasher`].
//! Closures implement both traits, so a comparator that needs extra context
//! simply captures it.

use core::cmp::Ordering;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// A total order over `T`.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Orders entries by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Maps an entry to a 64-bit hash.
///
/// Entries the table's comparator treats as equal must hash to the same
/// value. Lookups only visit the slot a key hashes to, so a hasher that
/// splits equal entries lets duplicates in and misses existing members.
pub trait KeyHasher<T: ?Sized> {
    fn hash(&self, x: &T) -> u64;
}

impl<T: ?Sized, F> KeyHasher<T> for F
where
    F: Fn(&T) -> u64,
{
    #[inline]
    fn hash(&self, x: &T) -> u64 {
        self(x)
    }
}

/// Hashes through `T: Hash` with a `BuildHasher`.
#[derive(Debug, Clone, Default)]
pub struct StdHash<S = DefaultHashBuilder>(pub S);

impl<S> StdHash<S> {
    /// Hash with `builder` instead of the default random state.
    pub fn with_builder(builder: S) -> Self {
        StdHash(builder)
    }
}

impl<T, S> KeyHasher<T> for StdHash<S>
where
    T: Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, x: &T) -> u64 {
        self.0.hash_one(x)
    }
}

/// Hash for arrays of `u32` words, see [`hash_words`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordsHash;

impl<T> KeyHasher<T> for WordsHash
where
    T: AsRef<[u32]> + ?Sized,
{
    #[inline]
    fn hash(&self, x: &T) -> u64 {
        hash_words(x.as_ref())
    }
}

/// Boost-style `hash_combine` over `u32` words, seeded with the word count.
///
/// Every word is first scrambled with the 0x45d9f3b integer mixer. The
/// result is deterministic across runs and platforms.
pub fn hash_words(words: &[u32]) -> u64 {
    let mut seed = words.len() as u64;
    for &w in words {
        let mut x = u64::from(w);
        x = ((x >> 16) ^ x).wrapping_mul(0x45d9f3b);
        x = ((x >> 16) ^ x).wrapping_mul(0x45d9f3b);
        x ^= x >> 16;
        seed ^= x
            .wrapping_add(0x9e3779b9)
            .wrapping_add(seed << 6)
            .wrapping_add(seed >> 2);
    }
    seed
}
