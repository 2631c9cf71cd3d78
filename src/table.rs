//! HashTab: array of ordered chains indexed by `hash(entry) % capacity`.
//!
//! Capacities come from the prime ladder. Chains are allocated the first
//! time their slot is used. Growth never happens in place: `rehash` builds
//! a separate table one rung up and leaves `self` untouched, so a caller
//! can publish the new table by swapping handles.

use crate::chain::{self, OrderedChain};
use crate::error::{CapacityError, InsertError};
use crate::ladder::{self, LADDER};
use crate::reentrancy::ReentrancyCheck;
use crate::strategy::{Comparator, KeyHasher, NaturalOrder, StdHash};
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::ops::ControlFlow;

pub struct HashTab<T: ?Sized, E, C, H> {
    chains: Box<[Option<OrderedChain<T, E, C>>]>,
    len: usize,
    load: usize,
    rung: usize,
    cmp: C,
    hasher: H,
    reentrancy: ReentrancyCheck,
}

/// Table owning its entries; `rehash` clones them.
pub type DeepHashTab<T, C = NaturalOrder, H = StdHash> = HashTab<T, T, C, H>;

/// Table holding references to caller-owned entries; `rehash` copies the
/// references.
pub type ShallowHashTab<'a, T, C = NaturalOrder, H = StdHash> = HashTab<T, &'a T, C, H>;

impl<T, E> HashTab<T, E, NaturalOrder, StdHash>
where
    T: Ord + Hash + ?Sized,
{
    /// Empty table at the first rung, ordered by `Ord` and hashed by `Hash`.
    pub fn new() -> Self {
        Self::at_rung(0, NaturalOrder, StdHash::default())
    }

    /// Empty table sized for `expected` entries.
    pub fn with_expected(expected: usize) -> Result<Self, CapacityError> {
        Self::with_strategy(expected, NaturalOrder, StdHash::default())
    }
}

impl<T, E> Default for HashTab<T, E, NaturalOrder, StdHash>
where
    T: Ord + Hash + ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, E, C, H> HashTab<T, E, C, H> {
    /// Empty table whose capacity is the smallest ladder prime greater
    /// than `expected`.
    pub fn with_strategy(expected: usize, cmp: C, hasher: H) -> Result<Self, CapacityError> {
        let rung = ladder::rung_for(expected);
        ladder::capacity_at(rung, expected)?;
        Ok(Self::at_rung(rung, cmp, hasher))
    }

    fn at_rung(rung: usize, cmp: C, hasher: H) -> Self {
        let chains = core::iter::repeat_with(|| None)
            .take(LADDER[rung])
            .collect();
        Self {
            chains,
            len: 0,
            load: 0,
            rung,
            cmp,
            hasher,
            reentrancy: ReentrancyCheck::new(),
        }
    }

    /// Number of entries across all chains.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty chains.
    pub fn load(&self) -> usize {
        self.load
    }

    /// `len / load`, truncated; 0 for an empty table.
    pub fn load_factor(&self) -> usize {
        if self.load == 0 {
            0
        } else {
            self.len / self.load
        }
    }

    pub fn capacity(&self) -> usize {
        self.chains.len()
    }

    /// Position of `capacity()` on the prime ladder.
    pub fn rung(&self) -> usize {
        self.rung
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The chain at `slot`, if one has been allocated.
    pub fn chain(&self, slot: usize) -> Option<&OrderedChain<T, E, C>> {
        self.chains.get(slot)?.as_ref()
    }

    /// Entries in slot order, each chain ascending.
    pub fn iter(&self) -> Iter<'_, T, E, C> {
        Iter {
            chains: self.chains.iter(),
            current: None,
            remaining: self.len,
        }
    }

    /// Apply `f` to every entry in iteration order, stopping at the first
    /// `Break`, which is handed back to the caller.
    pub fn try_for_each<B, F>(&self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&E) -> ControlFlow<B>,
    {
        self.chains
            .iter()
            .flatten()
            .try_for_each(|chain| chain.try_for_each(&mut f))
    }

    /// Mutable counterpart of [`try_for_each`](Self::try_for_each). `f`
    /// must not change how an entry compares or hashes.
    pub fn try_for_each_mut<B, F>(&mut self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&mut E) -> ControlFlow<B>,
    {
        self.chains
            .iter_mut()
            .flatten()
            .try_for_each(|chain| chain.try_for_each_mut(&mut f))
    }
}

impl<T, E, C, H> HashTab<T, E, C, H>
where
    T: ?Sized,
    E: Borrow<T>,
    C: Comparator<T>,
    H: KeyHasher<T>,
{
    #[inline]
    fn slot(&self, key: &T) -> usize {
        (self.hasher.hash(key) % self.chains.len() as u64) as usize
    }

    /// Slot that holds (or would hold) `key`.
    pub fn slot_of(&self, key: &T) -> usize {
        let _g = self.reentrancy.enter("slot_of");
        self.slot(key)
    }

    /// Insert `entry` into its slot's chain, allocating the chain if needed.
    ///
    /// An entry equal to a member is rejected and counts are unchanged.
    pub fn insert(&mut self, entry: E) -> Result<(), InsertError>
    where
        C: Clone,
    {
        let _g = self.reentrancy.enter("insert");
        let slot = self.slot(entry.borrow());
        let cmp = &self.cmp;
        let chain = self.chains[slot].get_or_insert_with(|| {
            log::trace!("allocating chain for slot {}", slot);
            OrderedChain::new(cmp.clone())
        });
        let was_empty = chain.is_empty();
        chain.insert(entry)?;
        if was_empty {
            self.load += 1;
        }
        self.len += 1;
        Ok(())
    }

    pub fn find(&self, key: &T) -> Option<&E> {
        let _g = self.reentrancy.enter("find");
        self.chains[self.slot(key)].as_ref()?.find(key)
    }

    /// Mutable access to the entry equal to `key`. The caller must not
    /// change how the entry compares or hashes.
    pub fn find_mut(&mut self, key: &T) -> Option<&mut E> {
        let _g = self.reentrancy.enter("find_mut");
        let slot = self.slot(key);
        self.chains[slot].as_mut()?.find_mut(key)
    }

    pub fn contains(&self, key: &T) -> bool {
        let _g = self.reentrancy.enter("contains");
        self.chains[self.slot(key)]
            .as_ref()
            .map_or(false, |c| c.contains(key))
    }

    /// Remove the entry equal to `key` and hand it back.
    pub fn remove(&mut self, key: &T) -> Option<E> {
        let _g = self.reentrancy.enter("remove");
        let slot = self.slot(key);
        let chain = self.chains[slot].as_mut()?;
        let entry = chain.remove(key)?;
        if chain.is_empty() {
            self.load -= 1;
        }
        self.len -= 1;
        Some(entry)
    }
}

impl<T, E, C, H> HashTab<T, E, C, H>
where
    T: ?Sized,
    E: Borrow<T> + Clone,
    C: Comparator<T> + Clone,
    H: KeyHasher<T> + Clone,
{
    /// Build a new table one ladder rung up holding a copy of every entry.
    ///
    /// `self` is only read. Deep tables clone their entries, shallow tables
    /// copy references. Fails once the ladder is exhausted.
    pub fn rehash(&self) -> Result<Self, CapacityError> {
        let _g = self.reentrancy.enter("rehash");
        let rung = self.rung + 1;
        let capacity = ladder::capacity_at(rung, self.capacity())?;
        log::debug!(
            "rehashing {} entries from capacity {} to {}",
            self.len,
            self.capacity(),
            capacity
        );

        let mut next = Self::at_rung(rung, self.cmp.clone(), self.hasher.clone());
        for entry in self.iter() {
            let inserted = next.insert(entry.clone());
            debug_assert!(inserted.is_ok(), "source table held equal entries");
        }
        Ok(next)
    }
}

impl<T: ?Sized, E: fmt::Debug, C, H> fmt::Debug for HashTab<T, E, C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTab")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("load", &self.load)
            .finish_non_exhaustive()
    }
}

/// Iterator over table entries: slot order, each chain ascending.
pub struct Iter<'a, T: ?Sized, E, C> {
    chains: core::slice::Iter<'a, Option<OrderedChain<T, E, C>>>,
    current: Option<chain::Iter<'a, E>>,
    remaining: usize,
}

impl<'a, T: ?Sized, E, C> Iterator for Iter<'a, T, E, C> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(entry);
            }
            if let Some(chain) = self.chains.next()? {
                self.current = Some(chain.iter());
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: ?Sized, E, C> ExactSizeIterator for Iter<'_, T, E, C> {}
impl<T: ?Sized, E, C> FusedIterator for Iter<'_, T, E, C> {}

impl<'a, T: ?Sized, E, C, H> IntoIterator for &'a HashTab<T, E, C, H> {
    type Item = &'a E;
    type IntoIter = Iter<'a, T, E, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator; yields entries in the same order as [`HashTab::iter`].
pub struct IntoIter<T: ?Sized, E, C> {
    chains: std::vec::IntoIter<Option<OrderedChain<T, E, C>>>,
    current: Option<chain::IntoIter<T, E, C>>,
    remaining: usize,
}

impl<T: ?Sized, E, C> Iterator for IntoIter<T, E, C> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(entry);
            }
            if let Some(chain) = self.chains.next()? {
                self.current = Some(chain.into_iter());
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: ?Sized, E, C> ExactSizeIterator for IntoIter<T, E, C> {}

impl<T: ?Sized, E, C, H> IntoIterator for HashTab<T, E, C, H> {
    type Item = E;
    type IntoIter = IntoIter<T, E, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            chains: self.chains.into_vec().into_iter(),
            current: None,
            remaining: self.len,
        }
    }
}
