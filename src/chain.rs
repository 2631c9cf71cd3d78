//! OrderedChain: sorted, duplicate-free, doubly linked sequence.
//!
//! Nodes live in a `SlotMap` arena; `prev`/`next` links are arena keys, so
//! the chain owns every node exactly once and back-links never own
//! anything. The element type `E` decides ownership: `E = T` stores owned
//! entries (deep), `E = &'a T` stores caller-owned references (shallow).
//! Ordering always goes through `E: Borrow<T>` and the chain's comparator.

use crate::error::InsertError;
use crate::strategy::{Comparator, NaturalOrder};
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::ControlFlow;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug)]
struct Node<E> {
    entry: E,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

/// Strictly ascending chain of entries under comparator `C`.
pub struct OrderedChain<T: ?Sized, E, C> {
    nodes: SlotMap<DefaultKey, Node<E>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
    cmp: C,
    _target: PhantomData<fn(&T)>,
}

/// Chain owning its entries.
pub type DeepChain<T, C = NaturalOrder> = OrderedChain<T, T, C>;

/// Chain holding references to caller-owned entries.
pub type ShallowChain<'a, T, C = NaturalOrder> = OrderedChain<T, &'a T, C>;

impl<T: ?Sized, E, C> OrderedChain<T, E, C> {
    pub fn new(cmp: C) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
            cmp,
            _target: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Smallest entry.
    pub fn front(&self) -> Option<&E> {
        self.head.map(|k| &self.nodes[k].entry)
    }

    /// Largest entry.
    pub fn back(&self) -> Option<&E> {
        self.tail.map(|k| &self.nodes[k].entry)
    }

    /// Remove and return the smallest entry.
    pub fn dequeue_front(&mut self) -> Option<E> {
        let k = self.head?;
        self.unlink(k)
    }

    /// Remove and return the largest entry.
    pub fn dequeue_back(&mut self) -> Option<E> {
        let k = self.tail?;
        self.unlink(k)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Entries in ascending order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }

    /// Apply `f` to every entry in ascending order, stopping at the first
    /// `Break`, which is handed back to the caller.
    pub fn try_for_each<B, F>(&self, f: F) -> ControlFlow<B>
    where
        F: FnMut(&E) -> ControlFlow<B>,
    {
        self.iter().try_for_each(f)
    }

    /// Like [`try_for_each`](Self::try_for_each) but hands out each entry
    /// mutably. `f` must not change how an entry compares, or the chain
    /// stops being sorted.
    pub fn try_for_each_mut<B, F>(&mut self, mut f: F) -> ControlFlow<B>
    where
        F: FnMut(&mut E) -> ControlFlow<B>,
    {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &mut self.nodes[k];
            if let ControlFlow::Break(b) = f(&mut node.entry) {
                return ControlFlow::Break(b);
            }
            cur = node.next;
        }
        ControlFlow::Continue(())
    }

    fn unlink(&mut self, k: DefaultKey) -> Option<E> {
        let node = self.nodes.remove(k)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.entry)
    }

    fn link_after(&mut self, at: DefaultKey, entry: E) {
        let next = self.nodes[at].next;
        let k = self.nodes.insert(Node {
            entry,
            prev: Some(at),
            next,
        });
        self.nodes[at].next = Some(k);
        match next {
            Some(n) => self.nodes[n].prev = Some(k),
            None => self.tail = Some(k),
        }
    }

    fn link_before(&mut self, at: DefaultKey, entry: E) {
        let prev = self.nodes[at].prev;
        let k = self.nodes.insert(Node {
            entry,
            prev,
            next: Some(at),
        });
        self.nodes[at].prev = Some(k);
        match prev {
            Some(p) => self.nodes[p].next = Some(k),
            None => self.head = Some(k),
        }
    }
}

impl<T, E, C> OrderedChain<T, E, C>
where
    T: ?Sized,
    E: Borrow<T>,
    C: Comparator<T>,
{
    #[inline]
    fn order(&self, key: &T, k: DefaultKey) -> Ordering {
        self.cmp.compare(key, self.nodes[k].entry.borrow())
    }

    /// Insert `entry` at its ordered position.
    ///
    /// Tries the tail first, then the head, then scans the body, so feeding
    /// already sorted data costs one comparison per insert. An entry equal
    /// to a member is dropped and the chain is left as it was.
    pub fn insert(&mut self, entry: E) -> Result<(), InsertError> {
        let (head, tail) = match (self.head, self.tail) {
            (Some(h), Some(t)) => (h, t),
            _ => {
                let k = self.nodes.insert(Node {
                    entry,
                    prev: None,
                    next: None,
                });
                self.head = Some(k);
                self.tail = Some(k);
                return Ok(());
            }
        };

        match self.order(entry.borrow(), tail) {
            Ordering::Greater => {
                self.link_after(tail, entry);
                return Ok(());
            }
            Ordering::Equal => return Err(InsertError::DuplicateKey),
            Ordering::Less => {}
        }

        match self.order(entry.borrow(), head) {
            Ordering::Less => {
                self.link_before(head, entry);
                return Ok(());
            }
            Ordering::Equal => return Err(InsertError::DuplicateKey),
            Ordering::Greater => {}
        }

        let mut at = head;
        while let Some(next) = self.nodes[at].next {
            match self.order(entry.borrow(), next) {
                Ordering::Less => {
                    self.link_after(at, entry);
                    return Ok(());
                }
                Ordering::Equal => return Err(InsertError::DuplicateKey),
                Ordering::Greater => at = next,
            }
        }
        // Only reachable when the comparator is not a total order.
        self.link_after(at, entry);
        Ok(())
    }

    /// Ascending scan that gives up once it passes where `key` would sit.
    fn locate(&self, key: &T) -> Option<DefaultKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            match self.order(key, k) {
                Ordering::Less => return None,
                Ordering::Equal => return Some(k),
                Ordering::Greater => cur = self.nodes[k].next,
            }
        }
        None
    }

    pub fn find(&self, key: &T) -> Option<&E> {
        self.locate(key).map(|k| &self.nodes[k].entry)
    }

    /// Mutable access to the entry equal to `key`. Changing how the entry
    /// compares leaves the chain out of order.
    pub fn find_mut(&mut self, key: &T) -> Option<&mut E> {
        let k = self.locate(key)?;
        Some(&mut self.nodes[k].entry)
    }

    pub fn contains(&self, key: &T) -> bool {
        self.locate(key).is_some()
    }

    /// Remove the entry equal to `key` and hand it back.
    ///
    /// Keys outside `[front, back]` are rejected after at most two
    /// comparisons.
    pub fn remove(&mut self, key: &T) -> Option<E> {
        let head = self.head?;
        let tail = self.tail?;

        let k = match self.order(key, head) {
            Ordering::Less => return None,
            Ordering::Equal => head,
            Ordering::Greater => match self.order(key, tail) {
                Ordering::Greater => return None,
                Ordering::Equal => tail,
                Ordering::Less => self.locate_inner(key, head, tail)?,
            },
        };
        self.unlink(k)
    }

    fn locate_inner(&self, key: &T, head: DefaultKey, tail: DefaultKey) -> Option<DefaultKey> {
        let mut cur = self.nodes[head].next;
        while let Some(k) = cur {
            if k == tail {
                break;
            }
            match self.order(key, k) {
                Ordering::Less => return None,
                Ordering::Equal => return Some(k),
                Ordering::Greater => cur = self.nodes[k].next,
            }
        }
        None
    }
}

impl<T, E> Default for OrderedChain<T, E, NaturalOrder>
where
    T: Ord + ?Sized,
{
    fn default() -> Self {
        Self::new(NaturalOrder)
    }
}

impl<T: ?Sized, E: fmt::Debug, C> fmt::Debug for OrderedChain<T, E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Ascending iterator over chain entries.
pub struct Iter<'a, E> {
    nodes: &'a SlotMap<DefaultKey, Node<E>>,
    front: Option<DefaultKey>,
    back: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> DoubleEndedIterator for Iter<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.entry)
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
impl<E> FusedIterator for Iter<'_, E> {}

impl<'a, T: ?Sized, E, C> IntoIterator for &'a OrderedChain<T, E, C> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning ascending iterator; drains the chain from the front.
pub struct IntoIter<T: ?Sized, E, C> {
    chain: OrderedChain<T, E, C>,
}

impl<T: ?Sized, E, C> Iterator for IntoIter<T, E, C> {
    type Item = E;

    #[inline]
    fn next(&mut self) -> Option<E> {
        self.chain.dequeue_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len(), Some(self.chain.len()))
    }
}

impl<T: ?Sized, E, C> DoubleEndedIterator for IntoIter<T, E, C> {
    fn next_back(&mut self) -> Option<E> {
        self.chain.dequeue_back()
    }
}

impl<T: ?Sized, E, C> ExactSizeIterator for IntoIter<T, E, C> {}

impl<T: ?Sized, E, C> IntoIterator for OrderedChain<T, E, C> {
    type Item = E;
    type IntoIter = IntoIter<T, E, C>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}
