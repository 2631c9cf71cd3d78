//! Debug-only reentrancy check for tables.
//!
//! Tables call user code (comparators and hashers) in the middle of
//! operations. If that code reaches back into the same table, the check
//! panics and names both the running and the re-entering operation.
//! Release builds compile the check down to nothing.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table tracker. Guard an entry point with
/// `let _g = self.reentrancy.enter("insert");`.
#[derive(Debug)]
pub(crate) struct ReentrancyCheck {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // Tables are single-threaded; keep the tracker !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl ReentrancyCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _nosend: PhantomData,
        }
    }

    /// Mark `op` as running until the returned guard drops.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> OpGuard<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(running) = self.active.get() {
                panic!(
                    "reentrancy detected: `{}` called while `{}` is running on the same table",
                    op, running
                );
            }
            self.active.set(Some(op));
            return OpGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            return OpGuard { _z: PhantomData };
        }
    }
}

impl Default for ReentrancyCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`ReentrancyCheck::enter`].
pub(crate) struct OpGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ReentrancyCheck,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active.get().is_some());
            self.owner.active.set(None);
        }
    }
}
