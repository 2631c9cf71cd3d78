//! Prime ladder: the fixed ascending capacities a `HashTab` may take.
//!
//! Each rung is roughly 1.5x the previous one. The last slot holds
//! `usize::MAX` as a terminal sentinel; it is never a usable capacity.

use crate::error::CapacityError;

/// Number of usable primes on the ladder.
pub const RUNGS: usize = 45;

/// Ascending table capacities followed by the `usize::MAX` sentinel.
pub static LADDER: [usize; RUNGS + 1] = [
    11, 17, 29, 43, 67, 101, 151, 227, 347, 521, 787, 1181, 1777, 2671, 4007, 6011, 9029, 13553,
    20333, 30509, 45763, 68659, 103001, 154501, 231779, 347671, 521519, 782297, 1173463, 1760203,
    2640317, 3960497, 5940761, 8911141, 13366711, 20050081, 30075127, 45112693, 67669079,
    101503627, 152255461, 228383273, 342574909, 513862367, 770793589, usize::MAX,
];

/// Index of the smallest ladder prime strictly greater than `n`.
///
/// Returns `RUNGS` (the sentinel slot) when every prime is `<= n`.
#[inline]
pub fn rung_for(n: usize) -> usize {
    LADDER[..RUNGS].partition_point(|&p| p <= n)
}

/// Capacity for a rung, or an error if the rung is the sentinel.
pub(crate) fn capacity_at(rung: usize, requested: usize) -> Result<usize, CapacityError> {
    if rung >= RUNGS {
        log::warn!("prime ladder exhausted for requested size {}", requested);
        return Err(CapacityError::LadderExhausted { requested });
    }
    Ok(LADDER[rung])
}

/// Smallest ladder prime strictly greater than `n`.
pub fn capacity_for(n: usize) -> Result<usize, CapacityError> {
    capacity_at(rung_for(n), n)
}

/// The capacity a table of capacity `cap` grows to on rehash.
pub fn next_capacity(cap: usize) -> Result<usize, CapacityError> {
    capacity_for(cap)
}
