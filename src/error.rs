//! Error types shared by chains and tables.

use thiserror::Error;

/// Returned when an insert finds an entry that compares equal.
///
/// The container is left untouched and the rejected entry is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("an equal entry is already present")]
    DuplicateKey,
}

/// Returned when the prime ladder has no capacity large enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("no ladder capacity exceeds {requested}")]
    LadderExhausted { requested: usize },
}
