//! Error types for the heapkit library.
//!
//! ## Key Components
//!
//! - [`ContainerError`]: Returned by container operations whose caller broke
//!   the operation's contract (duplicate value, missing value, empty
//!   container, index outside `[0, len)`).
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. a hash map with zero buckets).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use heapkit::ds::IndexedMinHeap;
//! use heapkit::error::ContainerError;
//!
//! let mut heap: IndexedMinHeap<&str, u32> = IndexedMinHeap::new();
//! heap.add("a", 1).unwrap();
//!
//! // Adding the same value twice is rejected without touching the heap
//! assert_eq!(heap.add("a", 7), Err(ContainerError::DuplicateValue));
//! assert_eq!(heap.len(), 1);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ContainerError
// ---------------------------------------------------------------------------

/// Error returned when a container operation is called outside its contract.
///
/// A call that fails with a `ContainerError` leaves the container exactly as
/// it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContainerError {
    /// `add` was called with a value the heap already holds.
    DuplicateValue,
    /// `change_priority` was called with a value the heap does not hold.
    MissingValue,
    /// `peek`, `poll` or `pop` was called on an empty container.
    Empty,
    /// An array index fell outside `[0, len)`.
    OutOfRange { index: usize, len: usize },
    /// An array index inside `[0, len)` names a slot that was exposed by
    /// `resize` and has not been written since.
    VacantSlot { index: usize },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::DuplicateValue => f.write_str("value is already present"),
            ContainerError::MissingValue => f.write_str("value is not present"),
            ContainerError::Empty => f.write_str("container is empty"),
            ContainerError::OutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            },
            ContainerError::VacantSlot { index } => {
                write!(f, "slot {} has not been set since resize", index)
            },
        }
    }
}

impl std::error::Error for ContainerError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal container invariants are violated.
///
/// Produced by `check_invariants` methods on container types
/// (e.g. [`IndexedMinHeap::check_invariants`](crate::ds::IndexedMinHeap::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ChainedHashMap::try_with_capacity`](crate::ds::ChainedHashMap::try_with_capacity)
/// and [`HeapBuilder::try_build`](crate::builder::HeapBuilder::try_build).
///
/// # Example
///
/// ```
/// use heapkit::ds::ChainedHashMap;
///
/// let err = ChainedHashMap::<u64, u64>::try_with_capacity(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
