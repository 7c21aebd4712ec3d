//! Builder for [`IndexedMinHeap`] construction parameters.
//!
//! Collects the buffer and index capacities in one place and validates them
//! before any allocation happens.
//!
//! ## Example
//!
//! ```rust
//! use heapkit::builder::HeapBuilder;
//!
//! let mut heap = HeapBuilder::new()
//!     .buffer_capacity(64)
//!     .index_capacity(97)
//!     .build::<u64, u32>();
//! heap.add(1, 10).unwrap();
//! assert_eq!(heap.peek(), Ok(&1));
//! ```

use std::hash::{BuildHasher, Hash};

use rustc_hash::FxBuildHasher;

use crate::ds::chained_map::DEFAULT_MAP_CAPACITY;
use crate::ds::indexed_heap::{DEFAULT_HEAP_BUFFER_CAPACITY, IndexedMinHeap};
use crate::error::ConfigError;

/// Construction parameters for an [`IndexedMinHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapBuilder {
    buffer_capacity: usize,
    index_capacity: usize,
}

impl HeapBuilder {
    /// Starts from the default capacities (10 buffer slots, 17 index buckets).
    pub fn new() -> Self {
        Self {
            buffer_capacity: DEFAULT_HEAP_BUFFER_CAPACITY,
            index_capacity: DEFAULT_MAP_CAPACITY,
        }
    }

    /// Sets the number of pre-allocated heap buffer slots. Zero is allowed;
    /// the buffer allocates on first insert.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Sets the initial bucket count of the value index. Must be non-zero.
    pub fn index_capacity(mut self, capacity: usize) -> Self {
        self.index_capacity = capacity;
        self
    }

    /// Builds the heap with the default hasher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the index capacity is zero.
    pub fn try_build<V, P>(self) -> Result<IndexedMinHeap<V, P>, ConfigError>
    where
        V: Eq + Hash + Clone,
        P: Ord,
    {
        self.try_build_with_hasher(FxBuildHasher)
    }

    /// Builds the heap with the default hasher.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build<V, P>(self) -> IndexedMinHeap<V, P>
    where
        V: Eq + Hash + Clone,
        P: Ord,
    {
        match self.try_build() {
            Ok(heap) => heap,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the heap with a custom hasher for the value index.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the index capacity is zero.
    pub fn try_build_with_hasher<V, P, S>(
        self,
        hash_builder: S,
    ) -> Result<IndexedMinHeap<V, P, S>, ConfigError>
    where
        V: Eq + Hash + Clone,
        P: Ord,
        S: BuildHasher,
    {
        IndexedMinHeap::try_with_capacity_and_hasher(
            self.buffer_capacity,
            self.index_capacity,
            hash_builder,
        )
    }

    /// Builds the heap with a custom hasher for the value index.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn build_with_hasher<V, P, S>(self, hash_builder: S) -> IndexedMinHeap<V, P, S>
    where
        V: Eq + Hash + Clone,
        P: Ord,
        S: BuildHasher,
    {
        match self.try_build_with_hasher(hash_builder) {
            Ok(heap) => heap,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Default for HeapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
