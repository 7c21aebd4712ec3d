//! Indexed binary min-heap with O(log n) priority changes.
//!
//! Stores distinct values with comparable priorities in a complete binary
//! tree laid out in a [`DynamicArray`], and keeps a [`ChainedHashMap`] from
//! each value to its current array index. The index makes `contains` an
//! average O(1) lookup and lets `change_priority` find any stored value
//! without scanning, then repair the heap from that slot.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     IndexedMinHeap<V, P> Layout                     │
//! │                                                                     │
//! │   entries: DynamicArray<Entry>      (complete binary tree)          │
//! │                                                                     │
//! │     index:    0        1        2        3        4                 │
//! │            ┌────────┬────────┬────────┬────────┬────────┐           │
//! │            │ ("d",1)│ ("b",3)│ ("a",2)│ ("e",5)│ ("c",4)│           │
//! │            └────────┴────────┴────────┴────────┴────────┘           │
//! │     children of i: 2i+1, 2i+2        parent of i: (i-1)/2           │
//! │                                                                     │
//! │   positions: ChainedHashMap<V, usize>  (value → index above)        │
//! │                                                                     │
//! │     "a" → 2   "b" → 1   "c" → 4   "d" → 0   "e" → 3                 │
//! │                                                                     │
//! │   Every reordering goes through swap(h, k), which exchanges the     │
//! │   two slots and rewrites both values' positions together.           │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//! Poll Flow
//! ─────────
//!   poll():
//!     1. take the root, drop its position
//!     2. move the last entry to index 0, record position 0
//!     3. bubble down from 0 (swap with the smaller child while strictly
//!        greater; equal children resolve to the right child)
//!
//! Change Priority Flow
//! ────────────────────
//!   change_priority(v, p):
//!     1. i = positions[v]
//!     2. entries[i].priority = p
//!     3. bubble up from i, then bubble down from i
//!        (at most one of the two moves anything)
//! ```
//!
//! ## Invariants
//!
//! After every public call returns:
//!
//! - entries fill the prefix `[0, len)` of the array
//! - `priority(parent(i)) <= priority(i)` for every non-root `i`
//! - no two entries hold equal values
//! - `positions.len() == len()`
//! - `positions[v]` is the index of `v` for every stored `v`
//!
//! ## Operations
//!
//! | Operation         | Description                          | Complexity        |
//! |-------------------|--------------------------------------|-------------------|
//! | `add`             | Insert a new value, bubble up        | O(log n)          |
//! | `peek`            | Borrow the minimum-priority value    | O(1)              |
//! | `poll`            | Remove the minimum, bubble down      | O(log n)          |
//! | `contains`        | Membership through the index map     | O(1) avg          |
//! | `change_priority` | Re-prioritize any stored value       | O(log n) avg      |
//!
//! ## Example Usage
//!
//! ```
//! use heapkit::ds::IndexedMinHeap;
//!
//! let mut heap: IndexedMinHeap<&str, u32> = IndexedMinHeap::new();
//! heap.add("write report", 5).unwrap();
//! heap.add("fix build", 1).unwrap();
//! heap.add("review", 3).unwrap();
//!
//! // "write report" becomes urgent
//! heap.change_priority(&"write report", 0).unwrap();
//!
//! assert_eq!(heap.poll(), Ok("write report"));
//! assert_eq!(heap.poll(), Ok("fix build"));
//! assert_eq!(heap.poll(), Ok("review"));
//! assert!(heap.poll().is_err());
//! ```
//!
//! ## Thread Safety
//!
//! `IndexedMinHeap` is not thread-safe. Callers sharing one across threads
//! must wrap the whole heap in a mutex.
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use rustc_hash::FxBuildHasher;

use crate::ds::chained_map::{ChainedHashMap, DEFAULT_MAP_CAPACITY};
use crate::ds::dynamic_array::DynamicArray;
use crate::error::{ConfigError, ContainerError, InvariantError};

/// Buffer capacity used by [`IndexedMinHeap::new`].
pub const DEFAULT_HEAP_BUFFER_CAPACITY: usize = 10;

#[derive(Debug, Clone)]
struct Entry<V, P> {
    value: V,
    priority: P,
}

#[inline]
fn parent_of(index: usize) -> usize {
    (index - 1) / 2
}

#[inline]
fn left_child_of(index: usize) -> usize {
    2 * index + 1
}

/// Min-heap of distinct values with an index for arbitrary-value updates.
///
/// # Type Parameters
///
/// - `V`: Value type (must be `Eq + Hash + Clone`; the index map holds a copy)
/// - `P`: Priority type (must be `Ord`)
/// - `S`: Hash builder for the index map (defaults to [`FxBuildHasher`])
///
/// # Example
///
/// ```
/// use heapkit::ds::IndexedMinHeap;
/// use heapkit::error::ContainerError;
///
/// let mut heap = IndexedMinHeap::new();
/// heap.add(5, 5).unwrap();
/// heap.add(3, 3).unwrap();
/// heap.add(8, 8).unwrap();
/// heap.add(1, 1).unwrap();
///
/// assert_eq!(heap.poll(), Ok(1));
/// assert_eq!(heap.poll(), Ok(3));
/// assert_eq!(heap.poll(), Ok(5));
/// assert_eq!(heap.poll(), Ok(8));
/// assert_eq!(heap.len(), 0);
/// assert_eq!(heap.peek(), Err(ContainerError::Empty));
/// ```
#[derive(Clone)]
pub struct IndexedMinHeap<V, P, S = FxBuildHasher> {
    entries: DynamicArray<Entry<V, P>>,
    positions: ChainedHashMap<V, usize, S>,
}

impl<V, P> IndexedMinHeap<V, P, FxBuildHasher>
where
    V: Eq + Hash + Clone,
    P: Ord,
{
    /// Creates an empty heap with the default buffer and index capacities.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HEAP_BUFFER_CAPACITY, DEFAULT_MAP_CAPACITY)
    }

    /// Creates an empty heap with pre-allocated buffer slots and index
    /// buckets.
    ///
    /// # Panics
    ///
    /// Panics if `index_capacity` is zero. See
    /// [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(buffer_capacity: usize, index_capacity: usize) -> Self {
        match Self::try_with_capacity(buffer_capacity, index_capacity) {
            Ok(heap) => heap,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `index_capacity` is zero.
    pub fn try_with_capacity(
        buffer_capacity: usize,
        index_capacity: usize,
    ) -> Result<Self, ConfigError> {
        Self::try_with_capacity_and_hasher(buffer_capacity, index_capacity, FxBuildHasher)
    }
}

impl<V, P, S> IndexedMinHeap<V, P, S>
where
    V: Eq + Hash + Clone,
    P: Ord,
    S: BuildHasher,
{
    /// Creates an empty heap whose index map uses `hash_builder`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `index_capacity` is zero.
    pub fn try_with_capacity_and_hasher(
        buffer_capacity: usize,
        index_capacity: usize,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        let positions =
            ChainedHashMap::try_with_capacity_and_hasher(index_capacity, hash_builder)?;
        Ok(Self {
            entries: DynamicArray::with_capacity(buffer_capacity),
            positions,
        })
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the heap holds no values.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `value` is stored in the heap.
    pub fn contains(&self, value: &V) -> bool {
        self.positions.contains_key(value)
    }

    /// Returns the current priority of `value`, if stored.
    ///
    /// # Example
    ///
    /// ```
    /// use heapkit::ds::IndexedMinHeap;
    ///
    /// let mut heap = IndexedMinHeap::new();
    /// heap.add('x', 4).unwrap();
    /// assert_eq!(heap.priority_of(&'x'), Some(&4));
    /// assert_eq!(heap.priority_of(&'y'), None);
    /// ```
    pub fn priority_of(&self, value: &V) -> Option<&P> {
        let index = *self.positions.get(value)?;
        self.entries.get(index).ok().map(|entry| &entry.priority)
    }

    /// Adds `value` with `priority`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::DuplicateValue`] if an equal value is already
    /// stored; the heap is left unchanged.
    pub fn add(&mut self, value: V, priority: P) -> Result<(), ContainerError> {
        if self.positions.contains_key(&value) {
            return Err(ContainerError::DuplicateValue);
        }
        let index = self.entries.len();
        self.positions.put(value.clone(), index);
        self.entries.append(Entry { value, priority });
        self.bubble_up(index)?;
        Ok(())
    }

    /// Borrows the value with the smallest priority.
    ///
    /// # Errors
    ///
    /// [`ContainerError::Empty`] if the heap is empty.
    pub fn peek(&self) -> Result<&V, ContainerError> {
        self.peek_with_priority().map(|(value, _)| value)
    }

    /// Borrows the value with the smallest priority together with that
    /// priority.
    ///
    /// # Errors
    ///
    /// [`ContainerError::Empty`] if the heap is empty.
    pub fn peek_with_priority(&self) -> Result<(&V, &P), ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::Empty);
        }
        let root = self.entries.get(0)?;
        Ok((&root.value, &root.priority))
    }

    /// Removes and returns the value with the smallest priority.
    ///
    /// # Errors
    ///
    /// [`ContainerError::Empty`] if the heap is empty.
    pub fn poll(&mut self) -> Result<V, ContainerError> {
        self.poll_with_priority().map(|(value, _)| value)
    }

    /// Removes and returns the minimum value together with its priority.
    ///
    /// # Errors
    ///
    /// [`ContainerError::Empty`] if the heap is empty.
    pub fn poll_with_priority(&mut self) -> Result<(V, P), ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::Empty);
        }
        if self.entries.len() == 1 {
            let root = self.entries.pop()?;
            self.positions.remove(&root.value);
            return Ok((root.value, root.priority));
        }

        let last = self.entries.pop()?;
        let root = self
            .entries
            .put(0, last)?
            .ok_or(ContainerError::VacantSlot { index: 0 })?;
        self.positions.remove(&root.value);
        self.set_position(0)?;
        self.bubble_down(0)?;
        Ok((root.value, root.priority))
    }

    /// Replaces the priority of `value` and returns the previous one.
    ///
    /// # Errors
    ///
    /// [`ContainerError::MissingValue`] if `value` is not stored; the heap
    /// is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use heapkit::ds::IndexedMinHeap;
    ///
    /// let mut heap = IndexedMinHeap::new();
    /// heap.add("a", 1).unwrap();
    /// heap.add("b", 2).unwrap();
    ///
    /// assert_eq!(heap.change_priority(&"a", 9), Ok(1));
    /// assert_eq!(heap.peek(), Ok(&"b"));
    /// ```
    pub fn change_priority(&mut self, value: &V, priority: P) -> Result<P, ContainerError> {
        let index = *self
            .positions
            .get(value)
            .ok_or(ContainerError::MissingValue)?;
        let previous = mem::replace(&mut self.entries.get_mut(index)?.priority, priority);
        self.bubble_up(index)?;
        self.bubble_down(index)?;
        Ok(previous)
    }

    /// Iterates `(value, priority)` pairs in buffer order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&V, &P)> {
        self.entries
            .iter()
            .map(|entry| (&entry.value, &entry.priority))
    }

    /// Validates internal invariants.
    ///
    /// Checks the array and index map on their own, then the heap order,
    /// the size agreement between buffer and index, and that every stored
    /// value's recorded position matches its slot.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        V: fmt::Debug,
    {
        self.entries.check_invariants()?;
        self.positions.check_invariants()?;

        if self.positions.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index holds {} values but heap holds {}",
                self.positions.len(),
                self.entries.len()
            )));
        }
        for index in 0..self.entries.len() {
            let entry = self
                .entries
                .get(index)
                .map_err(|e| InvariantError::new(format!("slot {}: {}", index, e)))?;
            match self.positions.get(&entry.value) {
                Some(&recorded) if recorded == index => {},
                Some(&recorded) => {
                    return Err(InvariantError::new(format!(
                        "value {:?} sits at {} but index records {}",
                        entry.value, index, recorded
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "value {:?} at {} is missing from the index",
                        entry.value, index
                    )));
                },
            }
            if index > 0 {
                let parent = self
                    .entries
                    .get(parent_of(index))
                    .map_err(|e| InvariantError::new(e.to_string()))?;
                if parent.priority > entry.priority {
                    return Err(InvariantError::new(format!(
                        "heap order broken between parent {} and child {}",
                        parent_of(index),
                        index
                    )));
                }
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates internal invariants (debug/test builds only).
    pub fn debug_validate_invariants(&self)
    where
        V: fmt::Debug,
    {
        if let Err(err) = self.check_invariants() {
            panic!("{}", err);
        }
    }

    fn priority(&self, index: usize) -> Result<&P, ContainerError> {
        Ok(&self.entries.get(index)?.priority)
    }

    /// Records `index` as the position of the value stored there.
    fn set_position(&mut self, index: usize) -> Result<(), ContainerError> {
        let value = &self.entries.get(index)?.value;
        let position = self
            .positions
            .get_mut(value)
            .ok_or(ContainerError::MissingValue)?;
        *position = index;
        Ok(())
    }

    fn swap(&mut self, h: usize, k: usize) -> Result<(), ContainerError> {
        self.entries.swap(h, k)?;
        self.set_position(h)?;
        self.set_position(k)
    }

    fn bubble_up(&mut self, mut index: usize) -> Result<usize, ContainerError> {
        while index > 0 {
            let parent = parent_of(index);
            if self.priority(index)? >= self.priority(parent)? {
                break;
            }
            self.swap(index, parent)?;
            index = parent;
        }
        Ok(index)
    }

    fn bubble_down(&mut self, mut index: usize) -> Result<usize, ContainerError> {
        while left_child_of(index) < self.entries.len() {
            let child = self.smaller_child(index)?;
            if self.priority(index)? <= self.priority(child)? {
                break;
            }
            self.swap(index, child)?;
            index = child;
        }
        Ok(index)
    }

    /// Index of the child to sink toward. Ties go to the right child.
    fn smaller_child(&self, index: usize) -> Result<usize, ContainerError> {
        let left = left_child_of(index);
        let right = left + 1;
        if right >= self.entries.len() {
            return Ok(left);
        }
        if self.priority(left)? < self.priority(right)? {
            Ok(left)
        } else {
            Ok(right)
        }
    }
}

impl<V, P> Default for IndexedMinHeap<V, P, FxBuildHasher>
where
    V: Eq + Hash + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P, S> fmt::Debug for IndexedMinHeap<V, P, S>
where
    V: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|entry| (&entry.value, &entry.priority)),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<V, P>(heap: &mut IndexedMinHeap<V, P>) -> Vec<V>
    where
        V: Eq + Hash + Clone + fmt::Debug,
        P: Ord,
    {
        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.poll().unwrap());
            heap.debug_validate_invariants();
        }
        out
    }

    #[test]
    fn polls_in_priority_order() {
        let mut heap = IndexedMinHeap::new();
        heap.add(5, 5).unwrap();
        heap.add(3, 3).unwrap();
        heap.add(8, 8).unwrap();
        heap.add(1, 1).unwrap();
        heap.debug_validate_invariants();

        assert_eq!(drain(&mut heap), vec![1, 3, 5, 8]);
        assert_eq!(heap.len(), 0);
        assert_eq!(heap.peek(), Err(ContainerError::Empty));
    }

    #[test]
    fn empty_heap_rejects_peek_and_poll() {
        let mut heap: IndexedMinHeap<u32, u32> = IndexedMinHeap::new();
        assert_eq!(heap.peek(), Err(ContainerError::Empty));
        assert_eq!(heap.poll(), Err(ContainerError::Empty));
        assert_eq!(heap.peek_with_priority(), Err(ContainerError::Empty));
        heap.debug_validate_invariants();
    }

    #[test]
    fn duplicate_add_is_rejected_without_mutation() {
        let mut heap = IndexedMinHeap::new();
        heap.add("a", 2).unwrap();
        heap.add("b", 1).unwrap();
        assert_eq!(heap.add("a", 0), Err(ContainerError::DuplicateValue));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.priority_of(&"a"), Some(&2));
        assert_eq!(heap.peek(), Ok(&"b"));
        heap.debug_validate_invariants();
    }

    #[test]
    fn contains_tracks_add_and_poll() {
        let mut heap = IndexedMinHeap::new();
        assert!(!heap.contains(&"x"));
        heap.add("x", 1).unwrap();
        assert!(heap.contains(&"x"));
        heap.add("y", 2).unwrap();
        assert_eq!(heap.poll(), Ok("x"));
        assert!(!heap.contains(&"x"));
        assert!(heap.contains(&"y"));
    }

    #[test]
    fn peek_does_not_mutate() {
        let mut heap = IndexedMinHeap::new();
        heap.add('a', 3).unwrap();
        heap.add('b', 1).unwrap();
        assert_eq!(heap.peek(), Ok(&'b'));
        assert_eq!(heap.peek_with_priority(), Ok((&'b', &1)));
        assert_eq!(heap.len(), 2);
    }

    #[test]
    fn change_priority_moves_up_and_down() {
        let mut heap = IndexedMinHeap::new();
        for (value, priority) in [("a", 10), ("b", 20), ("c", 30), ("d", 40), ("e", 50)] {
            heap.add(value, priority).unwrap();
        }

        assert_eq!(heap.change_priority(&"e", 5), Ok(50));
        heap.debug_validate_invariants();
        assert_eq!(heap.peek(), Ok(&"e"));

        assert_eq!(heap.change_priority(&"e", 45), Ok(5));
        heap.debug_validate_invariants();
        assert_eq!(heap.peek(), Ok(&"a"));

        assert_eq!(heap.change_priority(&"a", 60), Ok(10));
        heap.debug_validate_invariants();

        assert_eq!(drain(&mut heap), vec!["b", "c", "d", "e", "a"]);
    }

    #[test]
    fn change_priority_on_interior_node_sinks_within_its_subtree() {
        let mut heap = IndexedMinHeap::new();
        for (value, priority) in [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 6)] {
            heap.add(value, priority).unwrap();
        }
        // Value 2 sits at index 2; its children are 5 and 6.
        heap.change_priority(&2, 100).unwrap();
        heap.debug_validate_invariants();
        assert_eq!(drain(&mut heap), vec![0, 1, 3, 4, 5, 6, 2]);
    }

    #[test]
    fn change_priority_of_missing_value_fails_without_mutation() {
        let mut heap = IndexedMinHeap::new();
        heap.add("a", 1).unwrap();
        assert_eq!(
            heap.change_priority(&"zz", 0),
            Err(ContainerError::MissingValue)
        );
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.priority_of(&"a"), Some(&1));
        heap.debug_validate_invariants();
    }

    #[test]
    fn equal_priorities_keep_heap_order() {
        let mut heap = IndexedMinHeap::new();
        heap.add("a", 2).unwrap();
        heap.add("b", 2).unwrap();
        heap.add("c", 2).unwrap();
        heap.debug_validate_invariants();

        let mut polled = Vec::new();
        while !heap.is_empty() {
            let (value, priority) = heap.poll_with_priority().unwrap();
            assert_eq!(priority, 2);
            polled.push(value);
            heap.debug_validate_invariants();
        }
        polled.sort_unstable();
        assert_eq!(polled, vec!["a", "b", "c"]);
    }

    #[test]
    fn bubble_down_prefers_right_child_on_tie() {
        let mut heap = IndexedMinHeap::new();
        heap.add("root", 0).unwrap();
        heap.add("left", 1).unwrap();
        heap.add("right", 1).unwrap();
        heap.add("leaf", 9).unwrap();

        assert_eq!(heap.poll(), Ok("root"));
        assert_eq!(heap.peek(), Ok(&"right"));
        heap.debug_validate_invariants();
    }

    #[test]
    fn equal_priority_does_not_pass_parent_on_add() {
        let mut heap = IndexedMinHeap::new();
        heap.add("first", 1).unwrap();
        heap.add("second", 1).unwrap();
        assert_eq!(heap.peek(), Ok(&"first"));
    }

    #[test]
    fn singleton_poll_resets_to_empty() {
        let mut heap = IndexedMinHeap::new();
        heap.add(7u8, 7u8).unwrap();
        assert_eq!(heap.poll(), Ok(7));
        assert!(heap.is_empty());
        assert!(!heap.contains(&7));
        heap.debug_validate_invariants();

        heap.add(7, 1).unwrap();
        assert_eq!(heap.peek(), Ok(&7));
    }

    #[test]
    fn many_values_force_buffer_and_index_growth() {
        let mut heap = IndexedMinHeap::with_capacity(1, 1);
        for i in (0..500u32).rev() {
            heap.add(i, i).unwrap();
        }
        heap.debug_validate_invariants();
        assert_eq!(heap.len(), 500);
        assert_eq!(drain(&mut heap), (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn string_values_compare_by_content() {
        let mut heap: IndexedMinHeap<String, u32> = IndexedMinHeap::new();
        heap.add(String::from("job"), 3).unwrap();
        let equal_key = String::from("job");
        assert!(heap.contains(&equal_key));
        assert_eq!(
            heap.add(equal_key.clone(), 1),
            Err(ContainerError::DuplicateValue)
        );
        assert_eq!(heap.change_priority(&equal_key, 1), Ok(3));
    }

    #[test]
    fn clone_is_independent_of_original() {
        let mut heap = IndexedMinHeap::new();
        for (value, priority) in [("a", 3), ("b", 1), ("c", 2)] {
            heap.add(value, priority).unwrap();
        }

        let mut copy = heap.clone();
        assert_eq!(copy.poll(), Ok("b"));
        assert_eq!(copy.change_priority(&"a", 0), Ok(3));
        assert_eq!(copy.peek(), Ok(&"a"));

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Ok(&"b"));
        assert_eq!(heap.priority_of(&"a"), Some(&3));
        heap.debug_validate_invariants();
        copy.debug_validate_invariants();
    }

    #[test]
    fn zero_index_capacity_is_rejected() {
        let err = IndexedMinHeap::<u8, u8>::try_with_capacity(4, 0).unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn iter_and_debug_show_buffer_order() {
        let mut heap = IndexedMinHeap::new();
        heap.add("b", 2).unwrap();
        heap.add("a", 1).unwrap();
        let pairs: Vec<_> = heap.iter().collect();
        assert_eq!(pairs, vec![(&"a", &1), (&"b", &2)]);
        assert_eq!(format!("{:?}", heap), "[(\"a\", 1), (\"b\", 2)]");
    }
}
