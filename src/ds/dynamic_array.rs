//! Growable array with doubling storage and checked slot access.
//!
//! A fixed-size slot buffer plus a logical length. Indices `[0, len)` are
//! addressable; the tail `[len, capacity)` is allocated but vacant. When an
//! append or resize needs more room than the buffer has, a new buffer of
//! twice the capacity (repeated until large enough) is allocated and the
//! live slots are moved across.
//!
//! ## Architecture
//!
//! ```text
//!   DynamicArray<T>   len = 5, capacity = 8
//!
//!    index:   0     1     2     3     4     5     6     7
//!          ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬─────┐
//!   slots: │Some │Some │Some │Some │Some │None │None │None │
//!          └─────┴─────┴─────┴─────┴─────┴─────┴─────┴─────┘
//!          ◄──────── addressable ────────►◄──── vacant ────►
//!
//!   append(x) with len == capacity:
//!     1. allocate 2 * capacity vacant slots
//!     2. move slots [0, len) across, keeping their order
//!     3. write x at index len, len += 1
//! ```
//!
//! ## Operations
//!
//! | Operation | Description                           | Complexity     |
//! |-----------|---------------------------------------|----------------|
//! | `get`     | Borrow slot `i`, `i < len`            | O(1)           |
//! | `put`     | Overwrite slot `i`, `i < len`         | O(1)           |
//! | `append`  | Push at `len`, doubling when full     | Amortized O(1) |
//! | `pop`     | Take slot `len - 1`                   | O(1)           |
//! | `resize`  | Set `len` directly, growing if needed | O(n) worst     |
//!
//! Capacity never shrinks. A zero-capacity array allocates a single slot on
//! its first growth and doubles from there.
//!
//! ## Example Usage
//!
//! ```
//! use heapkit::ds::DynamicArray;
//!
//! let mut array = DynamicArray::with_capacity(2);
//! array.append("a");
//! array.append("b");
//! array.append("c"); // grows 2 -> 4
//!
//! assert_eq!(array.capacity(), 4);
//! assert_eq!(array.get(2), Ok(&"c"));
//! assert_eq!(array.pop(), Ok("c"));
//! assert_eq!(array.capacity(), 4);
//! ```
//!
//! ## Thread Safety
//!
//! `DynamicArray` is not thread-safe. Wrap the owning structure in a mutex
//! for concurrent access.
use std::fmt;

use crate::error::{ContainerError, InvariantError};

/// Capacity used by [`DynamicArray::new`].
pub const DEFAULT_ARRAY_CAPACITY: usize = 8;

fn vacant_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Index-addressable sequence with amortized O(1) append and pop.
///
/// Slots inside `[0, len)` normally hold a value. The exception is a slot
/// exposed by growing [`resize`](Self::resize): it stays vacant until
/// [`put`](Self::put) writes it, and reading it yields
/// [`ContainerError::VacantSlot`].
#[derive(Clone)]
pub struct DynamicArray<T> {
    slots: Box<[Option<T>]>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with [`DEFAULT_ARRAY_CAPACITY`] slots.
    ///
    /// # Example
    ///
    /// ```
    /// use heapkit::ds::DynamicArray;
    ///
    /// let array: DynamicArray<u32> = DynamicArray::new();
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 8);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_ARRAY_CAPACITY)
    }

    /// Creates an empty array with `capacity` pre-allocated slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vacant_slots(capacity),
            len: 0,
        }
    }

    /// Returns the logical element count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Borrows the element at `index`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::OutOfRange`] if `index >= len`,
    /// [`ContainerError::VacantSlot`] if the slot was never written after a
    /// growing `resize`.
    ///
    /// # Example
    ///
    /// ```
    /// use heapkit::ds::DynamicArray;
    /// use heapkit::error::ContainerError;
    ///
    /// let mut array = DynamicArray::new();
    /// array.append(10);
    /// assert_eq!(array.get(0), Ok(&10));
    /// assert_eq!(array.get(1), Err(ContainerError::OutOfRange { index: 1, len: 1 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, ContainerError> {
        self.check_index(index)?;
        self.slots[index]
            .as_ref()
            .ok_or(ContainerError::VacantSlot { index })
    }

    /// Mutably borrows the element at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ContainerError> {
        self.check_index(index)?;
        self.slots[index]
            .as_mut()
            .ok_or(ContainerError::VacantSlot { index })
    }

    /// Writes `value` at `index` and returns what the slot held before.
    ///
    /// The previous content is `None` only for a slot exposed by a growing
    /// [`resize`](Self::resize).
    ///
    /// # Errors
    ///
    /// [`ContainerError::OutOfRange`] if `index >= len`.
    pub fn put(&mut self, index: usize, value: T) -> Result<Option<T>, ContainerError> {
        self.check_index(index)?;
        Ok(self.slots[index].replace(value))
    }

    /// Appends `value` at index `len`, doubling capacity first if full.
    ///
    /// # Example
    ///
    /// ```
    /// use heapkit::ds::DynamicArray;
    ///
    /// let mut array = DynamicArray::with_capacity(1);
    /// for i in 0..5 {
    ///     array.append(i);
    /// }
    /// assert_eq!(array.len(), 5);
    /// assert_eq!(array.capacity(), 8);
    /// ```
    pub fn append(&mut self, value: T) {
        self.grow_if_needed(self.len + 1);
        self.slots[self.len] = Some(value);
        self.len += 1;
    }

    /// Removes and returns the last element. Capacity is unchanged.
    ///
    /// # Errors
    ///
    /// [`ContainerError::Empty`] if `len == 0`,
    /// [`ContainerError::VacantSlot`] if the last slot was exposed by a
    /// growing `resize` and never written (the array is left untouched).
    pub fn pop(&mut self) -> Result<T, ContainerError> {
        if self.len == 0 {
            return Err(ContainerError::Empty);
        }
        let index = self.len - 1;
        let value = self.slots[index]
            .take()
            .ok_or(ContainerError::VacantSlot { index })?;
        self.len = index;
        Ok(value)
    }

    /// Sets the logical length to `new_len`.
    ///
    /// Growing past capacity doubles the buffer until it fits. Newly exposed
    /// slots are vacant and must be written with [`put`](Self::put) before
    /// they can be read. Shrinking drops the values past `new_len` but keeps
    /// their slots allocated.
    ///
    /// # Example
    ///
    /// ```
    /// use heapkit::ds::DynamicArray;
    ///
    /// let mut array = DynamicArray::with_capacity(2);
    /// array.append('a');
    /// array.resize(3);
    /// assert_eq!(array.len(), 3);
    /// assert_eq!(array.capacity(), 4);
    /// assert!(array.get(2).is_err());
    ///
    /// array.resize(0);
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 4);
    /// ```
    pub fn resize(&mut self, new_len: usize) {
        self.grow_if_needed(new_len);
        if new_len < self.len {
            for slot in &mut self.slots[new_len..self.len] {
                *slot = None;
            }
        }
        self.len = new_len;
    }

    /// Exchanges the elements at `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::OutOfRange`] if either index is `>= len`; nothing is
    /// moved in that case.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), ContainerError> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.slots.swap(a, b);
        Ok(())
    }

    /// Iterates the written slots of `[0, len)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }

    /// Validates internal invariants.
    ///
    /// Checks that `len <= capacity` and that every slot at or beyond `len`
    /// is vacant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.len > self.slots.len() {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.len,
                self.slots.len()
            )));
        }
        if let Some(offset) = self.slots[self.len..].iter().position(Option::is_some) {
            return Err(InvariantError::new(format!(
                "slot {} past len {} is still occupied",
                self.len + offset,
                self.len
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates internal invariants (debug/test builds only).
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("{}", err);
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ContainerError> {
        if index < self.len {
            Ok(())
        } else {
            Err(ContainerError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    fn grow_if_needed(&mut self, required: usize) {
        let old_capacity = self.slots.len();
        if required <= old_capacity {
            return;
        }
        let mut new_capacity = old_capacity.max(1);
        while new_capacity < required {
            new_capacity = new_capacity.saturating_mul(2);
        }

        let mut slots = vacant_slots(new_capacity);
        for (dst, src) in slots.iter_mut().zip(self.slots.iter_mut()) {
            *dst = src.take();
        }
        self.slots = slots;
        log::trace!(
            "dynamic array grew from {} to {} slots (len {})",
            old_capacity,
            new_capacity,
            self.len
        );
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.slots[..self.len]).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_get_in_order() {
        let mut array = DynamicArray::new();
        array.append("a");
        array.append("b");
        array.append("c");
        assert_eq!(array.len(), 3);
        assert_eq!(array.get(0), Ok(&"a"));
        assert_eq!(array.get(1), Ok(&"b"));
        assert_eq!(array.get(2), Ok(&"c"));
        array.debug_validate_invariants();
    }

    #[test]
    fn append_past_capacity_doubles() {
        let mut array = DynamicArray::with_capacity(2);
        array.append(1);
        array.append(2);
        assert_eq!(array.capacity(), 2);
        array.append(3);
        assert_eq!(array.capacity(), 4);
        array.append(4);
        array.append(5);
        assert_eq!(array.capacity(), 8);
        assert_eq!(array.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn zero_capacity_grows_from_one() {
        let mut array = DynamicArray::with_capacity(0);
        assert_eq!(array.capacity(), 0);
        array.append('x');
        assert_eq!(array.capacity(), 1);
        array.append('y');
        assert_eq!(array.capacity(), 2);
        array.append('z');
        assert_eq!(array.capacity(), 4);
    }

    #[test]
    fn get_and_put_out_of_range_fail() {
        let mut array = DynamicArray::new();
        array.append(10);
        assert_eq!(
            array.get(1),
            Err(ContainerError::OutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            array.put(5, 3),
            Err(ContainerError::OutOfRange { index: 5, len: 1 })
        );
        assert_eq!(array.get(0), Ok(&10));
    }

    #[test]
    fn put_returns_previous_value() {
        let mut array = DynamicArray::new();
        array.append(1);
        assert_eq!(array.put(0, 9), Ok(Some(1)));
        assert_eq!(array.get(0), Ok(&9));
    }

    #[test]
    fn pop_empty_fails_and_pop_keeps_capacity() {
        let mut array: DynamicArray<u8> = DynamicArray::with_capacity(1);
        assert_eq!(array.pop(), Err(ContainerError::Empty));

        for i in 0..10 {
            array.append(i);
        }
        let capacity = array.capacity();
        while !array.is_empty() {
            array.pop().unwrap();
        }
        assert_eq!(array.capacity(), capacity);
        assert_eq!(array.pop(), Err(ContainerError::Empty));
        array.debug_validate_invariants();
    }

    #[test]
    fn resize_grows_with_vacant_tail() {
        let mut array = DynamicArray::with_capacity(2);
        array.append(1);
        array.resize(5);
        assert_eq!(array.len(), 5);
        assert_eq!(array.capacity(), 8);
        assert_eq!(array.get(0), Ok(&1));
        assert_eq!(array.get(3), Err(ContainerError::VacantSlot { index: 3 }));
        assert_eq!(array.put(3, 4), Ok(None));
        assert_eq!(array.get(3), Ok(&4));
        assert_eq!(array.pop(), Err(ContainerError::VacantSlot { index: 4 }));
        assert_eq!(array.len(), 5);
    }

    #[test]
    fn resize_to_zero_keeps_capacity() {
        let mut array = DynamicArray::new();
        for i in 0..20 {
            array.append(i);
        }
        let capacity = array.capacity();
        array.resize(0);
        assert!(array.is_empty());
        assert_eq!(array.capacity(), capacity);
        array.debug_validate_invariants();

        array.append(42);
        assert_eq!(array.get(0), Ok(&42));
    }

    #[test]
    fn swap_checks_both_indices() {
        let mut array = DynamicArray::new();
        array.append("a");
        array.append("b");
        assert_eq!(array.swap(0, 1), Ok(()));
        assert_eq!(array.get(0), Ok(&"b"));
        assert!(array.swap(0, 2).is_err());
        assert_eq!(array.get(0), Ok(&"b"));
        assert_eq!(array.get(1), Ok(&"a"));
    }

    #[test]
    fn debug_lists_live_prefix() {
        let mut array = DynamicArray::with_capacity(4);
        array.append(1);
        array.append(2);
        assert_eq!(format!("{:?}", array), "[Some(1), Some(2)]");
    }
}
