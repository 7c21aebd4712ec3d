//! heapkit: an indexed min-priority-queue and the containers it is built on.
//!
//! [`IndexedMinHeap`](ds::IndexedMinHeap) stores distinct values with
//! priorities, pops the minimum, and changes the priority of any stored
//! value in O(log n) by keeping a value-to-position index alongside the heap
//! buffer. The buffer is a [`DynamicArray`](ds::DynamicArray) and the index
//! a [`ChainedHashMap`](ds::ChainedHashMap); both are public so their
//! contracts can be used and tested directly.
//!
//! ```
//! use heapkit::prelude::*;
//!
//! let mut heap: IndexedMinHeap<&str, u32> = IndexedMinHeap::new();
//! heap.add("b", 2).unwrap();
//! heap.add("a", 3).unwrap();
//! heap.change_priority(&"a", 1).unwrap();
//! assert_eq!(heap.poll(), Ok("a"));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod prelude;
