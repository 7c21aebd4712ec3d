pub mod chained_map;
pub mod dynamic_array;
pub mod indexed_heap;

pub use chained_map::{ChainedHashMap, DEFAULT_MAP_CAPACITY};
pub use dynamic_array::{DEFAULT_ARRAY_CAPACITY, DynamicArray};
pub use indexed_heap::{DEFAULT_HEAP_BUFFER_CAPACITY, IndexedMinHeap};
