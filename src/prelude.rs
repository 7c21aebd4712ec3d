pub use crate::builder::HeapBuilder;
pub use crate::ds::{ChainedHashMap, DynamicArray, IndexedMinHeap};
pub use crate::error::{ConfigError, ContainerError, InvariantError};
