//! Hash map with separate chaining and load-factor-driven growth.
//!
//! Every bucket heads a singly linked chain of `(key, value)` nodes. A key
//! lives in the chain of bucket `hash(key) mod capacity`; lookups walk that
//! one chain comparing keys with `Eq`. When an insertion pushes the load
//! factor `len / capacity` above 0.8 the bucket array is reallocated at twice
//! the capacity and every entry is rehashed into it.
//!
//! ## Architecture
//!
//! ```text
//!   ChainedHashMap<K, V>   len = 5, capacity = 7
//!
//!   buckets
//!   ┌───┐
//!   │ 0 │──► (k3, v3) ──► (k9, v9) ──┤
//!   ├───┤
//!   │ 1 │──┤
//!   ├───┤
//!   │ 2 │──► (k4, v4) ──┤
//!   ├───┤
//!   │ 3 │──┤
//!   ├───┤
//!   │ 4 │──► (k1, v1) ──► (k8, v8) ──┤
//!   ├───┤
//!   │ 5 │──┤
//!   ├───┤
//!   │ 6 │──┤
//!   └───┘
//!
//!   put(k, v):
//!     1. walk chain of bucket hash(k) % capacity
//!     2. equal key found → overwrite value, return old value
//!     3. otherwise link a new node at the chain tail, len += 1
//!     4. if len / capacity > 0.8 → rehash into 2 * capacity buckets
//! ```
//!
//! ## Operations
//!
//! | Operation      | Description                         | Complexity            |
//! |----------------|-------------------------------------|-----------------------|
//! | `get`          | Find value for an equal key         | O(1) avg, O(n) worst  |
//! | `put`          | Insert or overwrite, maybe rehash   | O(1) amortized        |
//! | `contains_key` | Membership by key equality          | O(1) avg              |
//! | `remove`       | Unlink node for an equal key        | O(1) avg              |
//!
//! ## Hashing
//!
//! The hasher is a `BuildHasher` type parameter, defaulting to
//! [`FxBuildHasher`]. Keys must hash the same way for as long as they are
//! stored.
//!
//! ## Example Usage
//!
//! ```
//! use heapkit::ds::ChainedHashMap;
//!
//! let mut map = ChainedHashMap::with_capacity(4);
//! assert_eq!(map.put("a", 1), None);
//! assert_eq!(map.put("b", 2), None);
//! assert_eq!(map.put("a", 3), Some(1));
//!
//! assert_eq!(map.get(&"a"), Some(&3));
//! assert!(map.contains_key(&"b"));
//! assert_eq!(map.remove(&"b"), Some(2));
//! assert_eq!(map.get(&"b"), None);
//! ```
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use rustc_hash::FxBuildHasher;

use crate::error::{ConfigError, InvariantError};

/// Bucket count used by [`ChainedHashMap::new`].
pub const DEFAULT_MAP_CAPACITY: usize = 17;

/// Numerator of the 0.8 load factor threshold: growth triggers once
/// `len * MAX_LOAD_DENOMINATOR > capacity * MAX_LOAD_NUMERATOR`.
pub const MAX_LOAD_NUMERATOR: usize = 4;
/// Denominator of the 0.8 load factor threshold.
pub const MAX_LOAD_DENOMINATOR: usize = 5;

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    next: Link<K, V>,
}

fn empty_buckets<K, V>(capacity: usize) -> Box<[Link<K, V>]> {
    std::iter::repeat_with(|| None).take(capacity).collect()
}

/// Hash map from `K` to `V` using separate chaining.
///
/// Lookup, insertion, membership and removal all compare keys with `Eq`,
/// so two distinct but equal keys always address the same entry.
///
/// # Type Parameters
///
/// - `K`: Key type (must be `Eq + Hash`)
/// - `V`: Value type
/// - `S`: Hash builder (defaults to [`FxBuildHasher`])
///
/// # Example
///
/// ```
/// use heapkit::ds::ChainedHashMap;
///
/// let mut map: ChainedHashMap<String, u32> = ChainedHashMap::with_capacity(2);
/// map.put("x".to_string(), 1);
///
/// // A separately allocated but equal key finds the same entry
/// let key = String::from("x");
/// assert_eq!(map.get(&key), Some(&1));
/// ```
pub struct ChainedHashMap<K, V, S = FxBuildHasher> {
    buckets: Box<[Link<K, V>]>,
    len: usize,
    hash_builder: S,
}

impl<K, V> ChainedHashMap<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    /// Creates an empty map with [`DEFAULT_MAP_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAP_CAPACITY)
    }

    /// Creates an empty map with `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_with_capacity`](Self::try_with_capacity).
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(map) => map,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty map with `capacity` buckets, returning an error on
    /// invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Self::try_with_capacity_and_hasher(capacity, FxBuildHasher)
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates an empty map with `capacity` buckets and a custom hasher.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        match Self::try_with_capacity_and_hasher(capacity, hash_builder) {
            Ok(map) => map,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible form of [`with_capacity_and_hasher`](Self::with_capacity_and_hasher).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_with_capacity_and_hasher(
        capacity: usize,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("map capacity must be greater than zero"));
        }
        Ok(Self {
            buckets: empty_buckets(capacity),
            len: 0,
            hash_builder,
        })
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the map's hash builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the value mapped to a key equal to `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut link = &self.buckets[self.bucket_of(key)];
        while let Some(node) = link {
            if node.key == *key {
                return Some(&node.value);
            }
            link = &node.next;
        }
        None
    }

    /// Mutable form of [`get`](Self::get).
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket = self.bucket_of(key);
        let mut link = &mut self.buckets[bucket];
        while let Some(node) = link {
            if node.key == *key {
                return Some(&mut node.value);
            }
            link = &mut node.next;
        }
        None
    }

    /// Returns `true` if a key equal to `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or overwrites the mapping for `key`, returning the previous
    /// value.
    ///
    /// A new entry that pushes the load factor above 0.8 triggers a full
    /// rehash into a bucket array of twice the capacity. Overwrites never
    /// rehash.
    ///
    /// # Example
    ///
    /// ```
    /// use heapkit::ds::ChainedHashMap;
    ///
    /// let mut map = ChainedHashMap::with_capacity(5);
    /// for i in 0..4 {
    ///     map.put(i, i * 10);
    /// }
    /// assert_eq!(map.capacity(), 5); // 4 / 5 = 0.8, not above the threshold
    ///
    /// map.put(4, 40);
    /// assert_eq!(map.capacity(), 10);
    /// assert_eq!(map.get(&2), Some(&20));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_of(&key);
        let mut link = &mut self.buckets[bucket];
        while let Some(node) = link {
            if node.key == key {
                return Some(mem::replace(&mut node.value, value));
            }
            link = &mut node.next;
        }
        *link = Some(Box::new(Node {
            key,
            value,
            next: None,
        }));
        self.len += 1;
        self.grow_if_needed();
        None
    }

    /// Removes the entry for a key equal to `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = self.bucket_of(key);
        let mut link = &mut self.buckets[bucket];
        while link.as_ref().is_some_and(|node| node.key != *key) {
            link = &mut link.as_mut()?.next;
        }
        let mut node = link.take()?;
        *link = node.next.take();
        self.len -= 1;
        Some(node.value)
    }

    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            drop_chain(bucket.take());
        }
        self.len = 0;
    }

    /// Iterates entries in bucket order, then chain order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            link: None,
            remaining: self.len,
        }
    }

    /// Validates internal invariants.
    ///
    /// Checks that the chain lengths sum to `len`, that every key sits in
    /// the bucket its hash selects, that no key appears twice, and that the
    /// load factor is within the threshold.
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: fmt::Debug,
    {
        let mut counted = 0;
        for (bucket, head) in self.buckets.iter().enumerate() {
            let mut link = head;
            while let Some(node) = link {
                counted += 1;
                let expected = self.bucket_of(&node.key);
                if expected != bucket {
                    return Err(InvariantError::new(format!(
                        "key {:?} stored in bucket {} but hashes to bucket {}",
                        node.key, bucket, expected
                    )));
                }
                let mut rest = &node.next;
                while let Some(other) = rest {
                    if other.key == node.key {
                        return Err(InvariantError::new(format!(
                            "key {:?} appears twice in bucket {}",
                            node.key, bucket
                        )));
                    }
                    rest = &other.next;
                }
                link = &node.next;
            }
        }
        if counted != self.len {
            return Err(InvariantError::new(format!(
                "chains hold {} entries but len is {}",
                counted, self.len
            )));
        }
        if self.over_threshold() {
            return Err(InvariantError::new(format!(
                "load factor {}/{} exceeds {}/{}",
                self.len,
                self.buckets.len(),
                MAX_LOAD_NUMERATOR,
                MAX_LOAD_DENOMINATOR
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    /// Validates internal invariants (debug/test builds only).
    pub fn debug_validate_invariants(&self)
    where
        K: fmt::Debug,
    {
        if let Err(err) = self.check_invariants() {
            panic!("{}", err);
        }
    }

    #[cfg(any(test, debug_assertions))]
    /// Renders every bucket and its chain, one line per bucket.
    ///
    /// ```text
    /// size: 2 capacity: 3
    /// 0: --|
    /// 1: -->(a, 1)-->(d, 4)--|
    /// 2: --|
    /// ```
    pub fn debug_dump(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        use std::fmt::Write;

        let mut out = format!("size: {} capacity: {}\n", self.len, self.buckets.len());
        for (bucket, head) in self.buckets.iter().enumerate() {
            let _ = write!(out, "{}: --", bucket);
            let mut link = head;
            while let Some(node) = link {
                let _ = write!(out, ">({:?}, {:?})--", node.key, node.value);
                link = &node.next;
            }
            out.push_str("|\n");
        }
        out
    }

    fn bucket_of(&self, key: &K) -> usize {
        bucket_index(self.hash_builder.hash_one(key), self.buckets.len())
    }

    fn over_threshold(&self) -> bool {
        self.len * MAX_LOAD_DENOMINATOR > self.buckets.len() * MAX_LOAD_NUMERATOR
    }

    fn grow_if_needed(&mut self) {
        if !self.over_threshold() {
            return;
        }
        let old_capacity = self.buckets.len();
        let new_capacity = old_capacity * 2;
        let mut buckets = empty_buckets(new_capacity);

        // Chain order is not observable, so nodes are pushed at the head of
        // their new chain.
        for head in mem::take(&mut self.buckets).into_vec() {
            let mut link = head;
            while let Some(mut node) = link {
                link = node.next.take();
                let bucket = bucket_index(self.hash_builder.hash_one(&node.key), new_capacity);
                node.next = buckets[bucket].take();
                buckets[bucket] = Some(node);
            }
        }
        self.buckets = buckets;
        log::debug!(
            "chained map rehashed {} entries from {} to {} buckets",
            self.len,
            old_capacity,
            new_capacity
        );
    }
}

fn bucket_index(hash: u64, capacity: usize) -> usize {
    (hash % capacity as u64) as usize
}

// Unlinks iteratively so long chains do not recurse through `Box` drops.
fn drop_chain<K, V>(mut link: Link<K, V>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

// Copies a chain front to back through a tail cursor, keeping chain order.
fn clone_chain<K: Clone, V: Clone>(head: &Link<K, V>) -> Link<K, V> {
    let mut copy = None;
    let mut tail = &mut copy;
    let mut link = head;
    while let Some(node) = link {
        let cloned = Box::new(Node {
            key: node.key.clone(),
            value: node.value.clone(),
            next: None,
        });
        tail = &mut tail.insert(cloned).next;
        link = &node.next;
    }
    copy
}

impl<K, V, S> Clone for ChainedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.iter().map(clone_chain).collect(),
            len: self.len,
            hash_builder: self.hash_builder.clone(),
        }
    }
}

impl<K, V, S> Drop for ChainedHashMap<K, V, S> {
    fn drop(&mut self) {
        for bucket in self.buckets.iter_mut() {
            drop_chain(bucket.take());
        }
    }
}

impl<K, V> Default for ChainedHashMap<K, V, FxBuildHasher>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(Iter {
                buckets: &self.buckets,
                bucket: 0,
                link: None,
                remaining: self.len,
            })
            .finish()
    }
}

/// Iterator over `(&K, &V)` pairs, returned by [`ChainedHashMap::iter`].
pub struct Iter<'a, K, V> {
    buckets: &'a [Link<K, V>],
    bucket: usize,
    link: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.link {
                self.link = node.next.as_deref();
                self.remaining -= 1;
                return Some((&node.key, &node.value));
            }
            let head = self.buckets.get(self.bucket)?;
            self.bucket += 1;
            self.link = head.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
