//! Bounded LRU cache built from a key index and a recency list.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                  ConcurrentLruCache<K, V>                    │
//!   │                                                              │
//!   │        Arc<RwLock<LruCache<K, Arc<V>>>>                      │
//!   │                        │                                     │
//!   │                        ▼                                     │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │                  LruCache<K, V>                        │ │
//!   │   │                                                        │ │
//!   │   │   KeyIndex<K>: K ──► SlotId                            │ │
//!   │   │                        │                               │ │
//!   │   │   RecencyList<Entry<K, V>>                             │ │
//!   │   │                        ▼                               │ │
//!   │   │   front ─► [MRU] ◄──► [..] ◄──► [LRU] ◄─ back          │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each node stores its own key next to the value so that evicting the back
//! node can delete the matching index entry without a reverse lookup.
//!
//! ## Operation flow
//!
//! | Operation        | Steps                                                |
//! |------------------|------------------------------------------------------|
//! | `get` (hit)      | index lookup, `move_to_front`, return value          |
//! | `get` (miss)     | index lookup only                                    |
//! | `insert` (hit)   | `move_to_front`, overwrite value in place            |
//! | `insert` (miss)  | evict back node if full, `push_front`, index the key |
//! | `clear`          | drop every node, empty the index                     |
//!
//! Exactly one entry is evicted per overflowing insert: the length can only
//! reach the capacity bound one insert at a time.
//!
//! ## Concurrency model
//!
//! `LruCache` is single-threaded; `ConcurrentLruCache` wraps it in a
//! `parking_lot::RwLock`. Every operation that promotes or mutates — `get`
//! included, since a hit reorders the list — takes the write lock and runs as
//! one critical section. Pure reads (`peek`, `contains`, `len`, `peek_lru`)
//! take the read lock. Values are shared as `Arc<V>` so `get` hands out
//! ownership without cloning payloads.

use std::fmt;
use std::hash::Hash;
use std::mem;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;

use crate::ds::key_index::KeyIndex;
use crate::ds::recency_list::RecencyList;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// One cached key-value pair, stored as the payload of a recency-list node.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Single-threaded LRU cache core.
///
/// Combines a [`KeyIndex`] for O(1) lookup with a [`RecencyList`] for O(1)
/// promotion and eviction. Thread safety is provided by the
/// [`ConcurrentLruCache`] wrapper.
///
/// # Example
///
/// ```
/// use lrukit::cache::LruCache;
/// use lrukit::traits::CoreCache;
///
/// let mut cache: LruCache<&str, i32> = LruCache::new(2);
/// assert_eq!(cache.insert("a", 100), None);
/// assert_eq!(cache.insert("b", 200), None);
///
/// // "a" is promoted by the read, so "b" is evicted by the next insert
/// assert_eq!(cache.get(&"a"), Some(&100));
/// cache.insert("c", 300);
///
/// assert!(!cache.contains(&"b"));
/// assert_eq!(cache.get(&"c"), Some(&300));
/// assert_eq!(cache.get(&"a"), Some(&100));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: KeyIndex<K>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero. A cache that can hold
    /// nothing has no meaningful eviction semantics, so the bound is rejected
    /// at construction.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(Self {
            index: KeyIndex::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// the error instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("LruCache::new: {err}"),
        }
    }

    /// Read-only lookup that does not promote the entry.
    ///
    /// Unlike [`get`](CoreCache::get), the entry keeps its place in the
    /// recency order and remains the eviction candidate it was.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::cache::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    ///
    /// // Key 1 was not promoted, so it is still the eviction victim
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    pub fn peek(&self, key: &K) -> Option<&V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        let id = self.index.get(key)?;
        let entry = self.order.get(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_found();

        Some(&entry.value)
    }

    /// Verifies that the key index and the recency list agree.
    ///
    /// Checks the capacity bound, the length equality between the two
    /// structures, and that every listed node is indexed under its own key
    /// (and vice versa). Intended for tests and debugging; the cost is O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "length {} exceeds capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but list holds {} nodes",
                self.index.len(),
                self.order.len()
            )));
        }

        let mut walked = 0usize;
        for id in self.order.iter_ids() {
            let entry = match self.order.get(id) {
                Some(entry) => entry,
                None => {
                    return Err(InvariantError::new(format!(
                        "list yielded dangling handle {:?}",
                        id
                    )))
                }
            };
            if self.index.get(&entry.key) != Some(id) {
                return Err(InvariantError::new(
                    "listed node is not indexed under its own key",
                ));
            }
            walked += 1;
            if walked > self.order.len() {
                return Err(InvariantError::new("list walk exceeded tracked length"));
            }
        }
        if walked != self.order.len() {
            return Err(InvariantError::new(format!(
                "walked {} nodes but list reports {}",
                walked,
                self.order.len()
            )));
        }
        Ok(())
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.metrics.snapshot(self.order.len(), self.capacity)
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            self.order.move_to_front(id);
            let entry = self.order.get_mut(id)?;
            return Some(mem::replace(&mut entry.value, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        if self.order.len() == self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if let Some(evicted) = self.order.pop_back() {
                self.index.remove(&evicted.key);
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();
            }
        }

        let id = self.order.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let id = match self.index.get(key) {
            Some(id) => id,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            }
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        // A read counts as a use: promote before returning.
        self.order.move_to_front(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.order.clear();
        self.index.clear();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        self.order.remove(id).map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let entry = self.order.pop_back()?;
        self.index.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        let entry = self.order.back()?;

        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_found();

        Some((&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        match self.index.get(key) {
            Some(id) => {
                self.order.move_to_front(id);
                #[cfg(feature = "metrics")]
                self.metrics.record_touch_found();
                true
            }
            None => false,
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let target = self.index.get(key)?;
        for (rank, id) in self.order.iter_ids().enumerate() {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if id == target {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
        }
        None
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache.
///
/// Wraps [`LruCache`] in a `parking_lot::RwLock` and shares values as
/// `Arc<V>`. Clones of the wrapper are handles onto the same cache.
///
/// Every operation is one atomic critical section. Anything that promotes an
/// entry needs the write lock — including `get`, because a hit reorders the
/// recency list. Pure reads (`peek`, `contains`, `len`, `peek_lru`) run under
/// the read lock and may proceed in parallel.
///
/// # Example
///
/// ```
/// use lrukit::cache::ConcurrentLruCache;
///
/// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
/// cache.insert(1, "value".to_string());
///
/// let value = cache.get(&1).unwrap();
/// assert_eq!(*value, "value");
/// assert!(cache.get(&999).is_none());
/// ```
#[cfg(feature = "concurrency")]
pub struct ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LruCache<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a thread-safe cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(LruCache::try_new(capacity)?)),
        })
    }

    /// Creates a thread-safe cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) to handle
    /// the error instead.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("ConcurrentLruCache::new: {err}"),
        }
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns the previous `Arc<V>` if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        self.inner.write().insert(key, value)
    }

    /// Inserts a pre-wrapped `Arc<V>` directly.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use lrukit::cache::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(10);
    /// let shared = Arc::new("shared".to_string());
    /// cache.insert_arc(1, Arc::clone(&shared));
    ///
    /// let retrieved = cache.get(&1).unwrap();
    /// assert!(Arc::ptr_eq(&shared, &retrieved));
    /// ```
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.write().insert(key, value)
    }

    /// Gets a value by key, promoting it to most recently used.
    ///
    /// Takes the write lock: the promotion mutates the recency order.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).map(Arc::clone)
    }

    /// Gets a value without promoting it. Read lock only.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key).map(Arc::clone)
    }

    /// Removes an entry and returns its value.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Marks an entry as recently used without retrieving its value.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lru()
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }

    /// Returns `true` if the key exists. Does not affect recency order.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Removes all entries. Capacity is unchanged.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Verifies index/list consistency under the read lock.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> crate::traits::ConcurrentCache for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}
