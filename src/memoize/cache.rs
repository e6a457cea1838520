//! The keyed result store behind every memoized callable.
//!
//! # Locking
//!
//! The table maps each key to a slot with its own lock. A lookup takes the
//! table lock only long enough to find or create the slot, then computes
//! while holding the slot lock alone. Concurrent callers with the same key
//! therefore wait for the first computation instead of repeating it, while
//! callers with other keys are never blocked by it. Lock order is always
//! slot before table.

use std::collections::VecDeque;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

#[cfg(feature = "fxhash")]
type Table<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;
#[cfg(not(feature = "fxhash"))]
type Table<K, V> = std::collections::HashMap<K, V>;

/// How many results a cache may hold.
///
/// # Examples
///
/// ```rust
/// use fnops::memoize::CachePolicy;
///
/// assert_eq!(CachePolicy::default(), CachePolicy::Unbounded);
/// assert_eq!(CachePolicy::bounded(2).max_entries(), Some(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep every result for the lifetime of the cache.
    #[default]
    Unbounded,
    /// Keep at most `max_entries` results; storing one more evicts the
    /// oldest stored result. `0` keeps nothing.
    Bounded {
        /// Upper bound on stored results.
        max_entries: usize,
    },
}

impl CachePolicy {
    /// A bounded policy holding at most `max_entries` results.
    pub const fn bounded(max_entries: usize) -> Self {
        Self::Bounded { max_entries }
    }

    /// The bound, if any.
    pub const fn max_entries(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Bounded { max_entries } => Some(max_entries),
        }
    }
}

/// Counters describing a cache's activity so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Calls answered from the cache.
    pub hits: u64,
    /// Calls that ran the inner computation.
    pub misses: u64,
    /// Computations that failed and were not stored.
    pub failures: u64,
    /// Results dropped to honor a bounded policy.
    pub evictions: u64,
    /// Results currently stored.
    pub entries: usize,
}

struct Slot<B> {
    value: Mutex<Option<B>>,
}

impl<B> Default for Slot<B> {
    fn default() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }
}

struct Index<K, B> {
    slots: Table<K, Arc<Slot<B>>>,
    // Keys whose slot holds a value, oldest first.
    stored: VecDeque<K>,
}

impl<K, B> Default for Index<K, B> {
    fn default() -> Self {
        Self {
            slots: Table::default(),
            stored: VecDeque::new(),
        }
    }
}

/// Insert-once store from keys to results.
pub(crate) struct Cache<K, B> {
    index: Mutex<Index<K, B>>,
    policy: CachePolicy,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
    evictions: AtomicU64,
}

impl<K, B> Cache<K, B> {
    pub(crate) fn new(policy: CachePolicy) -> Self {
        Self {
            index: Mutex::new(Index::default()),
            policy,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub(crate) const fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub(crate) fn len(&self) -> usize {
        self.index.lock().stored.len()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Acquire),
            misses: self.misses.load(Ordering::Acquire),
            failures: self.failures.load(Ordering::Acquire),
            evictions: self.evictions.load(Ordering::Acquire),
            entries: self.len(),
        }
    }

    pub(crate) fn clear(&self) {
        let mut index = self.index.lock();
        index.slots.clear();
        index.stored.clear();
    }
}

impl<K, B> Cache<K, B>
where
    K: Hash + Eq + Clone,
    B: Clone,
{
    /// Returns the stored result for `key`, or runs `compute` and stores
    /// its success. A failure is returned without storing anything.
    pub(crate) fn get_or_try_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<B, E>,
    ) -> Result<B, E> {
        let slot = {
            let mut index = self.index.lock();
            Arc::clone(index.slots.entry(key.clone()).or_default())
        };

        let mut value = slot.value.lock();
        if let Some(stored) = value.as_ref() {
            self.hits.fetch_add(1, Ordering::AcqRel);
            tracing::trace!("memo hit");
            return Ok(stored.clone());
        }

        self.misses.fetch_add(1, Ordering::AcqRel);
        tracing::trace!("memo miss");
        match compute() {
            Ok(computed) => {
                *value = Some(computed.clone());
                self.admit(key, &slot);
                Ok(computed)
            }
            Err(error) => {
                self.failures.fetch_add(1, Ordering::AcqRel);
                tracing::trace!("memo computation failed; nothing stored");
                self.release(&key, &slot);
                Err(error)
            }
        }
    }

    // Drops an empty slot nobody else is waiting on. Waiters clone the slot
    // only under the table lock, so the count cannot grow while it is held.
    fn release(&self, key: &K, slot: &Arc<Slot<B>>) {
        let mut index = self.index.lock();
        let idle = index.slots.get(key).is_some_and(|existing| {
            Arc::ptr_eq(existing, slot) && Arc::strong_count(slot) == 2
        });
        if idle {
            index.slots.remove(key);
        }
    }

    fn admit(&self, key: K, slot: &Arc<Slot<B>>) {
        let mut index = self.index.lock();
        // The slot may have been dropped by `clear` while computing.
        let current = index
            .slots
            .get(&key)
            .is_some_and(|existing| Arc::ptr_eq(existing, slot));
        if !current {
            return;
        }
        index.stored.push_back(key);

        if let Some(max_entries) = self.policy.max_entries() {
            while index.stored.len() > max_entries {
                let Some(oldest) = index.stored.pop_front() else {
                    break;
                };
                index.slots.remove(&oldest);
                self.evictions.fetch_add(1, Ordering::AcqRel);
                tracing::trace!(max_entries, "memo entry evicted");
            }
        }
    }
}
