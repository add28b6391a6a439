use crate::entry::CacheEntry;

use core::fmt;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_utils::CachePadded;
use parking_lot::RwLock;

pub(crate) type ShardMap<V> = HashMap<Arc<str>, CacheEntry<V>, ahash::RandomState>;

/// A helper function to hash a key using a `BuildHasher`.
#[inline]
fn hash_key<K: Hash + ?Sized, H: BuildHasher>(hasher: &H, key: &K) -> u64 {
  let mut state = hasher.build_hasher();
  key.hash(&mut state);
  state.finish()
}

/// The primary key -> entry mapping, partitioned into independently locked
/// shards so operations on different keys are unlikely to contend.
///
/// The shard count is always a power of two, so the shard index is a bitwise
/// AND over the key hash. A global counter tracks the total entry count; it
/// is maintained at the insert and remove sites, which all run under the
/// owning shard's write lock.
pub(crate) struct PrimaryStore<V> {
  shards: Box<[CachePadded<RwLock<ShardMap<V>>>]>,
  hasher: ahash::RandomState,
  len: AtomicUsize,
}

impl<V> fmt::Debug for PrimaryStore<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PrimaryStore")
      .field("num_shards", &self.shards.len())
      .field("len", &self.len())
      .finish()
  }
}

impl<V> PrimaryStore<V> {
  /// Creates a new store. `num_shards` must be a power of two.
  pub(crate) fn new(num_shards: usize) -> Self {
    debug_assert!(num_shards.is_power_of_two());
    let hasher = ahash::RandomState::new();

    let mut shards = Vec::with_capacity(num_shards);
    for _ in 0..num_shards {
      let shard_map = ShardMap::with_hasher(ahash::RandomState::new());
      shards.push(CachePadded::new(RwLock::new(shard_map)));
    }

    Self {
      shards: shards.into_boxed_slice(),
      hasher,
      len: AtomicUsize::new(0),
    }
  }

  /// Returns the lock guarding the shard that owns `key`.
  #[inline]
  pub(crate) fn shard(&self, key: &str) -> &RwLock<ShardMap<V>> {
    let hash = hash_key(&self.hasher, key);
    let index = hash as usize & (self.shards.len() - 1);
    &self.shards[index]
  }

  /// Iterates over all shard locks, for full scans.
  pub(crate) fn iter_shards(&self) -> impl Iterator<Item = &RwLock<ShardMap<V>>> {
    self.shards.iter().map(|padded_lock| &**padded_lock)
  }

  /// Total number of entries across all shards.
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.len.load(Ordering::Relaxed)
  }

  pub(crate) fn contains_key(&self, key: &str) -> bool {
    self.shard(key).read().contains_key(key)
  }

  /// Must be called exactly once per map insert, under the shard write lock.
  #[inline]
  pub(crate) fn note_insert(&self) {
    self.len.fetch_add(1, Ordering::Relaxed);
  }

  /// Must be called exactly once per map removal, under the shard write lock.
  #[inline]
  pub(crate) fn note_remove(&self) {
    self.len.fetch_sub(1, Ordering::Relaxed);
  }
}
