use crate::index::OrderKey;

use std::sync::Arc;
use std::time::Duration;

/// A container for a value in the cache, holding all access metadata.
///
/// Fields are plain (not atomic): every mutation happens under the owning
/// shard's write lock, and the ordering fields must change in the same
/// critical section that swaps the entry's eviction-index record.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
  /// The entry's key, shared with the store map and the index records.
  pub(crate) key: Arc<str>,
  /// The user's value. `None` is a legitimate stored value.
  pub(crate) value: Option<Arc<V>>,
  /// Access counter. Starts at 1, incremented on every get and update-put.
  pub(crate) frequency: u64,
  /// Last access timestamp in milliseconds since the cache epoch.
  pub(crate) last_access_millis: u64,
  /// Wall time the inserting `put` call took. Set once, at insert.
  pub(crate) insert_latency: Duration,
}

impl<V> CacheEntry<V> {
  pub(crate) fn new(key: Arc<str>, value: Option<V>, now_millis: u64) -> Self {
    Self {
      key,
      value: value.map(Arc::new),
      frequency: 1,
      last_access_millis: now_millis,
      insert_latency: Duration::ZERO,
    }
  }

  /// The record this entry currently occupies in the eviction index.
  #[inline]
  pub(crate) fn order_key(&self) -> OrderKey {
    OrderKey {
      frequency: self.frequency,
      last_access_millis: self.last_access_millis,
      key: self.key.clone(),
    }
  }

  /// An immutable snapshot for listeners.
  pub(crate) fn snapshot(&self) -> EntrySnapshot<V> {
    EntrySnapshot {
      key: self.key.clone(),
      value: self.value.clone(),
      frequency: self.frequency,
      last_access_millis: self.last_access_millis,
      insert_latency: self.insert_latency,
    }
  }
}

/// An immutable, point-in-time view of a cache entry, handed to listeners.
#[derive(Debug, Clone)]
pub struct EntrySnapshot<V> {
  /// The entry's key.
  pub key: Arc<str>,
  /// The stored value at the time of the event. `None` means a stored null.
  pub value: Option<Arc<V>>,
  /// The access frequency at the time of the event.
  pub frequency: u64,
  /// Last access time, in milliseconds since the cache epoch.
  pub last_access_millis: u64,
  /// How long the inserting `put` call took.
  pub insert_latency: Duration,
}
