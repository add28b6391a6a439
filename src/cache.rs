use crate::builder::CacheBuilder;
use crate::entry::CacheEntry;
use crate::error::{CacheError, CacheResult};
use crate::listener::EventKind;
use crate::shared::CacheShared;
use crate::stats::StatisticsSnapshot;

use std::collections::hash_map::Entry as MapEntry;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

/// A thread-safe, bounded key/value cache.
///
/// Capacity is enforced by evicting the least-frequently-used entry (ties
/// broken by oldest access, then key) whenever a new key would exceed the
/// size bound. Entries idle past the configured timeout are reclaimed by a
/// periodic background sweep, or synchronously via [`clean_up`](Self::clean_up).
///
/// Handles are cheap to clone and share one underlying cache. The background
/// sweeper stops when the last handle is dropped.
pub struct Cache<V: Send + Sync> {
  pub(crate) shared: Arc<CacheShared<V>>,
}

impl<V: Send + Sync> Clone for Cache<V> {
  fn clone(&self) -> Self {
    Self {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<V: Send + Sync> fmt::Debug for Cache<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Cache").field("shared", &self.shared).finish()
  }
}

impl<V> Cache<V>
where
  V: Send + Sync + 'static,
{
  /// Creates a builder with default settings.
  pub fn builder() -> CacheBuilder<V> {
    CacheBuilder::new()
  }

  /// Looks up a value, refreshing the entry's frequency and access time.
  ///
  /// Returns `Ok(None)` both for a missing key and for a stored null value;
  /// the two are indistinguishable to the caller. Misses have no side
  /// effects. The idle timeout is deliberately not checked here: an expired
  /// entry can be served until the next sweep runs.
  pub fn get(&self, key: &str) -> CacheResult<Option<Arc<V>>> {
    validate_key(key)?;
    let engine = &self.shared.engine;

    trace!(key, "getting value from cache");
    let shard = engine.store.shard(key);
    let mut guard = shard.write();
    match guard.get_mut(key) {
      Some(entry) => {
        // The index record must be swapped in the same critical section
        // that mutates the ordering fields.
        engine.index.remove(&entry.order_key());
        entry.frequency += 1;
        entry.last_access_millis = engine.clock.now_millis();
        engine.index.insert(entry.order_key());
        Ok(entry.value.clone())
      }
      None => {
        trace!(key, "cache does not contain key");
        Ok(None)
      }
    }
  }

  /// Inserts or updates a value. `None` stores a null value.
  ///
  /// Updating an existing key refreshes its frequency and access time
  /// without any size check or event. Inserting a new key first frees
  /// capacity (emitting an eviction event per removed entry), then records
  /// the call's wall time as the load-penalty sample and publishes a
  /// new-put event.
  pub fn put(&self, key: &str, value: Option<V>) -> CacheResult<()> {
    let engine = &self.shared.engine;
    let put_start = engine.clock.now_millis();
    validate_key(key)?;

    trace!(key, "putting value in cache");
    {
      let shard = engine.store.shard(key);
      let mut guard = shard.write();
      if let Some(entry) = guard.get_mut(key) {
        engine.index.remove(&entry.order_key());
        entry.value = value.map(Arc::new);
        entry.frequency += 1;
        entry.last_access_millis = engine.clock.now_millis();
        engine.index.insert(entry.order_key());
        trace!(key, "cache already has key; entry updated");
        return Ok(());
      }
    } // Shard lock released: freeing capacity locks victim shards.

    engine.free_capacity(1)?;

    let key_arc: Arc<str> = Arc::from(key);
    let (snapshot, latency) = {
      let shard = engine.store.shard(key);
      let mut guard = shard.write();
      match guard.entry(key_arc.clone()) {
        MapEntry::Occupied(mut occupied) => {
          // Lost an insert race on this key; the winner's entry absorbs
          // this call as an update.
          let entry = occupied.get_mut();
          engine.index.remove(&entry.order_key());
          entry.value = value.map(Arc::new);
          entry.frequency += 1;
          entry.last_access_millis = engine.clock.now_millis();
          engine.index.insert(entry.order_key());
          return Ok(());
        }
        MapEntry::Vacant(vacant) => {
          let now = engine.clock.now_millis();
          let mut entry = CacheEntry::new(key_arc, value, now);
          let latency = Duration::from_millis(now.saturating_sub(put_start));
          entry.insert_latency = latency;
          engine.index.insert(entry.order_key());
          let snapshot = entry.snapshot();
          vacant.insert(entry);
          engine.store.note_insert();
          (snapshot, latency)
        }
      }
    };

    engine.stats.record_put_latency(latency);
    // Racing inserts can momentarily overshoot the bound; settle it here.
    engine.free_capacity(0)?;

    trace!(key = %snapshot.key, latency_millis = latency.as_millis() as u64, "new object put into cache");
    engine.publish(EventKind::NewPut, &snapshot)
  }

  /// Returns a point-in-time view of the eviction count and the average
  /// load penalty.
  pub fn statistics(&self) -> StatisticsSnapshot {
    self.shared.engine.stats.snapshot()
  }

  /// Runs the expiration sweep synchronously, blocking until the full scan
  /// completes.
  pub fn clean_up(&self) -> CacheResult<()> {
    self.shared.engine.remove_obsolete_entries().map(|_| ())
  }

  /// Number of entries currently cached.
  pub fn len(&self) -> usize {
    self.shared.engine.store.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether `key` is currently cached, without refreshing it.
  pub fn contains_key(&self, key: &str) -> bool {
    self.shared.engine.store.contains_key(key)
  }
}

fn validate_key(key: &str) -> CacheResult<()> {
  if key.trim().is_empty() {
    return Err(CacheError::BlankKey);
  }
  Ok(())
}
