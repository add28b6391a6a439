use crate::entry::EntrySnapshot;
use crate::error::{CacheError, CacheResult};
use crate::index::EvictionIndex;
use crate::listener::{CacheEventListener, EventKind};
use crate::stats::CacheStatistics;
use crate::store::PrimaryStore;
use crate::time::Clock;

use std::sync::Arc;
use std::time::Duration;

/// The thread-safe bundle of cache parts that enforce the size bound and
/// reclaim idle entries. Shared between the facade and the background
/// sweeper; this is the only place entries leave the two structures.
///
/// Lock order is always shard -> index. The index lock is never held across
/// a shard acquisition: `take_min` pops and releases before the victim's
/// shard is locked, and a popped record is re-validated against the live
/// entry under that shard lock.
pub(crate) struct EvictionEngine<V> {
  pub(crate) store: Arc<PrimaryStore<V>>,
  pub(crate) index: Arc<EvictionIndex>,
  pub(crate) stats: Arc<CacheStatistics>,
  pub(crate) listeners: Box<[Arc<dyn CacheEventListener<V>>]>,
  pub(crate) clock: Arc<dyn Clock>,
  pub(crate) max_size: usize,
  pub(crate) ttl: Duration,
}

impl<V> Clone for EvictionEngine<V> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      index: Arc::clone(&self.index),
      stats: Arc::clone(&self.stats),
      listeners: self.listeners.clone(),
      clock: Arc::clone(&self.clock),
      max_size: self.max_size,
      ttl: self.ttl,
    }
  }
}

impl<V> EvictionEngine<V> {
  /// Evicts minimum-ordered entries until the store can hold `room_needed`
  /// more without exceeding the size bound. Called with `room_needed = 1`
  /// before a new-key insert and `room_needed = 0` after it, so racing
  /// inserts that momentarily overshoot the bound correct themselves.
  pub(crate) fn free_capacity(&self, room_needed: usize) -> CacheResult<()> {
    while self.store.len() + room_needed > self.max_size {
      self.evict_one()?;
    }
    Ok(())
  }

  /// Removes the entry with the globally minimum
  /// `(frequency, last_access, key)` record, if that record is still live.
  fn evict_one(&self) -> CacheResult<()> {
    let record = self.index.take_min().ok_or(CacheError::IndexDesync {
      store_len: self.store.len(),
    })?;

    let snapshot = {
      let shard = self.store.shard(&record.key);
      let mut guard = shard.write();
      let is_live = guard
        .get(record.key.as_ref())
        .map_or(false, |entry| entry.order_key() == record);

      if is_live {
        guard.remove(record.key.as_ref()).map(|entry| {
          self.store.note_remove();
          entry.snapshot()
        })
      } else {
        // Stale record: the entry was refreshed (its replacement record is
        // already in the index) or a concurrent sweep removed the key.
        None
      }
    };

    if let Some(snapshot) = snapshot {
      self.stats.record_lfu_removal();
      self.publish(EventKind::LfuEviction, &snapshot)?;
    }
    Ok(())
  }

  /// Scans every shard and removes entries idle past the timeout. Returns
  /// the number of entries removed.
  ///
  /// Runs concurrently with `get`/`put`; an entry refreshed between the scan
  /// and the removal is re-checked under the write lock and survives.
  pub(crate) fn remove_obsolete_entries(&self) -> CacheResult<usize> {
    let ttl_millis = self.ttl.as_millis() as u64;
    let mut removed = 0;

    for shard in self.store.iter_shards() {
      let now = self.clock.now_millis();
      let victims: Vec<Arc<str>> = {
        let guard = shard.read();
        guard
          .values()
          .filter(|entry| now.saturating_sub(entry.last_access_millis) > ttl_millis)
          .map(|entry| entry.key.clone())
          .collect()
      };

      if victims.is_empty() {
        continue;
      }

      let mut snapshots = Vec::with_capacity(victims.len());
      {
        let mut guard = shard.write();
        for key in victims {
          let now = self.clock.now_millis();
          let still_obsolete = guard
            .get(key.as_ref())
            .map_or(false, |entry| {
              now.saturating_sub(entry.last_access_millis) > ttl_millis
            });
          if !still_obsolete {
            continue;
          }
          if let Some(entry) = guard.remove(key.as_ref()) {
            self.index.remove(&entry.order_key());
            self.store.note_remove();
            snapshots.push(entry.snapshot());
          }
        }
      } // Shard lock dropped before listeners run.

      for snapshot in snapshots {
        self.stats.record_obsolete_removal();
        removed += 1;
        self.publish(EventKind::ObsoleteRemoval, &snapshot)?;
      }
    }

    Ok(removed)
  }

  /// Invokes each listener synchronously, in registration order. The first
  /// failure aborts delivery and propagates.
  pub(crate) fn publish(&self, kind: EventKind, entry: &EntrySnapshot<V>) -> CacheResult<()> {
    for listener in self.listeners.iter() {
      listener.on_event(kind, entry).map_err(CacheError::Listener)?;
    }
    Ok(())
  }
}
