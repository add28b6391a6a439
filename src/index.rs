use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// An immutable snapshot of an entry's ordering fields.
///
/// Records are replaced, never mutated: the owner removes the old record
/// before touching the entry's frequency or access time and inserts the new
/// one afterwards, all inside the same shard critical section. Derived `Ord`
/// compares fields in declaration order, so the key breaks ties between
/// entries sharing a frequency and an access time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct OrderKey {
  pub(crate) frequency: u64,
  pub(crate) last_access_millis: u64,
  pub(crate) key: Arc<str>,
}

/// The ordered auxiliary structure backing LFU eviction.
///
/// Holds exactly one record per cached key at every quiescent point; the
/// minimum record identifies the next eviction victim.
#[derive(Debug, Default)]
pub(crate) struct EvictionIndex {
  records: Mutex<BTreeSet<OrderKey>>,
}

impl EvictionIndex {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  pub(crate) fn insert(&self, record: OrderKey) {
    self.records.lock().insert(record);
  }

  /// Removes a record. Returns false when the record is absent, which is
  /// benign: a concurrent `take_min` may already hold it.
  pub(crate) fn remove(&self, record: &OrderKey) -> bool {
    self.records.lock().remove(record)
  }

  /// Pops the globally minimum `(frequency, last_access, key)` record.
  pub(crate) fn take_min(&self) -> Option<OrderKey> {
    self.records.lock().pop_first()
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.records.lock().len()
  }
}
