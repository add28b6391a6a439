use crate::engine::EvictionEngine;
use crate::task::janitor::Janitor;

use std::fmt;

/// The internal core shared by all handles to one cache: the engine plus the
/// background sweeper tied to the cache's lifetime.
pub(crate) struct CacheShared<V> {
  pub(crate) engine: EvictionEngine<V>,
  pub(crate) janitor: Option<Janitor>,
}

impl<V> fmt::Debug for CacheShared<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheShared")
      .field("len", &self.engine.store.len())
      .field("max_size", &self.engine.max_size)
      .field("ttl", &self.engine.ttl)
      .finish_non_exhaustive()
  }
}

impl<V> Drop for CacheShared<V> {
  fn drop(&mut self) {
    // The sweeper must not outlive the cache that owns it.
    if let Some(janitor) = self.janitor.take() {
      janitor.stop();
    }
  }
}
