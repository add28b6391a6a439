use crate::cache::Cache;
use crate::engine::EvictionEngine;
use crate::error::BuildError;
use crate::index::EvictionIndex;
use crate::listener::CacheEventListener;
use crate::shared::CacheShared;
use crate::stats::CacheStatistics;
use crate::store::PrimaryStore;
use crate::task::janitor::Janitor;
use crate::time::{Clock, SystemClock};

use core::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

const DEFAULT_MAX_SIZE: usize = 100_000;
const DEFAULT_TTL: Duration = Duration::from_secs(5);
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(500);

/// A builder for [`Cache`] instances.
///
/// All options have defaults: `max_size = 100_000`, `ttl = 5 s`, advisory
/// `concurrency = 1`, no listeners, system clock. Configuration is resolved
/// once at [`build`](Self::build); invalid values fail there rather than
/// being replaced with defaults.
pub struct CacheBuilder<V> {
  max_size: usize,
  ttl: Duration,
  concurrency: usize,
  listeners: Vec<Arc<dyn CacheEventListener<V>>>,
  clock: Arc<dyn Clock>,
  sweep_interval: Option<Duration>,
}

impl<V> fmt::Debug for CacheBuilder<V> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheBuilder")
      .field("max_size", &self.max_size)
      .field("ttl", &self.ttl)
      .field("concurrency", &self.concurrency)
      .field("num_listeners", &self.listeners.len())
      .finish_non_exhaustive()
  }
}

impl<V> CacheBuilder<V> {
  /// Creates a new `CacheBuilder` with default settings.
  pub fn new() -> Self {
    Self {
      max_size: DEFAULT_MAX_SIZE,
      ttl: DEFAULT_TTL,
      concurrency: 1,
      listeners: Vec::new(),
      clock: Arc::new(SystemClock),
      sweep_interval: None,
    }
  }

  /// Sets the maximum number of entries the cache holds.
  pub fn max_size(mut self, max_size: usize) -> Self {
    self.max_size = max_size;
    self
  }

  /// Sets the idle timeout after which an unaccessed entry becomes eligible
  /// for removal by a sweep.
  pub fn ttl(mut self, ttl: Duration) -> Self {
    self.ttl = ttl;
    self
  }

  /// Advisory hint for the expected number of concurrent callers. Rounded up
  /// to a power of two and used as the store's shard count.
  pub fn concurrency(mut self, concurrency: usize) -> Self {
    self.concurrency = concurrency;
    self
  }

  /// Appends a listener. Listeners are invoked in registration order.
  pub fn listener<L>(mut self, listener: L) -> Self
  where
    L: CacheEventListener<V> + 'static,
  {
    self.listeners.push(Arc::new(listener));
    self
  }

  /// Sets the time source. Defaults to the system clock.
  pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
    self.clock = clock;
    self
  }

  /// Sets the tick interval for the background sweep.
  /// (Primarily for testing purposes.)
  #[doc(hidden)]
  pub fn sweep_interval(mut self, interval: Duration) -> Self {
    self.sweep_interval = Some(interval);
    self
  }
}

impl<V> CacheBuilder<V>
where
  V: Send + Sync + 'static,
{
  /// Builds the cache and starts its background sweeper.
  pub fn build(self) -> Result<Cache<V>, BuildError> {
    self.validate()?;

    let shards = self.concurrency.max(1).next_power_of_two();
    let engine = EvictionEngine {
      store: Arc::new(PrimaryStore::new(shards)),
      index: Arc::new(EvictionIndex::new()),
      stats: Arc::new(CacheStatistics::new(self.max_size)?),
      listeners: self.listeners.into_boxed_slice(),
      clock: self.clock,
      max_size: self.max_size,
      ttl: self.ttl,
    };

    let tick_interval = self.sweep_interval.unwrap_or(DEFAULT_SWEEP_INTERVAL);
    let janitor = Janitor::spawn(engine.clone(), tick_interval);

    info!(max_size = self.max_size, ttl = ?self.ttl, "cache service created");
    Ok(Cache {
      shared: Arc::new(CacheShared {
        engine,
        janitor: Some(janitor),
      }),
    })
  }

  /// Validates the builder configuration.
  fn validate(&self) -> Result<(), BuildError> {
    if self.max_size == 0 {
      return Err(BuildError::ZeroMaxSize);
    }
    if self.ttl.is_zero() {
      return Err(BuildError::ZeroTtl);
    }
    Ok(())
  }
}

impl<V> Default for CacheBuilder<V> {
  fn default() -> Self {
    Self::new()
  }
}
