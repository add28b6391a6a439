use once_cell::sync::Lazy;
use std::time::Instant;

// The single, static reference point for all time calculations in the cache.
// It is initialized lazily on its first use.
static CACHE_EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// A source of the current time, expressed in milliseconds since the cache
/// epoch.
///
/// The cache reads time exclusively through this trait, so a test can supply
/// a hand-driven clock and exercise expiration without sleeping.
pub trait Clock: Send + Sync {
  /// Milliseconds elapsed since the process-wide cache epoch.
  fn now_millis(&self) -> u64;
}

/// The default clock, backed by the monotonic system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  #[inline]
  fn now_millis(&self) -> u64 {
    CACHE_EPOCH.elapsed().as_millis() as u64
  }
}
