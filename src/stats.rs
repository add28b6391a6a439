use crate::error::BuildError;

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_utils::CachePadded;
use parking_lot::Mutex;
use tracing::info;

/// Gathers information about a running cache:
/// - number of removed obsolete entries
/// - number of removed least-frequency entries
/// - a bounded list of put latencies, for the average load penalty
///
/// Counters are atomic and updated lock-free; the sample list holds at most
/// `max_size` entries, newest first, dropping the oldest once full. The
/// collector lives for the cache's lifetime and is never reset.
#[derive(Debug)]
pub(crate) struct CacheStatistics {
  obsolete_removed: CachePadded<AtomicU64>,
  lfu_removed: CachePadded<AtomicU64>,
  put_latencies: Mutex<VecDeque<Duration>>,
  max_size: usize,
}

impl CacheStatistics {
  /// Creates a new collector. `max_size` bounds the latency sample list and
  /// must be positive.
  pub(crate) fn new(max_size: usize) -> Result<Self, BuildError> {
    if max_size == 0 {
      return Err(BuildError::ZeroMaxSize);
    }
    info!("cache statistics created");
    Ok(Self {
      obsolete_removed: CachePadded::new(AtomicU64::new(0)),
      lfu_removed: CachePadded::new(AtomicU64::new(0)),
      put_latencies: Mutex::new(VecDeque::new()),
      max_size,
    })
  }

  pub(crate) fn record_obsolete_removal(&self) {
    self.obsolete_removed.fetch_add(1, Ordering::Relaxed);
  }

  pub(crate) fn record_lfu_removal(&self) {
    self.lfu_removed.fetch_add(1, Ordering::Relaxed);
  }

  /// Records the wall time an inserting `put` took. Newest samples sit at
  /// the front; once the list is at capacity the oldest fall off the back.
  pub(crate) fn record_put_latency(&self, latency: Duration) {
    let mut samples = self.put_latencies.lock();
    while samples.len() >= self.max_size {
      samples.pop_back();
    }
    samples.push_front(latency);
  }

  /// Creates a point-in-time snapshot of the current statistics.
  pub(crate) fn snapshot(&self) -> StatisticsSnapshot {
    let obsolete = self.obsolete_removed.load(Ordering::Relaxed);
    let lfu = self.lfu_removed.load(Ordering::Relaxed);

    let average = {
      let samples = self.put_latencies.lock();
      if samples.is_empty() {
        0.0
      } else {
        let sum_millis: f64 = samples.iter().map(|d| d.as_millis() as f64).sum();
        let raw = sum_millis / (samples.len() as f64 * 1000.0);
        round_half_up(raw, 2)
      }
    };

    StatisticsSnapshot {
      eviction_count: obsolete + lfu,
      average_load_penalty_secs: average,
    }
  }
}

/// Rounds to `places` decimal places, halves away from zero.
fn round_half_up(value: f64, places: u32) -> f64 {
  let factor = 10f64.powi(places as i32);
  (value * factor).round() / factor
}

/// A point-in-time, public-facing view of the cache's statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSnapshot {
  /// Total entries removed, obsolete and least-frequency combined.
  pub eviction_count: u64,
  /// Mean put latency over the retained samples, in seconds, rounded to two
  /// decimal places. Zero when no sample has been recorded.
  pub average_load_penalty_secs: f64,
}

impl fmt::Display for StatisticsSnapshot {
  // The "ms" label is carried over verbatim from the historical report
  // format, even though the value is seconds-denominated.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Statistics:")?;
    writeln!(f, "Eviction count = {}", self.eviction_count)?;
    writeln!(f, "Average load penalty = {} ms", self.average_load_penalty_secs)
  }
}
