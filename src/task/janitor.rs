use crate::engine::EvictionEngine;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::warn;

/// The background task running the expiration sweep at a fixed cadence.
pub(crate) struct Janitor {
  #[allow(dead_code)]
  handle: JoinHandle<()>,
  stop_flag: Arc<AtomicBool>,
}

impl Janitor {
  /// Spawns the sweeper thread.
  pub(crate) fn spawn<V>(engine: EvictionEngine<V>, tick_interval: Duration) -> Self
  where
    V: Send + Sync + 'static,
  {
    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_clone = stop_flag.clone();

    let handle = thread::spawn(move || {
      while !stop_clone.load(Ordering::Relaxed) {
        let sweep_start = std::time::Instant::now();

        // Listener failures have no caller to surface to here; log and
        // keep sweeping.
        if let Err(err) = engine.remove_obsolete_entries() {
          warn!(error = %err, "background sweep aborted");
        }

        // Sleep for the remaining duration of the tick interval.
        if let Some(remaining) = tick_interval.checked_sub(sweep_start.elapsed()) {
          thread::sleep(remaining);
        }
      }
    });

    Self { handle, stop_flag }
  }

  /// Signals the sweeper thread to stop after its current tick.
  pub(crate) fn stop(self) {
    self.stop_flag.store(true, Ordering::Relaxed);
  }
}
