use crate::entry::EntrySnapshot;
use crate::error::ListenerError;

use std::fmt;

use tracing::trace;

/// The lifecycle events a cache publishes to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
  /// A new key was inserted.
  NewPut,
  /// An entry was evicted to enforce the size bound.
  LfuEviction,
  /// An entry idled past the timeout and was removed by a sweep.
  ObsoleteRemoval,
}

impl fmt::Display for EventKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EventKind::NewPut => write!(f, "new object put"),
      EventKind::LfuEviction => write!(f, "least-frequency eviction"),
      EventKind::ObsoleteRemoval => write!(f, "obsolete object removal"),
    }
  }
}

/// A listener receiving cache lifecycle events.
///
/// Listeners are registered at construction and invoked synchronously, in
/// registration order, on the thread that triggered the event. An `Err`
/// aborts delivery to later listeners and propagates to the caller of the
/// triggering operation.
pub trait CacheEventListener<V>: Send + Sync {
  fn on_event(&self, kind: EventKind, entry: &EntrySnapshot<V>) -> Result<(), ListenerError>;
}

/// A listener that traces removal events.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemovalLoggingListener;

impl<V> CacheEventListener<V> for RemovalLoggingListener {
  fn on_event(&self, kind: EventKind, entry: &EntrySnapshot<V>) -> Result<(), ListenerError> {
    match kind {
      EventKind::ObsoleteRemoval => {
        trace!(key = %entry.key, "obsolete object deleted: idle past timeout");
      }
      EventKind::LfuEviction => {
        trace!(
          key = %entry.key,
          frequency = entry.frequency,
          "cache size exceeded max size; least-frequency object deleted"
        );
      }
      EventKind::NewPut => {}
    }
    Ok(())
  }
}
