use std::fmt;

/// Boxed error returned by a failing [`CacheEventListener`](crate::CacheEventListener).
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when building a cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
  /// The cache was configured with a maximum size of zero.
  ZeroMaxSize,
  /// The cache was configured with a zero idle timeout.
  ZeroTtl,
}

impl fmt::Display for BuildError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BuildError::ZeroMaxSize => write!(f, "max cache size must be positive"),
      BuildError::ZeroTtl => write!(f, "idle timeout must be positive"),
    }
  }
}

impl std::error::Error for BuildError {}

/// Errors surfaced by cache operations.
#[derive(Debug)]
pub enum CacheError {
  /// An empty or whitespace-only key was passed to `get` or `put`.
  /// Surfaced before any mutation.
  BlankKey,
  /// The eviction index was empty while the store reported it was at or over
  /// capacity. The two structures have desynchronized; continuing would
  /// silently break the size bound, so the operation fails instead.
  IndexDesync {
    /// The store's entry count at the time the index came up empty.
    store_len: usize,
  },
  /// A listener failed while handling an event. Delivery to later listeners
  /// was aborted and the triggering operation surfaces the failure.
  Listener(ListenerError),
}

impl fmt::Display for CacheError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CacheError::BlankKey => write!(f, "cache keys must be non-empty and non-blank"),
      CacheError::IndexDesync { store_len } => write!(
        f,
        "eviction index is empty while the store holds {} entries",
        store_len
      ),
      CacheError::Listener(err) => write!(f, "listener failed: {}", err),
    }
  }
}

impl std::error::Error for CacheError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      CacheError::Listener(err) => Some(err.as_ref()),
      _ => None,
    }
  }
}

/// Convenience alias for cache operation results.
pub type CacheResult<T> = Result<T, CacheError>;
