//! A bounded, concurrent, in-process key/value cache with two cooperating
//! eviction forces: a least-frequently-used policy bounding entry count and
//! an idle timeout reclaiming entries no one has touched.
//!
//! # Features
//! - **Dual eviction**: LFU with deterministic tie-breaking (oldest access,
//!   then key), plus periodic and on-demand expiration sweeps.
//! - **Concurrent**: sharded store, no global lock across operations.
//! - **Observable**: synchronous lifecycle listeners and eviction/load
//!   statistics with a fixed textual report.
//! - **Deterministic testing**: the time source is injectable.
//!
//! ```
//! use lfu_idle_cache::Cache;
//! use std::time::Duration;
//!
//! let cache = Cache::builder()
//!   .max_size(2)
//!   .ttl(Duration::from_secs(5))
//!   .build()
//!   .unwrap();
//!
//! cache.put("a", Some(1)).unwrap();
//! cache.put("b", Some(2)).unwrap();
//! assert_eq!(cache.get("a").unwrap().as_deref(), Some(&1));
//!
//! // "b" is now the least frequently used entry; a third key evicts it.
//! cache.put("c", Some(3)).unwrap();
//! assert_eq!(cache.get("b").unwrap(), None);
//! ```

// Public modules that form the API
pub mod builder;
pub mod error;
pub mod listener;
pub mod stats;
pub mod time;

// Internal, crate-only modules
mod cache;
mod engine;
mod entry;
mod index;
mod shared;
mod store;
mod task;

// Re-export the primary user-facing types for convenience
pub use builder::CacheBuilder;
pub use cache::Cache;
pub use entry::EntrySnapshot;
pub use error::{BuildError, CacheError, CacheResult, ListenerError};
pub use listener::{CacheEventListener, EventKind, RemovalLoggingListener};
pub use stats::StatisticsSnapshot;
pub use time::{Clock, SystemClock};
