use lfu_idle_cache::{
  Cache, CacheBuilder, CacheEventListener, Clock, EntrySnapshot, EventKind, ListenerError,
};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A hand-driven clock, advanced explicitly by tests. Plays the role the
/// system clock plays in production, without any sleeping.
#[derive(Debug, Default)]
pub struct MockClock {
  now_millis: AtomicU64,
}

impl MockClock {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn advance(&self, delta: Duration) {
    self
      .now_millis
      .fetch_add(delta.as_millis() as u64, Ordering::SeqCst);
  }
}

impl Clock for MockClock {
  fn now_millis(&self) -> u64 {
    self.now_millis.load(Ordering::SeqCst)
  }
}

/// An interval long enough that the background sweeper never interferes with
/// a mock-clock test; expiration is driven through `clean_up` instead.
pub const IDLE_SWEEPER: Duration = Duration::from_secs(3600);

/// Builds a cache on a mock clock with the background sweeper effectively
/// parked, so tests control both time and sweeping.
pub fn manual_cache(max_size: usize, ttl: Duration) -> (Cache<String>, Arc<MockClock>) {
  let clock = MockClock::new();
  let cache = CacheBuilder::new()
    .max_size(max_size)
    .ttl(ttl)
    .clock(clock.clone())
    .sweep_interval(IDLE_SWEEPER)
    .build()
    .unwrap();
  (cache, clock)
}

/// What a [`RecordingListener`] remembers about one event.
#[derive(Debug, Clone)]
pub struct SeenEvent {
  pub kind: EventKind,
  pub key: String,
  pub frequency: u64,
}

/// Records every event it sees, in order. Clones share one event list, so a
/// test can hand a clone to the builder and keep one for assertions.
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
  events: Arc<Mutex<Vec<SeenEvent>>>,
}

impl RecordingListener {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn kinds(&self) -> Vec<EventKind> {
    self.events.lock().unwrap().iter().map(|event| event.kind).collect()
  }

  pub fn events_for(&self, kind: EventKind) -> Vec<SeenEvent> {
    self
      .events
      .lock()
      .unwrap()
      .iter()
      .filter(|event| event.kind == kind)
      .cloned()
      .collect()
  }

  pub fn keys_for(&self, kind: EventKind) -> Vec<String> {
    self.events_for(kind).into_iter().map(|event| event.key).collect()
  }
}

impl<V> CacheEventListener<V> for RecordingListener {
  fn on_event(&self, kind: EventKind, entry: &EntrySnapshot<V>) -> Result<(), ListenerError> {
    self.events.lock().unwrap().push(SeenEvent {
      kind,
      key: entry.key.to_string(),
      frequency: entry.frequency,
    });
    Ok(())
  }
}

/// Fails on every event with a fixed message.
#[derive(Debug, Clone, Copy)]
pub struct FailingListener;

impl<V> CacheEventListener<V> for FailingListener {
  fn on_event(&self, _kind: EventKind, _entry: &EntrySnapshot<V>) -> Result<(), ListenerError> {
    Err("listener exploded".into())
  }
}
