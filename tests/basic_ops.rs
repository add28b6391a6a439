mod common;

use common::manual_cache;
use lfu_idle_cache::{Cache, CacheBuilder, CacheError};

use std::time::Duration;

const TTL: Duration = Duration::from_secs(5);

#[test]
fn put_then_get_round_trips() {
  let (cache, _clock) = manual_cache(100, TTL);

  cache.put("key_1", Some("value_1".to_string())).unwrap();

  let returned = cache.get("key_1").unwrap();
  assert_eq!(returned.as_deref(), Some(&"value_1".to_string()));
}

#[test]
fn stored_null_is_indistinguishable_from_a_miss() {
  let (cache, _clock) = manual_cache(100, TTL);

  cache.put("key_1", None).unwrap();

  assert_eq!(cache.get("key_1").unwrap(), None);
  assert_eq!(cache.get("no_such_key").unwrap(), None);
  // The key is cached all the same.
  assert!(cache.contains_key("key_1"));
  assert!(!cache.contains_key("no_such_key"));
}

#[test]
fn update_put_replaces_the_value() {
  let (cache, _clock) = manual_cache(100, TTL);

  cache.put("key_1", Some("old".to_string())).unwrap();
  cache.put("key_1", Some("new".to_string())).unwrap();

  assert_eq!(cache.get("key_1").unwrap().as_deref(), Some(&"new".to_string()));
  assert_eq!(cache.len(), 1);
}

#[test]
fn blank_keys_are_rejected_before_any_mutation() {
  let (cache, _clock) = manual_cache(100, TTL);

  assert!(matches!(cache.put("", Some("v".into())), Err(CacheError::BlankKey)));
  assert!(matches!(cache.put("   ", Some("v".into())), Err(CacheError::BlankKey)));
  assert!(matches!(cache.get(""), Err(CacheError::BlankKey)));
  assert!(matches!(cache.get("\t"), Err(CacheError::BlankKey)));

  assert!(cache.is_empty());
}

#[test]
fn get_on_missing_key_has_no_side_effects() {
  let (cache, _clock) = manual_cache(100, TTL);

  assert_eq!(cache.get("ghost").unwrap(), None);

  assert!(cache.is_empty());
  assert_eq!(cache.statistics().eviction_count, 0);
}

#[test]
fn handles_share_one_cache() {
  let (cache, _clock) = manual_cache(100, TTL);
  let other: Cache<String> = cache.clone();

  cache.put("key_1", Some("value_1".to_string())).unwrap();
  assert_eq!(other.get("key_1").unwrap().as_deref(), Some(&"value_1".to_string()));
}

#[test]
fn builder_rejects_zero_options() {
  assert!(CacheBuilder::<String>::new().max_size(0).build().is_err());
  assert!(CacheBuilder::<String>::new().ttl(Duration::ZERO).build().is_err());
}

#[test]
fn concurrency_hint_is_advisory() {
  // Any hint builds a working cache; the value only shapes sharding.
  let cache = CacheBuilder::<u32>::new().concurrency(6).build().unwrap();
  for i in 0..32 {
    cache.put(&format!("key_{i}"), Some(i)).unwrap();
  }
  assert_eq!(cache.len(), 32);
  for i in 0..32 {
    assert_eq!(cache.get(&format!("key_{i}")).unwrap().as_deref(), Some(&i));
  }
}
