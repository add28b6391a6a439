mod common;

use common::manual_cache;

use std::time::Duration;

const TTL: Duration = Duration::from_secs(5);

#[test]
fn size_one_cache_keeps_only_the_newest_key() {
  let (cache, _clock) = manual_cache(1, TTL);

  cache.put("key_1", Some("value_1".to_string())).unwrap();
  cache.put("key_2", Some("value_2".to_string())).unwrap();

  assert_eq!(cache.get("key_1").unwrap(), None);
  assert_eq!(cache.get("key_2").unwrap().as_deref(), Some(&"value_2".to_string()));
  assert_eq!(cache.len(), 1);
}

#[test]
fn least_frequent_key_is_the_eviction_victim() {
  let (cache, clock) = manual_cache(100, TTL);

  for i in 0..100 {
    cache.put(&format!("key_{i}"), Some(format!("value_{i}"))).unwrap();
  }
  clock.advance(Duration::from_millis(1));
  // Refresh every key except key_99, leaving it alone at frequency 1.
  for i in 0..99 {
    cache.get(&format!("key_{i}")).unwrap();
  }

  cache.put("key_100", Some("value_100".to_string())).unwrap();

  assert_eq!(cache.get("key_99").unwrap(), None);
  assert_eq!(cache.len(), 100);
  assert_eq!(cache.statistics().eviction_count, 1);
}

#[test]
fn frequency_ties_break_on_oldest_access() {
  let (cache, clock) = manual_cache(2, TTL);

  cache.put("old", Some("v".to_string())).unwrap();
  clock.advance(Duration::from_millis(10));
  cache.put("young", Some("v".to_string())).unwrap();
  clock.advance(Duration::from_millis(10));

  // Both entries sit at frequency 1; "old" has the older access time.
  cache.put("newcomer", Some("v".to_string())).unwrap();

  assert_eq!(cache.get("old").unwrap(), None);
  assert!(cache.contains_key("young"));
  assert!(cache.contains_key("newcomer"));
}

#[test]
fn full_ties_break_on_key_order() {
  let (cache, _clock) = manual_cache(2, TTL);

  // Same frequency, same access instant: the smaller key loses.
  cache.put("b", Some("v".to_string())).unwrap();
  cache.put("a", Some("v".to_string())).unwrap();

  cache.put("c", Some("v".to_string())).unwrap();

  assert_eq!(cache.get("a").unwrap(), None);
  assert!(cache.contains_key("b"));
  assert!(cache.contains_key("c"));
}

#[test]
fn updates_never_trigger_eviction() {
  let (cache, _clock) = manual_cache(2, TTL);

  cache.put("key_1", Some("v1".to_string())).unwrap();
  cache.put("key_2", Some("v2".to_string())).unwrap();

  // The cache is at capacity; updating must not evict anything.
  cache.put("key_1", Some("v1b".to_string())).unwrap();
  cache.put("key_2", Some("v2b".to_string())).unwrap();

  assert_eq!(cache.len(), 2);
  assert_eq!(cache.statistics().eviction_count, 0);
}

#[test]
fn a_get_promotes_an_entry_out_of_the_victim_slot() {
  let (cache, clock) = manual_cache(2, TTL);

  cache.put("key_1", Some("v1".to_string())).unwrap();
  clock.advance(Duration::from_millis(1));
  cache.put("key_2", Some("v2".to_string())).unwrap();
  clock.advance(Duration::from_millis(1));

  // key_1 would be the victim (oldest at frequency 1); reading it promotes
  // it to frequency 2, so key_2 becomes the minimum.
  cache.get("key_1").unwrap();
  cache.put("key_3", Some("v3".to_string())).unwrap();

  assert!(cache.contains_key("key_1"));
  assert_eq!(cache.get("key_2").unwrap(), None);
  assert!(cache.contains_key("key_3"));
}

#[test]
fn size_bound_holds_across_a_hundred_inserts() {
  let (cache, _clock) = manual_cache(1, TTL);

  for i in 0..100 {
    cache.put(&format!("key_{i}"), Some(format!("value_{i}"))).unwrap();
    assert_eq!(cache.len(), 1);
  }

  // One survivor, ninety-nine least-frequency evictions.
  assert!(cache.contains_key("key_99"));
  assert_eq!(cache.statistics().eviction_count, 99);
}
