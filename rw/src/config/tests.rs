use std::thread;

use super::*;
use crate::{RwLockError, ShardedRwLock};

fn cpus() -> usize {
  thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

#[test]
fn test_default_shard_count_scales_with_parallelism() {
  assert_eq!(default_shard_count(), cpus() * DEFAULT_SHARDS_PER_CPU);
  assert_eq!(Config::default().get_shard_count(), default_shard_count());
}

#[test]
fn test_options_apply_in_order() {
  let config = Config::from_options([
    ConfigOption::with_shards_per_cpu(2),
    ConfigOption::with_shard_count(16),
  ]);
  assert_eq!(config.get_shard_count(), 16);

  let config = Config::from_options([
    ConfigOption::with_shard_count(16),
    ConfigOption::with_shards_per_cpu(2),
  ]);
  assert_eq!(config.get_shard_count(), cpus() * 2);
}

#[test]
fn test_from_config_builds_configured_shards() {
  let config = Config::from_options([ConfigOption::with_shard_count(8)]);
  let lock = ShardedRwLock::from_config(&config).expect("lock init");
  assert_eq!(lock.shard_count(), 8);
}

#[test]
fn test_from_config_rejects_zero_shards() {
  let config = Config::from_options([ConfigOption::with_shards_per_cpu(0)]);
  let result = ShardedRwLock::from_config(&config);
  assert!(matches!(result, Err(RwLockError::InvalidShardCount(0))));
}
