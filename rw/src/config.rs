use std::num::NonZeroUsize;
use std::thread;

use crate::config_option::ConfigOption;

#[cfg(test)]
mod tests;

/// Shards per available CPU used by [`default_shard_count`].
pub const DEFAULT_SHARDS_PER_CPU: usize = 64;

fn available_cpus() -> usize {
  thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1)
}

/// Available parallelism times [`DEFAULT_SHARDS_PER_CPU`].
pub fn default_shard_count() -> usize {
  shard_count_for(DEFAULT_SHARDS_PER_CPU)
}

fn shard_count_for(shards_per_cpu: usize) -> usize {
  available_cpus().saturating_mul(shards_per_cpu)
}

/// Construction settings for a [`ShardedRwLock`](crate::ShardedRwLock).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  shard_count: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      shard_count: default_shard_count(),
    }
  }
}

impl Config {
  pub fn from_options(options: impl IntoIterator<Item = ConfigOption>) -> Config {
    let mut config = Config::default();
    for option in options {
      option.apply(&mut config);
    }
    config
  }

  pub fn get_shard_count(&self) -> usize {
    self.shard_count
  }

  pub fn set_shard_count(&mut self, shard_count: usize) {
    self.shard_count = shard_count;
  }

  pub fn set_shards_per_cpu(&mut self, shards_per_cpu: usize) {
    self.shard_count = shard_count_for(shards_per_cpu);
  }
}
