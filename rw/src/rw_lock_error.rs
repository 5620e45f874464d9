use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RwLockError {
  #[error("shard count must be positive, got {0}")]
  InvalidShardCount(usize),
  #[error("failed to initialize rwlock for shard {shard}: {source}")]
  Init {
    shard: usize,
    #[source]
    source: io::Error,
  },
}

impl RwLockError {
  pub fn of_invalid_shard_count(shard_count: usize) -> Self {
    RwLockError::InvalidShardCount(shard_count)
  }

  pub fn of_init(shard: usize, source: io::Error) -> Self {
    RwLockError::Init { shard, source }
  }
}
