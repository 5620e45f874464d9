//! Sharded read-write lock.
//!
//! A [`ShardedRwLock`] partitions one logical lock into a fixed number of independent
//! read-write locks. Every keyed call is routed to exactly one shard by hashing the key,
//! so callers working on unrelated keys mostly stop contending with each other.

pub mod backend;
pub mod config;
pub mod config_option;
pub mod hasher;
mod rw_lock_error;
pub mod shard;
pub mod sharded_rw_lock;

pub use self::{
  backend::{DefaultRwLockBackend, ParkingRwLock, RwLockBackend},
  config::{default_shard_count, Config, DEFAULT_SHARDS_PER_CPU},
  config_option::ConfigOption,
  hasher::{fnv1a_32, Fnv1aKeyHasher, KeyHasher, SipKeyHasher},
  rw_lock_error::RwLockError,
  shard::Shard,
  sharded_rw_lock::{ShardReadGuard, ShardWriteGuard, ShardedRwLock},
};

#[cfg(unix)]
pub use self::backend::PthreadRwLock;

pub mod prelude {
  pub use super::{
    Config, ConfigOption, DefaultRwLockBackend, Fnv1aKeyHasher, KeyHasher, RwLockBackend, RwLockError,
    ShardReadGuard, ShardWriteGuard, ShardedRwLock,
  };
}
