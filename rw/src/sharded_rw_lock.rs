use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use crate::backend::{DefaultRwLockBackend, RwLockBackend};
use crate::config::Config;
use crate::hasher::{Fnv1aKeyHasher, KeyHasher};
use crate::rw_lock_error::RwLockError;
use crate::shard::Shard;


/// A read-write lock split into a fixed number of shards selected by key hash.
///
/// Every keyed call resolves `hash(key) % shard_count` and operates on that shard only.
/// Distinct keys that land on the same shard contend with each other; raising the shard
/// count lowers that false contention at the cost of more primitives. Nothing is tracked
/// about which keys are currently held.
///
/// All acquire calls block the calling thread without a timeout. Holds on different shards
/// are fully independent, and fairness within a shard is whatever the backend provides.
///
/// The shard count is fixed at construction, so a key maps to the same shard for the
/// lifetime of the lock.
pub struct ShardedRwLock<B = DefaultRwLockBackend, H = Fnv1aKeyHasher>
where
  B: RwLockBackend,
  H: KeyHasher, {
  shards: Box<[Shard<B>]>,
  hasher: H,
}

impl ShardedRwLock {
  /// Creates a lock with `shard_count` shards on the default backend, routed by FNV-1a.
  ///
  /// # Errors
  ///
  /// [`RwLockError::InvalidShardCount`] when `shard_count` is zero, and
  /// [`RwLockError::Init`] when a shard primitive could not be created. In the latter case
  /// the shards created so far are destroyed before returning.
  pub fn new(shard_count: usize) -> Result<Self, RwLockError> {
    Self::with_hasher(shard_count, Fnv1aKeyHasher)
  }

  pub fn from_config(config: &Config) -> Result<Self, RwLockError> {
    Self::new(config.get_shard_count())
  }
}

impl<B: RwLockBackend> ShardedRwLock<B, Fnv1aKeyHasher> {
  pub fn with_backend(shard_count: usize) -> Result<Self, RwLockError> {
    Self::with_hasher(shard_count, Fnv1aKeyHasher)
  }
}

impl<B, H> ShardedRwLock<B, H>
where
  B: RwLockBackend,
  H: KeyHasher,
{
  pub fn with_hasher(shard_count: usize, hasher: H) -> Result<Self, RwLockError> {
    if shard_count == 0 {
      return Err(RwLockError::of_invalid_shard_count(shard_count));
    }

    let mut shards = Vec::with_capacity(shard_count);
    for index in 0..shard_count {
      match Shard::try_new() {
        Ok(shard) => shards.push(shard),
        Err(source) => {
          tracing::error!(
            "ShardedRwLock: shard {} failed to initialize, destroying {} created shards: {}",
            index,
            shards.len(),
            source
          );
          drop(shards);
          return Err(RwLockError::of_init(index, source));
        }
      }
    }

    tracing::debug!("ShardedRwLock: created with shard_count = {}", shard_count);
    Ok(Self {
      shards: shards.into_boxed_slice(),
      hasher,
    })
  }

  pub fn shard_count(&self) -> usize {
    self.shards.len()
  }

  /// Index of the shard that `key` routes to.
  pub fn shard_index(&self, key: impl AsRef<[u8]>) -> usize {
    let hash = self.hasher.hash_key(key.as_ref());
    (u64::from(hash) % self.shards.len() as u64) as usize
  }

  fn get_shard(&self, key: impl AsRef<[u8]>) -> (usize, &Shard<B>) {
    let index = self.shard_index(key);
    (index, &self.shards[index])
  }

  /// Blocks until a read lock is held on the shard for `key`.
  ///
  /// Pair it with [`read_unlock`](Self::read_unlock) on an equivalent key, or use
  /// [`read`](Self::read) to get a guard that releases on drop.
  pub fn read_lock(&self, key: impl AsRef<[u8]>) {
    self.get_shard(key).1.read_lock();
  }

  pub fn try_read_lock(&self, key: impl AsRef<[u8]>) -> bool {
    self.get_shard(key).1.try_read_lock()
  }

  /// Releases a read lock taken with [`read_lock`](Self::read_lock).
  ///
  /// # Safety
  ///
  /// The calling thread must hold a read lock previously taken through this lock with a key
  /// that routes to the same shard, and must not release it twice.
  pub unsafe fn read_unlock(&self, key: impl AsRef<[u8]>) {
    unsafe { self.get_shard(key).1.read_unlock() }
  }

  /// Blocks until the write lock is held on the shard for `key`.
  pub fn write_lock(&self, key: impl AsRef<[u8]>) {
    self.get_shard(key).1.write_lock();
  }

  pub fn try_write_lock(&self, key: impl AsRef<[u8]>) -> bool {
    self.get_shard(key).1.try_write_lock()
  }

  /// Releases a write lock taken with [`write_lock`](Self::write_lock).
  ///
  /// # Safety
  ///
  /// The calling thread must hold the write lock previously taken through this lock with a
  /// key that routes to the same shard, and must not release it twice.
  pub unsafe fn write_unlock(&self, key: impl AsRef<[u8]>) {
    unsafe { self.get_shard(key).1.write_unlock() }
  }

  pub fn read(&self, key: impl AsRef<[u8]>) -> ShardReadGuard<'_, B> {
    let (index, shard) = self.get_shard(key);
    shard.read_lock();
    ShardReadGuard::new(shard, index)
  }

  pub fn try_read(&self, key: impl AsRef<[u8]>) -> Option<ShardReadGuard<'_, B>> {
    let (index, shard) = self.get_shard(key);
    shard.try_read_lock().then(|| ShardReadGuard::new(shard, index))
  }

  pub fn write(&self, key: impl AsRef<[u8]>) -> ShardWriteGuard<'_, B> {
    let (index, shard) = self.get_shard(key);
    shard.write_lock();
    ShardWriteGuard::new(shard, index)
  }

  pub fn try_write(&self, key: impl AsRef<[u8]>) -> Option<ShardWriteGuard<'_, B>> {
    let (index, shard) = self.get_shard(key);
    shard.try_write_lock().then(|| ShardWriteGuard::new(shard, index))
  }

  /// Destroys every shard primitive.
  ///
  /// Dropping the lock does the same; this only makes the teardown point explicit.
  pub fn close(self) {
    drop(self);
  }
}

impl<B, H> Drop for ShardedRwLock<B, H>
where
  B: RwLockBackend,
  H: KeyHasher,
{
  fn drop(&mut self) {
    tracing::debug!("ShardedRwLock: destroying {} shards", self.shards.len());
  }
}

impl<B, H> Debug for ShardedRwLock<B, H>
where
  B: RwLockBackend,
  H: KeyHasher + Debug,
{
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ShardedRwLock")
      .field("shard_count", &self.shards.len())
      .field("hasher", &self.hasher)
      .finish()
  }
}

/// Read hold on one shard, released on drop.
///
/// Not `Send`: the hold must be released by the thread that took it.
#[must_use = "the read lock is released as soon as the guard is dropped"]
pub struct ShardReadGuard<'a, B: RwLockBackend> {
  shard: &'a Shard<B>,
  index: usize,
  _not_send: PhantomData<*const ()>,
}

impl<'a, B: RwLockBackend> ShardReadGuard<'a, B> {
  fn new(shard: &'a Shard<B>, index: usize) -> Self {
    Self {
      shard,
      index,
      _not_send: PhantomData,
    }
  }

  pub fn shard_index(&self) -> usize {
    self.index
  }
}

impl<B: RwLockBackend> Drop for ShardReadGuard<'_, B> {
  fn drop(&mut self) {
    // SAFETY: the guard only exists while this thread holds the read lock.
    unsafe { self.shard.read_unlock() }
  }
}

impl<B: RwLockBackend> Debug for ShardReadGuard<'_, B> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ShardReadGuard").field("shard_index", &self.index).finish()
  }
}

/// Write hold on one shard, released on drop.
#[must_use = "the write lock is released as soon as the guard is dropped"]
pub struct ShardWriteGuard<'a, B: RwLockBackend> {
  shard: &'a Shard<B>,
  index: usize,
  _not_send: PhantomData<*const ()>,
}

impl<'a, B: RwLockBackend> ShardWriteGuard<'a, B> {
  fn new(shard: &'a Shard<B>, index: usize) -> Self {
    Self {
      shard,
      index,
      _not_send: PhantomData,
    }
  }

  pub fn shard_index(&self) -> usize {
    self.index
  }
}

impl<B: RwLockBackend> Drop for ShardWriteGuard<'_, B> {
  fn drop(&mut self) {
    // SAFETY: the guard only exists while this thread holds the write lock.
    unsafe { self.shard.write_unlock() }
  }
}

impl<B: RwLockBackend> Debug for ShardWriteGuard<'_, B> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ShardWriteGuard").field("shard_index", &self.index).finish()
  }
}

static_assertions::assert_impl_all!(ShardedRwLock: Send, Sync);
static_assertions::assert_not_impl_any!(ShardReadGuard<'static, DefaultRwLockBackend>: Send);
static_assertions::assert_not_impl_any!(ShardWriteGuard<'static, DefaultRwLockBackend>: Send);
