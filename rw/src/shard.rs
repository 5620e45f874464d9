use std::fmt::{Debug, Formatter};
use std::io;

use crate::backend::{DefaultRwLockBackend, RwLockBackend};

/// One partition of a sharded lock: a single backend primitive and nothing else.
pub struct Shard<B: RwLockBackend = DefaultRwLockBackend> {
  backend: B,
}

impl<B: RwLockBackend> Shard<B> {
  pub fn try_new() -> io::Result<Self> {
    Ok(Self { backend: B::try_new()? })
  }

  pub fn read_lock(&self) {
    self.backend.acquire_shared();
  }

  pub fn try_read_lock(&self) -> bool {
    self.backend.try_acquire_shared()
  }

  /// # Safety
  ///
  /// The calling thread must hold a read lock on this shard.
  pub unsafe fn read_unlock(&self) {
    unsafe { self.backend.release_shared() }
  }

  pub fn write_lock(&self) {
    self.backend.acquire_exclusive();
  }

  pub fn try_write_lock(&self) -> bool {
    self.backend.try_acquire_exclusive()
  }

  /// # Safety
  ///
  /// The calling thread must hold the write lock on this shard.
  pub unsafe fn write_unlock(&self) {
    unsafe { self.backend.release_exclusive() }
  }
}

impl<B: RwLockBackend + Debug> Debug for Shard<B> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Shard").field("backend", &self.backend).finish()
  }
}
