use std::fmt::{Debug, Formatter};
use std::io;

use parking_lot::lock_api::RawRwLock as RawRwLockApi;
use parking_lot::RawRwLock;

use crate::backend::RwLockBackend;

/// Portable backend built on `parking_lot`'s raw rwlock.
pub struct ParkingRwLock {
  raw: RawRwLock,
}

impl Debug for ParkingRwLock {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ParkingRwLock")
      .field("locked", &self.raw.is_locked())
      .finish()
  }
}

impl RwLockBackend for ParkingRwLock {
  fn try_new() -> io::Result<Self> {
    Ok(Self {
      raw: <RawRwLock as RawRwLockApi>::INIT,
    })
  }

  fn acquire_shared(&self) {
    self.raw.lock_shared();
  }

  fn try_acquire_shared(&self) -> bool {
    self.raw.try_lock_shared()
  }

  unsafe fn release_shared(&self) {
    unsafe { self.raw.unlock_shared() }
  }

  fn acquire_exclusive(&self) {
    self.raw.lock_exclusive();
  }

  fn try_acquire_exclusive(&self) -> bool {
    self.raw.try_lock_exclusive()
  }

  unsafe fn release_exclusive(&self) {
    unsafe { self.raw.unlock_exclusive() }
  }
}

static_assertions::assert_impl_all!(ParkingRwLock: Send, Sync);
