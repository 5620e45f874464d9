use std::cell::UnsafeCell;
use std::fmt::{Debug, Formatter};
use std::io;
use std::ptr;

use crate::backend::RwLockBackend;

/// Backend over a POSIX `pthread_rwlock_t`.
///
/// The lock lives on the heap so its address never changes after `pthread_rwlock_init`.
/// POSIX requires the thread that released a hold to be the one that took it.
pub struct PthreadRwLock {
  inner: Box<UnsafeCell<libc::pthread_rwlock_t>>,
}

// SAFETY: pthread rwlocks are designed to be shared between threads and are only
// touched through the pthread_rwlock_* functions.
unsafe impl Send for PthreadRwLock {}
unsafe impl Sync for PthreadRwLock {}

impl PthreadRwLock {
  fn raw(&self) -> *mut libc::pthread_rwlock_t {
    self.inner.get()
  }

  fn check(op: &'static str, rc: libc::c_int) {
    if rc != 0 {
      let err = io::Error::from_raw_os_error(rc);
      tracing::error!("PthreadRwLock: {} failed: {}", op, err);
      panic!("PthreadRwLock: {} failed: {}", op, err);
    }
  }

  fn check_try(op: &'static str, rc: libc::c_int) -> bool {
    match rc {
      0 => true,
      libc::EBUSY | libc::EAGAIN | libc::EDEADLK => false,
      rc => {
        Self::check(op, rc);
        false
      }
    }
  }
}

impl Debug for PthreadRwLock {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PthreadRwLock").field("addr", &self.raw()).finish()
  }
}

impl RwLockBackend for PthreadRwLock {
  fn try_new() -> io::Result<Self> {
    let inner = Box::new(UnsafeCell::new(libc::PTHREAD_RWLOCK_INITIALIZER));
    let rc = unsafe { libc::pthread_rwlock_init(inner.get(), ptr::null()) };
    if rc != 0 {
      return Err(io::Error::from_raw_os_error(rc));
    }
    Ok(Self { inner })
  }

  fn acquire_shared(&self) {
    let rc = unsafe { libc::pthread_rwlock_rdlock(self.raw()) };
    Self::check("pthread_rwlock_rdlock", rc);
  }

  fn try_acquire_shared(&self) -> bool {
    let rc = unsafe { libc::pthread_rwlock_tryrdlock(self.raw()) };
    Self::check_try("pthread_rwlock_tryrdlock", rc)
  }

  unsafe fn release_shared(&self) {
    let rc = unsafe { libc::pthread_rwlock_unlock(self.raw()) };
    Self::check("pthread_rwlock_unlock", rc);
  }

  fn acquire_exclusive(&self) {
    let rc = unsafe { libc::pthread_rwlock_wrlock(self.raw()) };
    Self::check("pthread_rwlock_wrlock", rc);
  }

  fn try_acquire_exclusive(&self) -> bool {
    let rc = unsafe { libc::pthread_rwlock_trywrlock(self.raw()) };
    Self::check_try("pthread_rwlock_trywrlock", rc)
  }

  unsafe fn release_exclusive(&self) {
    let rc = unsafe { libc::pthread_rwlock_unlock(self.raw()) };
    Self::check("pthread_rwlock_unlock", rc);
  }
}

impl Drop for PthreadRwLock {
  fn drop(&mut self) {
    let rc = unsafe { libc::pthread_rwlock_destroy(self.raw()) };
    if rc != 0 {
      tracing::warn!(
        "PthreadRwLock: pthread_rwlock_destroy failed: {}",
        io::Error::from_raw_os_error(rc)
      );
    }
  }
}
