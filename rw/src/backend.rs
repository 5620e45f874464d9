use std::io;

mod parking_rw_lock;
#[cfg(unix)]
mod pthread_rw_lock;

pub use self::parking_rw_lock::ParkingRwLock;
#[cfg(unix)]
pub use self::pthread_rw_lock::PthreadRwLock;

#[cfg(test)]
mod tests;

/// Backend used when no backend is named explicitly.
#[cfg(unix)]
pub type DefaultRwLockBackend = PthreadRwLock;
#[cfg(not(unix))]
pub type DefaultRwLockBackend = ParkingRwLock;

/// Read-write lock primitive that a shard wraps.
///
/// Creating a value initializes the primitive and dropping it destroys the primitive.
/// Acquire calls block the calling thread until the primitive grants the hold; there is
/// no timeout. A failed acquire or release is unrecoverable and panics after logging.
pub trait RwLockBackend: Send + Sync + Sized {
  /// Initializes a new primitive.
  ///
  /// # Errors
  ///
  /// Returns the OS error when the primitive could not be created.
  fn try_new() -> io::Result<Self>;

  /// Blocks until a shared hold is granted.
  fn acquire_shared(&self);

  /// Takes a shared hold if it is available right now.
  fn try_acquire_shared(&self) -> bool;

  /// Releases a shared hold.
  ///
  /// # Safety
  ///
  /// The calling thread must currently hold a shared hold taken through
  /// [`acquire_shared`](Self::acquire_shared) or [`try_acquire_shared`](Self::try_acquire_shared).
  unsafe fn release_shared(&self);

  /// Blocks until the exclusive hold is granted.
  fn acquire_exclusive(&self);

  /// Takes the exclusive hold if it is available right now.
  fn try_acquire_exclusive(&self) -> bool;

  /// Releases the exclusive hold.
  ///
  /// # Safety
  ///
  /// The calling thread must currently hold the exclusive hold taken through
  /// [`acquire_exclusive`](Self::acquire_exclusive) or
  /// [`try_acquire_exclusive`](Self::try_acquire_exclusive).
  unsafe fn release_exclusive(&self);
}
