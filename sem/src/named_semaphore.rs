use std::ffi::CString;
use std::fmt::{Debug, Formatter};
use std::io;
use std::ptr;

use crate::semaphore_error::SemaphoreError;


/// Owner read/write.
pub const DEFAULT_PERMISSIONS: libc::mode_t = 0o600;

/// How [`NamedSemaphore::open_with_mode`] treats an existing name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OpenMode {
  /// Create the semaphore, or open it with its current count if the name already exists.
  #[default]
  CreateOrOpen,
  /// Create the semaphore and fail with `EEXIST` if the name already exists.
  CreateExclusive,
}

impl OpenMode {
  fn flags(self) -> libc::c_int {
    match self {
      OpenMode::CreateOrOpen => libc::O_CREAT,
      OpenMode::CreateExclusive => libc::O_CREAT | libc::O_EXCL,
    }
  }
}

/// A POSIX named counting semaphore.
///
/// The handle is valid until [`close`](Self::close) or drop. Closing only releases this
/// process's handle; the name stays in the OS namespace until [`unlink`] removes it, and
/// unlinking does not invalidate handles that are already open.
///
/// `wait` blocks the calling thread without a timeout. Nothing here retries on failure.
pub struct NamedSemaphore {
  name: String,
  handle: *mut libc::sem_t,
}

// SAFETY: sem_wait/sem_post/sem_trywait are thread-safe and the handle is only released
// by close or drop, both of which need exclusive ownership.
unsafe impl Send for NamedSemaphore {}
unsafe impl Sync for NamedSemaphore {}

/// Validates `name` and returns it with a leading `/` alongside its C form.
fn normalize_name(name: &str) -> Result<(String, CString), SemaphoreError> {
  let invalid = |reason| SemaphoreError::InvalidName {
    name: name.to_string(),
    reason,
  };
  let normalized = if name.starts_with('/') {
    name.to_string()
  } else {
    format!("/{}", name)
  };
  if normalized.len() == 1 {
    return Err(invalid("name is empty"));
  }
  if normalized[1..].contains('/') {
    return Err(invalid("name must not contain '/' after the leading one"));
  }
  let c_name = CString::new(normalized.clone()).map_err(|_| invalid("name contains a NUL byte"))?;
  Ok((normalized, c_name))
}

impl NamedSemaphore {
  /// Creates the semaphore `name` with `initial_value`, or opens it if it already exists.
  ///
  /// An existing semaphore keeps its current count; `initial_value` only applies on
  /// creation. A name without a leading `/` gets one prepended.
  pub fn open(name: &str, initial_value: u32) -> Result<Self, SemaphoreError> {
    Self::open_with_mode(name, initial_value, OpenMode::CreateOrOpen)
  }

  pub fn open_with_mode(name: &str, initial_value: u32, mode: OpenMode) -> Result<Self, SemaphoreError> {
    let (name, c_name) = normalize_name(name)?;
    let handle = unsafe {
      libc::sem_open(
        c_name.as_ptr(),
        mode.flags(),
        DEFAULT_PERMISSIONS as libc::c_uint,
        initial_value as libc::c_uint,
      )
    };
    if handle == libc::SEM_FAILED {
      let source = io::Error::last_os_error();
      tracing::debug!("NamedSemaphore: sem_open {} failed: {}", name, source);
      return Err(SemaphoreError::Open { name, source });
    }
    tracing::debug!(
      "NamedSemaphore: opened {}: initial_value = {}, mode = {:?}",
      name,
      initial_value,
      mode
    );
    Ok(Self { name, handle })
  }

  /// Removes `name` from the OS namespace. See [`unlink`].
  pub fn unlink(name: &str) -> Result<(), SemaphoreError> {
    unlink(name)
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Blocks until the count is positive, then decrements it.
  ///
  /// An interrupted call (`EINTR`) is returned as an error like any other failure.
  pub fn wait(&self) -> Result<(), SemaphoreError> {
    if unsafe { libc::sem_wait(self.handle) } == -1 {
      return Err(SemaphoreError::Wait(io::Error::last_os_error()));
    }
    Ok(())
  }

  /// Decrements the count if it is positive right now.
  pub fn try_wait(&self) -> Result<bool, SemaphoreError> {
    if unsafe { libc::sem_trywait(self.handle) } == -1 {
      let err = io::Error::last_os_error();
      if err.raw_os_error() == Some(libc::EAGAIN) {
        return Ok(false);
      }
      return Err(SemaphoreError::Wait(err));
    }
    Ok(true)
  }

  /// Increments the count, waking at most one blocked waiter.
  pub fn post(&self) -> Result<(), SemaphoreError> {
    if unsafe { libc::sem_post(self.handle) } == -1 {
      return Err(SemaphoreError::Post(io::Error::last_os_error()));
    }
    Ok(())
  }

  /// Current count.
  #[cfg(any(target_os = "linux", target_os = "android"))]
  pub fn value(&self) -> Result<i32, SemaphoreError> {
    let mut value: libc::c_int = 0;
    if unsafe { libc::sem_getvalue(self.handle, &mut value) } == -1 {
      return Err(SemaphoreError::GetValue(io::Error::last_os_error()));
    }
    Ok(value)
  }

  /// Releases this process's handle. The semaphore itself stays until unlinked.
  pub fn close(mut self) -> Result<(), SemaphoreError> {
    let handle = std::mem::replace(&mut self.handle, ptr::null_mut());
    if unsafe { libc::sem_close(handle) } == -1 {
      return Err(SemaphoreError::Close(io::Error::last_os_error()));
    }
    tracing::debug!("NamedSemaphore: closed {}", self.name);
    Ok(())
  }
}

impl Drop for NamedSemaphore {
  fn drop(&mut self) {
    if self.handle.is_null() {
      return;
    }
    if unsafe { libc::sem_close(self.handle) } == -1 {
      tracing::warn!(
        "NamedSemaphore: sem_close {} failed: {}",
        self.name,
        io::Error::last_os_error()
      );
    }
  }
}

impl Debug for NamedSemaphore {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("NamedSemaphore").field("name", &self.name).finish()
  }
}

/// Removes the semaphore `name` from the OS namespace.
///
/// Handles that are already open keep working until closed, but later opens of `name`
/// create a new semaphore. Fails with `ENOENT` when no such semaphore exists.
pub fn unlink(name: &str) -> Result<(), SemaphoreError> {
  let (name, c_name) = normalize_name(name)?;
  if unsafe { libc::sem_unlink(c_name.as_ptr()) } == -1 {
    let source = io::Error::last_os_error();
    return Err(SemaphoreError::Unlink { name, source });
  }
  tracing::debug!("NamedSemaphore: unlinked {}", name);
  Ok(())
}

static_assertions::assert_impl_all!(NamedSemaphore: Send, Sync);
