use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SemaphoreError {
  #[error("invalid semaphore name {name:?}: {reason}")]
  InvalidName { name: String, reason: &'static str },
  #[error("failed to open semaphore {name:?}: {source}")]
  Open {
    name: String,
    #[source]
    source: io::Error,
  },
  #[error("failed to wait on semaphore: {0}")]
  Wait(#[source] io::Error),
  #[error("failed to post semaphore: {0}")]
  Post(#[source] io::Error),
  #[error("failed to read semaphore value: {0}")]
  GetValue(#[source] io::Error),
  #[error("failed to close semaphore: {0}")]
  Close(#[source] io::Error),
  #[error("failed to unlink semaphore {name:?}: {source}")]
  Unlink {
    name: String,
    #[source]
    source: io::Error,
  },
}

impl SemaphoreError {
  /// The OS error behind this failure, if any.
  pub fn os_error(&self) -> Option<&io::Error> {
    match self {
      SemaphoreError::InvalidName { .. } => None,
      SemaphoreError::Open { source, .. } | SemaphoreError::Unlink { source, .. } => Some(source),
      SemaphoreError::Wait(e)
      | SemaphoreError::Post(e)
      | SemaphoreError::GetValue(e)
      | SemaphoreError::Close(e) => Some(e),
    }
  }
}
