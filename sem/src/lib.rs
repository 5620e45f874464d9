//! Named counting semaphores shared across processes.
//!
//! A [`NamedSemaphore`] lives in the OS semaphore namespace, not in this process. The
//! entry survives the process that created it until someone calls [`unlink`], so
//! semaphores left behind by a crashed process have to be unlinked by the caller.

#[cfg(unix)]
pub mod named_semaphore;
mod semaphore_error;

#[cfg(unix)]
pub use self::named_semaphore::{unlink, NamedSemaphore, OpenMode};
pub use self::semaphore_error::SemaphoreError;
