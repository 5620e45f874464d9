use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use tracing_subscriber::EnvFilter;

use super::*;

fn init_tracing() {
  env::set_var("RUST_LOG", "debug");
  let _ = tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .try_init();
}

fn exclusive_blocks_everything<B: RwLockBackend>() {
  let lock = B::try_new().expect("backend init");

  lock.acquire_exclusive();
  thread::scope(|s| {
    s.spawn(|| {
      assert!(!lock.try_acquire_shared(), "排他ロック中は共有ロックを取れない想定");
      assert!(!lock.try_acquire_exclusive(), "排他ロック中は排他ロックを取れない想定");
    });
  });
  unsafe { lock.release_exclusive() };

  assert!(lock.try_acquire_exclusive());
  unsafe { lock.release_exclusive() };
}

fn shared_holds_coexist<B: RwLockBackend>() {
  let lock = B::try_new().expect("backend init");

  lock.acquire_shared();
  thread::scope(|s| {
    s.spawn(|| {
      assert!(lock.try_acquire_shared());
      assert!(!lock.try_acquire_exclusive());
      unsafe { lock.release_shared() };
    });
  });
  unsafe { lock.release_shared() };

  assert!(lock.try_acquire_exclusive());
  unsafe { lock.release_exclusive() };
}

fn writers_serialize<B: RwLockBackend + 'static>() {
  let lock = Arc::new(B::try_new().expect("backend init"));
  let active = Arc::new(AtomicUsize::new(0));
  let total = Arc::new(AtomicUsize::new(0));

  let handles = (0..4)
    .map(|_| {
      let lock = lock.clone();
      let active = active.clone();
      let total = total.clone();
      thread::spawn(move || {
        for _ in 0..500 {
          lock.acquire_exclusive();
          assert_eq!(active.fetch_add(1, Ordering::SeqCst), 0);
          total.fetch_add(1, Ordering::SeqCst);
          active.fetch_sub(1, Ordering::SeqCst);
          unsafe { lock.release_exclusive() };
        }
      })
    })
    .collect::<Vec<_>>();

  for handle in handles {
    handle.join().expect("writer thread panicked");
  }
  assert_eq!(total.load(Ordering::SeqCst), 2000);
}

#[test]
fn test_parking_exclusive_blocks_everything() {
  init_tracing();
  exclusive_blocks_everything::<ParkingRwLock>();
}

#[test]
fn test_parking_shared_holds_coexist() {
  init_tracing();
  shared_holds_coexist::<ParkingRwLock>();
}

#[test]
fn test_parking_writers_serialize() {
  init_tracing();
  writers_serialize::<ParkingRwLock>();
}

#[cfg(unix)]
#[test]
fn test_pthread_exclusive_blocks_everything() {
  init_tracing();
  exclusive_blocks_everything::<PthreadRwLock>();
}

#[cfg(unix)]
#[test]
fn test_pthread_shared_holds_coexist() {
  init_tracing();
  shared_holds_coexist::<PthreadRwLock>();
}

#[cfg(unix)]
#[test]
fn test_pthread_writers_serialize() {
  init_tracing();
  writers_serialize::<PthreadRwLock>();
}

#[cfg(unix)]
#[test]
fn test_pthread_many_locks_init_and_destroy() {
  init_tracing();
  let locks = (0..256)
    .map(|_| PthreadRwLock::try_new())
    .collect::<Result<Vec<_>, _>>()
    .expect("pthread rwlock init");
  for lock in &locks {
    lock.acquire_shared();
    unsafe { lock.release_shared() };
  }
  drop(locks);
}

#[cfg(target_os = "linux")]
#[test]
#[should_panic(expected = "pthread_rwlock_wrlock failed")]
fn test_pthread_relock_on_same_thread_is_fatal() {
  init_tracing();
  let lock = PthreadRwLock::try_new().expect("pthread rwlock init");
  lock.acquire_exclusive();
  // 同一スレッドでの再取得は EDEADLK となり、処理を続けずに panic する想定
  lock.acquire_exclusive();
}

#[cfg(unix)]
#[test]
fn test_pthread_try_relock_on_same_thread_reports_busy() {
  init_tracing();
  let lock = PthreadRwLock::try_new().expect("pthread rwlock init");
  lock.acquire_exclusive();
  assert!(!lock.try_acquire_exclusive(), "保持中の再取得は panic せず false を返す想定");
  assert!(!lock.try_acquire_shared());
  unsafe { lock.release_exclusive() };

  assert!(lock.try_acquire_exclusive());
  unsafe { lock.release_exclusive() };
}
