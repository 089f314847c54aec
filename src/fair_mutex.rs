//! Fair mutex: contention-free fast path plus FIFO hand-off slow path.

mod enter_future;
mod lock_guard;


pub use enter_future::EnterFuture;
pub use lock_guard::LockGuard;

use core::{future::Future, time::Duration};
use std::{collections::VecDeque, sync::Arc};

use portable_atomic::{AtomicBool, Ordering};
use spin::Mutex;
use tracing::trace;

use crate::{
  cancel::CancelToken,
  one_shot_event::OneShotEvent,
  raw_lock::{EventRawLock, RawLock},
  timeout::Timeout,
};

/// FIFO-fair mutual exclusion with blocking, timed, cancellable, and
/// task-suspending acquisition.
///
/// An uncontended acquisition is a single atomic exchange. A contended one
/// enqueues a [`OneShotEvent`] and consumes it either by blocking the thread
/// or by suspending the task. Release hands ownership directly to the oldest
/// live waiter without the contention flag ever passing through "free",
/// which is what keeps [`FairMutex::enter_immediately`] from jumping the
/// queue.
///
/// `L` is the raw lock queued waiters park on. The default blocks on an OS
/// event; [`FairMutex::with_raw_lock`] selects a spin variant instead, which
/// trades CPU for wake-up latency under short holds.
///
/// Non-reentrant: a second `enter` from the current owner deadlocks.
pub struct FairMutex<L = EventRawLock>
where
  L: RawLock, {
  contended: AtomicBool,
  queue:     Mutex<VecDeque<Arc<OneShotEvent<L>>>>,
}

impl FairMutex<EventRawLock> {
  /// Creates an unowned mutex whose waiters park on [`EventRawLock`] batons.
  #[must_use]
  pub const fn new() -> Self {
    Self::with_raw_lock()
  }
}

impl<L> FairMutex<L>
where
  L: RawLock,
{
  /// Creates an unowned mutex parked on batons of the chosen raw lock type.
  #[must_use]
  pub const fn with_raw_lock() -> Self {
    Self { contended: AtomicBool::new(false), queue: Mutex::new(VecDeque::new()) }
  }

  /// Acquires the mutex, blocking until ownership arrives.
  pub fn enter(&self) -> LockGuard<'_, L> {
    self.enter_with(Timeout::Never, &CancelToken::none())
  }

  /// Acquires the mutex, giving up once `limit` elapses.
  pub fn enter_for(&self, limit: Duration) -> LockGuard<'_, L> {
    self.enter_with(Timeout::After(limit), &CancelToken::none())
  }

  /// Acquires the mutex, giving up when `token` is cancelled.
  pub fn enter_cancellable(&self, token: &CancelToken) -> LockGuard<'_, L> {
    self.enter_with(Timeout::Never, token)
  }

  /// Acquires the mutex, giving up on timeout expiry or cancellation.
  ///
  /// The uncontended fast path is a single atomic exchange and ignores both
  /// the budget and the token; only the queued slow path polls them. A
  /// zero budget never enqueues: contention fails immediately.
  pub fn enter_with(&self, timeout: Timeout, token: &CancelToken) -> LockGuard<'_, L> {
    if self.try_claim() {
      return LockGuard::acquired(self);
    }
    if token.is_cancelled() || timeout.is_zero() {
      return LockGuard::failed();
    }

    let event = Arc::new(OneShotEvent::with_raw_lock());
    self.enqueue(event.clone());
    if event.wait(timeout, token) {
      return LockGuard::acquired(self);
    }
    // The abandoned event stays queued; release skips it lazily. If the
    // hand-off already won the completion race, ownership has in fact
    // arrived and must not be dropped on the floor.
    if !event.dispose() && event.result() {
      return LockGuard::acquired(self);
    }
    trace!("queued acquisition abandoned");
    LockGuard::failed()
  }

  /// Acquires the mutex by suspending the calling task instead of blocking
  /// the thread; no thread is occupied while queued.
  ///
  /// The future resolves to a succeeded guard on whichever execution
  /// context performs the completing release, not necessarily the caller's.
  pub fn enter_async(&self) -> EnterFuture<'_, L> {
    EnterFuture::new(self)
  }

  /// Acquires the mutex only if it is free right now; never blocks and
  /// never enqueues.
  pub fn enter_immediately(&self) -> LockGuard<'_, L> {
    if self.try_claim() { LockGuard::acquired(self) } else { LockGuard::failed() }
  }

  /// Runs `f` under the lock, blocking until ownership arrives.
  pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
    let _guard = self.enter();
    f()
  }

  /// Runs `f` under the lock if it is acquired before the budget elapses or
  /// the token is cancelled; `None` means `f` never ran.
  pub fn run_with<R>(&self, timeout: Timeout, token: &CancelToken, f: impl FnOnce() -> R) -> Option<R> {
    let guard = self.enter_with(timeout, token);
    guard.succeeded().then(f)
  }

  /// Runs `f` under the lock, suspending until ownership arrives.
  pub async fn run_async<R>(&self, f: impl FnOnce() -> R) -> R {
    let _guard = self.enter_async().await;
    f()
  }

  /// Runs `f` under the lock only if the mutex is free right now; `None`
  /// means `f` never ran.
  pub fn try_run<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
    let guard = self.enter_immediately();
    guard.succeeded().then(f)
  }

  /// Awaits the future produced by `f` while holding the lock, only if the
  /// mutex is free right now; `None` means `f` never ran.
  pub async fn try_run_async<R, Fut>(&self, f: impl FnOnce() -> Fut) -> Option<R>
  where
    Fut: Future<Output = R>, {
    let guard = self.enter_immediately();
    if guard.succeeded() { Some(f().await) } else { None }
  }

  fn try_claim(&self) -> bool {
    !self.contended.swap(true, Ordering::AcqRel)
  }

  fn enqueue(&self, event: Arc<OneShotEvent<L>>) {
    self.queue.lock().push_back(event);
    trace!("waiter enqueued");
  }

  /// Hands ownership to the oldest live waiter, or frees the mutex.
  ///
  /// Entries already completed by timeout or cancellation are discarded on
  /// the way; completing them here loses the one-shot race and has no
  /// effect, which is exactly the lazy skip the abandonment path relies on.
  fn release(&self) {
    loop {
      let next = self.queue.lock().pop_front();
      match next {
        | Some(event) => {
          if event.complete(true) {
            trace!("ownership handed off");
            return;
          }
        },
        | None => {
          self.contended.store(false, Ordering::Release);
          trace!("released to idle");
          return;
        },
      }
    }
  }
}

impl<L> Default for FairMutex<L>
where
  L: RawLock,
{
  fn default() -> Self {
    Self::with_raw_lock()
  }
}
