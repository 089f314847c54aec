//! Minimal blocking lock with interchangeable idle-wait behavior.

mod event_raw_lock;
mod reset_event;
mod spin_raw_lock;

#[cfg(test)]
mod tests;

pub use event_raw_lock::EventRawLock;
pub use spin_raw_lock::SpinRawLock;

use crate::{cancel::CancelToken, timeout::Timeout};

/// Minimal blocking lock with timeout-aware, cancellable acquisition.
///
/// When [`RawLock::enter`] returns `true` the caller holds the lock and must
/// call [`RawLock::leave`] exactly once. When it returns `false` the lock was
/// never acquired and `leave` must not be called. Violating either rule is a
/// precondition violation and leaves the lock state undefined.
pub trait RawLock: Default + Send + Sync {
  /// Enters the critical section, blocking until entry, timeout expiry, or
  /// cancellation. Returns whether the lock is now held.
  fn enter(&self, timeout: Timeout, token: &CancelToken) -> bool;

  /// Exits the critical section.
  fn leave(&self);

  /// Enters without a budget or token; always acquires.
  fn enter_blocking(&self) {
    let entered = self.enter(Timeout::Never, &CancelToken::none());
    debug_assert!(entered, "unbounded enter cannot fail");
  }

  /// Runs `f` inside the critical section.
  fn with<R>(&self, f: impl FnOnce() -> R) -> R
  where
    Self: Sized, {
    self.enter_blocking();
    let result = f();
    self.leave();
    result
  }
}
