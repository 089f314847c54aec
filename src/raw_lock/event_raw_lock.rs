use std::time::Instant;

use spin::Mutex;

use super::{RawLock, reset_event::ResetEvent};
use crate::{cancel::CancelToken, timeout::Timeout};

/// OS-event-backed lock: contended waiters truly block on a manual-reset
/// signal instead of spinning.
///
/// `leave` broadcasts, so every waiter wakes and races to re-claim. That
/// thundering herd is acceptable only because this lock serves as a
/// single-slot baton inside [`HandoffQueue`](crate::handoff_queue::HandoffQueue);
/// it is never the top-level fair mutex.
pub struct EventRawLock {
  locked: Mutex<bool>,
  signal: ResetEvent,
}

impl EventRawLock {
  /// Creates an unlocked instance with the signal disarmed.
  #[must_use]
  pub const fn new() -> Self {
    Self { locked: Mutex::new(false), signal: ResetEvent::new() }
  }

  /// Claims the lock if free. The claimer that observes the unlocked state
  /// re-arms the signal so subsequent waiters block until the next `leave`.
  fn try_claim(&self) -> bool {
    let mut locked = self.locked.lock();
    let was_locked = *locked;
    *locked = true;
    if !was_locked {
      self.signal.reset();
    }
    !was_locked
  }
}

impl Default for EventRawLock {
  fn default() -> Self {
    Self::new()
  }
}

impl RawLock for EventRawLock {
  fn enter(&self, timeout: Timeout, token: &CancelToken) -> bool {
    if token.is_cancelled() {
      return false;
    }
    if timeout.is_zero() {
      return self.try_claim();
    }

    let started = Instant::now();
    loop {
      if self.try_claim() {
        return true;
      }
      if token.is_cancelled() {
        return false;
      }
      if timeout.expired(started) {
        return false;
      }
      // The remaining budget shrinks as elapsed time accumulates; the wait
      // re-checks it on every wake-up.
      self.signal.wait(timeout.remaining(started), token);
    }
  }

  fn leave(&self) {
    let mut locked = self.locked.lock();
    *locked = false;
    self.signal.set();
  }
}
