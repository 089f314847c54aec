use core::time::Duration;
use std::{
  sync::{Condvar, Mutex, MutexGuard, PoisonError},
  time::Instant,
};

use crate::cancel::CancelToken;

/// Upper bound on a single condvar wait when a cancellable token is present,
/// so cancellation is observed even without a broadcast.
const CANCEL_POLL_SLICE: Duration = Duration::from_millis(1);

/// Manual-reset signal: once set it stays set until explicitly reset, and
/// setting it releases every waiter at once (broadcast semantics).
pub(crate) struct ResetEvent {
  signalled: Mutex<bool>,
  condition: Condvar,
}

impl ResetEvent {
  pub(crate) const fn new() -> Self {
    Self { signalled: Mutex::new(false), condition: Condvar::new() }
  }

  /// Raises the signal and wakes every waiter.
  pub(crate) fn set(&self) {
    *self.lock_state() = true;
    self.condition.notify_all();
  }

  /// Lowers the signal; future waits block until the next `set`.
  pub(crate) fn reset(&self) {
    *self.lock_state() = false;
  }

  /// Waits until the signal is raised, the budget elapses, or the token is
  /// cancelled. A `None` budget is unbounded.
  pub(crate) fn wait(&self, budget: Option<Duration>, token: &CancelToken) -> bool {
    let started = Instant::now();
    let mut signalled = self.lock_state();
    loop {
      if *signalled {
        return true;
      }
      if token.is_cancelled() {
        return false;
      }

      let remaining = match budget {
        | None => None,
        | Some(limit) => {
          let left = limit.saturating_sub(started.elapsed());
          if left.is_zero() {
            return false;
          }
          Some(left)
        },
      };

      signalled = match (remaining, token.can_be_cancelled()) {
        | (None, false) => self.condition.wait(signalled).unwrap_or_else(PoisonError::into_inner),
        | (None, true) => {
          self
            .condition
            .wait_timeout(signalled, CANCEL_POLL_SLICE)
            .unwrap_or_else(PoisonError::into_inner)
            .0
        },
        | (Some(left), cancellable) => {
          let slice = if cancellable { left.min(CANCEL_POLL_SLICE) } else { left };
          self.condition.wait_timeout(signalled, slice).unwrap_or_else(PoisonError::into_inner).0
        },
      };
    }
  }

  // The protected state is a plain bool, so a panic while holding the guard
  // cannot leave it inconsistent; poisoning is recovered from.
  fn lock_state(&self) -> MutexGuard<'_, bool> {
    self.signalled.lock().unwrap_or_else(PoisonError::into_inner)
  }
}
