use core::marker::PhantomData;
use std::time::Instant;

use portable_atomic::{AtomicBool, Ordering};

use super::RawLock;
use crate::{
  backoff::{Backoff, BusySpin},
  cancel::CancelToken,
  timeout::Timeout,
};

/// Atomic-exchange spin lock parameterized by an idle-wait policy.
pub struct SpinRawLock<B = BusySpin>
where
  B: Backoff, {
  locked:  AtomicBool,
  _policy: PhantomData<B>,
}

impl<B> SpinRawLock<B>
where
  B: Backoff,
{
  /// Creates an unlocked instance.
  #[must_use]
  pub const fn new() -> Self {
    Self { locked: AtomicBool::new(false), _policy: PhantomData }
  }

  fn try_claim(&self) -> bool {
    !self.locked.swap(true, Ordering::AcqRel)
  }
}

impl<B> Default for SpinRawLock<B>
where
  B: Backoff,
{
  fn default() -> Self {
    Self::new()
  }
}

impl<B> RawLock for SpinRawLock<B>
where
  B: Backoff + Send + Sync,
{
  fn enter(&self, timeout: Timeout, token: &CancelToken) -> bool {
    if token.is_cancelled() {
      return false;
    }
    if timeout.is_zero() {
      return self.try_claim();
    }

    let started = Instant::now();
    while !self.try_claim() {
      if timeout.expired(started) {
        return false;
      }
      if token.is_cancelled() {
        return false;
      }
      B::idle();
    }
    true
  }

  fn leave(&self) {
    self.locked.store(false, Ordering::Release);
  }
}
