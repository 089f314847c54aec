use super::FairMutex;
use crate::raw_lock::{EventRawLock, RawLock};

/// Scoped result of an acquisition attempt.
///
/// Dropping a succeeded guard releases the mutex exactly once; failed
/// guards are inert.
#[must_use = "the lock is held until the guard is dropped"]
pub struct LockGuard<'a, L = EventRawLock>
where
  L: RawLock, {
  owner: Option<&'a FairMutex<L>>,
}

impl<'a, L> LockGuard<'a, L>
where
  L: RawLock,
{
  pub(super) const fn acquired(owner: &'a FairMutex<L>) -> Self {
    Self { owner: Some(owner) }
  }

  pub(super) const fn failed() -> Self {
    Self { owner: None }
  }

  /// Whether the acquisition succeeded.
  #[must_use]
  pub const fn succeeded(&self) -> bool {
    self.owner.is_some()
  }
}

impl<L> Drop for LockGuard<'_, L>
where
  L: RawLock,
{
  fn drop(&mut self) {
    if let Some(owner) = self.owner.take() {
      owner.release();
    }
  }
}
