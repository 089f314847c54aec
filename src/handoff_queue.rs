//! FIFO blocking hand-off built purely from raw locks.

use std::{collections::VecDeque, sync::Arc};

use spin::Mutex;

use crate::{cancel::CancelToken, raw_lock::RawLock, timeout::Timeout};


/// FIFO hand-off queue without native condition variables: every waiter
/// parks on a freshly claimed baton lock, and each release lets exactly one
/// baton owner through, oldest first.
pub struct HandoffQueue<L>
where
  L: RawLock, {
  state: Mutex<HandoffState<L>>,
}

struct HandoffState<L> {
  released: bool,
  batons:   VecDeque<Arc<L>>,
}

impl<L> HandoffQueue<L>
where
  L: RawLock,
{
  /// Creates an empty queue.
  #[must_use]
  pub const fn new() -> Self {
    Self { state: Mutex::new(HandoffState { released: false, batons: VecDeque::new() }) }
  }

  /// Blocks until released, the budget elapses, or the token is cancelled.
  ///
  /// Returns whether a release happened in time. A permanently released
  /// queue satisfies every subsequent `wait` immediately without blocking.
  /// A waiter that gives up leaves its baton queued; the release protocol
  /// later clears it without effect.
  pub fn wait(&self, timeout: Timeout, token: &CancelToken) -> bool {
    let baton = {
      let mut state = self.state.lock();
      if state.released {
        return true;
      }
      let baton = Arc::new(L::default());
      let claimed = baton.enter(Timeout::ZERO, &CancelToken::none());
      debug_assert!(claimed, "a fresh baton must be claimable");
      state.batons.push_back(baton.clone());
      baton
    };
    // Blocks until the release protocol makes the baton enterable again.
    baton.enter(timeout, token)
  }

  /// Lets exactly one queued waiter through, oldest first.
  pub fn release_one(&self) {
    let baton = self.state.lock().batons.pop_front();
    if let Some(baton) = baton {
      Self::release_baton(&baton);
    }
  }

  /// Permanently releases the queue: every currently queued waiter is let
  /// through, and every future `wait` returns immediately.
  pub fn release_all(&self) {
    let mut state = self.state.lock();
    state.released = true;
    while let Some(baton) = state.batons.pop_front() {
      Self::release_baton(&baton);
    }
  }

  // Two-step protocol: clear, then clear-and-signal again, so the single
  // blocked `enter` on this baton gets through no matter how it interleaves
  // with the first wake-up. A baton is never double-released because each
  // one is popped exactly once.
  fn release_baton(baton: &L) {
    baton.leave();
    baton.leave();
  }
}

impl<L> Default for HandoffQueue<L>
where
  L: RawLock,
{
  fn default() -> Self {
    Self::new()
  }
}
