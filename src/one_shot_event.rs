//! One-time completion cell unifying blocking and continuation consumption.

use portable_atomic::{AtomicBool, Ordering};
use spin::Mutex;

use crate::{
  cancel::CancelToken,
  handoff_queue::HandoffQueue,
  raw_lock::{EventRawLock, RawLock},
  timeout::Timeout,
};


type Continuation = Box<dyn FnOnce(bool) + Send>;

/// One-shot completion cell: transitions from pending to completed exactly
/// once, releasing every blocked waiter and firing the registered
/// continuation.
///
/// Both consumption modes observe the same completion: threads park in
/// [`OneShotEvent::wait`], tasks register a continuation via
/// [`OneShotEvent::on_completed`]. `L` is the raw lock the parked waiters'
/// batons are made of; the default blocks on an OS event, spin variants
/// trade CPU for wake-up latency.
pub struct OneShotEvent<L = EventRawLock>
where
  L: RawLock, {
  completed: AtomicBool,
  state:     Mutex<EventState>,
  parked:    HandoffQueue<L>,
}

struct EventState {
  result:       bool,
  continuation: Option<Continuation>,
}

impl OneShotEvent<EventRawLock> {
  /// Creates a pending event whose waiters park on [`EventRawLock`] batons.
  #[must_use]
  pub const fn new() -> Self {
    Self::with_raw_lock()
  }
}

impl<L> OneShotEvent<L>
where
  L: RawLock,
{
  /// Creates a pending event parked on batons of the chosen raw lock type.
  #[must_use]
  pub const fn with_raw_lock() -> Self {
    Self {
      completed: AtomicBool::new(false),
      state:     Mutex::new(EventState { result: false, continuation: None }),
      parked:    HandoffQueue::new(),
    }
  }

  /// Whether the event has completed.
  #[must_use]
  pub fn is_completed(&self) -> bool {
    self.completed.load(Ordering::Acquire)
  }

  /// Completes the event with `result`; returns whether this call won the
  /// pending-to-completed transition.
  ///
  /// Only the winner runs the side effects: the result is stored, every
  /// blocked waiter is released, and the registered continuation runs
  /// synchronously on this call's own execution context. Losing calls
  /// return `false` without any effect.
  pub fn complete(&self, result: bool) -> bool {
    let continuation = {
      let mut state = self.state.lock();
      if self.completed.swap(true, Ordering::AcqRel) {
        return false;
      }
      state.result = result;
      self.parked.release_all();
      state.continuation.take()
    };
    // Invoked outside the state lock: the continuation may run arbitrary
    // code, including re-registering interest in this event's owner.
    if let Some(continuation) = continuation {
      continuation(result);
    }
    true
  }

  /// Abandons a pending event; equivalent to `complete(false)`.
  pub fn dispose(&self) -> bool {
    self.complete(false)
  }

  /// Waits for completion, returning immediately if already completed.
  ///
  /// Returns whether the event completed before the budget elapsed or the
  /// token was cancelled. Giving up does not retract the registration; the
  /// event may still complete later, harmlessly.
  pub fn wait(&self, timeout: Timeout, token: &CancelToken) -> bool {
    if self.is_completed() {
      return true;
    }
    self.parked.wait(timeout, token)
  }

  /// Registers `f` to run on completion, or runs it now if the event has
  /// already completed. At most one continuation is held; registering again
  /// replaces the previous one without invoking it.
  pub fn on_completed(&self, f: impl FnOnce(bool) + Send + 'static) {
    let mut state = self.state.lock();
    if self.completed.load(Ordering::Acquire) {
      let result = state.result;
      drop(state);
      f(result);
    } else {
      state.continuation = Some(Box::new(f));
    }
  }

  /// Blocks indefinitely until completion and returns the stored result.
  /// This is the bridge used by the suspending adapter.
  #[must_use]
  pub fn result(&self) -> bool {
    self.wait(Timeout::Never, &CancelToken::none());
    self.state.lock().result
  }
}

impl<L> Default for OneShotEvent<L>
where
  L: RawLock,
{
  fn default() -> Self {
    Self::with_raw_lock()
  }
}
