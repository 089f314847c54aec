use core::{
  future::Future,
  pin::Pin,
  task::{Context, Poll},
};
use std::sync::Arc;

use super::{FairMutex, LockGuard};
use crate::{
  one_shot_event::OneShotEvent,
  raw_lock::{EventRawLock, RawLock},
};

/// Future returned by [`FairMutex::enter_async`].
///
/// The first poll takes the fast path or enqueues; later polls re-arm the
/// waker so the completing release can resume the task. Dropping a pending
/// future abandons the queued request without stranding ownership.
pub struct EnterFuture<'a, L = EventRawLock>
where
  L: RawLock, {
  mutex: &'a FairMutex<L>,
  event: Option<Arc<OneShotEvent<L>>>,
}

impl<'a, L> EnterFuture<'a, L>
where
  L: RawLock,
{
  pub(super) const fn new(mutex: &'a FairMutex<L>) -> Self {
    Self { mutex, event: None }
  }
}

impl<'a, L> Future for EnterFuture<'a, L>
where
  L: RawLock,
{
  type Output = LockGuard<'a, L>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let this = self.get_mut();

    match &this.event {
      | None => {
        if this.mutex.try_claim() {
          return Poll::Ready(LockGuard::acquired(this.mutex));
        }
        let event = Arc::new(OneShotEvent::with_raw_lock());
        this.mutex.enqueue(event.clone());
        let waker = cx.waker().clone();
        // Fires immediately if the hand-off already completed the event.
        event.on_completed(move |_granted| waker.wake());
        this.event = Some(event);
        Poll::Pending
      },
      | Some(event) => {
        if event.is_completed() {
          this.event = None;
          return Poll::Ready(LockGuard::acquired(this.mutex));
        }
        let waker = cx.waker().clone();
        event.on_completed(move |_granted| waker.wake());
        Poll::Pending
      },
    }
  }
}

impl<L> Drop for EnterFuture<'_, L>
where
  L: RawLock,
{
  fn drop(&mut self) {
    if let Some(event) = self.event.take() {
      // Losing the dispose race means a hand-off already granted this
      // future ownership; pass it on instead of leaking it.
      if !event.dispose() && event.result() {
        self.mutex.release();
      }
    }
  }
}
