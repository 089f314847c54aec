use super::Backoff;

/// Yields the remainder of the scheduler slot on every iteration.
#[derive(Clone, Copy, Debug, Default)]
pub struct YieldNow;

impl Backoff for YieldNow {
  fn idle() {
    std::thread::yield_now();
  }
}
