use core::time::Duration;

use super::Backoff;

/// Zero-duration sleep: relinquishes the CPU to any ready thread, including
/// lower-priority ones, without a minimum sleep interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepZero;

impl Backoff for SleepZero {
  fn idle() {
    std::thread::sleep(Duration::ZERO);
  }
}
