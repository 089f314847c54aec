use core::time::Duration;

use super::Backoff;

/// Short sleep of roughly one scheduler tick per iteration.
#[derive(Clone, Copy, Debug, Default)]
pub struct SleepTick;

impl SleepTick {
  /// Sleep interval used for each idle iteration.
  pub const TICK: Duration = Duration::from_millis(1);
}

impl Backoff for SleepTick {
  fn idle() {
    std::thread::sleep(Self::TICK);
  }
}
