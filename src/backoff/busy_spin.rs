use super::Backoff;

/// Busy-wait policy: stays runnable and hints the CPU that it is spinning.
#[derive(Clone, Copy, Debug, Default)]
pub struct BusySpin;

impl Backoff for BusySpin {
  fn idle() {
    core::hint::spin_loop();
  }
}
