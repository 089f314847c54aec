//! Idle-wait policies used by spinning locks.
//!
//! A policy decides what a contended spin loop does between acquisition
//! attempts: burn the core, yield the scheduler slot, or sleep. Policies are
//! zero-sized strategy types injected as type parameters.

mod busy_spin;
mod sleep_tick;
mod sleep_zero;
mod yield_now;


pub use busy_spin::BusySpin;
pub use sleep_tick::SleepTick;
pub use sleep_zero::SleepZero;
pub use yield_now::YieldNow;

/// One idle-wait step performed while a spinning lock is contended.
pub trait Backoff {
  /// Performs a single idle-wait iteration.
  fn idle();
}
