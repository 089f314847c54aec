#![deny(missing_docs)]

//! FIFO-fair in-process mutual exclusion built from pluggable low-level locks.
//!
//! The crate is layered leaves-first:
//!
//! - [`backoff`]: idle-wait policies injected into spinning locks.
//! - [`raw_lock`]: the minimal blocking lock every other piece is built on.
//! - [`handoff_queue`]: FIFO blocking hand-off built purely from raw locks.
//! - [`one_shot_event`]: a one-time completion cell serving both blocking
//!   waits and registered continuations.
//! - [`fair_mutex`]: the public mutex, a contention-free fast path plus an
//!   ordered hand-off slow path.
//!
//! Acquisition never panics on failure; timeouts and cancellation surface as
//! a failed [`LockGuard`], and raw-lock entry as a plain `bool`.

pub mod backoff;
pub mod cancel;
pub mod fair_mutex;
pub mod handoff_queue;
pub mod one_shot_event;
pub mod raw_lock;
pub mod timeout;

pub use backoff::{Backoff, BusySpin, SleepTick, SleepZero, YieldNow};
pub use cancel::{CancelSource, CancelToken};
pub use fair_mutex::{EnterFuture, FairMutex, LockGuard};
pub use handoff_queue::HandoffQueue;
pub use one_shot_event::OneShotEvent;
pub use raw_lock::{EventRawLock, RawLock, SpinRawLock};
pub use timeout::Timeout;
