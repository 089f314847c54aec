//! Cooperative cancellation for queued acquisitions.
//!
//! Cancellation is polled at loop iterations and wait-return points only; it
//! is never delivered preemptively, and it never affects the uncontended
//! fast path.

mod cancel_source;
mod cancel_token;

#[cfg(test)]
mod tests;

pub use cancel_source::CancelSource;
pub use cancel_token::CancelToken;
