//! Wait budgets for blocking operations.

use core::time::Duration;
use std::time::Instant;


/// Wait budget accepted by every blocking operation in the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timeout {
  /// Wait indefinitely.
  Never,
  /// Give up once the duration has elapsed.
  After(Duration),
}

impl Timeout {
  /// Zero-length budget: a single acquisition attempt without waiting.
  pub const ZERO: Self = Self::After(Duration::ZERO);

  /// Whether this is the zero-length budget.
  #[must_use]
  pub const fn is_zero(&self) -> bool {
    match self {
      | Self::Never => false,
      | Self::After(limit) => limit.is_zero(),
    }
  }

  /// Whether the budget has elapsed since `started`.
  #[must_use]
  pub fn expired(&self, started: Instant) -> bool {
    match self {
      | Self::Never => false,
      | Self::After(limit) => started.elapsed() >= *limit,
    }
  }

  /// Remaining budget measured from `started`; `None` means unbounded.
  #[must_use]
  pub fn remaining(&self, started: Instant) -> Option<Duration> {
    match self {
      | Self::Never => None,
      | Self::After(limit) => Some(limit.saturating_sub(started.elapsed())),
    }
  }
}

impl From<Duration> for Timeout {
  fn from(limit: Duration) -> Self {
    Self::After(limit)
  }
}
