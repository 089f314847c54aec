use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

/// Observer half of a cancellation pair, handed out by [`CancelSource`].
///
/// [`CancelSource`]: super::CancelSource
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
  flag: Option<Arc<AtomicBool>>,
}

impl CancelToken {
  /// Token that can never be cancelled.
  #[must_use]
  pub const fn none() -> Self {
    Self { flag: None }
  }

  pub(crate) fn from_flag(flag: Arc<AtomicBool>) -> Self {
    Self { flag: Some(flag) }
  }

  /// Whether cancellation has been requested.
  #[must_use]
  pub fn is_cancelled(&self) -> bool {
    self.flag.as_ref().is_some_and(|flag| flag.load(Ordering::Acquire))
  }

  /// Whether this token is connected to a source at all. Waits consult this
  /// to decide whether cancellation needs to be polled while parked.
  #[must_use]
  pub const fn can_be_cancelled(&self) -> bool {
    self.flag.is_some()
  }
}
