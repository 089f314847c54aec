use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

use super::CancelToken;

/// Owner half of a cancellation pair.
///
/// Cancellation is one-way and permanent: once requested it is observed by
/// every token the source has handed out.
#[derive(Debug, Default)]
pub struct CancelSource {
  flag: Arc<AtomicBool>,
}

impl CancelSource {
  /// Creates a source with no cancellation requested.
  #[must_use]
  pub fn new() -> Self {
    Self { flag: Arc::new(AtomicBool::new(false)) }
  }

  /// Requests cancellation.
  pub fn cancel(&self) {
    self.flag.store(true, Ordering::Release);
  }

  /// Hands out an observer token.
  #[must_use]
  pub fn token(&self) -> CancelToken {
    CancelToken::from_flag(self.flag.clone())
  }
}
