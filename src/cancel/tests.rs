#![cfg(test)]

use super::{CancelSource, CancelToken};

#[test]
fn none_token_is_never_cancelled() {
  let token = CancelToken::none();
  assert!(!token.is_cancelled());
  assert!(!token.can_be_cancelled());
}

#[test]
fn token_observes_cancellation() {
  let source = CancelSource::new();
  let token = source.token();
  assert!(token.can_be_cancelled());
  assert!(!token.is_cancelled());

  source.cancel();
  assert!(token.is_cancelled());
}

#[test]
fn cloned_tokens_share_the_flag() {
  let source = CancelSource::new();
  let first = source.token();
  let second = first.clone();

  source.cancel();
  assert!(first.is_cancelled());
  assert!(second.is_cancelled());
}

#[test]
fn tokens_issued_after_cancellation_start_cancelled() {
  let source = CancelSource::new();
  source.cancel();
  assert!(source.token().is_cancelled());
}
