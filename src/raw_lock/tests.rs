#![cfg(test)]

use core::time::Duration;
use std::{sync::Arc, thread, time::Instant};

use portable_atomic::{AtomicU32, Ordering};

use super::{EventRawLock, RawLock, SpinRawLock};
use crate::{
  backoff::YieldNow,
  cancel::{CancelSource, CancelToken},
  timeout::Timeout,
};

fn exercise_mutual_exclusion<L: RawLock + 'static>() {
  let lock = Arc::new(L::default());
  let hits = Arc::new(AtomicU32::new(0));

  let handles: Vec<_> = (0..4)
    .map(|_| {
      let lock = lock.clone();
      let hits = hits.clone();
      thread::spawn(move || {
        for _ in 0..250 {
          assert!(lock.enter(Timeout::Never, &CancelToken::none()));
          let seen = hits.load(Ordering::Relaxed);
          hits.store(seen + 1, Ordering::Relaxed);
          lock.leave();
        }
      })
    })
    .collect();

  for handle in handles {
    handle.join().unwrap();
  }
  assert_eq!(hits.load(Ordering::Relaxed), 1000);
}

fn exercise_zero_timeout<L: RawLock>() {
  let lock = L::default();
  assert!(lock.enter(Timeout::ZERO, &CancelToken::none()));
  assert!(!lock.enter(Timeout::ZERO, &CancelToken::none()));
  lock.leave();
  assert!(lock.enter(Timeout::ZERO, &CancelToken::none()));
  lock.leave();
}

fn exercise_timed_enter_gives_up<L: RawLock>() {
  let lock = L::default();
  assert!(lock.enter(Timeout::Never, &CancelToken::none()));

  let started = Instant::now();
  let limit = Duration::from_millis(30);
  assert!(!lock.enter(Timeout::After(limit), &CancelToken::none()));
  assert!(started.elapsed() >= limit);
  lock.leave();
}

fn exercise_pre_cancelled_token<L: RawLock>() {
  let source = CancelSource::new();
  source.cancel();

  let lock = L::default();
  assert!(!lock.enter(Timeout::Never, &source.token()));
  // The lock was never touched.
  assert!(lock.enter(Timeout::ZERO, &CancelToken::none()));
  lock.leave();
}

fn exercise_cancellation_unblocks<L: RawLock + 'static>() {
  let lock = Arc::new(L::default());
  assert!(lock.enter(Timeout::Never, &CancelToken::none()));

  let source = CancelSource::new();
  let token = source.token();
  let waiter = {
    let lock = lock.clone();
    thread::spawn(move || lock.enter(Timeout::Never, &token))
  };

  thread::sleep(Duration::from_millis(20));
  source.cancel();
  assert!(!waiter.join().unwrap());
  lock.leave();
}

fn exercise_blocked_enter_wakes_on_leave<L: RawLock + 'static>() {
  let lock = Arc::new(L::default());
  assert!(lock.enter(Timeout::Never, &CancelToken::none()));

  let waiter = {
    let lock = lock.clone();
    thread::spawn(move || {
      let entered = lock.enter(Timeout::After(Duration::from_secs(5)), &CancelToken::none());
      if entered {
        lock.leave();
      }
      entered
    })
  };

  thread::sleep(Duration::from_millis(20));
  lock.leave();
  assert!(waiter.join().unwrap());
}

#[test]
fn spin_lock_provides_mutual_exclusion() {
  exercise_mutual_exclusion::<SpinRawLock<YieldNow>>();
}

#[test]
fn spin_lock_zero_timeout_is_a_single_attempt() {
  exercise_zero_timeout::<SpinRawLock<YieldNow>>();
}

#[test]
fn spin_lock_timed_enter_gives_up() {
  exercise_timed_enter_gives_up::<SpinRawLock<YieldNow>>();
}

#[test]
fn spin_lock_rejects_pre_cancelled_token() {
  exercise_pre_cancelled_token::<SpinRawLock<YieldNow>>();
}

#[test]
fn spin_lock_observes_cancellation_while_spinning() {
  exercise_cancellation_unblocks::<SpinRawLock<YieldNow>>();
}

#[test]
fn spin_lock_wakes_on_leave() {
  exercise_blocked_enter_wakes_on_leave::<SpinRawLock<YieldNow>>();
}

#[test]
fn event_lock_provides_mutual_exclusion() {
  exercise_mutual_exclusion::<EventRawLock>();
}

#[test]
fn event_lock_zero_timeout_is_a_single_attempt() {
  exercise_zero_timeout::<EventRawLock>();
}

#[test]
fn event_lock_timed_enter_gives_up() {
  exercise_timed_enter_gives_up::<EventRawLock>();
}

#[test]
fn event_lock_rejects_pre_cancelled_token() {
  exercise_pre_cancelled_token::<EventRawLock>();
}

#[test]
fn event_lock_observes_cancellation_while_parked() {
  exercise_cancellation_unblocks::<EventRawLock>();
}

#[test]
fn event_lock_wakes_on_leave() {
  exercise_blocked_enter_wakes_on_leave::<EventRawLock>();
}

#[test]
fn with_runs_inside_the_critical_section() {
  let lock = SpinRawLock::<YieldNow>::new();
  let value = lock.with(|| {
    assert!(!lock.enter(Timeout::ZERO, &CancelToken::none()));
    42
  });
  assert_eq!(value, 42);
  // Released again after `with`.
  assert!(lock.enter(Timeout::ZERO, &CancelToken::none()));
  lock.leave();
}
