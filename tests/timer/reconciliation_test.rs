//! Suspend/resume reconciliation: time spent in background is credited from
//! the wall clock when the host comes back.
mod helpers {
    include!("../helpers/mod.rs");
}

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use helpers::{build_timer, build_timer_with, tick_n, MockDriver, RecordingDelegate};
use korri_ticker::core::{CompletionKind, LifecycleEvent, TimerPhase};
use korri_ticker::error::LifecycleError;
use korri_ticker::timer::config::{MissingEntry, TimerConfig};
use korri_ticker::timer::interval::IntervalTimer;
use korri_ticker::timer::traits::lifecycle::LifecycleObserver;
use korri_ticker::timer::traits::timestamp_store::{StoreKey, BACKGROUND_ENTRY_KEY};

#[test]
fn test_background_completion() {
    // 10 s countdown, 4 ticks, 7 s suspended: 4 + 7 >= 10.
    let delegate = RecordingDelegate::default();
    let (timer, harness) = build_timer(&delegate);

    timer.start(10.0, false);
    tick_n(&timer, 4);
    timer.on_enter_background().unwrap();
    assert_eq!(harness.store.value(BACKGROUND_ENTRY_KEY), Some(1_700_000_000.0));

    harness.clock.advance(7.0);
    timer.on_enter_foreground().unwrap();

    assert_eq!(delegate.finishes(), vec![CompletionKind::Background]);
    assert_eq!(timer.phase(), TimerPhase::Idle);
    assert_eq!(harness.driver.active(), 0);

    // Completion happened while suspended: no foreground finish follows.
    tick_n(&timer, 10);
    assert_eq!(delegate.finishes(), vec![CompletionKind::Background]);
}

#[test]
fn test_short_suspension_adds_seconds() {
    let delegate = RecordingDelegate::default();
    let (timer, harness) = build_timer(&delegate);

    timer.start(10.0, false);
    tick_n(&timer, 2);
    timer.handle_lifecycle(LifecycleEvent::EnteredBackground).unwrap();
    harness.clock.advance(3.0);
    timer.handle_lifecycle(LifecycleEvent::EnteredForeground).unwrap();

    assert_eq!(timer.elapsed(), 5.0);
    assert!(timer.is_running());
    assert!(delegate.finishes().is_empty());

    // Live ticks resume from the reconciled counter.
    tick_n(&timer, 5);
    assert_eq!(delegate.finishes(), vec![CompletionKind::Foreground]);
    assert_eq!(delegate.progress().last(), Some(&10.0));
}

#[test]
fn test_repeating_background_completion_rearms() {
    let delegate = RecordingDelegate::default();
    let (timer, harness) = build_timer(&delegate);

    timer.start(5.0, true);
    tick_n(&timer, 1);
    timer.on_enter_background().unwrap();
    harness.clock.advance(30.0);
    timer.on_enter_foreground().unwrap();

    // One background completion regardless of how many cycles were missed.
    assert_eq!(delegate.finishes(), vec![CompletionKind::Background]);
    assert!(timer.is_running());
    assert_eq!(timer.elapsed(), 0.0);
    assert_eq!(timer.target_seconds(), 5.0);
    assert_eq!(harness.driver.active(), 1);
}

#[test]
fn test_store_failure_leaves_state_untouched() {
    let delegate = RecordingDelegate::default();
    let (timer, harness) = build_timer(&delegate);

    timer.start(10.0, false);
    tick_n(&timer, 3);
    harness.store.set_failing(true);

    let before = timer.snapshot();
    assert!(matches!(
        timer.on_enter_background(),
        Err(LifecycleError::Store(_))
    ));
    harness.clock.advance(60.0);
    assert!(matches!(
        timer.on_enter_foreground(),
        Err(LifecycleError::Store(_))
    ));

    assert_eq!(timer.snapshot(), before);
    assert!(delegate.finishes().is_empty());

    // The timer keeps counting live ticks.
    harness.store.set_failing(false);
    tick_n(&timer, 1);
    assert_eq!(timer.elapsed(), 4.0);
}

#[test]
fn test_missing_timestamp_reads_as_epoch() {
    // Foreground without a prior background entry: the interval since the
    // epoch dwarfs any target, so the countdown completes in background.
    let delegate = RecordingDelegate::default();
    let (timer, harness) = build_timer(&delegate);

    timer.start(10.0, false);
    tick_n(&timer, 1);
    harness.clock.advance(20.0);

    timer.on_enter_foreground().unwrap();
    assert_eq!(delegate.finishes(), vec![CompletionKind::Background]);
    assert_eq!(timer.phase(), TimerPhase::Idle);
    assert_eq!(harness.driver.active(), 0);
}

#[test]
fn test_missing_timestamp_is_reported() {
    let delegate = RecordingDelegate::default();
    let config = TimerConfig::builder()
        .missing_entry(MissingEntry::Reject)
        .build()
        .unwrap();
    let (timer, harness) = build_timer_with(&delegate, config);

    timer.start(10.0, false);
    tick_n(&timer, 1);
    harness.clock.advance(20.0);

    match timer.on_enter_foreground() {
        Err(LifecycleError::MissingTimestamp { key }) => {
            assert_eq!(key, StoreKey::default());
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(timer.elapsed(), 1.0);
    assert!(timer.is_running());

    // A zero timestamp is treated as missing too.
    harness.store.insert(BACKGROUND_ENTRY_KEY, 0.0);
    assert!(timer.on_enter_foreground().is_err());
    assert_eq!(timer.elapsed(), 1.0);
    assert!(delegate.finishes().is_empty());
}

#[test]
fn test_lifecycle_observer_dispatch() {
    let delegate = RecordingDelegate::default();
    let (timer, harness) = build_timer(&delegate);

    timer.start(4.0, false);
    timer.on_lifecycle(LifecycleEvent::EnteredBackground).unwrap();
    harness.clock.advance(4.0);
    timer.on_lifecycle(LifecycleEvent::EnteredForeground).unwrap();

    assert_eq!(delegate.finishes(), vec![CompletionKind::Background]);
}

#[test]
fn test_scoped_keys_keep_timers_apart() {
    // Two timers sharing one store do not overwrite each other's entry.
    let first_delegate = RecordingDelegate::default();
    let second_delegate = RecordingDelegate::default();
    let first_config = TimerConfig::builder().scoped_key(1).build().unwrap();
    let (first, harness) = build_timer_with(&first_delegate, first_config);
    let second = IntervalTimer::<CriticalSectionRawMutex, _, _, _, _>::new(
        MockDriver::default(),
        harness.store.clone(),
        harness.clock.clone(),
        &second_delegate,
        TimerConfig::builder().scoped_key(2).build().unwrap(),
    );

    first.start(10.0, false);
    first.on_enter_background().unwrap();
    harness.clock.advance(5.0);
    second.start(10.0, false);
    second.on_enter_background().unwrap();

    assert_eq!(
        harness.store.value("IntervalTimer-LostUserFocus.1"),
        Some(1_700_000_000.0)
    );
    assert_eq!(
        harness.store.value("IntervalTimer-LostUserFocus.2"),
        Some(1_700_000_005.0)
    );

    harness.clock.advance(5.0);
    first.on_enter_foreground().unwrap();
    second.on_enter_foreground().unwrap();

    assert_eq!(first_delegate.finishes(), vec![CompletionKind::Background]);
    assert!(second_delegate.finishes().is_empty());
    assert_eq!(second.elapsed(), 5.0);
}

#[test]
fn test_clock_set_backwards_adds_nothing() {
    let delegate = RecordingDelegate::default();
    let (timer, harness) = build_timer(&delegate);

    timer.start(10.0, false);
    tick_n(&timer, 2);
    timer.on_enter_background().unwrap();
    harness.clock.set(1_600_000_000.0);
    timer.on_enter_foreground().unwrap();

    assert_eq!(timer.elapsed(), 2.0);
    assert!(delegate.finishes().is_empty());
}
