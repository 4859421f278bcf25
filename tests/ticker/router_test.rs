//! Tick routing between real timers: each timer counts only its own source,
//! passive observers see every tick on the shared broadcast.
mod helpers {
    include!("../helpers/mod.rs");
}

use helpers::{build_timer, build_timer_with, RecordingDelegate};
use korri_ticker::core::{TickPolicy, TickNotification};
use korri_ticker::ticker::router::{
    TickBroadcast, TickRouter, TICK_BROADCAST_CAPACITY, TICK_NOTIFICATIONS, TICK_NOTIFICATION_NAME,
};
use korri_ticker::timer::config::TimerConfig;

#[test]
fn test_two_timers_share_one_broadcast() {
    let broadcast = TickBroadcast::new();
    let mut observer = broadcast.subscriber().unwrap();

    let slow_delegate = RecordingDelegate::default();
    let fast_delegate = RecordingDelegate::default();
    let (slow, _slow_harness) = build_timer(&slow_delegate);
    let fast_config = TimerConfig::builder()
        .tick_policy(TickPolicy::PerFrame)
        .build()
        .unwrap();
    let (fast, _fast_harness) = build_timer_with(&fast_delegate, fast_config);
    assert_ne!(slow.source_id(), fast.source_id());

    let slow_router = slow.router().with_broadcast(&broadcast);
    let fast_router = fast.router().with_broadcast(&broadcast);

    slow.start(100.0, false);
    fast.start(100.0, false);
    for frame in 1..=3 {
        let timestamp = 10.0 + frame as f64 * 0.5;
        slow_router.on_frame(timestamp);
        fast_router.on_frame(timestamp);
    }

    // Slow: baseline at 10.5, one tick at 11.5. Fast: baseline, then two.
    assert_eq!(slow.elapsed(), 1.0);
    assert_eq!(fast.elapsed(), 2.0);

    let mut seen = Vec::new();
    while let Some(notification) = observer.try_next_message_pure() {
        seen.push(notification);
    }
    assert_eq!(
        seen,
        vec![
            TickNotification {
                source: fast.source_id(),
                timestamp: 11.0,
            },
            TickNotification {
                source: slow.source_id(),
                timestamp: 11.5,
            },
            TickNotification {
                source: fast.source_id(),
                timestamp: 11.5,
            },
        ]
    );
}

#[test]
fn test_policy_change_keeps_routing() {
    // Reconfiguring the source does not require a new router.
    let delegate = RecordingDelegate::default();
    let (timer, _harness) = build_timer(&delegate);
    let router = timer.router();

    timer.start(100.0, false);
    router.on_frame(1.0);
    router.on_frame(1.25);
    assert_eq!(timer.elapsed(), 0.0);

    timer.set_tick_policy(TickPolicy::PerFrame).unwrap();
    router.on_frame(1.5);
    router.on_frame(1.75);
    assert_eq!(timer.elapsed(), 2.0);
}

#[test]
fn test_lagging_observer_keeps_latest_ticks() {
    let broadcast = TickBroadcast::new();
    let mut observer = broadcast.subscriber().unwrap();

    let delegate = RecordingDelegate::default();
    let config = TimerConfig::builder()
        .tick_policy(TickPolicy::PerFrame)
        .build()
        .unwrap();
    let (timer, _harness) = build_timer_with(&delegate, config);
    let router = TickRouter::new(&timer, &timer).with_broadcast(&broadcast);

    timer.start(1_000.0, false);
    let frames = TICK_BROADCAST_CAPACITY * 2;
    for frame in 0..=frames {
        router.on_frame(1.0 + frame as f64);
    }

    // Delivery to the timer is never throttled by the observer.
    assert_eq!(timer.elapsed(), frames as f64);

    let mut timestamps = Vec::new();
    while let Some(notification) = observer.try_next_message_pure() {
        timestamps.push(notification.timestamp);
    }
    assert_eq!(timestamps.len(), TICK_BROADCAST_CAPACITY);
    assert_eq!(timestamps.last(), Some(&(1.0 + frames as f64)));
}

#[test]
fn test_process_wide_channel() {
    assert_eq!(TICK_NOTIFICATION_NAME, "TickSourceDidTick");
    let mut observer = TICK_NOTIFICATIONS.subscriber().unwrap();

    let delegate = RecordingDelegate::default();
    let (timer, _harness) = build_timer(&delegate);
    let router = timer.router().with_broadcast(&TICK_NOTIFICATIONS);

    timer.start(3.0, false);
    router.on_frame(7.0);
    router.on_frame(8.0);

    let notification = observer.try_next_message_pure().unwrap();
    assert_eq!(notification.source, timer.source_id());
    assert_eq!(notification.timestamp, 8.0);
}
