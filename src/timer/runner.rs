//! Async runner feeding a timer from channels.
//!
//! Hosts whose refresh callback or lifecycle notifications live on another
//! task push raw frame timestamps and [`LifecycleEvent`]s into pre-allocated
//! [`embassy_sync::Channel`] instances; the runner drains both and drives the
//! timer. No allocation is performed and there is no dependency on a
//! particular executor.

use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Receiver},
};
use futures_util::{future::select, future::Either, pin_mut};

use crate::core::LifecycleEvent;
use crate::ticker::router::{TickBroadcast, TickRouter};
use crate::ticker::traits::{frame_sink::FrameSink, tick_listener::TickListener};
use crate::timer::traits::lifecycle::LifecycleObserver;

/// Channel of raw frame timestamps (monotonic seconds).
pub type FrameChannel<const N: usize> = Channel<CriticalSectionRawMutex, f64, N>;
/// Channel of lifecycle signals.
pub type LifecycleChannel<const N: usize> = Channel<CriticalSectionRawMutex, LifecycleEvent, N>;

/// Runner that drives one timer loop.
pub struct TimerRunner<'a, T, const FRAME_CAP: usize, const EVENT_CAP: usize>
where
    T: FrameSink + TickListener + LifecycleObserver,
{
    timer: &'a T,
    router: TickRouter<'a, T, T>,
    frames: Option<Receiver<'a, CriticalSectionRawMutex, f64, FRAME_CAP>>,
    events: Option<Receiver<'a, CriticalSectionRawMutex, LifecycleEvent, EVENT_CAP>>,
}

impl<'a, T, const FRAME_CAP: usize, const EVENT_CAP: usize> TimerRunner<'a, T, FRAME_CAP, EVENT_CAP>
where
    T: FrameSink + TickListener + LifecycleObserver,
{
    /// Wire `timer` to the provided channels. Either channel may be omitted.
    pub fn new(
        timer: &'a T,
        frame_channel: Option<&'a FrameChannel<FRAME_CAP>>,
        lifecycle_channel: Option<&'a LifecycleChannel<EVENT_CAP>>,
    ) -> Self {
        Self {
            timer,
            router: TickRouter::new(timer, timer),
            frames: frame_channel.map(|channel| channel.receiver()),
            events: lifecycle_channel.map(|channel| channel.receiver()),
        }
    }

    /// Publish every logical tick on `broadcast` as well.
    pub fn with_broadcast(mut self, broadcast: &'a TickBroadcast) -> Self {
        self.router = self.router.with_broadcast(broadcast);
        self
    }

    /// Loop forever. Lifecycle errors are logged and the loop continues.
    pub async fn drive(self) {
        loop {
            match (&self.frames, &self.events) {
                (Some(frames), Some(events)) => {
                    let frame_future = frames.receive();
                    let event_future = events.receive();
                    pin_mut!(frame_future);
                    pin_mut!(event_future);

                    match select(frame_future, event_future).await {
                        Either::Left((timestamp, pending_event)) => {
                            drop(pending_event);
                            self.router.on_frame(timestamp);
                        }
                        Either::Right((event, pending_frame)) => {
                            drop(pending_frame);
                            self.dispatch(event);
                        }
                    }
                }
                (Some(frames), None) => {
                    let timestamp = frames.receive().await;
                    self.router.on_frame(timestamp);
                }
                (None, Some(events)) => {
                    let event = events.receive().await;
                    self.dispatch(event);
                }
                (None, None) => core::future::pending::<()>().await,
            }
        }
    }

    fn dispatch(&self, event: LifecycleEvent) {
        match self.timer.on_lifecycle(event) {
            Ok(()) => {}
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Lifecycle event {} not reconciled: {:?}",
                    event,
                    defmt::Debug2Format(&_err)
                );
            }
        }
    }
}
