//! Tick router: sits between a frame sink and its owner so the sink can be
//! reconfigured without the owner re-subscribing.
//!
//! For every logical tick the router:
//!
//! * publishes a [`TickNotification`] on the attached broadcast channel
//!   (best-effort, for any number of passive observers);
//! * forwards the tick exactly once to the listener fixed at construction.
//!
//! Both references are non-owning; the borrow checker guarantees the sink
//! and the listener outlive the router.
use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, pubsub::PubSubChannel};

use crate::core::{LogicalTick, TickNotification};
use crate::ticker::traits::{frame_sink::FrameSink, tick_listener::TickListener};

//==================================================================================Broadcast

/// Well-known name of the process-wide tick broadcast.
pub const TICK_NOTIFICATION_NAME: &str = "TickSourceDidTick";

/// Messages kept for lagging subscribers before the oldest is overwritten.
pub const TICK_BROADCAST_CAPACITY: usize = 8;
/// Maximum number of passive observers.
pub const TICK_BROADCAST_SUBSCRIBERS: usize = 4;

/// Broadcast channel carrying [`TickNotification`]s.
///
/// Routers publish with `publish_immediate`, so a full queue drops the
/// oldest notification instead of blocking tick delivery.
pub type TickBroadcast = PubSubChannel<
    CriticalSectionRawMutex,
    TickNotification,
    TICK_BROADCAST_CAPACITY,
    TICK_BROADCAST_SUBSCRIBERS,
    1,
>;

/// Process-wide broadcast named [`TICK_NOTIFICATION_NAME`].
pub static TICK_NOTIFICATIONS: TickBroadcast = PubSubChannel::new();

//==================================================================================Router

/// Forwards logical ticks from one sink to one listener.
pub struct TickRouter<'a, S: ?Sized, L: ?Sized> {
    source: &'a S,
    listener: &'a L,
    broadcast: Option<&'a TickBroadcast>,
}

impl<'a, S, L> TickRouter<'a, S, L>
where
    S: FrameSink + ?Sized,
    L: TickListener + ?Sized,
{
    /// Route ticks of `source` to `listener`, without broadcasting.
    pub fn new(source: &'a S, listener: &'a L) -> Self {
        Self {
            source,
            listener,
            broadcast: None,
        }
    }

    /// Also publish every tick on `broadcast`.
    pub fn with_broadcast(mut self, broadcast: &'a TickBroadcast) -> Self {
        self.broadcast = Some(broadcast);
        self
    }

    /// Whether a broadcast channel is attached.
    #[inline]
    pub fn is_broadcasting(&self) -> bool {
        self.broadcast.is_some()
    }

    /// Feed one raw frame. Returns `true` when it produced a logical tick.
    pub fn on_frame(&self, timestamp: f64) -> bool {
        match self.source.filter_frame(timestamp) {
            Some(tick) => {
                self.forward(tick);
                true
            }
            None => false,
        }
    }

    /// Deliver an already-filtered logical tick.
    pub fn forward(&self, tick: LogicalTick) {
        if let Some(broadcast) = self.broadcast {
            broadcast
                .immediate_publisher()
                .publish_immediate(TickNotification::from(tick));
        }
        self.listener.on_tick(&tick);
    }
}
