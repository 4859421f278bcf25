//! Receiver of routed logical ticks.
use crate::core::LogicalTick;

/// The single listener a [`TickRouter`](crate::ticker::router::TickRouter)
/// forwards to.
pub trait TickListener {
    fn on_tick(&self, tick: &LogicalTick);
}

impl<L: TickListener + ?Sized> TickListener for &L {
    fn on_tick(&self, tick: &LogicalTick) {
        (**self).on_tick(tick)
    }
}
