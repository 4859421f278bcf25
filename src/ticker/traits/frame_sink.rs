//! Entry point for raw refresh callbacks.
use crate::core::LogicalTick;

/// Component that filters raw frames into logical ticks.
///
/// Takes `&self` so a single instance can be shared between the frame
/// context and other contexts; implementors synchronize internally.
pub trait FrameSink {
    /// Feed one raw frame timestamp (monotonic seconds). Returns the logical
    /// tick it produced, if any.
    fn filter_frame(&self, timestamp: f64) -> Option<LogicalTick>;
}

impl<S: FrameSink + ?Sized> FrameSink for &S {
    fn filter_frame(&self, timestamp: f64) -> Option<LogicalTick> {
        (**self).filter_frame(timestamp)
    }
}
