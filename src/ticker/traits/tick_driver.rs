//! Minimal abstraction over a frame-synchronized callback driver (display
//! link, vsync interrupt, render loop hook). The driver only manages the
//! registration; the host forwards each refresh callback to
//! [`FrameSink::filter_frame`](super::frame_sink::FrameSink::filter_frame)
//! or [`TickRouter::on_frame`](crate::ticker::router::TickRouter::on_frame).

/// Registration contract with the platform refresh primitive.
///
/// An [`IntervalTimer`](crate::timer::interval::IntervalTimer) calls
/// `register` and `unregister` while holding its lock. Refresh callbacks
/// must be delivered from the platform's own callback context, never
/// synchronously from these two methods: a frame fed back from inside them
/// is dropped, and any other timer call made from inside them panics.
pub trait TickDriver {
    /// Token identifying an active registration.
    type Handle;
    /// Start delivering refresh callbacks. Called at most once per
    /// observation period.
    fn register(&mut self) -> Self::Handle;
    /// Stop delivering refresh callbacks and invalidate `handle`.
    fn unregister(&mut self, handle: Self::Handle);
}
