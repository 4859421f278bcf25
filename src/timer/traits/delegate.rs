//! Host callbacks invoked by the timer, always outside its critical section.
use crate::core::{CompletionKind, SourceId};

/// Progress and completion handler.
///
/// The timer holds the delegate by value. Pass `&handler` to keep the
/// handler non-owned (the borrow then has to outlive the timer), or an
/// `Option` that the host can leave `None` to skip delivery.
///
/// Every callback carries the [`SourceId`] of the calling timer, so one
/// handler shared by several timers can tell them apart.
pub trait TimerDelegate {
    /// Called once per accepted logical tick with the new elapsed value.
    fn on_progress(&self, source: SourceId, elapsed: f64);
    /// Called once per completion (once per cycle when repeating), after the
    /// state transition.
    fn on_finish(&self, source: SourceId, kind: CompletionKind);
}

impl<T: TimerDelegate + ?Sized> TimerDelegate for &T {
    fn on_progress(&self, source: SourceId, elapsed: f64) {
        (**self).on_progress(source, elapsed)
    }

    fn on_finish(&self, source: SourceId, kind: CompletionKind) {
        (**self).on_finish(source, kind)
    }
}

impl<T: TimerDelegate> TimerDelegate for Option<T> {
    fn on_progress(&self, source: SourceId, elapsed: f64) {
        if let Some(delegate) = self {
            delegate.on_progress(source, elapsed);
        }
    }

    fn on_finish(&self, source: SourceId, kind: CompletionKind) {
        if let Some(delegate) = self {
            delegate.on_finish(source, kind);
        }
    }
}

/// Silent delegate.
impl TimerDelegate for () {
    fn on_progress(&self, _source: SourceId, _elapsed: f64) {}

    fn on_finish(&self, _source: SourceId, _kind: CompletionKind) {}
}
