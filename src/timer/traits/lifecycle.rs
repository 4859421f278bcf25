//! Receiver of application lifecycle signals.
use crate::core::LifecycleEvent;

/// Anything that reacts to background/foreground transitions.
pub trait LifecycleObserver {
    type Error: core::fmt::Debug;
    /// Handle one signal. Errors are informational; they never stop the
    /// observer from handling later signals.
    fn on_lifecycle(&self, event: LifecycleEvent) -> Result<(), Self::Error>;
}

impl<O: LifecycleObserver + ?Sized> LifecycleObserver for &O {
    type Error = O::Error;

    fn on_lifecycle(&self, event: LifecycleEvent) -> Result<(), Self::Error> {
        (**self).on_lifecycle(event)
    }
}
