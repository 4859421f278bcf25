//! Wall-clock time source. Unlike frame timestamps, epoch time keeps
//! advancing while the application is suspended, which is what
//! reconciliation relies on.

/// Seconds since the Unix epoch.
pub trait WallClock {
    fn now_epoch_seconds(&self) -> f64;
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now_epoch_seconds(&self) -> f64 {
        (**self).now_epoch_seconds()
    }
}
