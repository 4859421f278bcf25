//! Tick source: owns the registration with the platform refresh driver and
//! applies the active [`TickPolicy`] to raw frames.
//!
//! # Filtering rules
//!
//! ```text
//! no baseline (last == 0.0)   -> store t as baseline, emit nothing
//! PerFrame                    -> last = t, emit
//! Delayed(T), t - last <  T   -> nothing (baseline kept)
//! Delayed(T), t - last >= T   -> last = t, emit
//! ```
//!
//! The first callback after `start` is always absorbed so the first logical
//! tick never covers a zero-length interval.
use crate::core::{LogicalTick, SourceId, TickPolicy};
use crate::error::ConfigError;
use crate::ticker::traits::tick_driver::TickDriver;
use crate::timer::config::validate_policy;

/// Baseline sentinel: no frame observed since the last `start`.
const NO_BASELINE: f64 = 0.0;

/// Policy-filtering wrapper around a [`TickDriver`].
///
/// Invariant: `registration` is `Some` iff the source is observing, and
/// stopping always resets the baseline.
pub struct TickSource<D: TickDriver> {
    id: SourceId,
    driver: D,
    registration: Option<D::Handle>,
    last_timestamp: f64,
    policy: TickPolicy,
}

impl<D: TickDriver> TickSource<D> {
    /// Wrap `driver` without registering yet.
    pub fn new(driver: D, policy: TickPolicy) -> Self {
        Self {
            id: SourceId::next(),
            driver,
            registration: None,
            last_timestamp: NO_BASELINE,
            policy,
        }
    }

    #[inline]
    pub fn id(&self) -> SourceId {
        self.id
    }

    #[inline]
    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    /// Baseline timestamp, `0.0` when none.
    #[inline]
    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    #[inline]
    pub fn is_observing(&self) -> bool {
        self.registration.is_some()
    }

    /// Access the wrapped driver.
    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Replace the policy. Applies from the next raw frame; the baseline is
    /// kept as is. A `Delayed` threshold that is negative or not finite is
    /// rejected and the current policy kept.
    pub fn configure(&mut self, policy: TickPolicy) -> Result<(), ConfigError> {
        self.policy = validate_policy(policy)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Tick source {} policy: {}", self.id, self.policy);

        Ok(())
    }

    /// Register with the driver. No-op when already observing.
    pub fn start(&mut self) {
        if self.registration.is_some() {
            return;
        }
        self.registration = Some(self.driver.register());

        #[cfg(feature = "defmt")]
        defmt::debug!("Tick source {} registered", self.id);
    }

    /// Unregister and drop the baseline. No-op when not observing.
    pub fn stop(&mut self) {
        let Some(handle) = self.registration.take() else {
            return;
        };
        self.driver.unregister(handle);
        self.last_timestamp = NO_BASELINE;

        #[cfg(feature = "defmt")]
        defmt::debug!("Tick source {} unregistered", self.id);
    }

    /// Apply the policy to one raw frame.
    pub fn on_raw_tick(&mut self, timestamp: f64) -> Option<LogicalTick> {
        if self.registration.is_none() {
            // Late callback from a driver that was already unregistered.
            #[cfg(feature = "defmt")]
            defmt::trace!("Tick source {} ignoring frame while stopped", self.id);
            return None;
        }

        if self.last_timestamp == NO_BASELINE {
            self.last_timestamp = timestamp;
            return None;
        }

        let interval = timestamp - self.last_timestamp;
        if let TickPolicy::Delayed(threshold) = self.policy {
            if interval < threshold {
                return None;
            }
        }

        self.last_timestamp = timestamp;
        Some(LogicalTick {
            source: self.id,
            timestamp,
            interval,
        })
    }
}

impl<D: TickDriver> Drop for TickSource<D> {
    fn drop(&mut self) {
        self.stop();
    }
}
