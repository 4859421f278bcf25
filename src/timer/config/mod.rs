//! Timer configuration: tick policy, reconciliation units and storage key.
//!
//! ```
//! use korri_ticker::core::TickPolicy;
//! use korri_ticker::timer::config::{ReconcileMode, TimerConfig};
//!
//! let config = TimerConfig::builder()
//!     .tick_policy(TickPolicy::Delayed(0.5))
//!     .reconcile(ReconcileMode::PolicyUnits)
//!     .scoped_key(7)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.store_key().instance(), Some(7));
//! ```
use crate::core::TickPolicy;
use crate::error::ConfigError;
use crate::timer::traits::timestamp_store::{StoreKey, BACKGROUND_ENTRY_KEY};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Unit used when adding the suspended interval to the elapsed counter.
///
/// Live ticks count one unit per logical tick. With `Delayed(T)` and
/// `T != 1.0` a unit is not a second, so the two paths disagree unless
/// `PolicyUnits` is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReconcileMode {
    /// Add raw seconds (historical behavior).
    #[default]
    LegacySeconds,
    /// Convert seconds to tick units through the active policy.
    PolicyUnits,
}

impl ReconcileMode {
    /// Elapsed units represented by `seconds` under `policy`.
    pub fn units(&self, policy: TickPolicy, seconds: f64) -> f64 {
        match self {
            Self::LegacySeconds => seconds,
            Self::PolicyUnits => policy.seconds_to_units(seconds),
        }
    }
}

/// What a resume does when the store holds no background-entry timestamp
/// (absent key, or the `0.0` a host store returns for one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MissingEntry {
    /// Read the entry as `0.0` and reconcile against the epoch. The
    /// suspended interval then covers any target, so the cycle completes
    /// with [`CompletionKind::Background`](crate::core::CompletionKind).
    #[default]
    Epoch,
    /// Return [`LifecycleError::MissingTimestamp`](crate::error::LifecycleError)
    /// and leave the timer untouched.
    Reject,
}

/// Validated timer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    tick_policy: TickPolicy,
    reconcile: ReconcileMode,
    missing_entry: MissingEntry,
    store_key: StoreKey,
}

impl TimerConfig {
    /// Start from the defaults.
    pub fn builder() -> TimerConfigBuilder {
        TimerConfigBuilder::new()
    }

    #[inline]
    pub fn tick_policy(&self) -> TickPolicy {
        self.tick_policy
    }

    #[inline]
    pub fn reconcile(&self) -> ReconcileMode {
        self.reconcile
    }

    #[inline]
    pub fn missing_entry(&self) -> MissingEntry {
        self.missing_entry
    }

    #[inline]
    pub fn store_key(&self) -> StoreKey {
        self.store_key
    }
}

/// One logical tick per second, legacy reconciliation, shared key, missing
/// entries read as the epoch.
impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_policy: TickPolicy::per_second(),
            reconcile: ReconcileMode::LegacySeconds,
            missing_entry: MissingEntry::Epoch,
            store_key: StoreKey::default(),
        }
    }
}

/// Builder for [`TimerConfig`].
#[derive(Debug, Clone, Copy)]
pub struct TimerConfigBuilder {
    config: TimerConfig,
}

impl TimerConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: TimerConfig::default(),
        }
    }

    pub fn tick_policy(mut self, policy: TickPolicy) -> Self {
        self.config.tick_policy = policy;
        self
    }

    pub fn reconcile(mut self, mode: ReconcileMode) -> Self {
        self.config.reconcile = mode;
        self
    }

    pub fn missing_entry(mut self, missing: MissingEntry) -> Self {
        self.config.missing_entry = missing;
        self
    }

    /// Use an explicit storage key.
    pub fn store_key(mut self, key: StoreKey) -> Self {
        self.config.store_key = key;
        self
    }

    /// Scope the default key to `instance`.
    pub fn scoped_key(mut self, instance: u32) -> Self {
        self.config.store_key = StoreKey::scoped(BACKGROUND_ENTRY_KEY, instance);
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<TimerConfig, ConfigError> {
        validate_policy(self.config.tick_policy)?;
        Ok(self.config)
    }
}

impl Default for TimerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A `Delayed` threshold must be finite and non-negative.
pub fn validate_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(ConfigError::InvalidThreshold { threshold })
    }
}

/// Reject a `Delayed` policy whose threshold fails [`validate_threshold`].
pub fn validate_policy(policy: TickPolicy) -> Result<TickPolicy, ConfigError> {
    if let TickPolicy::Delayed(threshold) = policy {
        validate_threshold(threshold)?;
    }
    Ok(policy)
}
