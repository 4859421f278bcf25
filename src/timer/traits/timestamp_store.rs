//! Durable key/value persistence for the background-entry timestamp. Only
//! one `f64` per timer survives a suspension.
use core::fmt;

/// Key used when the host does not scope it per instance.
pub const BACKGROUND_ENTRY_KEY: &str = "IntervalTimer-LostUserFocus";

/// Storage key: a base name plus an optional instance number.
///
/// Timers sharing one store must use distinct scoped keys, otherwise they
/// overwrite each other's timestamp.
///
/// ```
/// use korri_ticker::timer::traits::timestamp_store::StoreKey;
///
/// let key = StoreKey::scoped("countdown", 3);
/// assert_eq!(key.instance(), Some(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StoreKey {
    base: &'static str,
    instance: Option<u32>,
}

impl StoreKey {
    /// Key shared by every instance using `base`.
    pub const fn new(base: &'static str) -> Self {
        Self {
            base,
            instance: None,
        }
    }

    /// Key private to `instance`.
    pub const fn scoped(base: &'static str, instance: u32) -> Self {
        Self {
            base,
            instance: Some(instance),
        }
    }

    #[inline]
    pub const fn base(&self) -> &'static str {
        self.base
    }

    #[inline]
    pub const fn instance(&self) -> Option<u32> {
        self.instance
    }
}

impl Default for StoreKey {
    fn default() -> Self {
        Self::new(BACKGROUND_ENTRY_KEY)
    }
}

/// Renders `base` or `base.instance`, suitable as a key in string-keyed
/// stores.
impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.instance {
            Some(instance) => write!(f, "{}.{}", self.base, instance),
            None => f.write_str(self.base),
        }
    }
}

/// Contract for the persistence collaborator.
pub trait TimestampStore {
    type Error: fmt::Debug;
    /// Read the value stored under `key`; `Ok(None)` when absent.
    fn get_f64(&mut self, key: StoreKey) -> Result<Option<f64>, Self::Error>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_f64(&mut self, key: StoreKey, value: f64) -> Result<(), Self::Error>;
}
