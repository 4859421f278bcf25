//! Fixed-capacity in-memory [`TimestampStore`]. Values do not survive the
//! process; useful for hosts whose suspension keeps RAM alive, and for demos.
use crate::error::MemoryStoreError;
use crate::timer::traits::timestamp_store::{StoreKey, TimestampStore};

/// Slot pool holding up to `N` keys.
#[derive(Debug, Clone, Copy)]
pub struct MemoryStore<const N: usize> {
    slots: [Option<(StoreKey, f64)>; N],
}

impl<const N: usize> MemoryStore<N> {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the value stored under `key`. Returns it when present.
    pub fn remove(&mut self, key: StoreKey) -> Option<f64> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| matches!(slot, Some((k, _)) if *k == key))?;
        slot.take().map(|(_, value)| value)
    }
}

impl<const N: usize> Default for MemoryStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TimestampStore for MemoryStore<N> {
    type Error = MemoryStoreError;

    fn get_f64(&mut self, key: StoreKey) -> Result<Option<f64>, Self::Error> {
        Ok(self
            .slots
            .iter()
            .flatten()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value))
    }

    fn set_f64(&mut self, key: StoreKey, value: f64) -> Result<(), Self::Error> {
        // Overwrite in place when the key exists, otherwise take a free slot.
        if let Some((_, stored)) = self.slots.iter_mut().flatten().find(|(k, _)| *k == key) {
            *stored = value;
            return Ok(());
        }
        let free = self
            .slots
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or(MemoryStoreError::Full)?;
        *free = Some((key, value));
        Ok(())
    }
}
