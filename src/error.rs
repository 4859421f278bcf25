//! Error definitions shared across library modules.
//! Timer state itself never fails: precondition violations degrade to
//! no-ops. The types below cover the collaborators (persistence store,
//! configuration input) whose failures the host may want to observe.
use crate::timer::traits::timestamp_store::StoreKey;
use thiserror_no_std::Error;

#[derive(Error, Debug)]
/// Errors raised while reconciling a lifecycle transition.
///
/// The timer state is left untouched whenever one of these is returned.
pub enum LifecycleError<E: core::fmt::Debug> {
    /// Persistence store refused to read or write the timestamp.
    #[error("Timestamp store error: {0:?}")]
    Store(E),

    /// Resume notification without a stored background-entry timestamp.
    #[error("No background entry timestamp stored under {key}")]
    MissingTimestamp { key: StoreKey },
}

#[derive(Error, Debug, PartialEq)]
/// Rejected timer configuration.
pub enum ConfigError {
    /// `Delayed` threshold must be finite and non-negative.
    #[error("Invalid tick threshold: {threshold}")]
    InvalidThreshold { threshold: f64 },
}

#[derive(Error, Debug, PartialEq, Eq)]
/// Errors raised by the fixed-capacity in-memory store.
pub enum MemoryStoreError {
    /// Every slot holds a different key.
    #[error("Memory store is full")]
    Full,
}
