//! Abstraction traits consumed by the timer (delegate, lifecycle observer,
//! persistence store, and wall clock).
pub mod delegate;
pub mod lifecycle;
pub mod timestamp_store;
pub mod wall_clock;
