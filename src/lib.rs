//! `korri-ticker` library: a frame-driven interval timer for `no_std`
//! hosts. The crate exposes the tick layer (policy filtering on top of a
//! platform refresh driver, routing and broadcast), the timer core
//! (countdown state machine with suspend/resume reconciliation) and the
//! collaborator traits the host implements.
#![no_std]
#[cfg(any(feature = "std", test))]
extern crate std;
//==================================================================================
/// Plain data types shared by every layer (policies, ticks, lifecycle events).
pub mod core;
/// Collaborator and configuration errors.
pub mod error;
/// Host conveniences backed by `std`.
#[cfg(feature = "std")]
pub mod platform;
/// Tick layer: tick source, router, and the driver abstraction.
pub mod ticker;
/// Interval timer core, configuration, runner and collaborator traits.
pub mod timer;
//==================================================================================
