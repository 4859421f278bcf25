//! Interval timer core: countdown state machine, configuration, async
//! runner, and the collaborator traits implemented by the host.
pub mod config;
pub mod interval;
pub mod runner;
pub mod store;
pub mod traits;
