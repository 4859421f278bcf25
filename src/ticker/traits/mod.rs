//! Abstraction traits used by the tick layer (platform driver, frame sink and
//! tick listener).
pub mod frame_sink;
pub mod tick_driver;
pub mod tick_listener;
