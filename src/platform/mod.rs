//! Host conveniences backed by the standard library.
mod system_clock;

pub use system_clock::SystemClock;
