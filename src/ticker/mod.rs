//! Tick layer: turns a platform refresh driver into a stream of logical
//! ticks, routes them to a single listener and broadcasts them to passive
//! observers.
//!
//! ## Timestamps
//!
//! Raw timestamps are monotonic seconds supplied by the platform (for
//! example the display refresh timestamp). `0.0` is reserved as the
//! "no baseline yet" sentinel of a [`TickSource`](source::TickSource).

pub mod router;
pub mod source;
pub mod traits;
