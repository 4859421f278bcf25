use std::time::{SystemTime, UNIX_EPOCH};

use crate::timer::traits::wall_clock::WallClock;

/// [`WallClock`] reading `SystemTime`.
///
/// A system clock set before the epoch reads as `0.0`, which the timer
/// treats as "no timestamp".
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_epoch_seconds(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64())
            .unwrap_or(0.0)
    }
}
