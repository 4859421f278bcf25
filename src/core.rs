//! Defines the data contract shared by the tick layer, the timer core and
//! the host: tick policies, logical ticks, completion kinds, lifecycle
//! events and timer snapshots.
//!
//! Everything in here is plain `Copy` data so it can cross channels and
//! critical sections without allocation.
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Threshold used by the timer when the host does not pick a policy:
/// one logical tick per second of wall time.
pub const DEFAULT_TICK_SECONDS: f64 = 1.0;

static NEXT_SOURCE_ID: AtomicU32 = AtomicU32::new(1);

//==================================================================================TICK_POLICY

/// Decides which raw frame callbacks become logical ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TickPolicy {
    /// Every frame after the baseline produces one logical tick.
    PerFrame,
    /// A logical tick fires once at least `threshold` seconds have passed
    /// since the previous logical tick (or the baseline).
    Delayed(f64),
}

impl TickPolicy {
    /// One logical tick per second.
    pub const fn per_second() -> Self {
        Self::Delayed(DEFAULT_TICK_SECONDS)
    }

    /// Build a `Delayed` policy from an embassy duration.
    pub fn delayed_by(threshold: embassy_time::Duration) -> Self {
        Self::Delayed(threshold.as_micros() as f64 / 1_000_000.0)
    }

    /// Threshold in seconds, `None` for `PerFrame`.
    #[inline]
    pub fn threshold(&self) -> Option<f64> {
        match self {
            Self::PerFrame => None,
            Self::Delayed(threshold) => Some(*threshold),
        }
    }

    /// Convert a wall-clock span into elapsed units for this policy.
    ///
    /// `Delayed(T)` counts one unit per `T` seconds. `PerFrame` has no known
    /// frame period, so seconds are returned unchanged.
    pub fn seconds_to_units(&self, seconds: f64) -> f64 {
        match self {
            Self::Delayed(threshold) if *threshold > 0.0 => seconds / threshold,
            _ => seconds,
        }
    }
}

impl Default for TickPolicy {
    fn default() -> Self {
        Self::per_second()
    }
}

//==================================================================================TICKS

/// Process-unique identifier of a tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SourceId(u32);

impl SourceId {
    /// Allocate the next identifier.
    pub fn next() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Return the raw value.
    #[inline]
    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// One accepted tick, after policy filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LogicalTick {
    /// Source that emitted the tick.
    pub source: SourceId,
    /// Platform timestamp of the frame that fired (monotonic seconds).
    pub timestamp: f64,
    /// Seconds since the previous logical tick or the baseline.
    pub interval: f64,
}

/// Payload published on the process-wide tick channel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickNotification {
    /// Handle to the originating tick source.
    pub source: SourceId,
    /// Platform timestamp of the tick.
    pub timestamp: f64,
}

impl From<LogicalTick> for TickNotification {
    fn from(tick: LogicalTick) -> Self {
        Self {
            source: tick.source,
            timestamp: tick.timestamp,
        }
    }
}

//==================================================================================TIMER

/// Where a threshold crossing was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompletionKind {
    /// Crossed during live tick delivery.
    Foreground,
    /// Crossed retroactively while reconciling a resume from suspension.
    Background,
}

/// Application lifecycle signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LifecycleEvent {
    EnteredBackground,
    EnteredForeground,
}

/// Coarse timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerPhase {
    Idle,
    Running,
}

/// What `start` actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartMode {
    /// The timer was idle and is now running.
    Started,
    /// The timer was already running; the call behaved like `restart` and
    /// the `repeating` argument was ignored.
    Restarted,
}

/// Copy of the timer state taken under the lock.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerSnapshot {
    /// Countdown length.
    pub target_seconds: f64,
    /// Units accumulated in the current cycle.
    pub elapsed: f64,
    pub running: bool,
    pub repeating: bool,
    pub accepting_ticks: bool,
}

impl TimerSnapshot {
    #[inline]
    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else {
            TimerPhase::Idle
        }
    }

    /// Units left before the next completion, never negative.
    #[inline]
    pub fn remaining(&self) -> f64 {
        (self.target_seconds - self.elapsed).max(0.0)
    }
}
