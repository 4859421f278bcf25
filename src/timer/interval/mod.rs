//! Interval timer: converts logical ticks into an elapsed counter, detects
//! threshold crossings, and reconciles elapsed time across suspension.
//!
//! # Locking
//!
//! Counter, target, flags, the owned [`TickSource`] and the store live in a
//! single [`embassy_sync::blocking_mutex::Mutex`]. Every operation holds it
//! for a bounded field update only; delegate callbacks run after the lock is
//! released, so a callback may call back into the timer (for example
//! `stop()` from `on_finish`).
//!
//! A frame delivered while the lock is already held by the same context
//! (a driver calling back from `register`/`unregister`) is dropped rather
//! than re-entering the state.
//!
//! A tick racing a `restart` sees either the old cycle or the new one. Each
//! (re)arm bumps a cycle counter; a completion check whose cycle was
//! superseded between the increment and the check is dropped.
//!
//! # Units
//!
//! Live ticks add exactly one unit each. Reconciliation adds the suspended
//! wall-clock interval converted by the configured
//! [`ReconcileMode`](crate::timer::config::ReconcileMode).
use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::core::{
    CompletionKind, LifecycleEvent, LogicalTick, SourceId, StartMode, TickPolicy, TimerPhase,
    TimerSnapshot,
};
use crate::error::{ConfigError, LifecycleError};
use crate::ticker::router::TickRouter;
use crate::ticker::source::TickSource;
use crate::ticker::traits::{
    frame_sink::FrameSink, tick_driver::TickDriver, tick_listener::TickListener,
};
use crate::timer::config::{validate_policy, MissingEntry, ReconcileMode, TimerConfig};
use crate::timer::traits::{
    delegate::TimerDelegate, lifecycle::LifecycleObserver, timestamp_store::StoreKey,
    timestamp_store::TimestampStore, wall_clock::WallClock,
};

//==================================================================================State

/// Mutable timer fields, always accessed under the lock.
#[derive(Debug, Clone, Copy, Default)]
struct TimerState {
    target_seconds: f64,
    elapsed: f64,
    running: bool,
    repeating: bool,
    /// Gate checked by ticks; distinct from `running` so a re-arm is never
    /// observed half done.
    accepting_ticks: bool,
    /// Bumped on every arm/disarm.
    cycle: u32,
}

impl TimerState {
    /// Reset the counter for a new cycle of `target_seconds`.
    fn arm(&mut self, target_seconds: f64) {
        self.accepting_ticks = false;
        self.target_seconds = target_seconds;
        self.elapsed = 0.0;
        self.cycle = self.cycle.wrapping_add(1);
        self.accepting_ticks = true;
    }

    /// Back to idle.
    fn disarm(&mut self) {
        self.running = false;
        self.accepting_ticks = false;
        self.target_seconds = 0.0;
        self.elapsed = 0.0;
        self.cycle = self.cycle.wrapping_add(1);
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            target_seconds: self.target_seconds,
            elapsed: self.elapsed,
            running: self.running,
            repeating: self.repeating,
            accepting_ticks: self.accepting_ticks,
        }
    }
}

/// Everything guarded by the timer lock.
struct Shared<Drv: TickDriver, S> {
    source: TickSource<Drv>,
    store: S,
    state: TimerState,
}

impl<Drv: TickDriver, S> Shared<Drv, S> {
    /// Apply a completion: re-arm when repeating, otherwise stop.
    fn complete(&mut self) {
        if self.state.repeating {
            let target = self.state.target_seconds;
            self.state.arm(target);
        } else {
            self.stop();
        }
    }

    fn stop(&mut self) {
        self.state.disarm();
        self.source.stop();
    }
}

//==================================================================================Timer

/// Countdown timer driven by logical ticks.
///
/// `M` selects the raw mutex: `CriticalSectionRawMutex` when ticks and
/// lifecycle signals come from different contexts, `NoopRawMutex` when the
/// host is single-threaded.
pub struct IntervalTimer<M, Drv, S, C, D>
where
    M: RawMutex,
    Drv: TickDriver,
    S: TimestampStore,
    C: WallClock,
    D: TimerDelegate,
{
    shared: Mutex<M, RefCell<Shared<Drv, S>>>,
    clock: C,
    delegate: D,
    source_id: SourceId,
    reconcile: ReconcileMode,
    missing_entry: MissingEntry,
    store_key: StoreKey,
}

impl<M, Drv, S, C, D> IntervalTimer<M, Drv, S, C, D>
where
    M: RawMutex,
    Drv: TickDriver,
    S: TimestampStore,
    C: WallClock,
    D: TimerDelegate,
{
    /// Build an idle timer. The tick source is created here and lives as
    /// long as the timer.
    pub fn new(driver: Drv, store: S, clock: C, delegate: D, config: TimerConfig) -> Self {
        let source = TickSource::new(driver, config.tick_policy());
        let source_id = source.id();
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                source,
                store,
                state: TimerState::default(),
            })),
            clock,
            delegate,
            source_id,
            reconcile: config.reconcile(),
            missing_entry: config.missing_entry(),
            store_key: config.store_key(),
        }
    }

    /// Run `f` on the guarded fields.
    fn with_shared<R>(&self, f: impl FnOnce(&mut Shared<Drv, S>) -> R) -> R {
        self.shared.lock(|cell| f(&mut cell.borrow_mut()))
    }

    //==============================================================================Control

    /// Start a countdown of `duration_seconds` units.
    ///
    /// When the timer is already running this behaves like
    /// [`restart`](Self::restart): the new duration applies, `repeating` is
    /// ignored, and [`StartMode::Restarted`] is returned. Durations `<= 0`
    /// complete on the first accepted tick.
    pub fn start(&self, duration_seconds: f64, repeating: bool) -> StartMode {
        let mode = self.with_shared(|shared| {
            if shared.state.running {
                shared.state.arm(duration_seconds);
                return StartMode::Restarted;
            }
            shared.state.repeating = repeating;
            shared.state.running = true;
            shared.state.arm(duration_seconds);
            shared.source.start();
            StartMode::Started
        });

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Timer start: {} s, repeating: {}, mode: {}",
            duration_seconds,
            repeating,
            mode
        );

        mode
    }

    /// [`start`](Self::start) with a duration in minutes.
    pub fn start_minutes(&self, minutes: f64, repeating: bool) -> StartMode {
        self.start(minutes * 60.0, repeating)
    }

    /// Reset the counter and apply a new duration. Returns `false` (and does
    /// nothing) when idle.
    pub fn restart(&self, duration_seconds: f64) -> bool {
        let restarted = self.with_shared(|shared| {
            if !shared.state.running {
                return false;
            }
            shared.state.arm(duration_seconds);
            true
        });

        #[cfg(feature = "defmt")]
        {
            if restarted {
                defmt::info!("Timer restart: {} s", duration_seconds);
            }
        }

        restarted
    }

    /// [`restart`](Self::restart) with a duration in minutes.
    pub fn restart_minutes(&self, minutes: f64) -> bool {
        self.restart(minutes * 60.0)
    }

    /// Stop and reset. Idempotent; never calls the delegate.
    pub fn stop(&self) {
        self.with_shared(|shared| shared.stop());

        #[cfg(feature = "defmt")]
        defmt::debug!("Timer stopped");
    }

    /// Change the tick policy of the owned source. Applies from the next
    /// frame. An invalid `Delayed` threshold is rejected and the current
    /// policy kept.
    pub fn set_tick_policy(&self, policy: TickPolicy) -> Result<(), ConfigError> {
        let policy = validate_policy(policy)?;
        self.with_shared(|shared| shared.source.configure(policy))
    }

    //==============================================================================Ticks

    /// Count one logical tick.
    ///
    /// No-op unless the timer accepts ticks. Calls `on_progress` with the new
    /// counter, then `on_finish(Foreground)` when the target is reached.
    pub fn on_logical_tick(&self) {
        let accepted = self.with_shared(|shared| {
            let state = &mut shared.state;
            if !state.accepting_ticks {
                return None;
            }
            state.elapsed += 1.0;
            Some((state.elapsed, state.cycle))
        });
        let Some((elapsed, cycle)) = accepted else {
            return;
        };

        self.delegate.on_progress(self.source_id, elapsed);

        let finished = self.with_shared(|shared| {
            let state = &shared.state;
            // Superseded by restart/stop/rollover while progress ran.
            if state.cycle != cycle || !state.accepting_ticks {
                return false;
            }
            if state.elapsed < state.target_seconds {
                return false;
            }
            shared.complete();
            true
        });

        if finished {
            #[cfg(feature = "defmt")]
            defmt::info!("Timer finished in foreground after {} units", elapsed);

            self.delegate
                .on_finish(self.source_id, CompletionKind::Foreground);
        }
    }

    //==============================================================================Lifecycle

    /// Persist the current epoch time. No-op when idle.
    pub fn on_enter_background(&self) -> Result<(), LifecycleError<S::Error>> {
        self.with_shared(|shared| -> Result<(), LifecycleError<S::Error>> {
            if !shared.state.running {
                return Ok(());
            }
            let now = self.clock.now_epoch_seconds();
            shared
                .store
                .set_f64(self.store_key, now)
                .map_err(LifecycleError::Store)?;

            #[cfg(feature = "defmt")]
            defmt::debug!("Timer entering background at {}", now);

            Ok(())
        })
    }

    /// Add the time spent suspended. No-op when idle.
    ///
    /// Completes with [`CompletionKind::Background`] when the suspended
    /// interval reaches the target; otherwise the interval is added to the
    /// counter. A clock that moved backwards counts as zero. A missing
    /// timestamp is handled as configured by [`MissingEntry`].
    pub fn on_enter_foreground(&self) -> Result<(), LifecycleError<S::Error>> {
        let finished = self.with_shared(|shared| -> Result<bool, LifecycleError<S::Error>> {
            if !shared.state.running {
                return Ok(false);
            }
            let stored = shared
                .store
                .get_f64(self.store_key)
                .map_err(LifecycleError::Store)?
                .filter(|timestamp| *timestamp > 0.0);
            let persisted = match (stored, self.missing_entry) {
                (Some(timestamp), _) => timestamp,
                (None, MissingEntry::Epoch) => 0.0,
                (None, MissingEntry::Reject) => {
                    return Err(LifecycleError::MissingTimestamp {
                        key: self.store_key,
                    })
                }
            };

            let now = self.clock.now_epoch_seconds();
            let seconds = (now - persisted).max(0.0);
            let units = self.reconcile.units(shared.source.policy(), seconds);

            #[cfg(feature = "defmt")]
            defmt::debug!(
                "Timer reconciling {} s suspended ({} units)",
                seconds,
                units
            );

            if shared.state.elapsed + units >= shared.state.target_seconds {
                shared.complete();
                Ok(true)
            } else {
                shared.state.elapsed += units;
                Ok(false)
            }
        })?;

        if finished {
            #[cfg(feature = "defmt")]
            defmt::info!("Timer finished while in background");

            self.delegate
                .on_finish(self.source_id, CompletionKind::Background);
        }
        Ok(())
    }

    /// Dispatch a lifecycle signal to the matching handler.
    pub fn handle_lifecycle(&self, event: LifecycleEvent) -> Result<(), LifecycleError<S::Error>> {
        match event {
            LifecycleEvent::EnteredBackground => self.on_enter_background(),
            LifecycleEvent::EnteredForeground => self.on_enter_foreground(),
        }
    }

    //==============================================================================Accessors

    /// Consistent copy of the state.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.with_shared(|shared| shared.state.snapshot())
    }

    pub fn phase(&self) -> TimerPhase {
        self.snapshot().phase()
    }

    pub fn is_running(&self) -> bool {
        self.with_shared(|shared| shared.state.running)
    }

    pub fn is_repeating(&self) -> bool {
        self.with_shared(|shared| shared.state.repeating)
    }

    /// Current countdown length, `0.0` when idle.
    pub fn target_seconds(&self) -> f64 {
        self.with_shared(|shared| shared.state.target_seconds)
    }

    /// Units accumulated in the current cycle.
    pub fn elapsed(&self) -> f64 {
        self.with_shared(|shared| shared.state.elapsed)
    }

    pub fn tick_policy(&self) -> TickPolicy {
        self.with_shared(|shared| shared.source.policy())
    }

    /// Identifier of the owned tick source, also passed to every delegate
    /// callback.
    pub fn source_id(&self) -> SourceId {
        self.source_id
    }

    /// Whether the owned tick source is registered with the driver.
    pub fn is_observing(&self) -> bool {
        self.with_shared(|shared| shared.source.is_observing())
    }

    pub fn store_key(&self) -> StoreKey {
        self.store_key
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    /// Router feeding this timer's own ticks back into it.
    pub fn router(&self) -> TickRouter<'_, Self, Self> {
        TickRouter::new(self, self)
    }
}

//==================================================================================Seams

impl<M, Drv, S, C, D> FrameSink for IntervalTimer<M, Drv, S, C, D>
where
    M: RawMutex,
    Drv: TickDriver,
    S: TimestampStore,
    C: WallClock,
    D: TimerDelegate,
{
    fn filter_frame(&self, timestamp: f64) -> Option<LogicalTick> {
        self.shared.lock(|cell| match cell.try_borrow_mut() {
            Ok(mut shared) => shared.source.on_raw_tick(timestamp),
            // Re-entered from a driver call made under the lock.
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("Frame at {} dropped: timer busy", timestamp);
                None
            }
        })
    }
}

impl<M, Drv, S, C, D> TickListener for IntervalTimer<M, Drv, S, C, D>
where
    M: RawMutex,
    Drv: TickDriver,
    S: TimestampStore,
    C: WallClock,
    D: TimerDelegate,
{
    fn on_tick(&self, _tick: &LogicalTick) {
        self.on_logical_tick();
    }
}

impl<M, Drv, S, C, D> LifecycleObserver for IntervalTimer<M, Drv, S, C, D>
where
    M: RawMutex,
    Drv: TickDriver,
    S: TimestampStore,
    C: WallClock,
    D: TimerDelegate,
{
    type Error = LifecycleError<S::Error>;

    fn on_lifecycle(&self, event: LifecycleEvent) -> Result<(), Self::Error> {
        self.handle_lifecycle(event)
    }
}
