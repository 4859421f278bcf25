//! # Quickstart Example
//!
//! Minimal example demonstrating the basics of korri-ticker:
//! - Configure and build an interval timer
//! - Feed it simulated refresh callbacks through its router
//! - Reconcile time spent in background
//!
//! This example uses `std` for a quick trial run.
//!
//! ```bash
//! cargo run --example quickstart --features std
//! ```

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use korri_ticker::core::{CompletionKind, SourceId, TickPolicy};
use korri_ticker::platform::SystemClock;
use korri_ticker::ticker::traits::tick_driver::TickDriver;
use korri_ticker::timer::config::TimerConfig;
use korri_ticker::timer::interval::IntervalTimer;
use korri_ticker::timer::store::MemoryStore;
use korri_ticker::timer::traits::{delegate::TimerDelegate, wall_clock::WallClock};

/// Stand-in for a display link: only reports (un)registration.
struct PrintingDriver;

impl TickDriver for PrintingDriver {
    type Handle = ();

    fn register(&mut self) {
        println!("   [driver] refresh callbacks on");
    }

    fn unregister(&mut self, _handle: ()) {
        println!("   [driver] refresh callbacks off");
    }
}

/// System clock shifted forward to pretend the process was suspended.
struct SuspendableClock<'a> {
    offset: &'a Cell<f64>,
}

impl WallClock for SuspendableClock<'_> {
    fn now_epoch_seconds(&self) -> f64 {
        SystemClock.now_epoch_seconds() + self.offset.get()
    }
}

struct PrintingDelegate;

impl TimerDelegate for PrintingDelegate {
    fn on_progress(&self, source: SourceId, elapsed: f64) {
        println!("   [delegate] timer #{}: {} s elapsed", source.raw(), elapsed);
    }

    fn on_finish(&self, source: SourceId, kind: CompletionKind) {
        println!("   [delegate] timer #{}: finished ({:?})", source.raw(), kind);
    }
}

fn main() {
    println!("=== korri-ticker Quickstart ===\n");

    // ======================================================================
    // 1. Build a timer ticking once per second of frame time
    // ======================================================================
    println!("1. Building a timer");

    let config = match TimerConfig::builder()
        .tick_policy(TickPolicy::per_second())
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("   Invalid configuration: {}", e);
            return;
        }
    };
    let offset = Cell::new(0.0);
    let timer: IntervalTimer<NoopRawMutex, _, MemoryStore<1>, _, _> = IntervalTimer::new(
        PrintingDriver,
        MemoryStore::new(),
        SuspendableClock { offset: &offset },
        PrintingDelegate,
        config,
    );
    println!("   Store key: {}\n", timer.store_key());

    // ======================================================================
    // 2. Run a 3 s countdown on a simulated 4 Hz refresh
    // ======================================================================
    println!("2. Counting down 3 s at 4 Hz");

    timer.start(3.0, false);
    let router = timer.router();
    for frame in 1..=16 {
        router.on_frame(100.0 + frame as f64 * 0.25);
    }
    println!("   Phase: {:?}\n", timer.phase());

    // ======================================================================
    // 3. Suspend for 20 s in the middle of a 10 s countdown
    // ======================================================================
    println!("3. Background reconciliation");

    timer.start(10.0, false);
    for frame in 1..=9 {
        router.on_frame(200.0 + frame as f64 * 0.25);
    }
    println!("   Elapsed before suspension: {} s", timer.elapsed());

    if let Err(e) = timer.on_enter_background() {
        eprintln!("   Could not persist timestamp: {}", e);
    }
    offset.set(20.0);
    if let Err(e) = timer.on_enter_foreground() {
        eprintln!("   Could not reconcile: {}", e);
    }
    println!("   Phase: {:?}", timer.phase());
}
