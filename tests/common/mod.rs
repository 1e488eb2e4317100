//! Shared test infrastructure for debounce-indicator integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use debounce_indicator::{EdgeHandler, EdgeSignal, Fault, GpioPin, PinMode, Reactor, Sampler, SharedState, Timings};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embedded_hal_async::delay::DelayNs;
use heapless::{Deque, Vec};

// ============================================================================
// Record-and-Replay Bench
// ============================================================================
//
// A `Bench` stands in for the board: it owns a virtual millisecond clock, a
// scripted input line, the edge line to the registered handler and a log of
// everything the tasks did. `ReplayPin` and `ReplayDelay` borrow the bench, so
// the sampler and the reactor share one timeline. Delays advance the virtual
// clock and yield once, which lets joined task loops interleave under
// `embassy_futures::block_on`.

/// Capacity of the bench event log. Recording past it panics.
pub const LOG_CAPACITY: usize = 256;

/// Capacity of the scripted input queue and of the write history. Exceeding
/// either panics.
pub const SCRIPT_CAPACITY: usize = 32;

/// Something a task did to the bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A pin was configured.
    Configured(PinMode),
    /// An edge handler was registered.
    EdgeEnabled,
    /// The input line was read.
    Read(bool),
    /// An output level was written.
    Wrote(bool),
    /// A task slept for the given milliseconds.
    Waited(u32),
}

/// An [`Event`] stamped with the virtual time it happened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Virtual time in milliseconds.
    pub at_ms: u64,
    /// What happened.
    pub event: Event,
}

/// Simulated board shared by replay pins and delays.
pub struct Bench {
    now_ms: Cell<u64>,
    line: Cell<bool>,
    script: RefCell<Deque<bool, SCRIPT_CAPACITY>>,
    handler: Cell<Option<&'static dyn EdgeHandler>>,
    log: RefCell<Vec<Record, LOG_CAPACITY>>,
    writes: RefCell<Vec<Record, SCRIPT_CAPACITY>>,
}

impl Bench {
    /// Creates a bench at time zero with the input line low.
    pub fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
            line: Cell::new(false),
            script: RefCell::new(Deque::new()),
            handler: Cell::new(None),
            log: RefCell::new(Vec::new()),
            writes: RefCell::new(Vec::new()),
        }
    }

    /// Queues raw levels returned by successive reads of the input line.
    ///
    /// Once the queue runs dry the line holds the last level read.
    ///
    /// # Panics
    /// Panics if the queue would hold more than [`SCRIPT_CAPACITY`] levels.
    pub fn script(&self, levels: &[bool]) {
        let mut script = self.script.borrow_mut();
        for &level in levels {
            if script.push_back(level).is_err() {
                panic!("bench script full: more than {} queued levels", SCRIPT_CAPACITY);
            }
        }
    }

    /// Forces the input line level and drops any queued levels.
    pub fn set_line(&self, level: bool) {
        self.script.borrow_mut().clear();
        self.line.set(level);
    }

    /// Fires the registered edge handler, as the pin interrupt would.
    ///
    /// Returns `false` if no handler has been registered.
    pub fn raise_edge(&self) -> bool {
        match self.handler.get() {
            Some(handler) => {
                handler.on_edge();
                true
            }
            None => false,
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Every recorded event, oldest first.
    pub fn log(&self) -> Vec<Record, LOG_CAPACITY> {
        self.log.borrow().clone()
    }

    /// Every output write, oldest first.
    pub fn writes(&self) -> Vec<Record, SCRIPT_CAPACITY> {
        self.writes.borrow().clone()
    }

    /// Output levels written, oldest first.
    pub fn written_levels(&self) -> Vec<bool, SCRIPT_CAPACITY> {
        self.writes
            .borrow()
            .iter()
            .filter_map(|record| match record.event {
                Event::Wrote(level) => Some(level),
                _ => None,
            })
            .collect()
    }

    /// Clears the event log and the write history. The clock keeps running.
    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
        self.writes.borrow_mut().clear();
    }

    fn record(&self, event: Event) {
        let record = Record {
            at_ms: self.now_ms.get(),
            event,
        };
        if self.log.borrow_mut().push(record).is_err() {
            panic!("bench log full: more than {} events", LOG_CAPACITY);
        }
        if let Event::Wrote(_) = event {
            if self.writes.borrow_mut().push(record).is_err() {
                panic!("bench write history full: more than {} writes", SCRIPT_CAPACITY);
            }
        }
    }

    fn sample_line(&self) -> bool {
        if let Some(level) = self.script.borrow_mut().pop_front() {
            self.line.set(level);
        }
        self.line.get()
    }

    fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get() + u64::from(ms));
    }
}

impl Default for Bench {
    fn default() -> Self {
        Self::new()
    }
}

/// Pin double that reads the bench input line and records every call.
///
/// Faults can be injected per operation to exercise error paths.
pub struct ReplayPin<'b> {
    bench: &'b Bench,
    configure_fault: Option<Fault>,
    edge_fault: Option<Fault>,
    failing_writes: u32,
}

impl<'b> ReplayPin<'b> {
    /// Creates a pin on `bench` that never fails.
    pub fn new(bench: &'b Bench) -> Self {
        Self {
            bench,
            configure_fault: None,
            edge_fault: None,
            failing_writes: 0,
        }
    }

    /// Makes `configure` return `fault`.
    pub fn failing_configure(mut self, fault: Fault) -> Self {
        self.configure_fault = Some(fault);
        self
    }

    /// Makes `enable_edge_interrupt` return `fault`.
    pub fn failing_edge_interrupt(mut self, fault: Fault) -> Self {
        self.edge_fault = Some(fault);
        self
    }

    /// Makes the next `count` writes fail with [`Fault::Io`].
    pub fn failing_writes(mut self, count: u32) -> Self {
        self.failing_writes = count;
        self
    }
}

impl GpioPin for ReplayPin<'_> {
    fn configure(&mut self, mode: PinMode) -> Result<(), Fault> {
        if let Some(fault) = self.configure_fault {
            return Err(fault);
        }
        self.bench.record(Event::Configured(mode));
        Ok(())
    }

    fn read(&self) -> bool {
        let level = self.bench.sample_line();
        self.bench.record(Event::Read(level));
        level
    }

    fn write(&mut self, level: bool) -> Result<(), Fault> {
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(Fault::Io);
        }
        self.bench.record(Event::Wrote(level));
        Ok(())
    }

    fn enable_edge_interrupt(&mut self, on_edge: &'static dyn EdgeHandler) -> Result<(), Fault> {
        if let Some(fault) = self.edge_fault {
            return Err(fault);
        }
        self.bench.handler.set(Some(on_edge));
        self.bench.record(Event::EdgeEnabled);
        Ok(())
    }
}

/// Delay double that advances the bench clock instead of sleeping.
pub struct ReplayDelay<'b> {
    bench: &'b Bench,
}

impl<'b> ReplayDelay<'b> {
    /// Creates a delay on `bench`.
    pub fn new(bench: &'b Bench) -> Self {
        Self { bench }
    }

    async fn wait_ms(&mut self, ms: u32) {
        self.bench.record(Event::Waited(ms));
        self.bench.advance(ms);
        embassy_futures::yield_now().await;
    }
}

impl DelayNs for ReplayDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.wait_ms(ns / 1_000_000).await
    }

    async fn delay_us(&mut self, us: u32) {
        self.wait_ms(us / 1_000).await
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.wait_ms(ms).await
    }
}

// ============================================================================
// Type Aliases
// ============================================================================

pub type TestState = SharedState<NoopRawMutex>;
pub type TestSampler<'a> = Sampler<'a, ReplayPin<'a>, ReplayDelay<'a>, NoopRawMutex>;
pub type TestReactor<'a> = Reactor<'a, ReplayPin<'a>, ReplayDelay<'a>, NoopRawMutex>;

pub const HIGH: bool = true;
pub const LOW: bool = false;

// ============================================================================
// Constructors
// ============================================================================

/// Sampler on `bench` with default timings
pub fn sampler<'a>(bench: &'a Bench, state: &'a TestState, wake: &'static EdgeSignal) -> TestSampler<'a> {
    Sampler::new(
        ReplayPin::new(bench),
        ReplayDelay::new(bench),
        state,
        wake,
        Timings::DEFAULT,
    )
    .unwrap()
}

/// Reactor on `bench` with default timings
pub fn reactor<'a>(bench: &'a Bench, state: &'a TestState) -> TestReactor<'a> {
    Reactor::new(ReplayPin::new(bench), ReplayDelay::new(bench), state, Timings::DEFAULT).unwrap()
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Gaps in milliseconds between consecutive output writes
pub fn write_gaps(bench: &Bench) -> Vec<u64, SCRIPT_CAPACITY> {
    bench
        .writes()
        .windows(2)
        .map(|pair| pair[1].at_ms - pair[0].at_ms)
        .collect()
}

/// Recorded events with timestamps stripped
pub fn events(bench: &Bench) -> Vec<Event, LOG_CAPACITY> {
    bench.log().iter().map(|record: &Record| record.event).collect()
}

/// Levels read from the input line, oldest first
pub fn reads(bench: &Bench) -> Vec<Record, 64> {
    bench
        .log()
        .iter()
        .filter(|record| matches!(record.event, Event::Read(_)))
        .take(64)
        .copied()
        .collect()
}
