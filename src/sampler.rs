//! Edge-driven debounce sampler.
//!
//! Provides [`Sampler`], which owns the input pin, sleeps until an edge
//! notification arrives, takes two samples spanning the debounce window and
//! commits a held level that differs from the last committed one into the
//! [`SharedState`].

use crate::pin::{Fault, GpioPin, PinMode, Pull};
use crate::signal::{EdgeSignal, Shutdown};
use crate::state::SharedState;
use crate::time::Timings;
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

/// Where the sampler is within one debounce cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplerPhase {
    /// Blocked until the next edge notification.
    Idle,
    /// Taking the first sample.
    FirstSample,
    /// Waiting out the debounce window.
    SettleWait,
    /// Taking the second sample.
    SecondSample,
}

/// Result of one debounce cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceOutcome {
    /// The level held across the window and was written to the register.
    Committed(bool),
    /// The two samples disagreed; the line was still bouncing.
    Unstable,
    /// The level held but equals the last committed value.
    Unchanged,
}

/// Applies the commit rule to a pair of samples.
///
/// `last_committed` is `None` until the first commit, so the first held
/// level is always committed.
pub fn settle(first: bool, second: bool, last_committed: Option<bool>) -> DebounceOutcome {
    if first != second {
        DebounceOutcome::Unstable
    } else if last_committed == Some(second) {
        DebounceOutcome::Unchanged
    } else {
        DebounceOutcome::Committed(second)
    }
}

/// Debounces one input line into the shared state register.
///
/// The sampler is the register's only writer. Edges arriving while a cycle
/// is in flight do not restart its window; they leave at most one pending
/// wake, which starts the next cycle.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared state reference
/// * `P` - Input pin implementation
/// * `D` - Async delay implementation
/// * `M` - Raw mutex guarding the shared state
pub struct Sampler<'a, P: GpioPin, D: DelayNs, M: RawMutex> {
    pin: P,
    delay: D,
    state: &'a SharedState<M>,
    wake: &'static EdgeSignal,
    window_ms: u32,
    last_committed: Option<bool>,
    phase: SamplerPhase,
}

impl<'a, P: GpioPin, D: DelayNs, M: RawMutex> Sampler<'a, P, D, M> {
    /// Configures `pin` as a pulled-up input and routes its edges to `wake`.
    ///
    /// # Errors
    /// Returns the pin's fault if configuration or interrupt registration is
    /// rejected. Nothing is retried.
    pub fn new(
        mut pin: P,
        delay: D,
        state: &'a SharedState<M>,
        wake: &'static EdgeSignal,
        timings: Timings,
    ) -> Result<Self, Fault> {
        if let Err(fault) = pin.configure(PinMode::Input(Pull::Up)) {
            error!("sampler: failed to configure input pin: {:?}", fault);
            return Err(fault);
        }

        if let Err(fault) = pin.enable_edge_interrupt(wake) {
            error!("sampler: failed to enable edge interrupt: {:?}", fault);
            return Err(fault);
        }

        info!("sampler: input ready, debounce window {} ms", timings.debounce_window_ms);

        Ok(Self {
            pin,
            delay,
            state,
            wake,
            window_ms: timings.debounce_window_ms,
            last_committed: None,
            phase: SamplerPhase::Idle,
        })
    }

    /// Waits in [`SamplerPhase::Idle`] for the next edge notification.
    pub async fn wait_for_edge(&mut self) {
        self.phase = SamplerPhase::Idle;
        self.wake.wait().await;
    }

    /// Runs one debounce cycle and returns to [`SamplerPhase::Idle`].
    pub async fn debounce(&mut self) -> DebounceOutcome {
        self.phase = SamplerPhase::FirstSample;
        let first = self.pin.read();

        self.phase = SamplerPhase::SettleWait;
        self.delay.delay_ms(self.window_ms).await;

        self.phase = SamplerPhase::SecondSample;
        let second = self.pin.read();

        let outcome = settle(first, second, self.last_committed);
        match outcome {
            DebounceOutcome::Committed(level) => {
                self.state.store(level);
                self.last_committed = Some(level);
                debug!("sampler: committed {:?}", level);
            }
            DebounceOutcome::Unstable => {
                trace!("sampler: samples disagree, discarded");
            }
            DebounceOutcome::Unchanged => {}
        }

        self.phase = SamplerPhase::Idle;
        outcome
    }

    /// Debounces every edge until `shutdown` is signaled.
    ///
    /// Shutdown is only observed while idle; a cycle in flight completes.
    pub async fn run(&mut self, shutdown: &Shutdown) {
        loop {
            self.phase = SamplerPhase::Idle;
            match select(shutdown.wait(), self.wake.wait()).await {
                Either::First(()) => break,
                Either::Second(()) => {
                    self.debounce().await;
                }
            }
        }
        info!("sampler: stopped");
    }

    /// Returns the current phase.
    pub fn phase(&self) -> SamplerPhase {
        self.phase
    }

    /// Returns the last level written to the register, if any.
    pub fn last_committed(&self) -> Option<bool> {
        self.last_committed
    }
}
