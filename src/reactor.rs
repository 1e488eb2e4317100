//! Polling pattern reactor.
//!
//! Provides [`Reactor`], which owns the indicator output, polls the
//! [`SharedState`] on a fixed interval and plays one of two fixed
//! [`Pattern`]s whenever the observed value changes.

use crate::pin::{Fault, GpioPin, PinMode};
use crate::signal::Shutdown;
use crate::state::SharedState;
use crate::time::{BLINK_REPEATS, Timings};
use embassy_futures::select::{Either, select};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

/// Indicator pattern played once per observed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    /// Three blinks: high, hold, low, hold. Played when the input becomes active.
    TripleBlink,

    /// One long pulse: high, hold, low. Played when the input becomes inactive.
    LongPulse,
}

impl Pattern {
    /// Selects the pattern for a newly observed level.
    #[inline]
    pub fn for_level(level: bool) -> Self {
        if level {
            Pattern::TripleBlink
        } else {
            Pattern::LongPulse
        }
    }

    /// Total playback time under `timings`, in milliseconds.
    ///
    /// Saturates at `u32::MAX` for holds too long to sum.
    pub fn duration_ms(&self, timings: &Timings) -> u32 {
        match self {
            Pattern::TripleBlink => timings
                .blink_delay_ms
                .saturating_mul(2)
                .saturating_mul(BLINK_REPEATS as u32),
            Pattern::LongPulse => timings.on_time_ms,
        }
    }
}

/// Drives the indicator output from the shared state.
///
/// Playback is never preempted: a change arriving mid-pattern is observed on
/// the first poll after the pattern completes.
///
/// # Type Parameters
/// * `'a` - Lifetime of the shared state reference
/// * `P` - Output pin implementation
/// * `D` - Async delay implementation
/// * `M` - Raw mutex guarding the shared state
pub struct Reactor<'a, P: GpioPin, D: DelayNs, M: RawMutex> {
    pin: P,
    delay: D,
    state: &'a SharedState<M>,
    timings: Timings,
    previous_observed: Option<bool>,
    write_faults: u32,
}

impl<'a, P: GpioPin, D: DelayNs, M: RawMutex> Reactor<'a, P, D, M> {
    /// Configures `pin` as an output driven low.
    ///
    /// # Errors
    /// Returns the pin's fault if configuration is rejected.
    pub fn new(mut pin: P, delay: D, state: &'a SharedState<M>, timings: Timings) -> Result<Self, Fault> {
        if let Err(fault) = pin.configure(PinMode::Output(false)) {
            error!("reactor: failed to configure output pin: {:?}", fault);
            return Err(fault);
        }

        info!("reactor: output ready, polling every {} ms", timings.poll_interval_ms);

        Ok(Self {
            pin,
            delay,
            state,
            timings,
            previous_observed: None,
            write_faults: 0,
        })
    }

    /// Sleeps one poll interval, then reacts to the register's value.
    pub async fn poll(&mut self) -> Option<Pattern> {
        self.delay.delay_ms(self.timings.poll_interval_ms).await;
        let current = self.state.load();
        self.react_to(current).await
    }

    /// Plays the pattern for `current` if it differs from the previous observation.
    ///
    /// # Returns
    /// * `Some(pattern)` - The pattern that was played
    /// * `None` - `current` equals the previous observation; nothing was written
    pub async fn react_to(&mut self, current: bool) -> Option<Pattern> {
        if self.previous_observed == Some(current) {
            return None;
        }

        let pattern = Pattern::for_level(current);
        debug!("reactor: observed {:?}, playing {:?}", current, pattern);
        self.play(pattern).await;
        self.previous_observed = Some(current);
        Some(pattern)
    }

    /// Plays `pattern` to completion.
    pub async fn play(&mut self, pattern: Pattern) {
        match pattern {
            Pattern::TripleBlink => {
                for _ in 0..BLINK_REPEATS {
                    self.drive(true);
                    self.delay.delay_ms(self.timings.blink_delay_ms).await;
                    self.drive(false);
                    self.delay.delay_ms(self.timings.blink_delay_ms).await;
                }
            }
            Pattern::LongPulse => {
                self.drive(true);
                self.delay.delay_ms(self.timings.on_time_ms).await;
                self.drive(false);
            }
        }
    }

    /// Polls until `shutdown` is signaled.
    ///
    /// Shutdown is only observed during the inter-poll sleep, so a pattern
    /// in progress always completes.
    pub async fn run(&mut self, shutdown: &Shutdown) {
        loop {
            let sleep = self.delay.delay_ms(self.timings.poll_interval_ms);
            if let Either::First(()) = select(shutdown.wait(), sleep).await {
                break;
            }

            let current = self.state.load();
            self.react_to(current).await;
        }
        info!("reactor: stopped");
    }

    /// Returns the last value a pattern was played for, if any.
    pub fn previous_observed(&self) -> Option<bool> {
        self.previous_observed
    }

    /// Returns how many output writes have failed so far.
    pub fn write_faults(&self) -> u32 {
        self.write_faults
    }

    fn drive(&mut self, level: bool) {
        if let Err(fault) = self.pin.write(level) {
            self.write_faults = self.write_faults.saturating_add(1);
            warn!("reactor: writing {:?} failed: {:?}", level, fault);
        }
    }
}
