//! Timing configuration for debouncing and pattern playback.
//!
//! All delays are awaited through [`embedded_hal_async::delay::DelayNs`], so
//! any platform delay (e.g. `embassy_time::Delay`) or a host-side test double
//! can drive the tasks.

/// Window the input must hold steady across to be committed.
pub const DEBOUNCE_WINDOW_MS: u32 = 50;

/// Sleep between two reactor polls of the shared state.
pub const POLL_INTERVAL_MS: u32 = 100;

/// On and off hold of each blink in the active pattern.
pub const BLINK_DELAY_MS: u32 = 100;

/// On hold of the inactive pattern.
pub const ON_TIME_MS: u32 = 500;

/// Number of blinks in the active pattern.
pub const BLINK_REPEATS: usize = 3;

/// Delays used by the sampler and the reactor, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timings {
    /// Settle window between the two debounce samples.
    pub debounce_window_ms: u32,

    /// Reactor inter-poll sleep.
    pub poll_interval_ms: u32,

    /// Blink on/off hold for [`Pattern::TripleBlink`](crate::Pattern::TripleBlink).
    pub blink_delay_ms: u32,

    /// On hold for [`Pattern::LongPulse`](crate::Pattern::LongPulse).
    pub on_time_ms: u32,
}

impl Timings {
    /// 50 ms debounce, 100 ms poll, 100 ms blinks, 500 ms pulse.
    pub const DEFAULT: Self = Self {
        debounce_window_ms: DEBOUNCE_WINDOW_MS,
        poll_interval_ms: POLL_INTERVAL_MS,
        blink_delay_ms: BLINK_DELAY_MS,
        on_time_ms: ON_TIME_MS,
    };

    /// Sets the debounce window.
    pub const fn with_debounce_window_ms(mut self, ms: u32) -> Self {
        self.debounce_window_ms = ms;
        self
    }

    /// Sets the reactor poll interval.
    pub const fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Sets the blink hold.
    pub const fn with_blink_delay_ms(mut self, ms: u32) -> Self {
        self.blink_delay_ms = ms;
        self
    }

    /// Sets the long pulse hold.
    pub const fn with_on_time_ms(mut self, ms: u32) -> Self {
        self.on_time_ms = ms;
        self
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
