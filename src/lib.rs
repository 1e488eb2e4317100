#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`GpioPin`**: Trait to implement for your pin hardware (configure, read, write, edge interrupt)
//! - **`EdgeSignal`**: Single-slot wake channel from the edge interrupt to the sampler
//! - **`SharedState`**: Lock-guarded debounced level; the only state the two tasks share
//! - **`Sampler`**: Edge-driven task that debounces the input and commits held levels
//! - **`Reactor`**: Polling task that plays an indicator `Pattern` on each observed change
//! - **`Timings`**: Debounce window, poll interval and pattern holds
//!
//! Delays are awaited through `embedded_hal_async::delay::DelayNs`; with Embassy,
//! pass `embassy_time::Delay`.

#[macro_use]
mod fmt;

pub mod pin;
pub mod reactor;
pub mod sampler;
pub mod signal;
pub mod state;
pub mod time;

pub use pin::{EdgeHandler, Fault, GpioPin, PinMode, Pull};
pub use reactor::{Pattern, Reactor};
pub use sampler::{DebounceOutcome, Sampler, SamplerPhase, settle};
pub use signal::{EdgeSignal, Shutdown};
pub use state::SharedState;
pub use time::{
    BLINK_DELAY_MS, BLINK_REPEATS, DEBOUNCE_WINDOW_MS, ON_TIME_MS, POLL_INTERVAL_MS, Timings,
};
