//! Hardware pin capability consumed by the sampler and the reactor.
//!
//! Provides the [`GpioPin`] trait for hardware abstraction, the [`PinMode`]
//! a pin is configured with, the [`EdgeHandler`] invoked from interrupt
//! context, and the [`Fault`] type every fallible pin operation reports.

/// Internal pull resistor selection for input pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input.
    None,
    /// Pull-up to the supply rail.
    Up,
    /// Pull-down to ground.
    Down,
}

/// Direction and electrical configuration of a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Digital input with the given pull resistor.
    Input(Pull),

    /// Push-pull output driven to the given initial level.
    Output(bool),
}

/// Errors reported by pin operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// The underlying GPIO controller is not ready.
    NotReady,

    /// The driver rejected the requested pin mode.
    ConfigurationRejected,

    /// The driver rejected the edge interrupt registration.
    InterruptRejected,

    /// The operation does not apply to this pin direction.
    Unsupported,

    /// A steady-state read or write failed.
    Io,
}

impl core::fmt::Display for Fault {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Fault::NotReady => write!(f, "gpio controller not ready"),
            Fault::ConfigurationRejected => write!(f, "pin configuration rejected"),
            Fault::InterruptRejected => write!(f, "edge interrupt registration rejected"),
            Fault::Unsupported => write!(f, "operation not supported for this pin direction"),
            Fault::Io => write!(f, "pin i/o failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Fault {}

/// Receiver of edge notifications.
///
/// `on_edge` runs in interrupt context. Implementations must only wake a
/// task: no locking of shared state, no blocking, no I/O.
pub trait EdgeHandler: Sync {
    /// Called once per detected edge on the monitored input.
    fn on_edge(&self);
}

/// Trait for abstracting a single digital pin.
///
/// Implement this once per concrete pin direction of your hardware (an EXTI
/// capable input, a push-pull output, a test double). Operations that make
/// no sense for a direction return [`Fault::Unsupported`].
pub trait GpioPin {
    /// Configures the pin. Idempotent; must be called before `read`/`write`.
    fn configure(&mut self, mode: PinMode) -> Result<(), Fault>;

    /// Returns the instantaneous logic level. Never blocks, never debounces.
    fn read(&self) -> bool;

    /// Drives the pin to `level`.
    fn write(&mut self, level: bool) -> Result<(), Fault>;

    /// Registers `on_edge` to be invoked on both edges of the input.
    fn enable_edge_interrupt(&mut self, on_edge: &'static dyn EdgeHandler) -> Result<(), Fault>;
}
