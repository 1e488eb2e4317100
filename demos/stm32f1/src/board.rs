//! Blue Pill bindings of the pin capability.
//!
//! PB1 is the debounced input (button to ground, internal pull-up). PC13 is
//! the onboard LED, which is active low.

use core::cell::Cell;
use debounce_indicator::{EdgeHandler, Fault, GpioPin, PinMode, Pull};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Output};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

static EDGE_HANDLER: Mutex<CriticalSectionRawMutex, Cell<Option<&'static dyn EdgeHandler>>> =
    Mutex::new(Cell::new(None));

/// Input line read through a plain GPIO input; edges arrive via [`edge_task`].
pub struct ButtonLine {
    pin: Input<'static>,
}

impl ButtonLine {
    pub fn new(pin: Input<'static>) -> Self {
        Self { pin }
    }
}

impl GpioPin for ButtonLine {
    fn configure(&mut self, mode: PinMode) -> Result<(), Fault> {
        match mode {
            // Pull is fixed when the pin is constructed
            PinMode::Input(Pull::Up) => Ok(()),
            PinMode::Input(_) => Err(Fault::ConfigurationRejected),
            PinMode::Output(_) => Err(Fault::Unsupported),
        }
    }

    fn read(&self) -> bool {
        self.pin.is_high()
    }

    fn write(&mut self, _level: bool) -> Result<(), Fault> {
        Err(Fault::Unsupported)
    }

    fn enable_edge_interrupt(&mut self, on_edge: &'static dyn EdgeHandler) -> Result<(), Fault> {
        EDGE_HANDLER.lock(|handler| handler.set(Some(on_edge)));
        Ok(())
    }
}

/// Onboard LED. `true` lights it.
pub struct LedLine {
    pin: Output<'static>,
}

impl LedLine {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl GpioPin for LedLine {
    fn configure(&mut self, mode: PinMode) -> Result<(), Fault> {
        match mode {
            PinMode::Output(initial) => self.write(initial),
            PinMode::Input(_) => Err(Fault::Unsupported),
        }
    }

    fn read(&self) -> bool {
        self.pin.is_set_low()
    }

    fn write(&mut self, level: bool) -> Result<(), Fault> {
        if level {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
        Ok(())
    }

    fn enable_edge_interrupt(&mut self, _on_edge: &'static dyn EdgeHandler) -> Result<(), Fault> {
        Err(Fault::Unsupported)
    }
}

/// Forwards every EXTI edge on the button line to the registered handler.
#[embassy_executor::task]
pub async fn edge_task(mut exti: ExtiInput<'static>) {
    loop {
        exti.wait_for_any_edge().await;
        if let Some(handler) = EDGE_HANDLER.lock(|handler| handler.get()) {
            handler.on_edge();
        }
    }
}
