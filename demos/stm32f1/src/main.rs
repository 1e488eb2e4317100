//! STM32F103 Blue Pill debounced button indicator
//!
//! Hardware Connections:
//!   - Button: PB1 to GND (internal pull-up)
//!   - LED: onboard PC13
//!
//! Expected Behavior:
//!   - Button released (line goes high): LED blinks three times
//!   - Button pressed (line goes low): LED lights for 500 ms
//!
//! The sampler and the edge forwarder run on an interrupt executor so LED
//! timing on the thread executor never delays input sampling.

#![no_std]
#![no_main]

mod board;

use board::{ButtonLine, LedLine, edge_task};
use cortex_m_rt::entry;
use debounce_indicator::{EdgeSignal, Reactor, Sampler, SharedState, Shutdown, Timings};
use defmt::{info, unwrap};
use embassy_executor::{Executor, InterruptExecutor};
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

static STATE: SharedState<CriticalSectionRawMutex> = SharedState::new();
static WAKE: EdgeSignal = EdgeSignal::new();

// Never signaled on hardware; the tasks run until reset
static STOP_SAMPLER: Shutdown = Shutdown::new();
static STOP_REACTOR: Shutdown = Shutdown::new();

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_LOW: StaticCell<Executor> = StaticCell::new();

type BoardSampler = Sampler<'static, ButtonLine, Delay, CriticalSectionRawMutex>;
type BoardReactor = Reactor<'static, LedLine, Delay, CriticalSectionRawMutex>;

#[interrupt]
unsafe fn USART1() {
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

#[embassy_executor::task]
async fn sampler_task(mut sampler: BoardSampler) {
    sampler.run(&STOP_SAMPLER).await;
}

#[embassy_executor::task]
async fn reactor_task(mut reactor: BoardReactor) {
    reactor.run(&STOP_REACTOR).await;
}

#[entry]
fn main() -> ! {
    let p = embassy_stm32::init(Default::default());
    info!("Starting...");

    // PB1 is read through a plain input while EXTI1 delivers its edges
    let pb1 = unsafe { p.PB1.clone_unchecked() };
    let exti = ExtiInput::new(p.PB1, p.EXTI1, Pull::Up);
    let button = ButtonLine::new(Input::new(pb1, Pull::Up));
    let led = LedLine::new(Output::new(p.PC13, Level::High, Speed::Low));

    // Initialization faults panic, which aborts startup
    let sampler = unwrap!(Sampler::new(button, Delay, &STATE, &WAKE, Timings::DEFAULT));
    let reactor = unwrap!(Reactor::new(led, Delay, &STATE, Timings::DEFAULT));

    interrupt::USART1.set_priority(Priority::P6);
    let spawner = EXECUTOR_HIGH.start(interrupt::USART1);
    unwrap!(spawner.spawn(edge_task(exti)));
    unwrap!(spawner.spawn(sampler_task(sampler)));

    let executor = EXECUTOR_LOW.init(Executor::new());
    executor.run(|spawner| {
        unwrap!(spawner.spawn(reactor_task(reactor)));
        info!("Ready!");
    })
}
