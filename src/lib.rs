//! Timekeeping core for a character-LCD clock appliance.
//!
//! The crate keeps wall-clock date/time driven by a periodic hardware
//! tick, applies Gregorian calendar rules and US-style daylight-saving
//! transitions, debounces up to eight buttons, and runs the cyclic
//! set-time mode a human uses to adjust the clock. Hardware bring-up
//! stays in the firmware: the core consumes a [`CharDisplay`]
//! implementation and a raw [`InputLines`] sample, and owns only the
//! body of the timer interrupt handler.
//!
//! Two execution contexts share state: the tick interrupt (one
//! [`TickEngine::on_tick`] call per hardware tick) and a cooperative
//! foreground loop (one [`SetMode::poll`] call per iteration). The
//! clock lives behind a critical section, the button event latch is a
//! single atomic byte, and nothing else is shared.
//!
//! ```ignore
//! static CLOCK: SharedClock = SharedClock::new(ClockState::POWER_ON);
//! static BUTTONS: ButtonEvents = ButtonEvents::new();
//!
//! // Timer interrupt at TICKS_PER_SECOND Hz:
//! fn on_timer(engine: &mut TickEngine, port: &mut impl InputLines, lcd: &mut impl CharDisplay) {
//!     if engine.on_tick(&CLOCK, port, &BUTTONS) {
//!         display::render_clock(lcd, &CLOCK.read_snapshot());
//!     }
//! }
//!
//! // Foreground:
//! fn run(lcd: &mut impl CharDisplay) -> ! {
//!     let mut mode = SetMode::new();
//!     loop {
//!         mode.poll(&BUTTONS, &CLOCK, lcd);
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod calendar;
pub mod clock;
pub mod debounce;
pub mod display;
pub mod dst;
pub mod setmode;
pub mod tick;

pub use clock::{ClockState, SharedClock, YEAR_MAX, YEAR_MIN};
pub use debounce::{ButtonEvents, Debouncer, InputLines, BUTTON_DOWN, BUTTON_MODE, BUTTON_UP};
pub use display::CharDisplay;
pub use dst::{DstRule, DstShift};
pub use setmode::{SetField, SetMode};
pub use tick::{TickEngine, TICKS_PER_SECOND};
