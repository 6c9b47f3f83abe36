//! The tick engine: the body of the periodic timer interrupt.
//!
//! The hardware fires at `TICKS_PER_SECOND` Hz; the engine counts the
//! ticks down and advances the clock by one second on each rollover,
//! then feeds the debouncer the current raw button sample. Timer
//! register setup belongs to the firmware; only the handler body lives
//! here.

use crate::clock::SharedClock;
use crate::debounce::{ButtonEvents, Debouncer, InputLines};
use crate::dst::DstRule;

/// Hardware tick rate. One second-boundary event is produced per this
/// many ticks, and the debouncer is sampled on every one, giving the
/// 4-sample debounce window a length of 40 ms.
pub const TICKS_PER_SECOND: u32 = 100;

/// Interrupt-context state: the sub-tick countdown and the debounce
/// counters. Owned by the interrupt; everything shared is reached
/// through [`SharedClock`] and [`ButtonEvents`].
pub struct TickEngine {
    sub_ticks: u32,
    debouncer: Debouncer,
    rule: DstRule,
}

impl TickEngine {
    pub const fn new(rule: DstRule) -> Self {
        Self {
            sub_ticks: TICKS_PER_SECOND,
            debouncer: Debouncer::new(),
            rule,
        }
    }

    /// Run one hardware tick. Returns true on a second boundary so the
    /// caller can refresh the display.
    ///
    /// Call this, and nothing else, from the timer interrupt handler.
    pub fn on_tick<I: InputLines>(
        &mut self,
        clock: &SharedClock,
        input: &mut I,
        events: &ButtonEvents,
    ) -> bool {
        self.sub_ticks -= 1;
        let second_boundary = self.sub_ticks == 0;
        if second_boundary {
            self.sub_ticks = TICKS_PER_SECOND;
            clock.advance_second(&self.rule);
            #[cfg(feature = "defmt")]
            defmt::trace!("tick: second boundary");
        }
        self.debouncer.poll(input.sample(), events);
        second_boundary
    }

    /// Debounced "currently held" button mask, 1 = pressed.
    pub fn buttons_held(&self) -> u8 {
        self.debouncer.held()
    }
}

impl Default for TickEngine {
    fn default() -> Self {
        Self::new(DstRule::US_2007)
    }
}
