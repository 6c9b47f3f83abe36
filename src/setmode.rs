//! The set-time mode machine.
//!
//! Foreground-only: a cooperative loop polls debounced button events
//! and either shows the running clock or lets the user walk through
//! the editable fields. Edits write straight into the shared clock
//! state; there is no staging copy, a partial edit sequence is live
//! immediately.

use crate::clock::SharedClock;
use crate::debounce::{ButtonEvents, BUTTON_DOWN, BUTTON_MODE, BUTTON_UP};
use crate::display::{self, CharDisplay};

/// The field currently under the cursor. `DisplayClock` is the resting
/// state showing the running clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetField {
    DisplayClock,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl SetField {
    /// Cycle order of the mode button.
    pub fn next(self) -> Self {
        match self {
            Self::DisplayClock => Self::Year,
            Self::Year => Self::Month,
            Self::Month => Self::Day,
            Self::Day => Self::Hour,
            Self::Hour => Self::Minute,
            Self::Minute => Self::Second,
            Self::Second => Self::DisplayClock,
        }
    }
}

/// Mode machine state: the active field plus a free-running blink
/// phase. Created once at startup and polled forever.
pub struct SetMode {
    field: SetField,
    blink: u8,
}

/// Poll counts per blink half-period; at a 10 ms foreground cadence
/// the edited field flashes roughly three times a second.
const BLINK_PHASE: u8 = 0x10;

impl SetMode {
    pub const fn new() -> Self {
        Self {
            field: SetField::DisplayClock,
            blink: 0,
        }
    }

    pub fn field(&self) -> SetField {
        self.field
    }

    /// One foreground iteration: consume pending button events, apply
    /// edits, and redraw. Never called from interrupt context.
    pub fn poll<D: CharDisplay>(
        &mut self,
        buttons: &ButtonEvents,
        clock: &SharedClock,
        display: &mut D,
    ) {
        if buttons.button_down(BUTTON_MODE) {
            self.field = self.field.next();
            self.blink = 0;
            if self.field == SetField::Day {
                // Backward navigation may have shrunk the month.
                clock.refresh_day_bounds();
            }
        }

        match self.field {
            SetField::DisplayClock => {
                // Discard stale edit presses so they cannot fire on
                // entry into set mode.
                buttons.button_down(BUTTON_UP | BUTTON_DOWN);
                display::render_clock(display, &clock.read_snapshot());
            }
            field => {
                if buttons.button_down(BUTTON_UP) {
                    clock.apply_edit(field, 1);
                }
                if buttons.button_down(BUTTON_DOWN) {
                    clock.apply_edit(field, -1);
                }
                display::render_clock(display, &clock.read_snapshot());
                self.blink = self.blink.wrapping_add(1);
                if self.blink & BLINK_PHASE != 0 {
                    display::blank_field(display, field);
                }
            }
        }
    }
}

impl Default for SetMode {
    fn default() -> Self {
        Self::new()
    }
}
