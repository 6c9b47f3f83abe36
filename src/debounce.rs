//! Button debouncing for up to eight lines sampled off one port.
//!
//! Vertical-counter debouncer: each line gets a 2-bit counter spread
//! across two bit-planes (`vcount_low` holds the low bits of all eight
//! counters, `vcount_high` the high bits). A sample that disagrees
//! with the line's stable state decrements its counter; a sample that
//! agrees resets it to 3. When a counter underflows the stable state
//! flips, and lines that just became pressed are latched into a shared
//! pending-event mask.
//!
//! The latch is an atomic byte, so [`ButtonEvents::button_down`] can
//! run in the foreground while [`Debouncer::poll`] runs in the tick
//! interrupt: the read-and-clear is one indivisible operation and each
//! recognized press is delivered exactly once.

use portable_atomic::{AtomicU8, Ordering};

/// Up button, bit 0 of the port.
pub const BUTTON_UP: u8 = 1 << 0;
/// Down button, bit 1 of the port.
pub const BUTTON_DOWN: u8 = 1 << 1;
/// Mode/set button, bit 2 of the port.
pub const BUTTON_MODE: u8 = 1 << 2;

/// Source of one raw port sample, up to 8 active-low lines.
///
/// Implemented by the firmware over whatever GPIO access it has; a
/// plain closure returning the port byte works.
pub trait InputLines {
    /// Read the raw lines. A 0 bit means the line is held low
    /// (pressed); unused lines should read 1.
    fn sample(&mut self) -> u8;
}

impl<F: FnMut() -> u8> InputLines for F {
    fn sample(&mut self) -> u8 {
        self()
    }
}

/// Pending press events, one bit per line. Set by the debounce tick,
/// cleared by whoever consumes them.
pub struct ButtonEvents {
    down: AtomicU8,
}

impl ButtonEvents {
    pub const fn new() -> Self {
        Self {
            down: AtomicU8::new(0),
        }
    }

    /// True if any button in `mask` has a pending press. Matching bits
    /// are cleared in the same atomic step, so a press is seen by
    /// exactly one caller.
    pub fn button_down(&self, mask: u8) -> bool {
        self.down.fetch_and(!mask, Ordering::AcqRel) & mask != 0
    }

    fn post(&self, bits: u8) {
        if bits != 0 {
            self.down.fetch_or(bits, Ordering::AcqRel);
        }
    }
}

impl Default for ButtonEvents {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-line debounce counters and stable state. Owned by the tick
/// interrupt; only the event latch is shared.
pub struct Debouncer {
    vcount_low: u8,
    vcount_high: u8,
    state: u8,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            vcount_low: 0xff,
            vcount_high: 0xff,
            state: 0,
        }
    }

    /// Debounced "currently held" mask, 1 = pressed.
    pub fn held(&self) -> u8 {
        self.state
    }

    /// Feed one raw active-low sample; newly stable presses are posted
    /// to `events`. Call once per hardware tick.
    pub fn poll(&mut self, raw_sample: u8, events: &ButtonEvents) {
        // 1 where the sample disagrees with the stable state.
        let mut changed = !raw_sample ^ self.state;

        // Decrement the counters of disagreeing lines, reset the rest
        // to 3 (two bit-planes updated in parallel).
        self.vcount_low = !(self.vcount_low & changed);
        self.vcount_high = self.vcount_low ^ (self.vcount_high & changed);

        // Keep only the lines whose counter just underflowed.
        changed &= self.vcount_low & self.vcount_high;

        // Flip their stable state and latch the ones now pressed.
        self.state ^= changed;
        events.post(self.state & changed);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
