//! Shared state for the clock: the wall-clock record, the rollover
//! cascade that advances it once per second boundary, and the
//! interrupt-safe cell the two execution contexts reach it through.
//!
//! The cascade is driven by a unit table walked uniformly instead of
//! nested per-unit `if` chains: each unit is bumped, and only if it
//! wrapped does the walk move on to the next coarser unit. The whole
//! walk runs to completion inside one interrupt invocation, so the
//! foreground never observes a half-rolled date.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::calendar::{day_of_week, days_in_month, is_leap};
use crate::dst::{DstRule, DstShift};
use crate::setmode::SetField;

/// Lower bound of the manual year-edit window.
pub const YEAR_MIN: u16 = 2000;
/// Upper bound of the manual year-edit window.
pub const YEAR_MAX: u16 = 2099;

/// One wall-clock position, always a valid Gregorian date/time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockState {
    pub year: u16,
    /// 1..=12.
    pub month: u8,
    /// 1..=`last_day_of_month`.
    pub day: u8,
    /// 0..=23.
    pub hour: u8,
    /// 0..=59.
    pub minute: u8,
    /// 0..=59.
    pub second: u8,
    /// Cached `days_in_month(month, is_leap(year))`; refreshed on every
    /// change of `month` or `year` and always current before `day` is
    /// compared against it.
    pub last_day_of_month: u8,
    /// One DST adjustment may still fire today; re-armed at each day
    /// rollover, cleared when an adjustment is applied.
    pub dst_armed: bool,
}

/// Cascade units in carry order. `Year` is implicit: it absorbs the
/// final carry and never wraps.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Month,
}

const CASCADE: [Unit; 5] = [Unit::Second, Unit::Minute, Unit::Hour, Unit::Day, Unit::Month];

impl ClockState {
    /// Compiled-in power-up position: Monday 2018-06-11 15:13:00.
    pub const POWER_ON: Self = Self {
        year: 2018,
        month: 6,
        day: 11,
        hour: 15,
        minute: 13,
        second: 0,
        last_day_of_month: 30,
        dst_armed: true,
    };

    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        let mut state = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            last_day_of_month: 31,
            dst_armed: true,
        };
        state.refresh_last_day();
        debug_assert!(state.day >= 1 && state.day <= state.last_day_of_month);
        debug_assert!(state.hour <= 23 && state.minute <= 59 && state.second <= 59);
        state
    }

    /// Day of week of the current date, Sunday = 0.
    pub fn weekday(&self) -> u8 {
        day_of_week(self.year, self.month, self.day)
    }

    fn refresh_last_day(&mut self) {
        self.last_day_of_month = days_in_month(self.month, is_leap(self.year));
    }

    fn floor_of(&self, unit: Unit) -> u8 {
        match unit {
            Unit::Second | Unit::Minute | Unit::Hour => 0,
            Unit::Day | Unit::Month => 1,
        }
    }

    fn ceil_of(&self, unit: Unit) -> u8 {
        match unit {
            Unit::Second | Unit::Minute => 59,
            Unit::Hour => 23,
            Unit::Day => self.last_day_of_month,
            Unit::Month => 12,
        }
    }

    fn value_mut(&mut self, unit: Unit) -> &mut u8 {
        match unit {
            Unit::Second => &mut self.second,
            Unit::Minute => &mut self.minute,
            Unit::Hour => &mut self.hour,
            Unit::Day => &mut self.day,
            Unit::Month => &mut self.month,
        }
    }

    /// Increment one unit; returns true if it wrapped to its floor.
    fn bump(&mut self, unit: Unit) -> bool {
        let ceil = self.ceil_of(unit);
        let floor = self.floor_of(unit);
        let value = self.value_mut(unit);
        *value += 1;
        if *value > ceil {
            *value = floor;
            true
        } else {
            false
        }
    }

    /// Advance the clock by one second, carrying through the whole
    /// date as needed. This is the only automatic mutation of the
    /// state and must run with the foreground excluded.
    pub fn advance_second(&mut self, rule: &DstRule) {
        for unit in CASCADE {
            match unit {
                // Reaching `Hour` means a minute rolled over: the DST
                // decision composes with the unconditional advance.
                Unit::Hour => self.apply_dst(rule),
                // Reaching `Day` means a new day is starting.
                Unit::Day => {
                    self.dst_armed = true;
                    self.refresh_last_day();
                }
                _ => {}
            }
            let wrapped = self.bump(unit);
            if unit == Unit::Month {
                self.refresh_last_day();
            }
            if !wrapped {
                return;
            }
        }
        self.year += 1;
        self.refresh_last_day();
    }

    fn apply_dst(&mut self, rule: &DstRule) {
        match rule.evaluate(self.year, self.month, self.day, self.hour, self.dst_armed) {
            DstShift::None => {}
            DstShift::Forward => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "dst: spring forward on {=u16}-{=u8}-{=u8}",
                    self.year,
                    self.month,
                    self.day
                );
                self.hour += 1;
                self.dst_armed = false;
            }
            DstShift::Back => {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "dst: fall back on {=u16}-{=u8}-{=u8}",
                    self.year,
                    self.month,
                    self.day
                );
                debug_assert!(self.hour > 0);
                self.hour -= 1;
                self.dst_armed = false;
            }
        }
    }

    /// Apply one manual edit step to a field, with the per-field
    /// wraparound rules of the set-time mode.
    pub fn edit(&mut self, field: SetField, dir: i8) {
        match field {
            SetField::DisplayClock => {}
            SetField::Year => {
                self.year = step_u16(self.year, dir, YEAR_MIN, YEAR_MAX);
                self.refresh_last_day();
                self.day = self.day.min(self.last_day_of_month);
            }
            SetField::Month => {
                self.month = step(self.month, dir, 1, 12);
                self.refresh_last_day();
                self.day = self.day.min(self.last_day_of_month);
            }
            SetField::Day => {
                self.refresh_last_day();
                self.day = step(self.day, dir, 1, self.last_day_of_month);
            }
            SetField::Hour => self.hour = step(self.hour, dir, 0, 23),
            SetField::Minute => self.minute = step(self.minute, dir, 0, 59),
            // Any edit press on the seconds field zeroes it.
            SetField::Second => self.second = 0,
        }
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::POWER_ON
    }
}

fn step(value: u8, dir: i8, floor: u8, ceil: u8) -> u8 {
    if dir >= 0 {
        if value >= ceil {
            floor
        } else {
            value + 1
        }
    } else if value <= floor {
        ceil
    } else {
        value - 1
    }
}

fn step_u16(value: u16, dir: i8, floor: u16, ceil: u16) -> u16 {
    if dir >= 0 {
        if value >= ceil {
            floor
        } else {
            value + 1
        }
    } else if value <= floor {
        ceil
    } else {
        value - 1
    }
}

/// The clock state behind a critical section, shared between the tick
/// interrupt and the foreground loop. All access goes through
/// [`read_snapshot`](Self::read_snapshot) and
/// [`apply_edit`](Self::apply_edit), so multi-field reads are always
/// internally consistent.
pub struct SharedClock {
    state: Mutex<RefCell<ClockState>>,
}

impl SharedClock {
    pub const fn new(initial: ClockState) -> Self {
        Self {
            state: Mutex::new(RefCell::new(initial)),
        }
    }

    /// Copy out the whole state in one critical section.
    pub fn read_snapshot(&self) -> ClockState {
        critical_section::with(|cs| *self.state.borrow_ref(cs))
    }

    /// Apply one manual edit step (`dir` is +1 or -1) to a field.
    pub fn apply_edit(&self, field: SetField, dir: i8) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).edit(field, dir));
    }

    /// Recompute the day-edit bounds after month/year navigation, so
    /// entering the day field never shows an out-of-range day.
    pub(crate) fn refresh_day_bounds(&self) {
        critical_section::with(|cs| {
            let mut state = self.state.borrow_ref_mut(cs);
            state.refresh_last_day();
            state.day = state.day.min(state.last_day_of_month);
        });
    }

    pub(crate) fn advance_second(&self, rule: &DstRule) {
        critical_section::with(|cs| self.state.borrow_ref_mut(cs).advance_second(rule));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(state: &mut ClockState) {
        state.advance_second(&DstRule::US_2007);
    }

    #[test]
    fn plain_second_advance() {
        let mut state = ClockState::new(2024, 5, 17, 10, 20, 30);
        tick(&mut state);
        assert_eq!(state, ClockState::new(2024, 5, 17, 10, 20, 31));
    }

    #[test]
    fn minute_and_hour_rollover() {
        let mut state = ClockState::new(2024, 5, 17, 10, 59, 59);
        tick(&mut state);
        assert_eq!((state.hour, state.minute, state.second), (11, 0, 0));
    }

    #[test]
    fn leap_day_rollover() {
        let mut state = ClockState::new(2024, 2, 28, 23, 59, 59);
        tick(&mut state);
        assert_eq!((state.year, state.month, state.day), (2024, 2, 29));
        assert_eq!((state.hour, state.minute, state.second), (0, 0, 0));
    }

    #[test]
    fn non_leap_february_rollover() {
        let mut state = ClockState::new(2023, 2, 28, 23, 59, 59);
        tick(&mut state);
        assert_eq!((state.year, state.month, state.day), (2023, 3, 1));
    }

    #[test]
    fn year_rollover() {
        let mut state = ClockState::new(2024, 12, 31, 23, 59, 59);
        tick(&mut state);
        assert_eq!((state.year, state.month, state.day), (2025, 1, 1));
        assert_eq!(state.last_day_of_month, 31);
        assert!(state.dst_armed);
    }

    #[test]
    fn last_day_cache_follows_month_rollover() {
        // Apr 30 -> May 1: the cache must pick up May's length.
        let mut state = ClockState::new(2024, 4, 30, 23, 59, 59);
        tick(&mut state);
        assert_eq!((state.month, state.day, state.last_day_of_month), (5, 1, 31));
    }

    #[test]
    fn spring_forward_skips_an_hour() {
        // Second Sunday of March 2024 is the 10th; 01:59:59 -> 03:00:00.
        let mut state = ClockState::new(2024, 3, 10, 1, 59, 59);
        tick(&mut state);
        assert_eq!((state.hour, state.minute, state.second), (3, 0, 0));
        assert!(!state.dst_armed);
    }

    #[test]
    fn fall_back_repeats_an_hour_once() {
        // First Sunday of November 2024 is the 3rd; 01:59:59 -> 01:00:00.
        let mut state = ClockState::new(2024, 11, 3, 1, 59, 59);
        tick(&mut state);
        assert_eq!((state.hour, state.minute, state.second), (1, 0, 0));
        assert!(!state.dst_armed);

        // The repeated hour passes normally the second time around.
        state.minute = 59;
        state.second = 59;
        tick(&mut state);
        assert_eq!((state.hour, state.minute, state.second), (2, 0, 0));
    }

    #[test]
    fn dst_rearms_at_day_rollover() {
        let mut state = ClockState::new(2024, 3, 10, 1, 59, 59);
        tick(&mut state);
        assert!(!state.dst_armed);
        let mut state = ClockState::new(state.year, state.month, state.day, 23, 59, 59);
        state.dst_armed = false;
        tick(&mut state);
        assert_eq!(state.day, 11);
        assert!(state.dst_armed);
    }

    #[test]
    fn edits_wrap_per_field() {
        let mut state = ClockState::new(2024, 12, 31, 23, 59, 58);
        state.edit(SetField::Month, 1);
        assert_eq!(state.month, 1);
        state.edit(SetField::Month, -1);
        assert_eq!(state.month, 12);
        state.edit(SetField::Hour, 1);
        assert_eq!(state.hour, 0);
        state.edit(SetField::Minute, 1);
        assert_eq!(state.minute, 0);
        state.edit(SetField::Second, 1);
        assert_eq!(state.second, 0);
    }

    #[test]
    fn day_edit_wraps_within_current_month() {
        let mut state = ClockState::new(2024, 2, 1, 0, 0, 0);
        state.edit(SetField::Day, -1);
        assert_eq!(state.day, 29);
        state.edit(SetField::Day, 1);
        assert_eq!(state.day, 1);
    }

    #[test]
    fn month_edit_clamps_day() {
        // Jan 31 edited to Feb must not leave day at 31.
        let mut state = ClockState::new(2023, 1, 31, 0, 0, 0);
        state.edit(SetField::Month, 1);
        assert_eq!((state.month, state.day, state.last_day_of_month), (2, 28, 28));
    }

    #[test]
    fn year_edit_wraps_at_window_bounds() {
        let mut state = ClockState::new(YEAR_MAX, 6, 1, 0, 0, 0);
        state.edit(SetField::Year, 1);
        assert_eq!(state.year, YEAR_MIN);
        state.edit(SetField::Year, -1);
        assert_eq!(state.year, YEAR_MAX);
    }

    #[test]
    fn snapshot_and_edit_through_shared_cell() {
        let clock = SharedClock::new(ClockState::POWER_ON);
        let before = clock.read_snapshot();
        assert_eq!((before.year, before.month, before.day), (2018, 6, 11));
        clock.apply_edit(SetField::Hour, 1);
        assert_eq!(clock.read_snapshot().hour, 16);
    }
}
