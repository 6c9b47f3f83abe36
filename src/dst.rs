//! Daylight-saving-time policy.
//!
//! A [`DstRule`] names every constant the transition logic depends on,
//! so the region in force is a deliberate configuration choice rather
//! than literals buried in the rollover code. The decision itself runs
//! once per minute rollover, just before the normal top-of-hour
//! advance, and is kept to at most one adjustment per calendar day by
//! the `dst_armed` flag in the clock state.

use crate::calendar::{nth_weekday_of_month, SUNDAY};

/// Outcome of a single DST evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DstShift {
    /// Not a transition instant; the hour advances normally.
    None,
    /// Spring forward: skip an hour on top of the normal advance.
    Forward,
    /// Fall back: repeat an hour.
    Back,
}

/// Named constants for one region's DST transitions.
///
/// Week indices are 1-based: `week = 1` is the first occurrence of
/// `weekday` in the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DstRule {
    /// Month of the spring-forward transition.
    pub spring_month: u8,
    /// 1-based week index of the spring transition weekday.
    pub spring_week: u8,
    /// Month of the fall-back transition.
    pub fall_month: u8,
    /// 1-based week index of the fall transition weekday.
    pub fall_week: u8,
    /// Day of week the transitions fall on, Sunday = 0.
    pub weekday: u8,
    /// Hour value observed at the minute rollover that triggers the
    /// shift. The check runs before the unconditional hour advance, so
    /// 1 fires exactly as the clock would strike 2:00.
    pub transition_hour: u8,
}

impl DstRule {
    /// United States rule since 2007: second Sunday of March, first
    /// Sunday of November, transitions as the clock strikes 2:00.
    pub const US_2007: Self = Self {
        spring_month: 3,
        spring_week: 2,
        fall_month: 11,
        fall_week: 1,
        weekday: SUNDAY,
        transition_hour: 1,
    };

    /// Decide whether the given armed clock position is a transition
    /// instant. `hour` is the value before the top-of-hour advance.
    pub fn evaluate(&self, year: u16, month: u8, day: u8, hour: u8, armed: bool) -> DstShift {
        if !armed || hour != self.transition_hour {
            return DstShift::None;
        }
        if month == self.spring_month
            && day == nth_weekday_of_month(year, month, self.weekday, self.spring_week)
        {
            DstShift::Forward
        } else if month == self.fall_month
            && day == nth_weekday_of_month(year, month, self.weekday, self.fall_week)
        {
            DstShift::Back
        } else {
            DstShift::None
        }
    }
}

impl Default for DstRule {
    fn default() -> Self {
        Self::US_2007
    }
}
