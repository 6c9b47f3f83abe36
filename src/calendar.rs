//! Pure Gregorian calendar helpers.
//!
//! These four functions are the single source of truth for calendar
//! arithmetic in this crate; nothing else re-derives leap-year or
//! weekday logic. All of them assume pre-validated input (`month` in
//! 1..=12, `day` in range for the month) and are total over it.

/// Day-of-week values returned by [`day_of_week`], Sunday = 0.
pub const SUNDAY: u8 = 0;

/// Three-letter weekday names, indexed by [`day_of_week`] output.
pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Three-letter month names, indexed by `month - 1`.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DAYTAB: [[u8; 12]; 2] = [
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
    [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
];

/// Gregorian leap-year rule: divisible by 4 and not by 100, or by 400.
pub const fn is_leap(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1..=12) given the leap flag.
pub fn days_in_month(month: u8, leap: bool) -> u8 {
    debug_assert!((1..=12).contains(&month));
    let month = month.clamp(1, 12);
    DAYTAB[leap as usize][month as usize - 1]
}

/// Day of week for a Gregorian date, Sunday = 0.
///
/// Zeller-style congruence: January and February count against the
/// preceding year for the leap/century terms.
pub fn day_of_week(year: u16, month: u8, day: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    const TABLE: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = i32::from(year) - i32::from(month < 3);
    let m = TABLE[month.clamp(1, 12) as usize - 1];
    (y + y / 4 - y / 100 + y / 400 + m + i32::from(day)).rem_euclid(7) as u8
}

/// Date of the `week`-th (1-based) occurrence of `target_dow` in the
/// given month: the first matching date plus `7 * (week - 1)` days.
///
/// `week = 1` is the first occurrence. The caller is responsible for
/// not asking for an occurrence past the end of the month.
pub fn nth_weekday_of_month(year: u16, month: u8, target_dow: u8, week: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    debug_assert!(target_dow < 7);
    debug_assert!((1..=5).contains(&week));
    let mut date = 1;
    let mut dow = day_of_week(year, month, date);
    while dow != target_dow {
        dow = (dow + 1) % 7;
        date += 1;
    }
    date + 7 * (week.max(1) - 1)
}
