//! Display collaborator interface and clock-face rendering.
//!
//! The core never touches the display bus; the firmware implements
//! [`CharDisplay`] over its LCD driver and the renderer positions
//! fields on the panel's fixed 16x2 layout:
//!
//! ```text
//! Mon Jun 11, 2018
//!     15:13:00
//! ```

use core::fmt::Write;

use heapless::String;

use crate::calendar::{MONTHS, WEEKDAYS};
use crate::clock::ClockState;
use crate::setmode::SetField;

/// Character display, consumed interface only. Column/row addressing,
/// glyph rendering and bus timing belong to the implementation.
pub trait CharDisplay {
    fn clear(&mut self);
    fn set_cursor(&mut self, column: u8, row: u8);
    fn write_char(&mut self, c: char);
    fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
        }
    }
    /// Upload a custom 5x8 glyph to one of the display's glyph slots,
    /// for front panels that render oversized digits.
    fn define_glyph(&mut self, index: u8, bitmap: [u8; 8]);
}

/// Fixed panel position of a field: column, row, width in cells.
fn placement(field: SetField) -> (u8, u8, u8) {
    match field {
        SetField::Month => (4, 0, 3),
        SetField::Day => (8, 0, 2),
        SetField::Year => (12, 0, 4),
        SetField::Hour => (4, 1, 2),
        SetField::Minute => (7, 1, 2),
        SetField::Second => (10, 1, 2),
        SetField::DisplayClock => (0, 0, 0),
    }
}

/// Draw the full clock face.
pub fn render_clock<D: CharDisplay>(display: &mut D, state: &ClockState) {
    display.set_cursor(0, 0);
    display.write_str(WEEKDAYS[state.weekday() as usize]);
    draw_field(display, SetField::Month, state);
    draw_field(display, SetField::Day, state);
    display.write_char(',');
    draw_field(display, SetField::Year, state);
    draw_field(display, SetField::Hour, state);
    display.write_char(':');
    draw_field(display, SetField::Minute, state);
    display.write_char(':');
    draw_field(display, SetField::Second, state);
}

/// Draw one field at its panel position.
pub fn draw_field<D: CharDisplay>(display: &mut D, field: SetField, state: &ClockState) {
    let (column, row, _) = placement(field);
    let mut text: String<4> = String::new();
    let _ = match field {
        SetField::DisplayClock => return,
        SetField::Year => write!(text, "{}", state.year),
        SetField::Month => write!(text, "{}", MONTHS[state.month as usize - 1]),
        SetField::Day => write!(text, "{}", state.day),
        SetField::Hour => write!(text, "{:02}", state.hour),
        SetField::Minute => write!(text, "{:02}", state.minute),
        SetField::Second => write!(text, "{:02}", state.second),
    };
    display.set_cursor(column, row);
    display.write_str(&text);
}

/// Blank one field's cells, the "off" phase of the edit blink.
pub fn blank_field<D: CharDisplay>(display: &mut D, field: SetField) {
    let (column, row, width) = placement(field);
    display.set_cursor(column, row);
    for _ in 0..width {
        display.write_char(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 16x2 in-memory panel.
    pub struct FakeDisplay {
        pub cells: [[char; 16]; 2],
        column: usize,
        row: usize,
    }

    impl FakeDisplay {
        pub fn new() -> Self {
            Self {
                cells: [[' '; 16]; 2],
                column: 0,
                row: 0,
            }
        }

        pub fn line(&self, row: usize) -> std::string::String {
            self.cells[row].iter().collect()
        }
    }

    impl CharDisplay for FakeDisplay {
        fn clear(&mut self) {
            self.cells = [[' '; 16]; 2];
            self.column = 0;
            self.row = 0;
        }

        fn set_cursor(&mut self, column: u8, row: u8) {
            self.column = column as usize;
            self.row = row as usize;
        }

        fn write_char(&mut self, c: char) {
            if self.row < 2 && self.column < 16 {
                self.cells[self.row][self.column] = c;
            }
            self.column += 1;
        }

        fn define_glyph(&mut self, _index: u8, _bitmap: [u8; 8]) {}
    }

    #[test]
    fn full_face_layout() {
        let mut display = FakeDisplay::new();
        render_clock(&mut display, &ClockState::POWER_ON);
        assert_eq!(display.line(0), "Mon Jun 11, 2018");
        assert_eq!(display.line(1), "    15:13:00    ");
    }

    #[test]
    fn single_digit_day() {
        let mut display = FakeDisplay::new();
        let state = ClockState::new(2024, 3, 9, 7, 5, 0);
        render_clock(&mut display, &state);
        assert_eq!(display.line(0), "Sat Mar 9,  2024");
        assert_eq!(display.line(1), "    07:05:00    ");
    }

    #[test]
    fn field_blanking() {
        let mut display = FakeDisplay::new();
        render_clock(&mut display, &ClockState::POWER_ON);
        blank_field(&mut display, SetField::Minute);
        assert_eq!(display.line(1), "    15:  :00    ");
        draw_field(&mut display, SetField::Minute, &ClockState::POWER_ON);
        assert_eq!(display.line(1), "    15:13:00    ");
    }
}
