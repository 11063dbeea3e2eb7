//! Seven-segment status rendering.
//!
//! Patterns are active low: a cleared bit lights the segment, `0xff` is
//! a dark digit.

use crate::config::PERIOD_DIGITS;
use crate::io::SegDisplay;

/// Active-low segment patterns for hex digits 0-F.
pub const HEX_FONT: [u8; 16] = [
    0xc0, 0xf9, 0xa4, 0xb0, 0x99, 0x92, 0x82, 0xf8, //
    0x80, 0x90, 0x88, 0x83, 0xc6, 0xa1, 0x86, 0x8e,
];

/// All segments dark.
pub const BLANK: u8 = 0xff;

/// Decimal-point mask flagging the pause indicator digit.
const PAUSE_DP_MASK: u8 = 0x80;

/// Render the current period and pause state.
///
/// Positions 0..2 take the period's decimal digits least significant
/// first; every position is written, so values shorter than three digits
/// show leading zeros. Positions 3-5 carry fixed dressing and position 7
/// plus the decimal points flag the pause state.
pub fn render_status<D: SegDisplay>(display: &mut D, period_ms: u32, paused: bool) {
    display.write_pattern(3, 0b1011_0111);
    display.write_pattern(4, 0b0000_1100);
    display.write_pattern(5, HEX_FONT[5]);

    if paused {
        display.write_pattern(7, 0b0000_1100);
        display.set_decimal_points(PAUSE_DP_MASK);
    } else {
        display.write_pattern(7, BLANK);
        display.set_decimal_points(0);
    }

    let mut value = period_ms;
    for pos in 0..PERIOD_DIGITS {
        display.write_pattern(pos, HEX_FONT[(value % 10) as usize]);
        value /= 10;
    }
}
