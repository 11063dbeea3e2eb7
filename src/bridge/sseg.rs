//! Seven-segment display core.
//!
//! Eight digit positions with patterns packed four per word. The driver
//! caches the pattern bytes and flushes the word holding the touched
//! position, so single-digit writes cost one register access.

use super::write_reg;
use crate::config::SSEG_DIGITS;
use crate::io::SegDisplay;

/// Patterns for positions 0-3.
const PTN_LO_REG: usize = 0;
/// Patterns for positions 4-7.
const PTN_HI_REG: usize = 1;
/// Decimal-point mask, one bit per position.
const DP_REG: usize = 2;

pub struct SsegCore {
    base: usize,
    patterns: [u8; SSEG_DIGITS],
}

impl SsegCore {
    /// # Safety
    ///
    /// `base` must be the slot address of a seven-segment core, and the
    /// core must not be driven from anywhere else.
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            base,
            patterns: [0xff; SSEG_DIGITS],
        }
    }

    /// Blank every digit and clear the decimal points.
    pub fn clear(&mut self) {
        self.patterns = [0xff; SSEG_DIGITS];
        self.flush_word(PTN_LO_REG);
        self.flush_word(PTN_HI_REG);
        unsafe { write_reg(self.base, DP_REG, 0) };
    }

    fn flush_word(&mut self, word: usize) {
        let p = &self.patterns[word * 4..word * 4 + 4];
        let value = u32::from_le_bytes([p[0], p[1], p[2], p[3]]);
        unsafe { write_reg(self.base, word, value) };
    }
}

impl SegDisplay for SsegCore {
    fn write_pattern(&mut self, pos: usize, pattern: u8) {
        if pos >= SSEG_DIGITS {
            return;
        }
        self.patterns[pos] = pattern;
        self.flush_word(pos / 4);
    }

    fn set_decimal_points(&mut self, mask: u8) {
        unsafe { write_reg(self.base, DP_REG, u32::from(mask)) };
    }
}
