//! Free-running system timer core.

use super::{read_reg, write_reg};
use crate::config::SYS_CLK_HZ;
use crate::io::Clock;

/// Counter bits 31:0.
const COUNT_LO_REG: usize = 0;
/// Counter bits 47:32.
const COUNT_HI_REG: usize = 1;
/// Control register.
const CTRL_REG: usize = 2;

/// Control bit: counter runs.
const CTRL_GO: u32 = 1 << 0;
/// Control bit: clear the counter (self-clearing).
const CTRL_CLEAR: u32 = 1 << 1;

/// 48-bit up-counter clocked at [`SYS_CLK_HZ`].
pub struct TimerCore {
    base: usize,
}

impl TimerCore {
    /// # Safety
    ///
    /// `base` must be the slot address of a timer core, and the core must
    /// not be controlled from anywhere else.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Clear and start the counter.
    pub fn start(&mut self) {
        unsafe {
            write_reg(self.base, CTRL_REG, CTRL_CLEAR);
            write_reg(self.base, CTRL_REG, CTRL_GO);
        }
    }

    /// Raw tick count. The halves are re-read until they pair up, so a
    /// low-word wrap between the two reads cannot tear the value.
    pub fn ticks(&self) -> u64 {
        loop {
            let hi = unsafe { read_reg(self.base, COUNT_HI_REG) };
            let lo = unsafe { read_reg(self.base, COUNT_LO_REG) };
            let hi2 = unsafe { read_reg(self.base, COUNT_HI_REG) };
            if hi == hi2 {
                return u64::from(hi) << 32 | u64::from(lo);
            }
        }
    }
}

impl Clock for TimerCore {
    fn now_ms(&self) -> u64 {
        self.ticks() / (SYS_CLK_HZ / 1000)
    }
}
