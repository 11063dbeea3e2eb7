//! Time-gated bounce chaser across the LED row.

use crate::config::{DEFAULT_PERIOD_MS, LED_COUNT};

/// Operator-controlled playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Playback {
    /// Milliseconds between chase steps.
    pub period_ms: u32,
    /// Freezes the chase; the display keeps rendering.
    pub paused: bool,
}

impl Playback {
    pub const fn new() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            paused: false,
        }
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

/// Chase position state plus the gating timestamp.
pub struct Chaser {
    position: u8,
    direction: i8,
    last_update_ms: u64,
}

impl Chaser {
    /// Start at the low end; the first step turns the direction upward.
    pub const fn new(start_ms: u64) -> Self {
        Self {
            position: 0,
            direction: -1,
            last_update_ms: start_ms,
        }
    }

    /// Advance if a period has elapsed; returns the LED mask to drive.
    ///
    /// Direction flips are evaluated from the pre-step position, so each
    /// endpoint is lit exactly once per sweep.
    pub fn tick(&mut self, playback: &Playback, now_ms: u64) -> Option<u16> {
        if playback.paused {
            return None;
        }
        if now_ms.wrapping_sub(self.last_update_ms) < u64::from(playback.period_ms) {
            return None;
        }
        let mask = 1u16 << self.position;
        self.last_update_ms = now_ms;

        if self.position == 0 {
            self.direction = 1;
        } else if self.position == LED_COUNT - 1 {
            self.direction = -1;
        }
        self.position = self.position.wrapping_add_signed(self.direction);

        Some(mask)
    }
}
