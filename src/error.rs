//! Unified error type for kb2led.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
///
/// Invalid operator input is the only modeled failure: hardware faults
/// are out of scope and buffer overflow is prevented structurally by the
/// bounded digit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A non-digit character arrived while a period entry was pending.
    InvalidDigit(u8),
}
