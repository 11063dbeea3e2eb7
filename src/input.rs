//! Period-entry state machine over decoded keys.
//!
//! Two states: idle, and collecting exactly three decimal digits after
//! the F1 trigger. A non-digit during collection aborts the entry; F1
//! restarts it from anywhere, discarding partial digits.

use heapless::Vec;

use crate::config::{MIN_PERIOD_MS, PERIOD_DIGITS};
use crate::error::Error;

/// A decoded keyboard event, produced by [`crate::scancode::Ps2Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Printable ASCII from the keymap.
    Char(u8),
    /// The period-entry trigger key.
    F1,
}

/// What a handled key asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// No state change.
    Ignored,
    /// Entry armed; prompt the operator.
    EntryStarted,
    /// A digit was accepted; echo it.
    DigitAccepted(u8),
    /// Final digit accepted (echo it) and the buffer parsed into a period.
    PeriodSet { digit: u8, period_ms: u32 },
    /// Pause toggle requested.
    PauseToggled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    AwaitingDigits,
}

/// Entry mode plus the bounded digit buffer.
pub struct PeriodEntry {
    mode: Mode,
    digits: Vec<u8, PERIOD_DIGITS>,
}

impl PeriodEntry {
    pub const fn new() -> Self {
        Self {
            mode: Mode::Idle,
            digits: Vec::new(),
        }
    }

    /// True while digits are being collected.
    pub fn awaiting_digits(&self) -> bool {
        self.mode == Mode::AwaitingDigits
    }

    /// Advance the machine by one key.
    ///
    /// A non-digit during collection returns the machine to idle and
    /// reports the offending character; the previously stored period is
    /// untouched because no [`Event::PeriodSet`] is emitted.
    pub fn handle_key(&mut self, key: Key) -> Result<Event, Error> {
        match (self.mode, key) {
            // F1 (re)arms entry from any state, discarding partial digits.
            (_, Key::F1) => {
                self.mode = Mode::AwaitingDigits;
                self.digits.clear();
                Ok(Event::EntryStarted)
            }
            (Mode::AwaitingDigits, Key::Char(ch)) => {
                if !ch.is_ascii_digit() {
                    self.mode = Mode::Idle;
                    self.digits.clear();
                    return Err(Error::InvalidDigit(ch));
                }
                // The mode leaves AwaitingDigits on the final digit, so
                // the buffer is never full here.
                self.digits.push(ch).ok();
                if self.digits.is_full() {
                    self.mode = Mode::Idle;
                    let period_ms = self.parse_period();
                    self.digits.clear();
                    Ok(Event::PeriodSet {
                        digit: ch,
                        period_ms,
                    })
                } else {
                    Ok(Event::DigitAccepted(ch))
                }
            }
            (Mode::Idle, Key::Char(b'p' | b'P')) => Ok(Event::PauseToggled),
            (Mode::Idle, Key::Char(_)) => Ok(Event::Ignored),
        }
    }

    /// Base-10 accumulate, floored at the configured minimum period.
    fn parse_period(&self) -> u32 {
        let value = self
            .digits
            .iter()
            .fold(0u32, |v, &d| v * 10 + u32::from(d - b'0'));
        value.max(MIN_PERIOD_MS)
    }
}

impl Default for PeriodEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enter(entry: &mut PeriodEntry, keys: &[Key]) -> std::vec::Vec<Result<Event, Error>> {
        keys.iter().map(|&k| entry.handle_key(k)).collect()
    }

    #[test]
    fn three_digits_parse_as_decimal() {
        let mut entry = PeriodEntry::new();
        entry.handle_key(Key::F1).unwrap();
        entry.handle_key(Key::Char(b'5')).unwrap();
        entry.handle_key(Key::Char(b'0')).unwrap();
        let event = entry.handle_key(Key::Char(b'0')).unwrap();
        assert_eq!(
            event,
            Event::PeriodSet {
                digit: b'0',
                period_ms: 500
            }
        );
        assert!(!entry.awaiting_digits());
    }

    #[test]
    fn leading_zeros_are_plain_decimal() {
        let mut entry = PeriodEntry::new();
        let events = enter(
            &mut entry,
            &[Key::F1, Key::Char(b'0'), Key::Char(b'0'), Key::Char(b'7')],
        );
        assert_eq!(
            events[3],
            Ok(Event::PeriodSet {
                digit: b'7',
                period_ms: 7
            })
        );
    }

    #[test]
    fn non_digit_aborts_entry() {
        let mut entry = PeriodEntry::new();
        entry.handle_key(Key::F1).unwrap();
        entry.handle_key(Key::Char(b'9')).unwrap();
        let result = entry.handle_key(Key::Char(b'x'));
        assert_eq!(result, Err(Error::InvalidDigit(b'x')));
        assert!(!entry.awaiting_digits());

        // A later full entry starts from an empty buffer.
        let events = enter(
            &mut entry,
            &[Key::F1, Key::Char(b'1'), Key::Char(b'2'), Key::Char(b'3')],
        );
        assert_eq!(
            events[3],
            Ok(Event::PeriodSet {
                digit: b'3',
                period_ms: 123
            })
        );
    }

    #[test]
    fn pause_key_aborts_entry_like_any_non_digit() {
        let mut entry = PeriodEntry::new();
        entry.handle_key(Key::F1).unwrap();
        assert_eq!(
            entry.handle_key(Key::Char(b'p')),
            Err(Error::InvalidDigit(b'p'))
        );
    }

    #[test]
    fn f1_restarts_entry_midway() {
        let mut entry = PeriodEntry::new();
        entry.handle_key(Key::F1).unwrap();
        entry.handle_key(Key::Char(b'9')).unwrap();
        entry.handle_key(Key::Char(b'9')).unwrap();
        assert_eq!(entry.handle_key(Key::F1), Ok(Event::EntryStarted));
        // The two buffered nines were discarded.
        let events = enter(
            &mut entry,
            &[Key::Char(b'0'), Key::Char(b'4'), Key::Char(b'2')],
        );
        assert_eq!(
            events[2],
            Ok(Event::PeriodSet {
                digit: b'2',
                period_ms: 42
            })
        );
    }

    #[test]
    fn pause_toggles_only_when_idle() {
        let mut entry = PeriodEntry::new();
        assert_eq!(entry.handle_key(Key::Char(b'p')), Ok(Event::PauseToggled));
        assert_eq!(entry.handle_key(Key::Char(b'P')), Ok(Event::PauseToggled));
    }

    #[test]
    fn unrecognized_idle_keys_are_ignored() {
        let mut entry = PeriodEntry::new();
        assert_eq!(entry.handle_key(Key::Char(b'7')), Ok(Event::Ignored));
        assert_eq!(entry.handle_key(Key::Char(b'q')), Ok(Event::Ignored));
    }

    #[test]
    fn fourth_digit_after_completion_is_ignored() {
        let mut entry = PeriodEntry::new();
        enter(
            &mut entry,
            &[Key::F1, Key::Char(b'9'), Key::Char(b'9'), Key::Char(b'9')],
        );
        // Entry already completed; a further digit is an idle keystroke.
        assert_eq!(entry.handle_key(Key::Char(b'1')), Ok(Event::Ignored));
    }
}
