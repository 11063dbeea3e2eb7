//! PS/2 scan code set 2 decoder.
//!
//! The PS/2 core delivers raw scancode bytes; this state machine folds
//! break and shift sequences into decoded [`Key`] events:
//!
//! - `F0 xx` - key release; only shift releases matter to us
//! - `E0 ..` - extended keys, consumed and never mapped
//! - `12` / `59` - left / right shift make
//! - anything else - a make code, looked up in the US keymap

use crate::input::Key;

/// F1 make code.
const F1_MAKE: u8 = 0x05;
/// Break (release) prefix.
const BREAK: u8 = 0xf0;
/// Extended-key prefix.
const EXTENDED: u8 = 0xe0;
/// Left shift make code.
const SHIFT_L: u8 = 0x12;
/// Right shift make code.
const SHIFT_R: u8 = 0x59;

/// Unshifted US keymap indexed by make code; zero marks unmapped codes.
/// Keypad digits are mapped so the numeric pad works for period entry.
#[rustfmt::skip]
const KEYMAP: [u8; 128] = [
    // 0x00
    0, 0, 0, 0, 0, 0, 0, 0,
    // 0x08
    0, 0, 0, 0, 0, b'\t', b'`', 0,
    // 0x10
    0, 0, 0, 0, 0, b'q', b'1', 0,
    // 0x18
    0, 0, b'z', b's', b'a', b'w', b'2', 0,
    // 0x20
    0, b'c', b'x', b'd', b'e', b'4', b'3', 0,
    // 0x28
    0, b' ', b'v', b'f', b't', b'r', b'5', 0,
    // 0x30
    0, b'n', b'b', b'h', b'g', b'y', b'6', 0,
    // 0x38
    0, 0, b'm', b'j', b'u', b'7', b'8', 0,
    // 0x40
    0, b',', b'k', b'i', b'o', b'0', b'9', 0,
    // 0x48
    0, b'.', b'/', b'l', b';', b'p', b'-', 0,
    // 0x50
    0, 0, b'\'', 0, b'[', b'=', 0, 0,
    // 0x58
    0, 0, b'\n', b']', 0, b'\\', 0, 0,
    // 0x60
    0, 0, 0, 0, 0, 0, 0x08, 0,
    // 0x68
    0, b'1', 0, b'4', b'7', 0, 0, 0,
    // 0x70
    b'0', b'.', b'2', b'5', b'6', b'8', 0x1b, 0,
    // 0x78
    0, b'+', b'3', b'-', b'*', b'9', 0, 0,
];

/// Shifted variants of [`KEYMAP`]; the keypad is unaffected by shift.
#[rustfmt::skip]
const KEYMAP_SHIFTED: [u8; 128] = [
    // 0x00
    0, 0, 0, 0, 0, 0, 0, 0,
    // 0x08
    0, 0, 0, 0, 0, b'\t', b'~', 0,
    // 0x10
    0, 0, 0, 0, 0, b'Q', b'!', 0,
    // 0x18
    0, 0, b'Z', b'S', b'A', b'W', b'@', 0,
    // 0x20
    0, b'C', b'X', b'D', b'E', b'$', b'#', 0,
    // 0x28
    0, b' ', b'V', b'F', b'T', b'R', b'%', 0,
    // 0x30
    0, b'N', b'B', b'H', b'G', b'Y', b'^', 0,
    // 0x38
    0, 0, b'M', b'J', b'U', b'&', b'*', 0,
    // 0x40
    0, b'<', b'K', b'I', b'O', b')', b'(', 0,
    // 0x48
    0, b'>', b'?', b'L', b':', b'P', b'_', 0,
    // 0x50
    0, 0, b'"', 0, b'{', b'+', 0, 0,
    // 0x58
    0, 0, b'\n', b'}', 0, b'|', 0, 0,
    // 0x60
    0, 0, 0, 0, 0, 0, 0x08, 0,
    // 0x68
    0, b'1', 0, b'4', b'7', 0, 0, 0,
    // 0x70
    b'0', b'.', b'2', b'5', b'6', b'8', 0x1b, 0,
    // 0x78
    0, b'+', b'3', b'-', b'*', b'9', 0, 0,
];

/// Decoder state carried across scancode bytes.
#[derive(Debug, Default)]
pub struct Ps2Decoder {
    /// Last byte was the break prefix.
    break_pending: bool,
    /// Inside an extended-key sequence.
    extended: bool,
    /// A shift key is held.
    shifted: bool,
}

impl Ps2Decoder {
    pub const fn new() -> Self {
        Self {
            break_pending: false,
            extended: false,
            shifted: false,
        }
    }

    /// Feed one raw byte; returns a key when a make sequence completes.
    pub fn feed(&mut self, code: u8) -> Option<Key> {
        if code == BREAK {
            self.break_pending = true;
            return None;
        }
        if code == EXTENDED {
            self.extended = true;
            return None;
        }
        if self.break_pending {
            self.break_pending = false;
            self.extended = false;
            if code == SHIFT_L || code == SHIFT_R {
                self.shifted = false;
            }
            return None;
        }
        if self.extended {
            // Extended make code (arrows, right ctrl, ...): not mapped.
            self.extended = false;
            return None;
        }
        match code {
            SHIFT_L | SHIFT_R => {
                self.shifted = true;
                None
            }
            F1_MAKE => Some(Key::F1),
            _ => {
                let map = if self.shifted { &KEYMAP_SHIFTED } else { &KEYMAP };
                match map.get(usize::from(code)).copied().unwrap_or(0) {
                    0 => None,
                    ch => Some(Key::Char(ch)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(decoder: &mut Ps2Decoder, bytes: &[u8]) -> Option<Key> {
        let mut last = None;
        for &b in bytes {
            last = decoder.feed(b);
        }
        last
    }

    #[test]
    fn digit_make_codes_decode_to_ascii() {
        let mut decoder = Ps2Decoder::new();
        assert_eq!(decoder.feed(0x2e), Some(Key::Char(b'5')));
        assert_eq!(decoder.feed(0x45), Some(Key::Char(b'0')));
        assert_eq!(decoder.feed(0x16), Some(Key::Char(b'1')));
    }

    #[test]
    fn keypad_digits_decode_too() {
        let mut decoder = Ps2Decoder::new();
        assert_eq!(decoder.feed(0x70), Some(Key::Char(b'0')));
        assert_eq!(decoder.feed(0x7d), Some(Key::Char(b'9')));
    }

    #[test]
    fn f1_make_is_the_trigger() {
        let mut decoder = Ps2Decoder::new();
        assert_eq!(decoder.feed(0x05), Some(Key::F1));
    }

    #[test]
    fn releases_produce_nothing() {
        let mut decoder = Ps2Decoder::new();
        assert_eq!(decoder.feed(0xf0), None);
        assert_eq!(decoder.feed(0x2e), None); // '5' release
        // Decoder is clean again afterwards.
        assert_eq!(decoder.feed(0x2e), Some(Key::Char(b'5')));
    }

    #[test]
    fn shift_selects_the_shifted_map_until_released() {
        let mut decoder = Ps2Decoder::new();
        assert_eq!(decoder.feed(SHIFT_L), None);
        assert_eq!(decoder.feed(0x1c), Some(Key::Char(b'A')));
        assert_eq!(feed_all(&mut decoder, &[0xf0, SHIFT_L]), None);
        assert_eq!(decoder.feed(0x1c), Some(Key::Char(b'a')));
    }

    #[test]
    fn right_shift_works_like_left() {
        let mut decoder = Ps2Decoder::new();
        decoder.feed(SHIFT_R);
        assert_eq!(decoder.feed(0x16), Some(Key::Char(b'!')));
    }

    #[test]
    fn extended_sequences_are_swallowed() {
        let mut decoder = Ps2Decoder::new();
        // Right arrow: E0 74 make, E0 F0 74 break.
        assert_eq!(feed_all(&mut decoder, &[0xe0, 0x74]), None);
        assert_eq!(feed_all(&mut decoder, &[0xe0, 0xf0, 0x74]), None);
        // Subsequent decoding is unaffected.
        assert_eq!(decoder.feed(0x74), Some(Key::Char(b'6')));
    }

    #[test]
    fn unmapped_codes_produce_nothing() {
        let mut decoder = Ps2Decoder::new();
        assert_eq!(decoder.feed(0x58), None); // caps lock
        assert_eq!(decoder.feed(0x11), None); // left alt
    }
}
