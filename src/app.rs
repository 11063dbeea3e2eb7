//! The polling loop: poll → decode → update → render.
//!
//! [`App`] owns every piece of mutable state and the injected collaborator
//! handles; there are no global driver objects. One [`App::tick`] performs
//! one non-blocking keyboard poll, one time-gated chase step, and one
//! display refresh.

use core::fmt::Write;

use crate::chaser::{Chaser, Playback};
use crate::error::Error;
use crate::input::{Event, Key, PeriodEntry};
use crate::io::{Clock, LedSink, ScancodeSource, SegDisplay};
use crate::scancode::Ps2Decoder;
use crate::sseg;

pub struct App<K, L, D, C>
where
    K: ScancodeSource,
    L: LedSink,
    D: SegDisplay,
    C: Write,
{
    scancodes: K,
    leds: L,
    display: D,
    console: C,
    decoder: Ps2Decoder,
    entry: PeriodEntry,
    playback: Playback,
    chaser: Chaser,
}

impl<K, L, D, C> App<K, L, D, C>
where
    K: ScancodeSource,
    L: LedSink,
    D: SegDisplay,
    C: Write,
{
    pub fn new(scancodes: K, leds: L, display: D, console: C, start_ms: u64) -> Self {
        Self {
            scancodes,
            leds,
            display,
            console,
            decoder: Ps2Decoder::new(),
            entry: PeriodEntry::new(),
            playback: Playback::new(),
            chaser: Chaser::new(start_ms),
        }
    }

    /// Run the loop forever.
    pub fn run(mut self, clock: &impl Clock) -> ! {
        let _ = write!(self.console, "\r\nPS2 keyboard LED chaser\r\n");
        loop {
            self.tick(clock.now_ms());
        }
    }

    /// One loop iteration.
    ///
    /// Console writes throughout are best-effort; a formatter error must
    /// never stall the control loop.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some(code) = self.scancodes.poll_scancode() {
            if let Some(key) = self.decoder.feed(code) {
                self.on_key(key);
            }
        }

        if let Some(mask) = self.chaser.tick(&self.playback, now_ms) {
            self.leds.write(mask);
        }

        sseg::render_status(&mut self.display, self.playback.period_ms, self.playback.paused);
    }

    /// Current playback settings (period and pause flag).
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    fn on_key(&mut self, key: Key) {
        match self.entry.handle_key(key) {
            Ok(Event::Ignored) => {}
            Ok(Event::EntryStarted) => {
                let _ = write!(
                    self.console,
                    "\r\nF1 pressed. Enter three digits for the flashing period:\r\n"
                );
            }
            Ok(Event::DigitAccepted(digit)) => {
                let _ = self.console.write_char(char::from(digit));
            }
            Ok(Event::PeriodSet { digit, period_ms }) => {
                let _ = self.console.write_char(char::from(digit));
                self.playback.period_ms = period_ms;
                let _ = write!(self.console, "\r\nNew speed: {} ms\r\n", period_ms);
            }
            Ok(Event::PauseToggled) => {
                self.playback.paused = !self.playback.paused;
                let state = if self.playback.paused { "ON" } else { "OFF" };
                let _ = write!(self.console, "\r\nPause toggled: {}\r\n", state);
            }
            Err(Error::InvalidDigit(_)) => {
                let _ = write!(self.console, "\r\nInvalid input. Expecting three digits.\r\n");
            }
        }
    }
}
