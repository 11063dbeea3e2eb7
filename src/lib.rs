//! PS/2-keyboard-driven LED chaser for FPro-style FPGA soft-SoC MMIO cores.
//!
//! The firmware runs a single polling loop on the SoC's soft CPU: it pops
//! raw scancodes from the PS/2 core, decodes them into keys, lets the
//! operator enter a three-digit chase period or toggle pause, steps a
//! bouncing LED pattern at that period, and renders the period and pause
//! state on the seven-segment display every iteration.
//!
//! Everything that can run off-target does: scancode decoding, the
//! period-entry state machine, the chaser, and the display renderer are
//! hardware-free and exercised with `cargo test` on the host. The
//! memory-mapped core drivers live in [`bridge`]; the embedded binary
//! (`src/main.rs`, feature `embedded`) wires them into [`app::App`] and
//! never returns.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod bridge;
pub mod chaser;
pub mod config;
pub mod error;
pub mod input;
pub mod io;
pub mod scancode;
pub mod sseg;
