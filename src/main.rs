//! Embedded entry point: bring up the bridge cores and run the chase loop.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_halt as _;

use riscv_rt::entry;

use kb2led::app::App;
use kb2led::bridge::{GpoCore, Ps2Core, SsegCore, TimerCore, UartCore};
use kb2led::config;
use kb2led::io::Clock;

#[entry]
fn main() -> ! {
    // Safety: one handle per slot, constructed once for the process
    // lifetime, so each core has a single owner.
    let mut timer = unsafe { TimerCore::new(config::slot_addr(config::SLOT_SYS_TIMER)) };
    let uart = unsafe { UartCore::new(config::slot_addr(config::SLOT_UART)) };
    let leds = unsafe { GpoCore::new(config::slot_addr(config::SLOT_LED)) };
    let mut sseg = unsafe { SsegCore::new(config::slot_addr(config::SLOT_SSEG)) };
    let mut ps2 = unsafe { Ps2Core::new(config::slot_addr(config::SLOT_PS2)) };

    timer.start();
    sseg.clear();
    ps2.flush();
    defmt::info!("cores up, entering chase loop");

    let app = App::new(ps2, leds, sseg, uart, timer.now_ms());
    app.run(&timer)
}
