//! Baton - Hand-off Animation Firmware
//!
//! Drives a Nokia 5110 (PCD8544) display from an RP2040. Three tasks pass
//! a single `$` sprite around the edge of the screen like a relay baton;
//! the display travels with the baton, so only its holder can draw.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Async, Spi};
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use baton_core::config::{BusConfig, Phase, Polarity};
use baton_core::glyph::DOLLAR;
use baton_core::scheduler::{Baton, HandOffRing, WorkerId};
use baton_drivers::display::Pcd8544;

use crate::report::DefmtSink;
use crate::tasks::DisplayRing;

mod config;
mod report;
mod tasks;

/// The display as wired on this board
pub type Display = Pcd8544<Spi<'static, SPI0, Async>, Output<'static>, Output<'static>, DefmtSink>;

/// The hand-off ring; every gate starts closed
static RING: DisplayRing = HandOffRing::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Baton firmware starting...");

    if !config::check() {
        warn!("Settings out of range, continuing with them anyway");
    }

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup SPI0 for the display (transmit only, no chip select)
    // Pin assignments are board-specific (SCK=GPIO18, MOSI=GPIO19, D/C=GPIO20, RST=GPIO21)
    let spi = Spi::new_txonly(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.DMA_CH0,
        spi_config(&config::BUS),
    );
    let dc = Output::new(p.PIN_20, Level::Low);
    let reset = Output::new(p.PIN_21, Level::High);

    info!(
        "SPI initialized at {} Hz, {}",
        config::BUS.frequency_hz,
        config::BUS.mode
    );

    let mut display: Display = Pcd8544::new(spi, dc, reset, DefmtSink, config::DISPLAY);
    display.initialize(&mut Delay).await;
    info!("Display initialized, contrast={}", display.config().contrast);

    // Boot banner, shown for one step
    display.draw_string(config::BANNER).await;
    Timer::after_millis(u64::from(config::ANIMATION.step_ms)).await;
    display.home().await;
    display.clear().await;

    RING.start(Baton::new(display, DOLLAR));

    // Spawn workers; a worker that fails to spawn leaves the ring stalled
    for id in WorkerId::ALL {
        match spawner.spawn(tasks::worker_task(id, &RING)) {
            Ok(()) => {}
            Err(e) => error!("Failed to spawn {} worker: {}", id.name(), e),
        }
    }

    info!("All workers spawned, firmware running");

    // Main task has nothing else to do - all work happens in the workers
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Map the bus settings onto the RP2040 SPI peripheral
fn spi_config(bus: &BusConfig) -> spi::Config {
    let mut config = spi::Config::default();
    config.frequency = bus.frequency_hz;
    config.polarity = match bus.polarity() {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match bus.phase() {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}
