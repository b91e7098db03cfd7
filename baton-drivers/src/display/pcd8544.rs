//! PCD8544 LCD driver
//!
//! Driver for the 84x48 Nokia 5110 module over SPI with D/C and reset
//! lines. The host keeps no frame buffer: text and sprites are written
//! straight into controller RAM at the auto-incrementing counter.
//!
//! Transfer failures never abort an operation. Each one is handed to the
//! [`ReportSink`] with the operation's label and the remaining bytes are
//! still sent.

use baton_core::config::DisplayConfig;
use baton_core::glyph::{glyph_for, Coordinate, Glyph, Slot, BLANK_BYTE, SCREEN_SIZE};
use baton_core::traits::Surface;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use super::command::{self, cmd};
use super::transport::{DisplayError, ReportSink, SpiTransport};

/// Reset pulse width; the datasheet minimum is 100 ns
const RESET_PULSE_MS: u32 = 1;

/// One screen of blank display RAM
static BLANK_SCREEN: [u8; SCREEN_SIZE] = [BLANK_BYTE; SCREEN_SIZE];

/// PCD8544 driver
pub struct Pcd8544<SPI, DC, RST, S> {
    bus: SpiTransport<SPI, DC>,
    reset: RST,
    sink: S,
    config: DisplayConfig,
    inverted: bool,
}

impl<SPI, DC, RST, S> Pcd8544<SPI, DC, RST, S>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    RST: OutputPin,
    S: ReportSink,
{
    /// Create a driver; call [`initialize`](Self::initialize) before drawing
    pub fn new(spi: SPI, dc: DC, reset: RST, sink: S, config: DisplayConfig) -> Self {
        Self {
            bus: SpiTransport::new(spi, dc),
            reset,
            sink,
            config,
            inverted: false,
        }
    }

    /// Reset the controller and load the bias/contrast settings
    ///
    /// Leaves the display in normal video with the counter at the first
    /// slot. Display RAM is not cleared.
    pub async fn initialize<D: DelayNs>(&mut self, delay: &mut D) {
        const LABEL: &str = "Pcd8544::initialize";

        if self.reset.set_low().is_err() {
            self.sink.report(LABEL, DisplayError::ResetLine);
        }
        delay.delay_ms(RESET_PULSE_MS).await;
        if self.reset.set_high().is_err() {
            self.sink.report(LABEL, DisplayError::ResetLine);
        }

        for byte in command::init_sequence(&self.config) {
            self.command(LABEL, byte).await;
        }
        self.inverted = false;

        self.home().await;
    }

    /// Write a screen of blank bytes from the current counter
    ///
    /// Only blanks the whole screen when the counter is at the origin;
    /// otherwise the write wraps and ends where it started.
    pub async fn clear(&mut self) {
        self.data("Pcd8544::clear", &BLANK_SCREEN).await;
    }

    /// Toggle between normal and inverse video
    ///
    /// Display RAM is untouched; two calls restore the previous state.
    pub async fn invert(&mut self) {
        const LABEL: &str = "Pcd8544::invert";

        let inverted = !self.inverted;
        self.command(LABEL, cmd::FUNCTION_SET).await;
        self.command(LABEL, command::display_mode(inverted)).await;
        self.inverted = inverted;
    }

    /// Whether the display is currently in inverse video
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Change the operating voltage without a full re-initialize
    pub async fn set_contrast(&mut self, contrast: u8) {
        const LABEL: &str = "Pcd8544::set_contrast";

        self.command(LABEL, cmd::FUNCTION_SET | cmd::OPT_EXT_INSTR).await;
        self.command(LABEL, command::set_vop(contrast)).await;
        self.command(LABEL, cmd::FUNCTION_SET | cmd::OPT_BASIC_INSTR).await;
        self.config.contrast = contrast;
    }

    /// Current controller settings
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Move the counter to the first slot of the first line
    pub async fn home(&mut self) {
        self.move_to(Slot::Line1Origin.coordinate()).await;
    }

    /// Set the X and Y counters
    ///
    /// Not range checked: text positions should come from [`Slot`], raw
    /// bitmap writes may use any coordinate the controller accepts.
    pub async fn move_to(&mut self, at: Coordinate) {
        for byte in command::move_sequence(at) {
            self.command("Pcd8544::move_to", byte).await;
        }
    }

    /// Write a glyph at the current counter
    pub async fn draw_char(&mut self, glyph: &Glyph) {
        self.data("Pcd8544::draw_char", glyph.columns()).await;
    }

    /// Move to `at`, then write a glyph
    pub async fn draw_char_at(&mut self, glyph: &Glyph, at: Coordinate) {
        self.move_to(at).await;
        self.draw_char(glyph).await;
    }

    /// Write text from the current counter
    ///
    /// Glyphs are sent back-to-back and rely on the controller wrapping to
    /// the next bank. The text ends at the first NUL. Characters outside
    /// `0x20..=0x7F` are reported and skipped.
    pub async fn draw_string(&mut self, text: &str) {
        const LABEL: &str = "Pcd8544::draw_string";

        for code in text.bytes().take_while(|&b| b != 0) {
            match glyph_for(code) {
                Some(glyph) => self.data(LABEL, glyph.columns()).await,
                None => self.sink.report(LABEL, DisplayError::UnsupportedChar(code)),
            }
        }
    }

    /// Home the counter and write a full-screen bitmap verbatim
    pub async fn draw_bitmap(&mut self, bitmap: &[u8; SCREEN_SIZE]) {
        self.home().await;
        self.data("Pcd8544::draw_bitmap", bitmap).await;
    }

    /// Reporting sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the bus, pins and sink
    pub fn release(self) -> (SPI, DC, RST, S) {
        let (spi, dc) = self.bus.release();
        (spi, dc, self.reset, self.sink)
    }

    async fn command(&mut self, label: &'static str, byte: u8) {
        if let Err(e) = self.bus.send_command(byte).await {
            self.sink.report(label, e);
        }
    }

    async fn data(&mut self, label: &'static str, bytes: &[u8]) {
        if let Err(e) = self.bus.send_data(bytes).await {
            self.sink.report(label, e);
        }
    }
}

impl<SPI, DC, RST, S> Surface for Pcd8544<SPI, DC, RST, S>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    RST: OutputPin,
    S: ReportSink,
{
    async fn clear(&mut self) {
        Pcd8544::clear(self).await;
    }

    async fn move_to(&mut self, at: Coordinate) {
        Pcd8544::move_to(self, at).await;
    }

    async fn draw_glyph(&mut self, glyph: &Glyph) {
        Pcd8544::draw_char(self, glyph).await;
    }
}
