//! SPI bus transport
//!
//! Frames single command bytes and data buffers for the PCD8544. The D/C
//! line selects how the controller decodes the next bytes (low = command,
//! high = data) and is only touched between transfers. Each transfer is a
//! `write` followed by `flush`, which waits for the last bit to leave the
//! shifter so the D/C line cannot change under it.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Error as _, ErrorKind};
use embedded_hal_async::spi::SpiBus;

/// Display communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI transfer or completion wait failed
    Bus(ErrorKind),
    /// D/C line could not be driven
    ModeLine,
    /// Reset line could not be driven
    ResetLine,
    /// Character has no glyph in the font table
    UnsupportedChar(u8),
}

/// Destination for errors the driver does not propagate
///
/// Called once per failed operation with the operation's label. Must not
/// block.
pub trait ReportSink {
    /// Record a failure
    fn report(&mut self, label: &'static str, error: DisplayError);
}

/// Sink that drops every report
impl ReportSink for () {
    fn report(&mut self, _label: &'static str, _error: DisplayError) {}
}

/// State of the D/C line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineMode {
    /// D/C low: bytes are instructions
    Command,
    /// D/C high: bytes go to display RAM
    Data,
}

/// Command/data framing over an SPI bus and a D/C pin
pub struct SpiTransport<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiTransport<SPI, DC>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
{
    /// Create a transport; the bus must already be configured for mode 0
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Send one instruction byte
    pub async fn send_command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.set_mode(LineMode::Command)?;
        self.transfer(&[command]).await
    }

    /// Send bytes to display RAM at the current counter position
    pub async fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.set_mode(LineMode::Data)?;
        self.transfer(data).await
    }

    /// Give back the bus and D/C pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    fn set_mode(&mut self, mode: LineMode) -> Result<(), DisplayError> {
        let result = match mode {
            LineMode::Command => self.dc.set_low(),
            LineMode::Data => self.dc.set_high(),
        };
        result.map_err(|_| DisplayError::ModeLine)
    }

    async fn transfer(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.spi
            .write(bytes)
            .await
            .map_err(|e| DisplayError::Bus(e.kind()))?;
        self.spi
            .flush()
            .await
            .map_err(|e| DisplayError::Bus(e.kind()))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    //! Recording SPI bus and pins shared by the driver tests

    use super::*;
    use core::cell::RefCell;
    use core::convert::Infallible;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum BusEvent {
        Dc(bool),
        Reset(bool),
        Write(Vec<u8>),
        Flush,
        Delay(u32),
    }

    pub type BusLog = Rc<RefCell<Vec<BusEvent>>>;

    pub fn new_log() -> BusLog {
        Rc::new(RefCell::new(Vec::new()))
    }

    pub struct MockSpi {
        pub log: BusLog,
        pub fail: bool,
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = ErrorKind;
    }

    impl SpiBus<u8> for MockSpi {
        async fn read(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
            words.fill(0);
            Ok(())
        }

        async fn write(&mut self, words: &[u8]) -> Result<(), ErrorKind> {
            self.log.borrow_mut().push(BusEvent::Write(words.to_vec()));
            if self.fail {
                Err(ErrorKind::Other)
            } else {
                Ok(())
            }
        }

        async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), ErrorKind> {
            read.fill(0);
            self.write(write).await
        }

        async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), ErrorKind> {
            let copy = words.to_vec();
            self.write(&copy).await
        }

        async fn flush(&mut self) -> Result<(), ErrorKind> {
            self.log.borrow_mut().push(BusEvent::Flush);
            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    pub enum PinRole {
        Dc,
        Reset,
    }

    pub struct MockPin {
        pub log: BusLog,
        pub role: PinRole,
    }

    impl MockPin {
        fn record(&mut self, high: bool) {
            let event = match self.role {
                PinRole::Dc => BusEvent::Dc(high),
                PinRole::Reset => BusEvent::Reset(high),
            };
            self.log.borrow_mut().push(event);
        }
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.record(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.record(true);
            Ok(())
        }
    }

    pub struct MockDelay {
        pub log: BusLog,
    }

    impl embedded_hal_async::delay::DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(BusEvent::Delay(ns / 1_000_000));
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(BusEvent::Delay(ms));
        }
    }

    /// Bytes as the controller would decode them
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Frame {
        Command(u8),
        Data(Vec<u8>),
    }

    /// Decode a bus log into frames, checking the D/C and flush discipline
    pub fn frames(log: &[BusEvent]) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut dc_high = None;
        let mut pending_flush = false;

        for event in log {
            match event {
                BusEvent::Dc(high) => {
                    assert!(!pending_flush, "D/C changed before transfer completed");
                    dc_high = Some(*high);
                }
                BusEvent::Write(bytes) => {
                    assert!(!pending_flush, "write before previous flush");
                    match dc_high {
                        Some(false) => {
                            assert_eq!(bytes.len(), 1, "commands are one byte");
                            frames.push(Frame::Command(bytes[0]));
                        }
                        Some(true) => frames.push(Frame::Data(bytes.clone())),
                        None => panic!("write with D/C never set"),
                    }
                    pending_flush = true;
                }
                BusEvent::Flush => pending_flush = false,
                BusEvent::Reset(_) | BusEvent::Delay(_) => {}
            }
        }

        frames
    }

    pub fn commands(frames: &[Frame]) -> Vec<u8> {
        frames
            .iter()
            .filter_map(|f| match f {
                Frame::Command(c) => Some(*c),
                Frame::Data(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use embassy_futures::block_on;

    fn transport(log: &BusLog, fail: bool) -> SpiTransport<MockSpi, MockPin> {
        SpiTransport::new(
            MockSpi {
                log: log.clone(),
                fail,
            },
            MockPin {
                log: log.clone(),
                role: PinRole::Dc,
            },
        )
    }

    #[test]
    fn test_command_framing() {
        let log = new_log();
        let mut bus = transport(&log, false);

        block_on(bus.send_command(0x21)).unwrap();

        assert_eq!(
            *log.borrow(),
            [BusEvent::Dc(false), BusEvent::Write(vec![0x21]), BusEvent::Flush]
        );
    }

    #[test]
    fn test_data_framing() {
        let log = new_log();
        let mut bus = transport(&log, false);

        block_on(bus.send_data(&[1, 2, 3])).unwrap();

        assert_eq!(
            *log.borrow(),
            [BusEvent::Dc(true), BusEvent::Write(vec![1, 2, 3]), BusEvent::Flush]
        );
    }

    #[test]
    fn test_mode_set_before_every_transfer() {
        let log = new_log();
        let mut bus = transport(&log, false);

        block_on(async {
            bus.send_command(0x20).await.unwrap();
            bus.send_command(0x40).await.unwrap();
            bus.send_data(&[0xAA]).await.unwrap();
        });

        let dc_events = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, BusEvent::Dc(_)))
            .count();
        assert_eq!(dc_events, 3);
        assert_eq!(
            frames(&log.borrow()),
            [
                Frame::Command(0x20),
                Frame::Command(0x40),
                Frame::Data(vec![0xAA])
            ]
        );
    }

    #[test]
    fn test_bus_error_kind_propagates() {
        let log = new_log();
        let mut bus = transport(&log, true);

        let result = block_on(bus.send_command(0x20));
        assert_eq!(result, Err(DisplayError::Bus(ErrorKind::Other)));
        // No flush after a failed write
        assert_eq!(log.borrow().last(), Some(&BusEvent::Write(vec![0x20])));
    }
}
