//! Hardware configuration types
//!
//! Controller bias/contrast settings and serial bus parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::ConfigError;

/// Highest operating voltage (Vop) setting, 7 bits
pub const MAX_CONTRAST: u8 = 0x7F;

/// Highest temperature coefficient setting, 2 bits
pub const MAX_TEMP_COEFFICIENT: u8 = 0x03;

/// Highest bias system setting, 3 bits
pub const MAX_BIAS: u8 = 0x07;

/// Fastest serial clock the PCD8544 accepts
pub const MAX_BUS_FREQUENCY_HZ: u32 = 4_000_000;

/// PCD8544 analogue settings applied during bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Operating voltage (Vop), 0-127; higher is darker
    pub contrast: u8,
    /// Temperature coefficient, 0-3
    pub temp_coefficient: u8,
    /// Bias system (multiplex rate), 0-7; 4 selects 1:48
    pub bias: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DisplayConfig {
    /// Settings for a typical Nokia 5110 module
    pub const DEFAULT: Self = Self {
        contrast: 0x3F,
        temp_coefficient: 0,
        bias: 4,
    };

    /// Check every field fits its command bit-field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contrast > MAX_CONTRAST {
            return Err(ConfigError::ContrastOutOfRange);
        }
        if self.temp_coefficient > MAX_TEMP_COEFFICIENT {
            return Err(ConfigError::TempCoefficientOutOfRange);
        }
        if self.bias > MAX_BIAS {
            return Err(ConfigError::BiasOutOfRange);
        }
        Ok(())
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Mode from its conventional number
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Mode::Mode0),
            1 => Some(Mode::Mode1),
            2 => Some(Mode::Mode2),
            3 => Some(Mode::Mode3),
            _ => None,
        }
    }
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

/// Serial bus settings
///
/// Bytes are always sent MSB first and there is no chip select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BusConfig {
    /// 2 MHz, clock idle low, data captured on the rising edge
    pub const DEFAULT: Self = Self {
        frequency_hz: 2_000_000,
        mode: Mode::Mode0,
    };

    /// Clock polarity for the configured mode
    pub fn polarity(&self) -> Polarity {
        <(Polarity, Phase)>::from(self.mode).0
    }

    /// Clock phase for the configured mode
    pub fn phase(&self) -> Phase {
        <(Polarity, Phase)>::from(self.mode).1
    }

    /// Check the bus settings against the controller's limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency_hz == 0 || self.frequency_hz > MAX_BUS_FREQUENCY_HZ {
            return Err(ConfigError::BusFrequencyOutOfRange);
        }
        // The controller samples SDIN on the rising edge with SCLK idle low
        if self.mode != Mode::Mode0 {
            return Err(ConfigError::UnsupportedBusMode);
        }
        Ok(())
    }
}
