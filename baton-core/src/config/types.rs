//! Configuration type definitions
//!
//! Animation timing and the error type shared by every `validate()`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest accepted animation step
pub const MIN_STEP_MS: u32 = 10;

/// Maximum banner length (one line of 7-column glyphs)
pub const MAX_BANNER_LEN: usize = 12;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Vop does not fit in 7 bits
    ContrastOutOfRange,
    /// Temperature coefficient does not fit in 2 bits
    TempCoefficientOutOfRange,
    /// Bias does not fit in 3 bits
    BiasOutOfRange,
    /// Serial clock is zero or above the controller limit
    BusFrequencyOutOfRange,
    /// Bus mode other than CPOL=0/CPHA=0
    UnsupportedBusMode,
    /// Animation step shorter than [`MIN_STEP_MS`]
    StepTooShort,
    /// Banner longer than one screen line or not printable ASCII
    InvalidBanner,
}

/// Animation cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnimationConfig {
    /// Time the sprite rests on each slot (one tick)
    pub step_ms: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl AnimationConfig {
    /// One second per slot
    pub const DEFAULT: Self = Self { step_ms: 1000 };

    /// Reject steps too short to see
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step_ms < MIN_STEP_MS {
            return Err(ConfigError::StepTooShort);
        }
        Ok(())
    }
}

/// Check a boot banner fits one line and only uses font characters
pub fn validate_banner(banner: &str) -> Result<(), ConfigError> {
    let printable = banner
        .bytes()
        .all(|b| (crate::glyph::ASCII_BASE..=crate::glyph::ASCII_LAST).contains(&b));
    if banner.len() > MAX_BANNER_LEN || !printable {
        return Err(ConfigError::InvalidBanner);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_animation() {
        let config = AnimationConfig::default();
        assert_eq!(config.step_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_step_too_short() {
        let config = AnimationConfig { step_ms: 5 };
        assert_eq!(config.validate(), Err(ConfigError::StepTooShort));
    }

    #[test]
    fn test_banner_validation() {
        assert!(validate_banner("Welcome").is_ok());
        assert!(validate_banner("").is_ok());
        assert_eq!(
            validate_banner("far too long a banner"),
            Err(ConfigError::InvalidBanner)
        );
        assert_eq!(validate_banner("caf\u{e9}"), Err(ConfigError::InvalidBanner));
    }
}
