//! PCD8544 instruction set
//!
//! Every instruction is one byte sent with D/C low. Instructions in the
//! extended set are only decoded while the function-set H bit is 1.

use baton_core::config::{DisplayConfig, MAX_BIAS, MAX_CONTRAST, MAX_TEMP_COEFFICIENT};
use baton_core::glyph::Coordinate;

/// PCD8544 commands
#[allow(dead_code)]
pub mod cmd {
    /// Function set: power, addressing and instruction set
    pub const FUNCTION_SET: u8 = 0x20;
    /// Function set: chip powered down
    pub const OPT_POWER_DOWN: u8 = 0x04;
    /// Function set: vertical addressing
    pub const OPT_VERTICAL: u8 = 0x02;
    /// Function set: extended instruction set (H = 1)
    pub const OPT_EXT_INSTR: u8 = 0x01;
    /// Function set: basic instruction set (H = 0)
    pub const OPT_BASIC_INSTR: u8 = 0x00;

    /// Display control
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const OPT_BLANK: u8 = 0x00;
    pub const OPT_NORMAL: u8 = 0x04;
    pub const OPT_ALL_ON: u8 = 0x01;
    pub const OPT_INVERSE: u8 = 0x05;

    /// Set Y (bank) counter, OR with 0-5
    pub const SET_Y: u8 = 0x40;
    /// Set X (column) counter, OR with 0-83
    pub const SET_X: u8 = 0x80;

    // Extended set (H = 1)

    /// Temperature control, OR with coefficient 0-3
    pub const TEMP_CONTROL: u8 = 0x04;
    /// Bias system, OR with 0-7
    pub const BIAS_SYSTEM: u8 = 0x10;
    /// Set operating voltage, OR with 0-127
    pub const SET_VOP: u8 = 0x80;
}

/// Number of commands in the bring-up sequence
pub const INIT_SEQUENCE_LEN: usize = 6;

/// Bring-up commands, in the order the controller requires
///
/// Vop, temperature coefficient and bias are extended instructions, so
/// they sit between switching H on and off again.
pub fn init_sequence(config: &DisplayConfig) -> [u8; INIT_SEQUENCE_LEN] {
    [
        cmd::FUNCTION_SET | cmd::OPT_EXT_INSTR,
        set_vop(config.contrast),
        cmd::TEMP_CONTROL | (config.temp_coefficient & MAX_TEMP_COEFFICIENT),
        cmd::BIAS_SYSTEM | (config.bias & MAX_BIAS),
        cmd::FUNCTION_SET | cmd::OPT_BASIC_INSTR,
        cmd::DISPLAY_CONTROL | cmd::OPT_NORMAL,
    ]
}

/// Set Vop instruction for a contrast value
pub const fn set_vop(contrast: u8) -> u8 {
    cmd::SET_VOP | (contrast & MAX_CONTRAST)
}

/// Display control instruction for normal or inverse video
pub const fn display_mode(inverted: bool) -> u8 {
    if inverted {
        cmd::DISPLAY_CONTROL | cmd::OPT_INVERSE
    } else {
        cmd::DISPLAY_CONTROL | cmd::OPT_NORMAL
    }
}

/// Counter-setting instructions for a coordinate: function set, Y, X
///
/// Values are OR'd in unmasked; out-of-range coordinates produce whatever
/// instruction the resulting byte decodes to.
pub const fn move_sequence(at: Coordinate) -> [u8; 3] {
    [
        cmd::FUNCTION_SET,
        cmd::SET_Y | at.row(),
        cmd::SET_X | at.col(),
    ]
}
