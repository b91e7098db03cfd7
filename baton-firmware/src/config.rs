//! Settings compiled in from baton.toml
//!
//! build.rs validates the file and generates the constants below.

use baton_core::config::{validate_banner, AnimationConfig, BusConfig, DisplayConfig, Mode};
use defmt::*;

include!(concat!(env!("OUT_DIR"), "/config.rs"));

/// Re-check the generated settings against the core limits
///
/// build.rs already rejects bad values; this only catches the two drifting
/// apart. Returns false if anything is out of range.
pub fn check() -> bool {
    let results = [
        ("display", DISPLAY.validate()),
        ("bus", BUS.validate()),
        ("animation", ANIMATION.validate()),
        ("banner", validate_banner(BANNER)),
    ];

    let mut ok = true;
    for (section, result) in results {
        if let Err(e) = result {
            error!("Invalid {} settings: {}", section, e);
            ok = false;
        }
    }
    ok
}
