//! Error reporting over defmt

use baton_drivers::display::{DisplayError, ReportSink};
use defmt::*;

/// Logs every driver failure and carries on
pub struct DefmtSink;

impl ReportSink for DefmtSink {
    fn report(&mut self, label: &'static str, error: DisplayError) {
        warn!("{}: {}", label, error);
    }
}
