//! Display drivers

pub mod command;
pub mod pcd8544;
pub mod transport;

pub use pcd8544::Pcd8544;
pub use transport::{DisplayError, LineMode, ReportSink, SpiTransport};
