//! Hand-off worker task
//!
//! One task per route. Each waits on its gates, animates the sprite
//! through its slots and passes the baton on.

use baton_core::scheduler::{Baton, HandOffRing, Worker, WorkerId};
use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Delay;

use crate::config;
use crate::Display;

/// Ring shared by the worker tasks
pub type DisplayRing = HandOffRing<CriticalSectionRawMutex, Baton<Display>>;

/// Worker task - runs one route forever
#[embassy_executor::task(pool_size = 3)]
pub async fn worker_task(id: WorkerId, ring: &'static DisplayRing) {
    info!("{} worker started", id.name());

    let mut worker = Worker::new(id, ring, Delay, config::ANIMATION);
    let mut cycles: u32 = 0;

    loop {
        worker.run_cycle().await;
        cycles = cycles.wrapping_add(1);
        trace!("{} worker finished cycle {}", id.name(), cycles);
    }
}
