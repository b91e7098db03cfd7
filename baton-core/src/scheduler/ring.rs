//! Gate ring
//!
//! Four single-slot signals. Posting a gate makes the baton available to
//! whoever waits on it; waiting consumes it. Since there is only one baton,
//! at most one gate is ever full and a worker can only draw while it owns
//! the baton.

use core::future::Future;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

use super::route::WorkerId;
use crate::glyph::Glyph;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of gates in the ring
pub const GATE_COUNT: usize = 4;

/// Wait/post point in the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Gate {
    S1,
    S2,
    S3,
    S4,
}

impl Gate {
    /// Position in the ring
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Token passed around the ring
///
/// Owns the drawing surface, so holding the baton is what grants access
/// to the display.
#[derive(Debug)]
pub struct Baton<D> {
    /// Display handle
    pub surface: D,
    /// Sprite drawn at every visit
    pub sprite: Glyph,
    visits: u32,
    holder: Option<WorkerId>,
}

impl<D> Baton<D> {
    /// Create a baton around a surface
    pub const fn new(surface: D, sprite: Glyph) -> Self {
        Self {
            surface,
            sprite,
            visits: 0,
            holder: None,
        }
    }

    /// Total slots visited since start
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Worker currently holding the baton, if taken through a turn
    pub fn holder(&self) -> Option<WorkerId> {
        self.holder
    }

    /// Give the surface back
    pub fn into_surface(self) -> D {
        self.surface
    }

    pub(crate) fn take(&mut self, id: WorkerId) {
        self.holder = Some(id);
    }

    pub(crate) fn record_visit(&mut self) {
        self.visits = self.visits.wrapping_add(1);
    }

    pub(crate) fn hand_off(&mut self) {
        self.holder = None;
    }
}

/// Ring of four binary gates
///
/// Place it in a `static` with a `CriticalSectionRawMutex` on hardware, or
/// on the stack with a `NoopRawMutex` for single-executor use.
pub struct HandOffRing<M: RawMutex, B> {
    gates: [Signal<M, B>; GATE_COUNT],
}

impl<M: RawMutex, B> Default for HandOffRing<M, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, B> HandOffRing<M, B> {
    /// Create a ring with every gate closed
    pub const fn new() -> Self {
        Self {
            gates: [Signal::new(), Signal::new(), Signal::new(), Signal::new()],
        }
    }

    /// Open the first gate with the baton
    pub fn start(&self, baton: B) {
        self.release(Gate::S1, baton);
    }

    /// Wait until `gate` is posted and take the baton
    pub async fn acquire(&self, gate: Gate) -> B {
        self.gates[gate.index()].wait().await
    }

    /// Wait on `gate` unless `cancel` completes first
    ///
    /// Returns `None` if cancelled; the baton, if later posted, stays in the
    /// gate so the ring order is unchanged.
    pub async fn acquire_or<F: Future>(&self, gate: Gate, cancel: F) -> Option<B> {
        match select(self.acquire(gate), cancel).await {
            Either::First(baton) => Some(baton),
            Either::Second(_) => None,
        }
    }

    /// Take the baton if `gate` is currently posted
    pub fn try_acquire(&self, gate: Gate) -> Option<B> {
        self.gates[gate.index()].try_take()
    }

    /// Post `gate` with the baton
    ///
    /// A gate holds one value; posting a full gate replaces it rather than
    /// queueing a second permit.
    pub fn release(&self, gate: Gate, baton: B) {
        self.gates[gate.index()].signal(baton);
    }

    /// Whether `gate` is posted
    pub fn is_open(&self, gate: Gate) -> bool {
        self.gates[gate.index()].signaled()
    }
}
