//! Worker routes through the slot table
//!
//! Each worker's loop is a fixed list of turns. A turn starts by waiting on
//! one gate and ends by posting another; in between the worker holds the
//! baton and visits its slots one tick apart. Stitched together by the gate
//! ring, the three routes walk the sprite through all sixteen slots.

use heapless::Vec;

use super::ring::{Gate, GATE_COUNT};
use crate::glyph::{Slot, SLOT_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The three hand-off workers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WorkerId {
    /// Top band: line 1 and both ends of line 2
    First,
    /// Middle band: lines 3 and 4
    Second,
    /// Bottom band: lines 5 and 6
    Third,
}

impl WorkerId {
    /// All workers in spawn order
    pub const ALL: [WorkerId; 3] = [WorkerId::First, WorkerId::Second, WorkerId::Third];

    /// This worker's route, run once per cycle
    pub const fn route(self) -> &'static [Turn] {
        match self {
            WorkerId::First => &FIRST_ROUTE,
            WorkerId::Second => &SECOND_ROUTE,
            WorkerId::Third => &THIRD_ROUTE,
        }
    }

    /// Short name for logs
    pub const fn name(self) -> &'static str {
        match self {
            WorkerId::First => "worker 1",
            WorkerId::Second => "worker 2",
            WorkerId::Third => "worker 3",
        }
    }
}

/// One stretch of a route between acquiring and releasing the baton
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Gate to wait on
    pub entry: Gate,
    /// Blank the screen before the first visit
    pub clear_first: bool,
    /// Slots to draw in, one tick each
    pub visits: &'static [Slot],
    /// Gate to post when done
    pub exit: Gate,
}

const FIRST_ROUTE: [Turn; 2] = [
    // Right to left along the top, then drop to line 2
    Turn {
        entry: Gate::S1,
        clear_first: true,
        visits: &[
            Slot::Line1End,
            Slot::Line1Third,
            Slot::Line1Second,
            Slot::Line1Origin,
            Slot::Line2Origin,
        ],
        exit: Gate::S2,
    },
    Turn {
        entry: Gate::S1,
        clear_first: false,
        visits: &[Slot::Line2End],
        exit: Gate::S1,
    },
];

const SECOND_ROUTE: [Turn; 2] = [
    Turn {
        entry: Gate::S2,
        clear_first: false,
        visits: &[Slot::Line3Origin, Slot::Line4Origin],
        exit: Gate::S3,
    },
    Turn {
        entry: Gate::S4,
        clear_first: false,
        visits: &[Slot::Line4End, Slot::Line3End],
        exit: Gate::S1,
    },
];

const THIRD_ROUTE: [Turn; 1] = [Turn {
    entry: Gate::S3,
    clear_first: false,
    visits: &[
        Slot::Line5Origin,
        Slot::Line6Origin,
        Slot::Line6Second,
        Slot::Line6Third,
        Slot::Line6End,
        Slot::Line5End,
    ],
    exit: Gate::S4,
}];

/// Number of turns taken by all workers in one cycle
pub const TURNS_PER_CYCLE: usize = FIRST_ROUTE.len() + SECOND_ROUTE.len() + THIRD_ROUTE.len();

/// Replay one cycle of the ring without running any tasks
///
/// Starting with the baton at [`Gate::S1`], hands it to whichever worker's
/// next turn waits on the current gate. Stops early if no worker is waiting
/// on the gate, which on hardware would mean the ring has stalled.
pub fn visiting_order() -> Vec<Slot, SLOT_COUNT> {
    let mut order = Vec::new();
    let mut cursors = [0usize; 3];
    let mut gate = Gate::S1;

    for _ in 0..TURNS_PER_CYCLE {
        let next = WorkerId::ALL.iter().enumerate().find_map(|(i, id)| {
            id.route()
                .get(cursors[i])
                .filter(|turn| turn.entry == gate)
                .map(|turn| (i, turn))
        });

        let Some((i, turn)) = next else {
            break;
        };

        for &slot in turn.visits {
            if order.push(slot).is_err() {
                return order;
            }
        }
        cursors[i] += 1;
        gate = turn.exit;
    }

    order
}

/// Gates each worker waits on, used to check no gate is shared
pub fn entry_gates(id: WorkerId) -> Vec<Gate, GATE_COUNT> {
    let mut gates: Vec<Gate, GATE_COUNT> = Vec::new();
    for turn in id.route() {
        if !gates.contains(&turn.entry) {
            let _ = gates.push(turn.entry);
        }
    }
    gates
}
