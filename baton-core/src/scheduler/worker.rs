//! Hand-off worker
//!
//! Runs one route forever (or one cycle at a time on a host). Every visit
//! is move, draw, then one tick of delay while still holding the baton.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use super::ring::{Baton, HandOffRing};
use super::route::{Turn, WorkerId};
use crate::config::AnimationConfig;
use crate::traits::SurfaceExt;
use crate::traits::Surface;

/// One of the three animation workers
pub struct Worker<'r, M: RawMutex, D, T> {
    id: WorkerId,
    ring: &'r HandOffRing<M, Baton<D>>,
    delay: T,
    step_ms: u32,
}

impl<'r, M, D, T> Worker<'r, M, D, T>
where
    M: RawMutex,
    D: Surface,
    T: DelayNs,
{
    /// Create a worker bound to a ring
    pub fn new(
        id: WorkerId,
        ring: &'r HandOffRing<M, Baton<D>>,
        delay: T,
        animation: AnimationConfig,
    ) -> Self {
        Self {
            id,
            ring,
            delay,
            step_ms: animation.step_ms,
        }
    }

    /// Which route this worker runs
    pub fn id(&self) -> WorkerId {
        self.id
    }

    /// Run the route forever
    pub async fn run(mut self) -> ! {
        loop {
            self.run_cycle().await;
        }
    }

    /// Run every turn of the route once
    pub async fn run_cycle(&mut self) {
        for turn in self.id.route() {
            self.take_turn(turn).await;
        }
    }

    async fn take_turn(&mut self, turn: &Turn) {
        let mut baton = self.ring.acquire(turn.entry).await;
        baton.take(self.id);

        if turn.clear_first {
            baton.surface.clear().await;
        }

        for &slot in turn.visits {
            baton.surface.draw_in_slot(&baton.sprite, slot).await;
            baton.record_visit();
            self.delay.delay_ms(self.step_ms).await;
        }

        baton.hand_off();
        self.ring.release(turn.exit, baton);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::{Coordinate, Glyph, Slot, DOLLAR, SLOT_COUNT};
    use crate::scheduler::ring::Gate;
    use crate::scheduler::route::visiting_order;
    use core::cell::{Cell, RefCell};
    use embassy_futures::join::join3;
    use embassy_futures::{block_on, yield_now};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Clear,
        Move(Coordinate),
        Draw,
        Tick(WorkerId, u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    /// Surface that records calls and yields mid-call like a real transfer
    struct MockSurface {
        log: Log,
        in_flight: Rc<Cell<bool>>,
    }

    impl MockSurface {
        async fn transfer(&mut self, event: Event) {
            assert!(!self.in_flight.get(), "re-entrant surface call");
            self.in_flight.set(true);
            self.log.borrow_mut().push(event);
            yield_now().await;
            self.in_flight.set(false);
        }
    }

    impl Surface for MockSurface {
        async fn clear(&mut self) {
            self.transfer(Event::Clear).await;
        }

        async fn move_to(&mut self, at: Coordinate) {
            self.transfer(Event::Move(at)).await;
        }

        async fn draw_glyph(&mut self, glyph: &Glyph) {
            assert_eq!(glyph, &DOLLAR);
            self.transfer(Event::Draw).await;
        }
    }

    /// Delay that logs the tick and yields to the other workers
    struct MockDelay {
        id: WorkerId,
        log: Log,
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, _ns: u32) {
            yield_now().await;
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Tick(self.id, ms));
            yield_now().await;
        }
    }

    fn moves(log: &[Event]) -> Vec<Coordinate> {
        log.iter()
            .filter_map(|e| match e {
                Event::Move(at) => Some(*at),
                _ => None,
            })
            .collect()
    }

    /// Run every worker for `cycles` cycles and return the event log
    fn run_ring(cycles: usize) -> (Vec<Event>, Option<Baton<MockSurface>>) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let ring: HandOffRing<NoopRawMutex, Baton<MockSurface>> = HandOffRing::new();
        let animation = AnimationConfig { step_ms: 250 };

        let make = |id| {
            Worker::new(
                id,
                &ring,
                MockDelay {
                    id,
                    log: log.clone(),
                },
                animation,
            )
        };
        let mut first = make(WorkerId::First);
        let mut second = make(WorkerId::Second);
        let mut third = make(WorkerId::Third);

        ring.start(Baton::new(
            MockSurface {
                log: log.clone(),
                in_flight: Rc::new(Cell::new(false)),
            },
            DOLLAR,
        ));

        block_on(join3(
            async {
                for _ in 0..cycles {
                    first.run_cycle().await;
                }
            },
            async {
                for _ in 0..cycles {
                    second.run_cycle().await;
                }
            },
            async {
                for _ in 0..cycles {
                    third.run_cycle().await;
                }
            },
        ));

        let baton = ring.try_acquire(Gate::S1);
        let events = log.borrow().clone();
        (events, baton)
    }

    #[test]
    fn test_round_robin_law() {
        let (events, _) = run_ring(2);
        let moves = moves(&events);
        assert_eq!(moves.len(), 2 * SLOT_COUNT);

        let expected: Vec<Coordinate> = visiting_order()
            .iter()
            .map(|slot| slot.coordinate())
            .collect();
        assert_eq!(&moves[..SLOT_COUNT], expected.as_slice());
        assert_eq!(&moves[..SLOT_COUNT], &moves[SLOT_COUNT..]);
    }

    #[test]
    fn test_each_visit_is_move_draw_tick() {
        let (events, _) = run_ring(1);

        // Screen is cleared once, before anything is drawn
        assert_eq!(events[0], Event::Clear);
        let visits = &events[1..];
        assert_eq!(visits.len(), 3 * SLOT_COUNT);

        for chunk in visits.chunks(3) {
            assert!(matches!(chunk[0], Event::Move(_)));
            assert_eq!(chunk[1], Event::Draw);
            assert!(matches!(chunk[2], Event::Tick(_, 250)));
        }
    }

    #[test]
    fn test_slots_drawn_by_owning_worker() {
        let (events, _) = run_ring(1);
        let mut current = None;

        for event in events.iter().rev() {
            match event {
                Event::Tick(id, _) => current = Some(*id),
                Event::Move(at) => {
                    let slot = Slot::ALL
                        .iter()
                        .find(|s| s.coordinate() == *at)
                        .copied()
                        .unwrap();
                    let owner = WorkerId::ALL
                        .iter()
                        .find(|id| {
                            id.route()
                                .iter()
                                .any(|turn| turn.visits.contains(&slot))
                        })
                        .copied();
                    assert_eq!(owner, current, "{:?} drawn by wrong worker", slot);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_baton_returns_to_first_gate() {
        let (_, baton) = run_ring(2);
        let baton = baton.expect("baton parked at S1 after full cycles");
        assert_eq!(baton.visits(), 2 * SLOT_COUNT as u32);
        assert_eq!(baton.holder(), None);
    }

    #[test]
    fn test_worker_waits_without_baton() {
        let ring: HandOffRing<NoopRawMutex, Baton<MockSurface>> = HandOffRing::new();
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut worker = Worker::new(
            WorkerId::Second,
            &ring,
            MockDelay {
                id: WorkerId::Second,
                log: log.clone(),
            },
            AnimationConfig::default(),
        );

        // Nothing posted on S2, so the cycle never gets past its first wait
        let cancelled = block_on(embassy_futures::select::select(
            worker.run_cycle(),
            yield_now(),
        ));
        assert!(matches!(cancelled, embassy_futures::select::Either::Second(())));
        assert!(log.borrow().is_empty());
    }
}
