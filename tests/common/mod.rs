//! Shared test doubles for the engine integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

use step_ticker::{
    Block, Direction, MatchTimer, Motor, SoftInterrupt, StepTicker, TickEngine, TickerConfig,
    TimerCounts, Timers,
};

pub const FREQ: f32 = 100_000.0;

/// Motor that records every call.
#[derive(Debug, Default)]
pub struct CountingMotor {
    pub steps: Cell<u32>,
    pub unsteps: Cell<u32>,
    pub asserted: Cell<bool>,
    pub direction: Cell<Option<Direction>>,
    pub direction_writes: Cell<u32>,
}

impl CountingMotor {
    pub fn steps(&self) -> u32 {
        self.steps.get()
    }

    pub fn unsteps(&self) -> u32 {
        self.unsteps.get()
    }
}

impl Motor for CountingMotor {
    fn step(&self) {
        self.steps.set(self.steps.get() + 1);
        self.asserted.set(true);
    }

    fn unstep(&self) {
        self.unsteps.set(self.unsteps.get() + 1);
        self.asserted.set(false);
    }

    fn set_direction(&self, direction: Direction) {
        self.direction.set(Some(direction));
        self.direction_writes.set(self.direction_writes.get() + 1);
    }
}

/// Motor over a simulated GPIO port with write-only set and clear registers.
///
/// Bit 0 is STEP and bit 1 is DIR. Every write is a single atomic store into
/// `output`, so the motor is `Sync`.
#[derive(Debug, Default)]
pub struct PortMotor {
    pub output: AtomicU32,
    pub rising_edges: AtomicU32,
}

impl PortMotor {
    const STEP: u32 = 1 << 0;
    const DIR: u32 = 1 << 1;

    fn set(&self, bits: u32) -> u32 {
        self.output.fetch_or(bits, Ordering::AcqRel)
    }

    fn clear(&self, bits: u32) {
        self.output.fetch_and(!bits, Ordering::AcqRel);
    }

    pub fn step_high(&self) -> bool {
        self.output.load(Ordering::Acquire) & Self::STEP != 0
    }

    pub fn dir_high(&self) -> bool {
        self.output.load(Ordering::Acquire) & Self::DIR != 0
    }
}

impl Motor for PortMotor {
    fn step(&self) {
        if self.set(Self::STEP) & Self::STEP == 0 {
            self.rising_edges.fetch_add(1, Ordering::AcqRel);
        }
    }

    fn unstep(&self) {
        self.clear(Self::STEP);
    }

    fn set_direction(&self, direction: Direction) {
        if direction.bit() {
            self.set(Self::DIR);
        } else {
            self.clear(Self::DIR);
        }
    }
}

/// Observable state of a [`MockTimer`], kept after the timer is moved into the engine.
#[derive(Debug, Default)]
pub struct TimerState {
    pub match_value: Cell<u32>,
    pub counter: Cell<u32>,
    pub restarts: Cell<u32>,
    pub enabled: Cell<bool>,
}

#[derive(Debug, Default)]
pub struct MockTimer {
    pub state: Rc<TimerState>,
}

impl MatchTimer for MockTimer {
    fn set_match(&mut self, counts: TimerCounts) {
        self.state.match_value.set(counts.0);
    }

    fn counter(&self) -> TimerCounts {
        TimerCounts(self.state.counter.get())
    }

    fn restart(&mut self) {
        self.state.counter.set(0);
        self.state.restarts.set(self.state.restarts.get() + 1);
    }

    fn enable_interrupt(&mut self) {
        self.state.enabled.set(true);
    }
}

#[derive(Debug, Default)]
pub struct MockSoftInterrupt {
    pub pends: Rc<Cell<u32>>,
}

impl SoftInterrupt for MockSoftInterrupt {
    fn pend(&mut self) {
        self.pends.set(self.pends.get() + 1);
    }
}

pub type TestTicker<'m, const N: usize> =
    StepTicker<&'m CountingMotor, MockTimer, MockTimer, MockSoftInterrupt, N>;

/// Handles onto the mocks after they move into the engine.
pub struct MockHandles {
    pub tick: Rc<TimerState>,
    pub unstep: Rc<TimerState>,
    pub pends: Rc<Cell<u32>>,
}

pub fn mock_timers() -> (Timers<MockTimer, MockTimer, MockSoftInterrupt>, MockHandles) {
    let timers = Timers {
        tick: MockTimer::default(),
        unstep: MockTimer::default(),
        deferred: MockSoftInterrupt::default(),
    };
    let mocks = MockHandles {
        tick: Rc::clone(&timers.tick.state),
        unstep: Rc::clone(&timers.unstep.state),
        pends: Rc::clone(&timers.deferred.pends),
    };
    (timers, mocks)
}

/// Engine at 100 kHz with every motor in `motors` registered in order.
pub fn ticker<'m, const N: usize>(motors: &'m [CountingMotor]) -> (TestTicker<'m, N>, MockHandles) {
    ticker_with(TickerConfig::default(), motors)
}

pub fn ticker_with<'m, const N: usize>(
    config: TickerConfig,
    motors: &'m [CountingMotor],
) -> (TestTicker<'m, N>, MockHandles) {
    let (timers, mocks) = mock_timers();
    let mut ticker = StepTicker::new(config, timers).unwrap();
    for motor in motors {
        ticker.register_motor(motor).unwrap();
    }
    (ticker, mocks)
}

/// A consistent trapezoid: ramps between `v0` and the plateau rate, spends
/// `ta`, `tp` and `td` ticks in each phase, and covers the largest entry of
/// `steps`. Without an acceleration phase it starts at the plateau rate.
pub fn trapezoid<const N: usize>(steps: [u32; N], ta: u32, tp: u32, td: u32, v0: f32) -> Block<N> {
    let events = steps.iter().copied().max().unwrap_or(0);
    let ramps = (ta + td) as f32 / 2.0;
    let vm = (events as f32 - v0 * ramps) / (ramps + tp as f32);

    Block {
        total_move_ticks: ta + tp + td,
        accelerate_until: ta,
        decelerate_after: ta + tp,
        initial_rate: if ta > 0 { v0 * FREQ } else { vm * FREQ },
        maximum_rate: vm * FREQ,
        acceleration_per_tick: if ta > 0 { (vm - v0) / ta as f32 } else { 0.0 },
        deceleration_per_tick: if td > 0 { (vm - v0) / td as f32 } else { 0.0 },
        steps_event_count: events,
        steps,
        direction_bits: [false; N],
    }
}

/// A block moving every axis at a constant `rate` steps/tick.
pub fn plateau<const N: usize>(steps: [u32; N], rate: f32) -> Block<N> {
    let events = steps.iter().copied().max().unwrap_or(0);
    let ticks = (events as f32 / rate) as u32;
    Block {
        total_move_ticks: ticks,
        accelerate_until: 0,
        decelerate_after: ticks,
        initial_rate: rate * FREQ,
        maximum_rate: rate * FREQ,
        acceleration_per_tick: 0.0,
        deceleration_per_tick: 0.0,
        steps_event_count: events,
        steps,
        direction_bits: [false; N],
    }
}

/// Tick until the engine goes idle. Returns the number of ticks run, capped at `bound`.
pub fn run_until_idle<M, U, S, const N: usize>(tick: &mut TickEngine<'_, M, U, S, N>, bound: u32) -> u32
where
    M: Motor,
    U: MatchTimer,
    S: SoftInterrupt,
{
    let mut ticks = 0;
    loop {
        tick.on_tick();
        ticks += 1;
        if !tick.is_active() || ticks >= bound {
            return ticks;
        }
    }
}
