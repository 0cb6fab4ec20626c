//! The step tick interrupt.

use heapless::spsc::Consumer;

use crate::hal::{MatchTimer, Motor, SoftInterrupt};
use crate::motion::{convert, Block, BlockInfo, TickInfo};
use crate::motor::MotorId;

use super::shared::Shared;

/// Tick context: integrates motion and emits step pulses.
///
/// Call [`on_tick`](Self::on_tick) from the tick timer interrupt at the
/// highest priority of the three engine contexts. Each call is bounded work:
/// one pass over the registered motors, at most one mailbox dequeue, and a
/// few atomic stores.
pub struct TickEngine<'a, M, U, S, const N: usize>
where
    M: Motor,
    U: MatchTimer,
    S: SoftInterrupt,
{
    motors: &'a [M],
    mailbox: Consumer<'a, Block<N>, 2>,
    shared: &'a Shared,
    unstep_timer: &'a mut U,
    deferred: &'a mut S,

    block_info: BlockInfo,
    tick_info: [TickInfo; N],
    /// Ticks elapsed in the current block, 1-based; 0 between blocks.
    current_tick: u32,
    /// Tick rate latched at block activation.
    frequency: f32,
    /// A block is executing.
    move_issued: bool,
}

impl<'a, M, U, S, const N: usize> TickEngine<'a, M, U, S, N>
where
    M: Motor,
    U: MatchTimer,
    S: SoftInterrupt,
{
    pub(crate) fn new(
        motors: &'a [M],
        mailbox: Consumer<'a, Block<N>, 2>,
        shared: &'a Shared,
        unstep_timer: &'a mut U,
        deferred: &'a mut S,
    ) -> Self {
        Self {
            motors,
            mailbox,
            shared,
            unstep_timer,
            deferred,
            block_info: BlockInfo::default(),
            tick_info: [TickInfo::default(); N],
            current_tick: 0,
            frequency: shared.frequency().0,
            move_issued: false,
        }
    }

    /// Run one tick.
    ///
    /// Idle with an empty mailbox, this does nothing. Idle with a pending
    /// block, it activates the block and runs its first tick. When the last
    /// motor finishes, the next pending block is activated on the same tick
    /// so consecutive blocks run without a gap.
    pub fn on_tick(&mut self) {
        if !self.move_issued {
            if !self.mailbox.ready() {
                return;
            }
            // Busy before the slot empties: the planner never sees an idle
            // engine with an empty slot while a block is being taken.
            self.shared.set_active(true);
            match self.mailbox.dequeue() {
                Some(block) => self.activate(block),
                None => {
                    self.shared.set_active(false);
                    return;
                }
            }
        }

        self.current_tick = self.current_tick.wrapping_add(1);
        let tick = self.current_tick;
        let motors = self.motors;

        let mut still_moving = false;
        let mut stepped = false;

        for (m, motor) in motors.iter().enumerate() {
            let info = &mut self.tick_info[m];
            if !info.is_active() {
                continue;
            }

            info.integrate();
            info.resolve_phase(tick, &self.block_info, self.frequency);

            if info.advance() {
                motor.step();
                self.shared.unstep.flag(m);
                stepped = true;
            }

            still_moving |= info.is_active();
        }

        if stepped {
            // One countdown covers every flagged pin.
            self.unstep_timer.restart();
        }

        if !still_moving {
            self.finish_block();
        }
    }

    fn finish_block(&mut self) {
        self.current_tick = 0;

        match self.mailbox.dequeue() {
            Some(next) => self.activate(next),
            None => {
                self.move_issued = false;
                self.shared.set_active(false);
            }
        }

        self.shared.finished.signal();
        self.deferred.pend();
    }

    fn activate(&mut self, block: Block<N>) {
        self.frequency = self.shared.frequency().0;

        let (info, ticks) = convert(&block, self.frequency);
        self.block_info = info;
        self.tick_info = ticks;

        for (m, motor) in self.motors.iter().enumerate() {
            if self.tick_info[m].is_active() {
                motor.set_direction(block.direction(m));
            }
        }

        self.move_issued = true;
        self.shared.set_active(true);
    }

    /// Ticks elapsed in the current block; 0 between blocks.
    #[inline]
    pub fn current_tick(&self) -> u32 {
        self.current_tick
    }

    /// Whether a block is executing.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.move_issued
    }

    /// Tick state of one motor in the current block.
    pub fn tick_info(&self, id: MotorId) -> Option<&TickInfo> {
        self.tick_info.get(id.index())
    }

    /// Shared fields of the current block.
    pub fn block_info(&self) -> &BlockInfo {
        &self.block_info
    }

    /// Tick rate the current block runs at, Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }
}
