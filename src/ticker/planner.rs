//! Planner-side handle to the engine.

use heapless::spsc::Producer;

use crate::config::units::Hertz;
use crate::error::{EngineError, Error, Result};
use crate::hal::MatchTimer;
use crate::motion::Block;

use super::program_tick_timer;
use super::shared::Shared;

/// Planner context: hands blocks to the tick engine.
///
/// Runs at the lowest priority. The mailbox holds one block; it fills when
/// the planner submits and empties when the tick engine activates the block.
pub struct Planner<'a, T: MatchTimer, const N: usize> {
    mailbox: Producer<'a, Block<N>, 2>,
    shared: &'a Shared,
    tick_timer: &'a mut T,
    timer_clock: Hertz,
    registered: usize,
}

impl<'a, T: MatchTimer, const N: usize> Planner<'a, T, N> {
    pub(crate) fn new(
        mailbox: Producer<'a, Block<N>, 2>,
        shared: &'a Shared,
        tick_timer: &'a mut T,
        timer_clock: Hertz,
        registered: usize,
    ) -> Self {
        Self {
            mailbox,
            shared,
            tick_timer,
            timer_clock,
            registered,
        }
    }

    /// Whether the mailbox slot is free.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.mailbox.ready()
    }

    /// Whether the engine is between blocks with nothing pending.
    pub fn is_idle(&self) -> bool {
        // Slot first: a dequeue observed here orders after the engine's busy flag.
        self.mailbox.ready() && !self.shared.is_active()
    }

    /// Queue the next block.
    ///
    /// The engine picks it up on the tick its current block finishes, or on
    /// the next tick if idle. On failure the block is handed back.
    ///
    /// # Errors
    ///
    /// - [`Error::Block`] if the block is malformed or moves an unregistered motor
    /// - [`EngineError::MailboxFull`] if the previous block has not been taken yet
    pub fn submit_next(&mut self, block: Block<N>) -> core::result::Result<(), (Block<N>, Error)> {
        if let Err(e) = block.validate(self.registered) {
            return Err((block, e));
        }

        self.mailbox
            .enqueue(block)
            .map_err(|block| (block, Error::Engine(EngineError::MailboxFull)))
    }

    /// Change the tick rate between blocks.
    ///
    /// Blocks are planned in ticks, so the rate only changes while nothing is
    /// executing or pending. The next block runs at the new rate.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Busy`] if a block is active or pending
    /// - [`Error::Config`] if the rate cannot be programmed on the timer
    pub fn set_frequency(&mut self, frequency: Hertz) -> Result<()> {
        if !self.is_idle() {
            return Err(EngineError::Busy.into());
        }

        program_tick_timer(self.tick_timer, frequency, self.timer_clock)?;
        self.shared.set_frequency(frequency);
        Ok(())
    }

    /// Current tick rate.
    pub fn frequency(&self) -> Hertz {
        self.shared.frequency()
    }
}
