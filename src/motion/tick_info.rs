//! Per-motor tick integration state.
//!
//! A block is converted once, at activation, into one [`BlockInfo`] shared by
//! all motors and one [`TickInfo`] per motor. From then on the tick engine
//! works only on these; the block itself is dropped.
//!
//! Step timing is a digital differential analyzer: every tick the current
//! rate (in steps per tick) is added to a fractional accumulator, and a step
//! fires each time the accumulator reaches 1.0. The remainder carries over,
//! so the emitted count converges on `steps_to_move` regardless of rounding.

use super::block::Block;

/// Block fields needed by every motor during a block.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlockInfo {
    /// Tick at which acceleration ends.
    pub accelerate_until: u32,
    /// Tick at which deceleration starts.
    pub decelerate_after: u32,
    /// Plateau rate of the reference axis, steps/s.
    pub maximum_rate: f32,
    /// Deceleration of the reference axis, steps/tick per tick.
    pub deceleration_per_tick: f32,
    /// Block duration in ticks.
    pub total_move_ticks: u32,
}

impl BlockInfo {
    /// Copy the shared fields out of a block.
    pub fn from_block<const N: usize>(block: &Block<N>) -> Self {
        Self {
            accelerate_until: block.accelerate_until,
            decelerate_after: block.decelerate_after,
            maximum_rate: block.maximum_rate,
            deceleration_per_tick: block.deceleration_per_tick,
            total_move_ticks: block.total_move_ticks,
        }
    }
}

/// Velocity phase of one motor, derived from its tick state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// No steps left in this block.
    Inactive,
    /// Rate increasing.
    Accelerating,
    /// Rate constant.
    Plateau,
    /// Rate decreasing.
    Decelerating,
}

/// Integration state for one motor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickInfo {
    /// Steps still owed in this block; 0 means inactive.
    pub steps_to_move: u32,
    /// Current rate in steps per tick.
    pub steps_per_tick: f32,
    /// Fractional step accumulator.
    pub counter: f32,
    /// This motor's steps over the reference axis's steps.
    pub axis_ratio: f32,
    /// Added to `steps_per_tick` every tick.
    pub acceleration_change: f32,
    /// Tick at which `acceleration_change` switches phase.
    pub next_accel_event: u32,
    /// Steps emitted so far in this block.
    pub step_count: u32,
}

impl TickInfo {
    /// Build the initial state for `motor` from a block.
    ///
    /// Motors with no steps in the block come back inactive.
    pub fn for_axis<const N: usize>(block: &Block<N>, motor: usize, frequency: f32) -> Self {
        let steps = block.steps[motor];
        if steps == 0 {
            return Self::default();
        }

        let inv = 1.0 / block.steps_event_count as f32;
        let axis_ratio = inv * steps as f32;

        let mut info = Self {
            steps_to_move: steps,
            // steps/s over ticks/s
            steps_per_tick: (block.initial_rate * axis_ratio) / frequency,
            counter: 0.0,
            axis_ratio,
            acceleration_change: 0.0,
            // wraps to 0 for the longest block, a tick that never comes
            next_accel_event: block.total_move_ticks.wrapping_add(1),
            step_count: 0,
        };

        if block.accelerate_until != 0 {
            // next event is the end of acceleration
            info.next_accel_event = block.accelerate_until;
            info.acceleration_change = block.acceleration_per_tick;
        } else if block.decelerate_after == 0 {
            // starts off decelerating
            info.acceleration_change = -block.deceleration_per_tick;
        } else if block.decelerate_after != block.total_move_ticks {
            // plateau first, next event is the start of deceleration
            info.next_accel_event = block.decelerate_after;
        }
        info.acceleration_change *= axis_ratio;

        info
    }

    /// Whether this motor still has steps to emit.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.steps_to_move != 0
    }

    /// Velocity phase, for observation.
    pub fn phase(&self) -> Phase {
        if !self.is_active() {
            Phase::Inactive
        } else if self.acceleration_change > 0.0 {
            Phase::Accelerating
        } else if self.acceleration_change < 0.0 {
            Phase::Decelerating
        } else {
            Phase::Plateau
        }
    }

    /// Apply this tick's acceleration.
    #[inline]
    pub fn integrate(&mut self) {
        self.steps_per_tick += self.acceleration_change;
    }

    /// Switch phase if `tick` is this motor's next acceleration event.
    pub fn resolve_phase(&mut self, tick: u32, block: &BlockInfo, frequency: f32) {
        if tick != self.next_accel_event {
            return;
        }

        if tick == block.accelerate_until {
            // done accelerating
            self.acceleration_change = 0.0;
            if block.decelerate_after < block.total_move_ticks {
                self.next_accel_event = block.decelerate_after;
                if tick != block.decelerate_after {
                    // snap to the plateau rate to drop accumulated error
                    self.steps_per_tick = (self.axis_ratio * block.maximum_rate) / frequency;
                }
            }
        }

        if tick == block.decelerate_after {
            self.acceleration_change = -block.deceleration_per_tick * self.axis_ratio;
        }
    }

    /// Accumulate one tick of motion. Returns `true` when a step is due.
    ///
    /// Deactivates the motor once its last step is emitted.
    #[inline]
    pub fn advance(&mut self) -> bool {
        // Rate underflow near zero velocity: finish with one step per tick
        // instead of stalling short of the target.
        if self.steps_per_tick <= 0.0 {
            self.counter = 1.0;
            self.steps_per_tick = 0.0;
        }

        self.counter += self.steps_per_tick;
        if self.counter < 1.0 {
            return false;
        }

        self.counter -= 1.0;
        self.step_count += 1;
        if self.step_count == self.steps_to_move {
            self.steps_to_move = 0;
        }
        true
    }
}

/// Convert a block into its shared info and per-motor tick state.
///
/// `frequency` is the tick rate in Hz. Pure apart from reading the block;
/// direction outputs are set by the caller.
pub fn convert<const N: usize>(block: &Block<N>, frequency: f32) -> (BlockInfo, [TickInfo; N]) {
    let info = BlockInfo::from_block(block);
    let ticks = core::array::from_fn(|m| TickInfo::for_axis(block, m, frequency));
    (info, ticks)
}
