//! Planned motion blocks.

use crate::error::{BlockError, Result};

/// Direction of travel for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Direction bit clear.
    #[default]
    Forward,
    /// Direction bit set.
    Reverse,
}

impl Direction {
    /// Get direction from a block's direction bit.
    #[inline]
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    /// The direction bit for this direction.
    #[inline]
    pub fn bit(self) -> bool {
        matches!(self, Direction::Reverse)
    }
}

/// One planned segment with a trapezoidal velocity profile.
///
/// Produced by the planner and handed to the engine by value. Rates are for
/// the reference axis (`steps_event_count`); each motor scales them by its
/// share of that count.
///
/// Tick boundaries satisfy `accelerate_until <= decelerate_after <= total_move_ticks`.
/// `accelerate_until == 0` means no acceleration phase, and
/// `decelerate_after == total_move_ticks` means no deceleration phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Block<const N: usize> {
    /// Segment duration in ticks.
    pub total_move_ticks: u32,
    /// Tick at which acceleration ends.
    pub accelerate_until: u32,
    /// Tick at which deceleration starts.
    pub decelerate_after: u32,
    /// Rate at segment start, steps/s.
    pub initial_rate: f32,
    /// Plateau rate, steps/s.
    pub maximum_rate: f32,
    /// Increase of the step rate per tick, in steps/tick.
    pub acceleration_per_tick: f32,
    /// Decrease of the step rate per tick, in steps/tick.
    pub deceleration_per_tick: f32,
    /// Step count of the reference axis.
    pub steps_event_count: u32,
    /// Steps for each motor.
    pub steps: [u32; N],
    /// Direction bit for each motor.
    pub direction_bits: [bool; N],
}

impl<const N: usize> Default for Block<N> {
    fn default() -> Self {
        Self {
            total_move_ticks: 0,
            accelerate_until: 0,
            decelerate_after: 0,
            initial_rate: 0.0,
            maximum_rate: 0.0,
            acceleration_per_tick: 0.0,
            deceleration_per_tick: 0.0,
            steps_event_count: 0,
            steps: [0; N],
            direction_bits: [false; N],
        }
    }
}

impl<const N: usize> Block<N> {
    /// Direction of travel for a motor slot.
    #[inline]
    pub fn direction(&self, motor: usize) -> Direction {
        Direction::from_bit(self.direction_bits[motor])
    }

    /// Whether any motor moves in this block.
    pub fn is_empty(&self) -> bool {
        self.steps.iter().all(|&s| s == 0)
    }

    /// Check the block against the engine's preconditions.
    ///
    /// `registered` is the number of motors registered with the engine;
    /// slots at or beyond it must not move.
    ///
    /// # Errors
    ///
    /// Returns a [`BlockError`] describing the first violated precondition.
    pub fn validate(&self, registered: usize) -> Result<()> {
        if self.accelerate_until > self.decelerate_after
            || self.decelerate_after > self.total_move_ticks
        {
            return Err(BlockError::PhaseOrder {
                accelerate_until: self.accelerate_until,
                decelerate_after: self.decelerate_after,
                total_move_ticks: self.total_move_ticks,
            }
            .into());
        }

        for (motor, &steps) in self.steps.iter().enumerate() {
            if steps == 0 {
                continue;
            }
            if motor >= registered {
                return Err(BlockError::UnregisteredMotor { motor }.into());
            }
            if self.steps_event_count == 0 {
                return Err(BlockError::ZeroEventCount.into());
            }
            if steps > self.steps_event_count {
                return Err(BlockError::AxisExceedsEventCount {
                    motor,
                    steps,
                    steps_event_count: self.steps_event_count,
                }
                .into());
            }
        }

        Ok(())
    }
}
