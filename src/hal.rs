//! Hardware contracts the engine drives.
//!
//! The engine never touches peripherals directly. Each interrupt source and
//! each motor output is reached through one of these traits, so the same
//! engine runs against real timers, an RTOS port, or a host-side simulation.

use crate::config::units::TimerCounts;
use crate::motion::Direction;

/// One motor's STEP/DIR outputs.
///
/// Methods take `&self`: the tick engine asserts step pulses and sets
/// direction while the unstep scheduler, running at a different priority,
/// deasserts them. Implementations must make each call a single store that
/// is safe to issue from any interrupt priority (GPIO set/reset registers,
/// for instance).
pub trait Motor {
    /// Assert the step output.
    fn step(&self);

    /// Deassert the step output.
    fn unstep(&self);

    /// Set the direction output. Called before the first step of each block.
    fn set_direction(&self, direction: Direction);
}

impl<M: Motor + ?Sized> Motor for &M {
    #[inline]
    fn step(&self) {
        (**self).step()
    }

    #[inline]
    fn unstep(&self) {
        (**self).unstep()
    }

    #[inline]
    fn set_direction(&self, direction: Direction) {
        (**self).set_direction(direction)
    }
}

/// A hardware timer that interrupts when its counter reaches a match value.
///
/// The tick timer runs periodically (reset on match). The unstep timer must
/// interrupt once per [`restart`](MatchTimer::restart).
pub trait MatchTimer {
    /// Program the match value.
    fn set_match(&mut self, counts: TimerCounts);

    /// Current counter value.
    fn counter(&self) -> TimerCounts;

    /// Zero the counter and start counting towards the match value.
    fn restart(&mut self);

    /// Unmask the timer's interrupt.
    fn enable_interrupt(&mut self);
}

/// A software-triggered interrupt at a priority below the tick engine.
///
/// On Cortex-M this is PendSV.
pub trait SoftInterrupt {
    /// Request the interrupt. It runs once the current higher-priority handler returns.
    fn pend(&mut self);
}
