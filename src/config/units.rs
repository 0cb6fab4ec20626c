//! Unit types for timing quantities.
//!
//! Keeps tick rates, pulse widths and raw timer counts apart at compile time.
//! Conversions to timer counts truncate, matching how a match register is
//! programmed.

use libm::floorf;
use serde::Deserialize;

/// A frequency in hertz.
///
/// Used for the tick rate and for the clock that drives the hardware timers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Hertz(pub f32);

impl Hertz {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Timer match value for one period of this frequency on a timer counting at `clock`.
    #[inline]
    pub fn period_counts(self, clock: Hertz) -> TimerCounts {
        TimerCounts(floorf(clock.0 / self.0) as u32)
    }

    /// Length of one period.
    #[inline]
    pub fn period(self) -> Microseconds {
        Microseconds(1_000_000.0 / self.0)
    }
}

/// A duration in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Microseconds(pub f32);

impl Microseconds {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Number of counts a timer running at `clock` takes to cover this duration.
    #[inline]
    pub fn to_counts(self, clock: Hertz) -> TimerCounts {
        TimerCounts(floorf(clock.0 * (self.0 / 1_000_000.0)) as u32)
    }
}

/// Raw hardware timer counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerCounts(pub u32);

impl TimerCounts {
    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Hertz.
    fn hz(self) -> Hertz;
    /// Convert to Microseconds.
    fn us(self) -> Microseconds;
}

impl UnitExt for f32 {
    #[inline]
    fn hz(self) -> Hertz {
        Hertz(self)
    }

    #[inline]
    fn us(self) -> Microseconds {
        Microseconds(self)
    }
}
