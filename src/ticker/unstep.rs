//! Step pulse termination.
//!
//! Every step the tick engine emits flags the motor in a shared bit-set and
//! re-arms one hardware countdown. When the countdown expires, the unstep
//! scheduler deasserts every flagged pin and clears the set.
//!
//! There is a single countdown for all motors. A step mid-countdown restarts
//! the delay for every pin still flagged, so a pin stepped earlier is held
//! longer than the configured width and pins stepped on different ticks are
//! released together. With the pulse width well below one tick period the
//! countdown always expires before the next tick and this never shows.
//! Keep it that way; [`TickerConfig::pulse_fits_tick`](crate::TickerConfig::pulse_fits_tick)
//! checks the configuration.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::hal::Motor;

use super::shared::Shared;

/// Maximum number of motors, one bit each in the unstep set.
pub const MAX_MOTORS: usize = 32;

/// Motors with an asserted step pin awaiting deassertion.
#[derive(Debug, Default)]
pub struct UnstepSet(AtomicU32);

impl UnstepSet {
    /// Create an empty set.
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Flag a motor's pin as asserted.
    #[inline]
    pub fn flag(&self, index: usize) {
        self.0.fetch_or(1 << index, Ordering::Release);
    }

    /// Take every flagged motor, leaving the set empty.
    ///
    /// A flag raised concurrently lands either in the returned set or in the
    /// next one; it is never dropped.
    #[inline]
    pub fn take(&self) -> FlaggedMotors {
        FlaggedMotors(self.0.swap(0, Ordering::AcqRel))
    }

    /// Current flags, without clearing.
    #[inline]
    pub fn peek(&self) -> FlaggedMotors {
        FlaggedMotors(self.0.load(Ordering::Acquire))
    }

    /// Whether any pin awaits deassertion.
    #[inline]
    pub fn any(&self) -> bool {
        !self.peek().is_empty()
    }
}

/// A snapshot of the unstep set. Iterates flagged motor indices in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlaggedMotors(u32);

impl FlaggedMotors {
    /// Whether motor `index` is flagged.
    #[inline]
    pub fn contains(self, index: usize) -> bool {
        index < MAX_MOTORS && self.0 & (1 << index) != 0
    }

    /// Whether no motor is flagged.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits, bit `i` for motor `i`.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Iterator for FlaggedMotors {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(index)
    }
}

/// Unstep timer context: deasserts flagged step pins.
///
/// Call [`on_expiry`](Self::on_expiry) from the unstep timer interrupt, which
/// must run below the tick interrupt and above the completion interrupt.
pub struct UnstepScheduler<'a, M: Motor> {
    motors: &'a [M],
    shared: &'a Shared,
}

impl<'a, M: Motor> UnstepScheduler<'a, M> {
    pub(crate) fn new(motors: &'a [M], shared: &'a Shared) -> Self {
        Self { motors, shared }
    }

    /// Countdown expired: deassert every flagged pin and clear the set.
    pub fn on_expiry(&mut self) {
        for index in self.shared.unstep.take() {
            if let Some(motor) = self.motors.get(index) {
                motor.unstep();
            }
        }
    }

    /// Motors currently awaiting deassertion.
    pub fn pending(&self) -> FlaggedMotors {
        self.shared.unstep.peek()
    }
}
