//! State shared between priority levels.
//!
//! Everything here is touched by more than one context and is therefore an
//! atomic. Block data never lives here: it crosses from the planner to the
//! tick engine through the mailbox queue.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::units::Hertz;

use super::completion::FinishedCount;
use super::unstep::UnstepSet;

pub(crate) struct Shared {
    /// Written by the tick engine, drained by the unstep scheduler.
    pub(crate) unstep: UnstepSet,
    /// Written by the tick engine, drained by the completion notifier.
    pub(crate) finished: FinishedCount,
    /// True from block activation until the engine goes idle.
    active: AtomicBool,
    /// Tick rate as `f32` bits. Read by the engine at each block activation.
    frequency: AtomicU32,
}

impl Shared {
    pub(crate) fn new(frequency: Hertz) -> Self {
        Self {
            unstep: UnstepSet::new(),
            finished: FinishedCount::new(),
            active: AtomicBool::new(false),
            frequency: AtomicU32::new(frequency.0.to_bits()),
        }
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    #[inline]
    pub(crate) fn frequency(&self) -> Hertz {
        Hertz(f32::from_bits(self.frequency.load(Ordering::Acquire)))
    }

    #[inline]
    pub(crate) fn set_frequency(&self, frequency: Hertz) {
        self.frequency.store(frequency.0.to_bits(), Ordering::Release);
    }
}
