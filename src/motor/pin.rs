//! [`Motor`] over embedded-hal STEP/DIR pins.

use core::cell::{Cell, RefCell};

use embedded_hal::digital::OutputPin;

use crate::config::MotorConfig;
use crate::hal::Motor;
use crate::motion::Direction;

/// A STEP/DIR driver wired to two `OutputPin`s.
///
/// Pins sit behind a `RefCell`, so a `PinMotor` is not `Sync`. It suits
/// hosted simulation and ports where the tick and unstep handlers run in
/// one execution context. On bare metal with preemptive priorities,
/// implement [`Motor`] on the GPIO set/reset registers instead.
///
/// Pin errors cannot travel back through the tick path; they latch a fault
/// flag readable with [`PinMotor::has_fault`].
pub struct PinMotor<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// STEP pin (pulse to move one step).
    step_pin: RefCell<STEP>,

    /// DIR pin.
    dir_pin: RefCell<DIR>,

    /// Last direction written (cached to avoid unnecessary pin writes).
    current_direction: Cell<Option<Direction>>,

    /// Output polarity.
    config: MotorConfig,

    /// Set by any failed pin write.
    fault: Cell<bool>,
}

impl<STEP, DIR> PinMotor<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    /// Create a motor with default polarity.
    pub fn new(step_pin: STEP, dir_pin: DIR) -> Self {
        Self::with_config(step_pin, dir_pin, MotorConfig::default())
    }

    /// Create a motor with the polarity from a `MotorConfig`.
    pub fn with_config(step_pin: STEP, dir_pin: DIR, config: MotorConfig) -> Self {
        Self {
            step_pin: RefCell::new(step_pin),
            dir_pin: RefCell::new(dir_pin),
            current_direction: Cell::new(None),
            config,
            fault: Cell::new(false),
        }
    }

    /// Whether any pin write has failed.
    #[inline]
    pub fn has_fault(&self) -> bool {
        self.fault.get()
    }

    /// Clear the fault flag.
    pub fn clear_fault(&self) {
        self.fault.set(false);
    }

    /// Last direction written to the DIR pin.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.current_direction.get()
    }

    /// Give back the pins.
    pub fn release(self) -> (STEP, DIR) {
        (self.step_pin.into_inner(), self.dir_pin.into_inner())
    }

    fn write_step(&self, high: bool) {
        let mut pin = self.step_pin.borrow_mut();
        let result = if high { pin.set_high() } else { pin.set_low() };
        if result.is_err() {
            self.fault.set(true);
        }
    }
}

impl<STEP, DIR> Motor for PinMotor<STEP, DIR>
where
    STEP: OutputPin,
    DIR: OutputPin,
{
    fn step(&self) {
        self.write_step(self.config.step_active_high());
    }

    fn unstep(&self) {
        self.write_step(!self.config.step_active_high());
    }

    fn set_direction(&self, direction: Direction) {
        if self.current_direction.get() == Some(direction) {
            return;
        }

        let pin_high = direction.bit() != self.config.invert_direction;
        let mut pin = self.dir_pin.borrow_mut();
        let result = if pin_high { pin.set_high() } else { pin.set_low() };
        if result.is_err() {
            self.fault.set(true);
            return;
        }

        self.current_direction.set(Some(direction));
    }
}
