//! Motor module for step-ticker.
//!
//! Provides the motor registry and an embedded-hal STEP/DIR adapter.

mod pin;
mod registry;

pub use pin::PinMotor;
pub use registry::{MotorId, MotorRegistry};
