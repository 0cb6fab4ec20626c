//! # step-ticker
//!
//! Interrupt-driven step pulse generation for up to 32 stepper motors moving
//! in coordinated trapezoidal blocks.
//!
//! A planner hands pre-computed motion blocks to the engine one at a time. A
//! periodic tick interrupt integrates each motor's velocity profile and
//! asserts its STEP output when a step is due; a one-shot timer deasserts it
//! after the configured pulse width; a low-priority soft interrupt tells the
//! planner when a block is done.
//!
//! ## Features
//!
//! - **Fixed tick, fractional accumulation**: exact step counts, no per-step timer reprogramming
//! - **Gapless hand-off**: the next block starts on the tick the previous one ends
//! - **Lock-free**: contexts share only an SPSC queue and atomics; no critical sections
//! - **embedded-hal 1.0**: [`PinMotor`] drives `OutputPin` STEP/DIR pairs
//! - **no_std compatible**: no allocation anywhere
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use step_ticker::{Contexts, StepTicker, TickerConfig, Timers};
//!
//! let timers = Timers { tick: tim2, unstep: tim3, deferred: pendsv };
//! let mut ticker: StepTicker<_, _, _, _, 3> = StepTicker::new(TickerConfig::default(), timers)?;
//! ticker.register_motor(x)?;
//! ticker.register_motor(y)?;
//! ticker.on_block_finished(wake_planner);
//!
//! let Contexts { mut planner, tick, unstep, completion } = ticker.start();
//! // TIM2 handler:   tick.on_tick()
//! // TIM3 handler:   unstep.on_expiry()
//! // PendSV handler: completion.on_deferred()
//! planner.submit_next(block).map_err(|(_, e)| e)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod error;
pub mod hal;
pub mod motion;
pub mod motor;
pub mod ticker;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, SystemConfig, TickerConfig};
pub use error::{Error, Result};
pub use hal::{MatchTimer, Motor, SoftInterrupt};
pub use motion::{Block, Direction, Phase};
pub use motor::{MotorId, MotorRegistry, PinMotor};
pub use ticker::{
    CompletionNotifier, Contexts, Planner, StepTicker, TickEngine, Timers, UnstepScheduler,
    MAX_MOTORS,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Hertz, Microseconds, TimerCounts, UnitExt};
