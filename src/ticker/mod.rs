//! The step ticker: setup, and the four execution contexts it splits into.
//!
//! [`StepTicker`] owns everything. During setup it programs the timers and
//! takes motor registrations. [`StepTicker::start`] then splits it into one
//! handle per context:
//!
//! | Handle | Runs in | Priority |
//! |---|---|---|
//! | [`TickEngine`] | tick timer interrupt | highest |
//! | [`UnstepScheduler`] | unstep timer interrupt | middle |
//! | [`CompletionNotifier`] | soft interrupt | low |
//! | [`Planner`] | thread / planner task | lowest |
//!
//! The handles share only the mailbox queue and a few atomics, so the
//! crate needs a target with atomic read-modify-write.

mod completion;
mod engine;
mod planner;
mod shared;
mod unstep;

pub use completion::{CompletionNotifier, FinishedCount};
pub use engine::TickEngine;
pub use planner::Planner;
pub use unstep::{FlaggedMotors, UnstepScheduler, UnstepSet, MAX_MOTORS};

use heapless::spsc::Queue;

use crate::config::units::{Hertz, Microseconds};
use crate::config::{validate_config, validate_ticker, SystemConfig, TickerConfig};
use crate::error::{ConfigError, Error, Result};
use crate::hal::{MatchTimer, Motor, SoftInterrupt};
use crate::motion::Block;
use crate::motor::{MotorId, MotorRegistry};

use shared::Shared;

/// Peripherals the engine is driven by.
pub struct Timers<T, U, S> {
    /// Periodic tick timer.
    pub tick: T,
    /// One-shot step pulse timer.
    pub unstep: U,
    /// Software interrupt for completion callbacks.
    pub deferred: S,
}

/// Handles for each execution context, from [`StepTicker::start`].
pub struct Contexts<'a, M, T, U, S, const N: usize>
where
    M: Motor,
    T: MatchTimer,
    U: MatchTimer,
    S: SoftInterrupt,
{
    /// Block submission and tick rate changes.
    pub planner: Planner<'a, T, N>,
    /// Tick interrupt body.
    pub tick: TickEngine<'a, M, U, S, N>,
    /// Unstep interrupt body.
    pub unstep: UnstepScheduler<'a, M>,
    /// Soft interrupt body.
    pub completion: CompletionNotifier<'a>,
}

/// Multi-axis step pulse engine for up to `N` motors.
///
/// # Example
///
/// ```ignore
/// let mut ticker: StepTicker<_, _, _, _, 4> = StepTicker::new(config, timers)?;
/// let x = ticker.register_motor(x_motor)?;
/// ticker.on_block_finished(notify_planner);
///
/// let Contexts { mut planner, tick, unstep, completion } = ticker.start();
/// // move tick/unstep/completion into their interrupt handlers
/// planner.submit_next(block).map_err(|(_, e)| e)?;
/// ```
pub struct StepTicker<M, T, U, S, const N: usize>
where
    M: Motor,
    T: MatchTimer,
    U: MatchTimer,
    S: SoftInterrupt,
{
    registry: MotorRegistry<M, N>,
    mailbox: Queue<Block<N>, 2>,
    shared: Shared,
    timers: Timers<T, U, S>,
    config: TickerConfig,
    on_finished: Option<fn()>,
}

impl<M, T, U, S, const N: usize> StepTicker<M, T, U, S, N>
where
    M: Motor,
    T: MatchTimer,
    U: MatchTimer,
    S: SoftInterrupt,
{
    const CAPACITY_OK: () = assert!(N <= MAX_MOTORS, "at most 32 motors");

    /// Create an engine and program both timers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the timing configuration is invalid.
    pub fn new(config: TickerConfig, timers: Timers<T, U, S>) -> Result<Self> {
        let () = Self::CAPACITY_OK;

        validate_ticker(&config)?;

        let mut ticker = Self {
            registry: MotorRegistry::new(),
            mailbox: Queue::new(),
            shared: Shared::new(config.frequency_hz),
            timers,
            config,
            on_finished: None,
        };

        program_tick_timer(&mut ticker.timers.tick, config.frequency_hz, config.timer_clock_hz)?;
        program_unstep_timer(&mut ticker.timers.unstep, config.unstep_time_us, config.timer_clock_hz)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "step ticker: {=f32} Hz tick, {=f32} us pulse",
            config.frequency_hz.0,
            config.unstep_time_us.0
        );

        Ok(ticker)
    }

    /// Create an engine from a full system configuration.
    ///
    /// Motors are still registered one by one; the configuration's motor
    /// table only has to fit in `N`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or lists
    /// more motors than `N`.
    pub fn from_config(config: &SystemConfig, timers: Timers<T, U, S>) -> Result<Self> {
        validate_config(config)?;

        if config.motor_count() > N {
            return Err(Error::Config(ConfigError::TooManyMotors {
                configured: config.motor_count(),
                capacity: N,
            }));
        }

        Self::new(config.ticker, timers)
    }

    /// Register a motor. Its index is its slot in every [`Block`].
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::CapacityExceeded` once `N` motors are registered.
    pub fn register_motor(&mut self, motor: M) -> Result<MotorId> {
        let id = self.registry.register(motor)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("motor {=usize} registered", id.index());

        Ok(id)
    }

    /// Register a motor under a name.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is full or the name is taken or too long.
    pub fn register_named(&mut self, name: &str, motor: M) -> Result<MotorId> {
        let id = self.registry.register_named(name, motor)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("motor {=usize} registered as {=str}", id.index(), name);

        Ok(id)
    }

    /// Registered motors.
    pub fn motors(&self) -> &MotorRegistry<M, N> {
        &self.registry
    }

    /// Change the tick rate. Setup only; once started, use [`Planner::set_frequency`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the rate cannot be programmed.
    pub fn set_frequency(&mut self, frequency: Hertz) -> Result<()> {
        let config = TickerConfig {
            frequency_hz: frequency,
            ..self.config()
        };
        validate_ticker(&config)?;

        program_tick_timer(&mut self.timers.tick, frequency, config.timer_clock_hz)?;
        self.shared.set_frequency(frequency);
        self.config = config;
        Ok(())
    }

    /// Change the step pulse width. Setup only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the delay is not positive or is shorter
    /// than one timer count.
    pub fn set_unstep_time(&mut self, unstep_time: Microseconds) -> Result<()> {
        let config = TickerConfig {
            unstep_time_us: unstep_time,
            ..self.config()
        };
        validate_ticker(&config)?;

        program_unstep_timer(&mut self.timers.unstep, unstep_time, config.timer_clock_hz)?;
        self.config = config;
        Ok(())
    }

    /// Set the function called once per finished block, from the completion context.
    pub fn on_block_finished(&mut self, callback: fn()) {
        self.on_finished = Some(callback);
    }

    /// Current timing configuration, including any rate change made by the planner.
    pub fn config(&self) -> TickerConfig {
        TickerConfig {
            frequency_hz: self.shared.frequency(),
            ..self.config
        }
    }

    /// Unmask both timer interrupts and split into per-context handles.
    pub fn start(&mut self) -> Contexts<'_, M, T, U, S, N> {
        let Self {
            registry,
            mailbox,
            shared,
            timers,
            config,
            on_finished,
        } = self;

        timers.tick.enable_interrupt();
        timers.unstep.enable_interrupt();

        let (producer, consumer) = mailbox.split();
        let motors = registry.as_slice();
        let shared: &Shared = shared;

        #[cfg(feature = "defmt")]
        defmt::info!("step ticker started with {=usize} motors", motors.len());

        Contexts {
            planner: Planner::new(
                producer,
                shared,
                &mut timers.tick,
                config.timer_clock_hz,
                motors.len(),
            ),
            tick: TickEngine::new(
                motors,
                consumer,
                shared,
                &mut timers.unstep,
                &mut timers.deferred,
            ),
            unstep: UnstepScheduler::new(motors, shared),
            completion: CompletionNotifier::new(shared, *on_finished),
        }
    }
}

/// Program the tick period. Restarts the timer if it already ran past the new match value.
pub(crate) fn program_tick_timer<T: MatchTimer>(
    timer: &mut T,
    frequency: Hertz,
    clock: Hertz,
) -> Result<()> {
    if frequency.0.is_nan() || frequency.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidFrequency(frequency.0)));
    }
    let period = frequency.period_counts(clock);
    if period.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidFrequency(frequency.0)));
    }

    timer.set_match(period);
    if timer.counter() > period {
        timer.restart();
    }
    Ok(())
}

fn program_unstep_timer<U: MatchTimer>(
    timer: &mut U,
    unstep_time: Microseconds,
    clock: Hertz,
) -> Result<()> {
    let counts = unstep_time.to_counts(clock);
    if unstep_time.0.is_nan() || unstep_time.0 <= 0.0 || counts.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidUnstepTime(unstep_time.0)));
    }

    timer.set_match(counts);
    Ok(())
}
