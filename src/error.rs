//! Error types for step-ticker.
//!
//! Errors only ever come out of setup-time and planner-side calls. The tick,
//! unstep and completion paths handle every degenerate input by policy and
//! have no error type at all.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all step-ticker operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor registration error
    Registry(RegistryError),
    /// Malformed motion block
    Block(BlockError),
    /// Engine hand-off error
    Engine(EngineError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Tick frequency must be > 0 and no faster than the timer clock
    InvalidFrequency(f32),
    /// Unstep delay must be > 0 and at least one timer count long
    InvalidUnstepTime(f32),
    /// Timer clock must be > 0
    InvalidTimerClock(f32),
    /// More motors configured than the engine can drive
    TooManyMotors {
        /// Number of motors in the configuration
        configured: usize,
        /// Engine capacity
        capacity: usize,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor registration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// Every motor slot is taken
    CapacityExceeded {
        /// Fixed capacity of the registry
        capacity: usize,
    },
    /// A motor with this name is already registered
    DuplicateName(heapless::String<32>),
    /// Motor name longer than 32 bytes
    NameTooLong,
    /// No motor registered under this name
    MotorNotFound(heapless::String<32>),
}

/// Block validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockError {
    /// Phase boundaries out of order
    PhaseOrder {
        /// End of the acceleration phase
        accelerate_until: u32,
        /// Start of the deceleration phase
        decelerate_after: u32,
        /// Block duration
        total_move_ticks: u32,
    },
    /// An axis moves but the reference step count is zero
    ZeroEventCount,
    /// An axis moves further than the reference axis
    AxisExceedsEventCount {
        /// Motor index
        motor: usize,
        /// Steps commanded for that motor
        steps: u32,
        /// Reference step count
        steps_event_count: u32,
    },
    /// Steps commanded on a slot with no registered motor
    UnregisteredMotor {
        /// Motor index
        motor: usize,
    },
}

/// Engine hand-off errors.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The single-slot mailbox still holds an unconsumed block
    MailboxFull,
    /// A block is active or pending; the tick rate can only change between blocks
    Busy,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Registry(e) => write!(f, "Registry error: {}", e),
            Error::Block(e) => write!(f, "Block error: {}", e),
            Error::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidFrequency(v) => {
                write!(f, "Invalid tick frequency: {} Hz. Must be > 0 and <= timer clock", v)
            }
            ConfigError::InvalidUnstepTime(v) => {
                write!(f, "Invalid unstep time: {} us. Must span at least one timer count", v)
            }
            ConfigError::InvalidTimerClock(v) => write!(f, "Invalid timer clock: {} Hz. Must be > 0", v),
            ConfigError::TooManyMotors { configured, capacity } => {
                write!(f, "{} motors configured, engine capacity is {}", configured, capacity)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::CapacityExceeded { capacity } => {
                write!(f, "Motor registry full (capacity {})", capacity)
            }
            RegistryError::DuplicateName(name) => write!(f, "Duplicate motor name: '{}'", name),
            RegistryError::NameTooLong => write!(f, "Motor name longer than 32 bytes"),
            RegistryError::MotorNotFound(name) => write!(f, "Motor '{}' not registered", name),
        }
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::PhaseOrder {
                accelerate_until,
                decelerate_after,
                total_move_ticks,
            } => write!(
                f,
                "Phase boundaries out of order: accelerate_until {} <= decelerate_after {} <= total_move_ticks {} does not hold",
                accelerate_until, decelerate_after, total_move_ticks
            ),
            BlockError::ZeroEventCount => write!(f, "Block moves with a zero steps_event_count"),
            BlockError::AxisExceedsEventCount {
                motor,
                steps,
                steps_event_count,
            } => write!(
                f,
                "Motor {} commanded {} steps, more than steps_event_count {}",
                motor, steps, steps_event_count
            ),
            BlockError::UnregisteredMotor { motor } => {
                write!(f, "Steps commanded for unregistered motor {}", motor)
            }
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MailboxFull => write!(f, "Next-block slot is occupied"),
            EngineError::Busy => write!(f, "Engine is running a block"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<RegistryError> for Error {
    fn from(e: RegistryError) -> Self {
        Error::Registry(e)
    }
}

impl From<BlockError> for Error {
    fn from(e: BlockError) -> Self {
        Error::Block(e)
    }
}

impl From<EngineError> for Error {
    fn from(e: EngineError) -> Self {
        Error::Engine(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {}

#[cfg(feature = "std")]
impl std::error::Error for BlockError {}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
