//! Error types for motor-shield library.
//!
//! Provides unified error handling across configuration and motor actuation.
//! Port allocation itself never errors: attach reports through `bool` and
//! detach of an unattached motor is a no-op.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all motor-shield operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Shield bus address outside 0x60..=0x7F, or the all-call address
    InvalidAddress(u8),
    /// PWM frequency outside the supported range
    InvalidFrequency(u16),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u16),
    /// Speed in RPM must be > 0
    InvalidRpm(u16),
    /// DC motor port outside 0-3
    InvalidDcPort(u8),
    /// Stepper motor port outside 0-1
    InvalidStepperPort(u8),
    /// Motor claims a port already claimed by another configured motor
    PortConflict(heapless::String<32>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Channel driver write failed
    ChannelError,
    /// Motor is not attached to a shield port
    NotAttached,
    /// Shield still has motors attached
    PortsInUse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidAddress(a) => {
                write!(f, "Invalid shield address: {:#04x}. Must be 0x60-0x7F, not 0x70", a)
            }
            ConfigError::InvalidFrequency(hz) => {
                write!(f, "Invalid PWM frequency: {} Hz. Must be 24-1600", hz)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidRpm(v) => write!(f, "Invalid speed: {} RPM. Must be > 0", v),
            ConfigError::InvalidDcPort(p) => write!(f, "Invalid DC motor port: {}. Must be 0-3", p),
            ConfigError::InvalidStepperPort(p) => {
                write!(f, "Invalid stepper motor port: {}. Must be 0-1", p)
            }
            ConfigError::PortConflict(name) => {
                write!(f, "Motor '{}' uses a port already claimed by another motor", name)
            }
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::ChannelError => write!(f, "PWM channel write failed"),
            MotorError::NotAttached => write!(f, "Motor is not attached to a shield port"),
            MotorError::PortsInUse => write!(f, "Shield has attached motors; detach them first"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
