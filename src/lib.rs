//! # motor-shield
//!
//! DC and stepper motor actuation through a 16-channel PWM expander motor
//! shield, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **DC motors**: forward/backward/brake/release with a glitch-free pin order
//! - **Steppers**: single, double, interleave and sine-weighted micro-stepping
//! - **Port allocation**: motors share the shield's channels without collision
//! - **Cooperative runs**: step-by-step execution for schedulers that yield
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use motor_shield::{AttachableShield, DcMotor, StepMode, StepperMotor};
//!
//! // Any ChannelDriver: a PCA9685 driver, or a PwmBank over HAL PWM outputs
//! let mut shield = AttachableShield::new(driver, delay);
//! shield.begin(1600)?;
//!
//! let mut pan = StepperMotor::new();
//! shield.attach_stepper(&mut pan, 0, 200);
//! shield.stepper(&mut pan).unwrap().run_at(100, StepMode::Double, 30)?;
//!
//! let mut fan = DcMotor::new();
//! shield.attach_dc(&mut fan, 2);
//! shield.dc(&mut fan).unwrap().drive(-180)?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets
//! - `microstep-16`: 16 micro-steps per full step instead of 8

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Core modules
pub mod channel;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod port;
pub mod shield;

// Re-exports for ergonomic API
pub use channel::{ChannelDriver, Level, PwmBank};
pub use config::{validate_config, DcMotorConfig, ShieldConfig, StepperConfig};
pub use error::{Error, Result};
pub use motion::{Direction, StepMode, StepRun};
pub use motor::{Attachable, DcMode, DcMotor, StepperMotor};
pub use port::{PortAllocator, ShieldId};
pub use shield::{AttachableShield, DcMotorHandle, MotorShield, StepperHandle};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
