//! Configuration module for motor-shield.
//!
//! Describes a shield and the motors wired to it, loaded from TOML files
//! (with `std` feature) or built from pre-parsed data.

mod motor;
mod shield;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::{DcMotorConfig, StepperConfig};
pub use shield::ShieldConfig;
pub use validation::{validate_address, validate_config, validate_frequency};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
