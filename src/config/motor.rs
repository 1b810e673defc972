//! Motor configuration from TOML.

use serde::Deserialize;

use crate::motion::StepMode;

/// Stepper motor entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepperConfig {
    /// Stepper port (0-1).
    pub port: u8,

    /// Full steps per revolution (typically 200 for 1.8° motors).
    pub steps_per_revolution: u16,

    /// Initial speed in RPM.
    #[serde(default = "default_rpm")]
    pub rpm: u16,

    /// Initial stepping mode.
    #[serde(default)]
    pub mode: StepMode,
}

fn default_rpm() -> u16 {
    10
}

/// DC motor entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DcMotorConfig {
    /// DC port (0-3).
    pub port: u8,

    /// Initial speed (0-255) applied on attach.
    #[serde(default)]
    pub speed: u8,
}
