//! Shield configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::shield::{DEFAULT_ADDRESS, DEFAULT_FREQUENCY_HZ};

use super::motor::{DcMotorConfig, StepperConfig};

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct ShieldConfig {
    /// Bus address of the shield.
    #[serde(default = "default_address")]
    pub address: u8,

    /// PWM frequency applied at `begin`.
    #[serde(default = "default_frequency")]
    pub pwm_frequency_hz: u16,

    /// Named stepper motors.
    #[serde(default)]
    pub steppers: FnvIndexMap<String<32>, StepperConfig, 8>,

    /// Named DC motors.
    #[serde(default)]
    pub dc_motors: FnvIndexMap<String<32>, DcMotorConfig, 8>,
}

fn default_address() -> u8 {
    DEFAULT_ADDRESS
}

fn default_frequency() -> u16 {
    DEFAULT_FREQUENCY_HZ
}

impl ShieldConfig {
    /// Get a stepper configuration by name.
    pub fn stepper(&self, name: &str) -> Option<&StepperConfig> {
        self.steppers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a DC motor configuration by name.
    pub fn dc_motor(&self, name: &str) -> Option<&DcMotorConfig> {
        self.dc_motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all stepper names.
    pub fn stepper_names(&self) -> impl Iterator<Item = &str> {
        self.steppers.keys().map(|s| s.as_str())
    }

    /// List all DC motor names.
    pub fn dc_motor_names(&self) -> impl Iterator<Item = &str> {
        self.dc_motors.keys().map(|s| s.as_str())
    }
}

impl Default for ShieldConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            pwm_frequency_hz: DEFAULT_FREQUENCY_HZ,
            steppers: FnvIndexMap::new(),
            dc_motors: FnvIndexMap::new(),
        }
    }
}
