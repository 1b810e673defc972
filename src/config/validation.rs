//! Configuration validation.

use crate::channel::{DcChannels, StepperChannels};
use crate::error::{ConfigError, Error, Result};
use crate::port::PortAllocator;

use super::{DcMotorConfig, ShieldConfig, StepperConfig};

/// All-call address every PCA9685 answers to.
const ALL_CALL_ADDRESS: u8 = 0x70;

/// Validate a shield configuration.
///
/// Checks:
/// - Address and PWM frequency are in range
/// - Every motor names a valid port
/// - Steppers have nonzero steps per revolution and RPM
/// - No two motors claim the same port (a stepper claims two DC ports)
pub fn validate_config(config: &ShieldConfig) -> Result<()> {
    validate_address(config.address)?;
    validate_frequency(config.pwm_frequency_hz)?;

    let mut ports = PortAllocator::new();

    // Steppers first, so a conflict is reported against the DC motor
    for (name, stepper) in config.steppers.iter() {
        let mask = validate_stepper(stepper)?;
        if !ports.claim(mask) {
            return Err(Error::Config(ConfigError::PortConflict(name.clone())));
        }
    }

    for (name, dc) in config.dc_motors.iter() {
        let mask = validate_dc(dc)?;
        if !ports.claim(mask) {
            return Err(Error::Config(ConfigError::PortConflict(name.clone())));
        }
    }

    Ok(())
}

/// Check a shield bus address: 0x60-0x7F, excluding the all-call address.
pub fn validate_address(address: u8) -> Result<()> {
    if !(0x60..=0x7F).contains(&address) || address == ALL_CALL_ADDRESS {
        return Err(Error::Config(ConfigError::InvalidAddress(address)));
    }
    Ok(())
}

/// Check a PWM frequency against the expander's 24-1600 Hz range.
pub fn validate_frequency(hz: u16) -> Result<()> {
    if !(24..=1600).contains(&hz) {
        return Err(Error::Config(ConfigError::InvalidFrequency(hz)));
    }
    Ok(())
}

fn validate_stepper(config: &StepperConfig) -> Result<u8> {
    if config.steps_per_revolution == 0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(
            config.steps_per_revolution,
        )));
    }

    if config.rpm == 0 {
        return Err(Error::Config(ConfigError::InvalidRpm(config.rpm)));
    }

    StepperChannels::port_mask(config.port)
        .ok_or(Error::Config(ConfigError::InvalidStepperPort(config.port)))
}

fn validate_dc(config: &DcMotorConfig) -> Result<u8> {
    DcChannels::port_mask(config.port).ok_or(Error::Config(ConfigError::InvalidDcPort(config.port)))
}
