//! Unit tests for configuration validation.

use motor_shield::config::{validate_config, ShieldConfig};
use motor_shield::error::{ConfigError, Error};

fn parse(toml_str: &str) -> ShieldConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[steppers.pan]
port = 0
steps_per_revolution = 200

[dc_motors.left]
port = 2

[dc_motors.right]
port = 3
"#,
    );
    assert!(validate_config(&config).is_ok());
}

/// Test the all-call address is rejected.
#[test]
fn test_all_call_address() {
    let config = parse("address = 0x70");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidAddress(0x70)))
    );
}

/// Test addresses below the shield range.
#[test]
fn test_address_out_of_range() {
    let config = parse("address = 0x40");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidAddress(0x40)))
    ));
}

/// Test PWM frequency bounds.
#[test]
fn test_invalid_frequency() {
    let config = parse("pwm_frequency_hz = 10");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidFrequency(10)))
    );
}

/// Test stepper ports beyond 1.
#[test]
fn test_invalid_stepper_port() {
    let config = parse(
        r#"
[steppers.pan]
port = 2
steps_per_revolution = 200
"#,
    );
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepperPort(2)))
    );
}

/// Test DC ports beyond 3.
#[test]
fn test_invalid_dc_port() {
    let config = parse(
        r#"
[dc_motors.fan]
port = 4
"#,
    );
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidDcPort(4)))
    );
}

/// Test zero steps per revolution.
#[test]
fn test_zero_steps_per_revolution() {
    let config = parse(
        r#"
[steppers.pan]
port = 0
steps_per_revolution = 0
"#,
    );
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)))
    );
}

/// Test zero RPM.
#[test]
fn test_zero_rpm() {
    let config = parse(
        r#"
[steppers.pan]
port = 0
steps_per_revolution = 200
rpm = 0
"#,
    );
    assert_eq!(validate_config(&config), Err(Error::Config(ConfigError::InvalidRpm(0))));
}

/// Test two DC motors on one port.
#[test]
fn test_dc_port_conflict() {
    let config = parse(
        r#"
[dc_motors.left]
port = 1

[dc_motors.right]
port = 1
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::PortConflict(ref name))) if name.as_str() == "right"
    ));
}

/// Test a DC motor on a port a stepper already drives.
#[test]
fn test_dc_conflicts_with_stepper() {
    let config = parse(
        r#"
[dc_motors.fan]
port = 1

[steppers.pan]
port = 0
steps_per_revolution = 200
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::PortConflict(ref name))) if name.as_str() == "fan"
    ));
}
