//! Unit tests for TOML configuration parsing.

use std::io::Write;

use motor_shield::config::{load_config, parse_config, ShieldConfig};
use motor_shield::error::{ConfigError, Error};
use motor_shield::StepMode;

/// Test parsing a complete shield configuration from TOML.
#[test]
fn test_parse_shield_config() {
    let toml_str = r#"
address = 0x63
pwm_frequency_hz = 800

[steppers.pan]
port = 0
steps_per_revolution = 200
rpm = 30
mode = "microstep"

[steppers.tilt]
port = 1
steps_per_revolution = 48

[dc_motors.fan]
port = 0
"#;

    let config: ShieldConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.address, 0x63);
    assert_eq!(config.pwm_frequency_hz, 800);

    let pan = config.stepper("pan").expect("Stepper not found");
    assert_eq!(pan.port, 0);
    assert_eq!(pan.steps_per_revolution, 200);
    assert_eq!(pan.rpm, 30);
    assert_eq!(pan.mode, StepMode::Microstep);

    let tilt = config.stepper("tilt").expect("Stepper not found");
    assert_eq!(tilt.rpm, 10);
    assert_eq!(tilt.mode, StepMode::Single);

    let fan = config.dc_motor("fan").expect("DC motor not found");
    assert_eq!(fan.speed, 0);
}

/// Test name listings keep declaration order.
#[test]
fn test_motor_names() {
    let toml_str = r#"
[steppers.b]
port = 1
steps_per_revolution = 200

[steppers.a]
port = 0
steps_per_revolution = 200
"#;

    let config: ShieldConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let names: Vec<&str> = config.stepper_names().collect();
    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(config.dc_motor_names().count(), 0);
    assert!(config.stepper("c").is_none());
}

/// Test all step mode spellings.
#[test]
fn test_step_mode_names() {
    for (name, mode) in [
        ("single", StepMode::Single),
        ("double", StepMode::Double),
        ("interleave", StepMode::Interleave),
        ("microstep", StepMode::Microstep),
    ] {
        let toml_str = format!(
            "[steppers.m]\nport = 0\nsteps_per_revolution = 200\nmode = \"{}\"\n",
            name
        );
        let config = parse_config(&toml_str).expect("Failed to parse TOML");
        assert_eq!(config.stepper("m").unwrap().mode, mode);
    }
}

/// Test malformed TOML surfaces as a parse error.
#[test]
fn test_malformed_toml() {
    let result = parse_config("[steppers.pan\nport = 0");
    assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
}

/// Test a missing required field.
#[test]
fn test_missing_steps_per_revolution() {
    let toml_str = r#"
[steppers.pan]
port = 0
"#;
    assert!(matches!(
        parse_config(toml_str),
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("motor-shield-{}.toml", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).expect("Failed to create file");
        writeln!(file, "[dc_motors.pump]\nport = 3\nspeed = 90").unwrap();
    }

    let config = load_config(&path).expect("Failed to load config");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.dc_motor("pump").unwrap().port, 3);
    assert_eq!(config.dc_motor("pump").unwrap().speed, 90);
}

/// Test a missing file surfaces as an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/motor-shield.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
