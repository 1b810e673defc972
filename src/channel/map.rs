//! Fixed channel maps for the shield's motor ports.
//!
//! The shield wires four H-bridge ports to the expander. A DC motor uses one
//! port. A stepper uses two ports, one per coil, so stepper 0 shares its
//! channels with DC motors 0 and 1, and stepper 1 with DC motors 2 and 3.

/// Number of DC motor ports.
pub const DC_PORTS: u8 = 4;

/// Number of stepper motor ports.
pub const STEPPER_PORTS: u8 = 2;

/// Channels driving one DC motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DcChannels {
    /// Speed (PWM) channel.
    pub pwm: u8,
    /// Direction pin 1 (high for forward).
    pub in1: u8,
    /// Direction pin 2 (high for backward).
    pub in2: u8,
}

/// Channels driving one two-coil stepper motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperChannels {
    /// Coil A current (PWM) channel.
    pub pwm_a: u8,
    /// Coil A pin 1.
    pub a1: u8,
    /// Coil A pin 2.
    pub a2: u8,
    /// Coil B current (PWM) channel.
    pub pwm_b: u8,
    /// Coil B pin 1.
    pub b1: u8,
    /// Coil B pin 2.
    pub b2: u8,
}

const DC_MAP: [DcChannels; DC_PORTS as usize] = [
    DcChannels { pwm: 8, in1: 10, in2: 9 },
    DcChannels { pwm: 13, in1: 11, in2: 12 },
    DcChannels { pwm: 2, in1: 4, in2: 3 },
    DcChannels { pwm: 7, in1: 5, in2: 6 },
];

const STEPPER_MAP: [StepperChannels; STEPPER_PORTS as usize] = [
    StepperChannels { pwm_a: 8, a1: 10, a2: 9, pwm_b: 13, b1: 11, b2: 12 },
    StepperChannels { pwm_a: 2, a1: 4, a2: 3, pwm_b: 7, b1: 5, b2: 6 },
];

impl DcChannels {
    /// Channel map for DC port `port` (0-3).
    pub fn for_port(port: u8) -> Option<Self> {
        DC_MAP.get(port as usize).copied()
    }

    /// Allocation bits claimed by DC port `port`.
    pub fn port_mask(port: u8) -> Option<u8> {
        (port < DC_PORTS).then(|| 1 << port)
    }
}

impl StepperChannels {
    /// Channel map for stepper port `port` (0-1).
    pub fn for_port(port: u8) -> Option<Self> {
        STEPPER_MAP.get(port as usize).copied()
    }

    /// Allocation bits claimed by stepper port `port`: two DC ports.
    pub fn port_mask(port: u8) -> Option<u8> {
        (port < STEPPER_PORTS).then(|| 0b11 << (port * 2))
    }
}
