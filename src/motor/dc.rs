//! DC motor controller.
//!
//! One PWM channel sets speed, two direction pins select the H-bridge state:
//!
//! | in1  | in2  | mode     |
//! |------|------|----------|
//! | high | low  | Forward  |
//! | low  | high | Backward |
//! | high | high | Brake    |
//! | low  | low  | Release  |

use crate::channel::{scale_duty, ChannelDriver, DcChannels, Level};
use crate::error::{MotorError, Result};
use crate::port::{Binding, ShieldId};

use super::{private, write_digital, write_duty, Attachable};

/// Direction mode of a DC motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DcMode {
    /// in1 high, in2 low.
    Forward,
    /// in1 low, in2 high.
    Backward,
    /// Both pins high; the motor is shorted and resists rotation.
    Brake,
    /// Both pins low; the motor free-runs.
    #[default]
    Release,
}

impl DcMode {
    fn from_sign(velocity: i16) -> Self {
        match velocity.signum() {
            1 => DcMode::Forward,
            -1 => DcMode::Backward,
            _ => DcMode::Release,
        }
    }
}

/// DC motor on one shield port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DcMotor {
    /// Port binding, `None` while unattached.
    binding: Option<Binding<DcChannels>>,

    /// Last commanded direction mode.
    mode: DcMode,

    /// Last commanded speed (0-255).
    speed: u8,
}

impl DcMotor {
    /// Create an unattached motor.
    pub const fn new() -> Self {
        Self {
            binding: None,
            mode: DcMode::Release,
            speed: 0,
        }
    }

    /// Port number (0-3) while attached.
    #[inline]
    pub fn id(&self) -> Option<u8> {
        self.attached_port()
    }

    /// Channel map while attached.
    #[inline]
    pub fn channels(&self) -> Option<DcChannels> {
        self.binding.map(|b| b.channels)
    }

    /// Current direction mode.
    #[inline]
    pub fn mode(&self) -> DcMode {
        self.mode
    }

    /// Current speed (0-255).
    #[inline]
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Signed speed: positive forward, negative backward, zero otherwise.
    #[inline]
    pub fn velocity(&self) -> i16 {
        match self.mode {
            DcMode::Forward => self.speed as i16,
            DcMode::Backward => -(self.speed as i16),
            DcMode::Brake | DcMode::Release => 0,
        }
    }

    fn bound_channels(&self) -> Result<DcChannels> {
        self.channels().ok_or_else(|| MotorError::NotAttached.into())
    }

    /// Switch the H-bridge to `mode`.
    ///
    /// Forward and backward take the opposite pin low before raising the
    /// active one, so both pins are never high together outside of `Brake`.
    pub fn run<D: ChannelDriver>(&mut self, driver: &mut D, mode: DcMode) -> Result<()> {
        let ch = self.bound_channels()?;

        match mode {
            DcMode::Forward => {
                write_digital(driver, ch.in2, Level::Low)?;
                write_digital(driver, ch.in1, Level::High)?;
            }
            DcMode::Backward => {
                write_digital(driver, ch.in1, Level::Low)?;
                write_digital(driver, ch.in2, Level::High)?;
            }
            DcMode::Brake => {
                write_digital(driver, ch.in1, Level::High)?;
                write_digital(driver, ch.in2, Level::High)?;
            }
            DcMode::Release => {
                write_digital(driver, ch.in1, Level::Low)?;
                write_digital(driver, ch.in2, Level::Low)?;
            }
        }

        if self.mode != mode {
            debug!("dc motor {}: {} -> {}", self.id(), self.mode, mode);
        }
        self.mode = mode;
        Ok(())
    }

    /// Set speed (0-255), independent of direction.
    pub fn set_speed<D: ChannelDriver>(&mut self, driver: &mut D, speed: u8) -> Result<()> {
        let ch = self.bound_channels()?;
        write_duty(driver, ch.pwm, scale_duty(speed))?;
        self.speed = speed;
        Ok(())
    }

    /// Run at a signed speed, clamped to -255..=255.
    ///
    /// Positive is forward, negative backward, zero releases. Direction pins
    /// are only rewritten when the sign changes; the PWM duty always is.
    pub fn drive<D: ChannelDriver>(&mut self, driver: &mut D, velocity: i16) -> Result<()> {
        let velocity = velocity.clamp(-255, 255);
        let mode = DcMode::from_sign(velocity);

        if mode != self.mode {
            self.run(driver, mode)?;
        }
        self.set_speed(driver, velocity.unsigned_abs() as u8)
    }
}

impl private::Sealed for DcMotor {
    fn bind(&mut self, shield: ShieldId, port: u8) -> bool {
        match Binding::dc(shield, port) {
            Some(binding) => {
                *self = Self::new();
                self.binding = Some(binding);
                true
            }
            None => false,
        }
    }

    fn unbind(&mut self) {
        *self = Self::new();
    }
}

impl Attachable for DcMotor {
    fn port_mask(port: u8) -> Option<u8> {
        DcChannels::port_mask(port)
    }

    fn attached_port(&self) -> Option<u8> {
        self.binding.map(|b| b.port)
    }

    fn attached_shield(&self) -> Option<ShieldId> {
        self.binding.map(|b| b.shield)
    }

    /// Both direction pins low, then PWM to zero.
    fn release<D: ChannelDriver>(&mut self, driver: &mut D) -> Result<()> {
        self.run(driver, DcMode::Release)?;
        self.set_speed(driver, 0)
    }
}
