//! [`ChannelDriver`] over sixteen embedded-hal PWM outputs.

use embedded_hal::pwm::SetDutyCycle;

use super::{ChannelDriver, Level, CHANNEL_COUNT, DUTY_MAX};

/// Errors from a [`PwmBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankError<E> {
    /// Channel number is 16 or above.
    InvalidChannel(u8),
    /// The output rejected the duty cycle.
    Output(E),
}

/// Adapts sixteen `SetDutyCycle` outputs to the shield's channel numbering.
///
/// Useful when a HAL (or an external expander driver) already exposes each
/// expander channel as an embedded-hal PWM output.
pub struct PwmBank<P> {
    outputs: [P; CHANNEL_COUNT as usize],
}

impl<P: SetDutyCycle> PwmBank<P> {
    /// Wrap the outputs, indexed by channel number.
    pub fn new(outputs: [P; CHANNEL_COUNT as usize]) -> Self {
        Self { outputs }
    }

    /// Release the outputs.
    pub fn into_inner(self) -> [P; CHANNEL_COUNT as usize] {
        self.outputs
    }

    fn output(&mut self, channel: u8) -> Result<&mut P, BankError<P::Error>> {
        self.outputs
            .get_mut(channel as usize)
            .ok_or(BankError::InvalidChannel(channel))
    }
}

impl<P: SetDutyCycle> ChannelDriver for PwmBank<P> {
    type Error = BankError<P::Error>;

    fn set_duty_cycle(&mut self, channel: u8, value: u16) -> Result<(), Self::Error> {
        let output = self.output(channel)?;
        let result = if value >= DUTY_MAX {
            output.set_duty_cycle_fully_on()
        } else {
            output.set_duty_cycle_fraction(value, DUTY_MAX)
        };
        result.map_err(BankError::Output)
    }

    fn set_digital(&mut self, channel: u8, level: Level) -> Result<(), Self::Error> {
        let output = self.output(channel)?;
        let result = match level {
            Level::High => output.set_duty_cycle_fully_on(),
            Level::Low => output.set_duty_cycle_fully_off(),
        };
        result.map_err(BankError::Output)
    }
}
