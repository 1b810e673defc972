//! Channel driver seam for the shield's 16-channel PWM expander.
//!
//! The expander itself (bus framing, register access, prescaler math) lives
//! outside this crate. Motor controllers only ever talk to it through
//! [`ChannelDriver`].

mod bank;
pub mod map;

pub use bank::{BankError, PwmBank};
pub use map::{DcChannels, StepperChannels};

/// Number of channels on the expander.
pub const CHANNEL_COUNT: u8 = 16;

/// Largest duty-cycle value the expander accepts (12-bit).
pub const DUTY_MAX: u16 = 4095;

/// Factor that maps an 8-bit magnitude onto the 12-bit duty range.
pub const DUTY_SCALE: u16 = 16;

/// Scale an 8-bit magnitude (0-255) to a duty cycle (0-4080).
#[inline]
pub const fn scale_duty(value: u8) -> u16 {
    value as u16 * DUTY_SCALE
}

/// Logic level of an emulated digital output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Fully off (duty 0).
    Low,
    /// Fully on (duty 4095).
    High,
}

impl Level {
    /// `High` when `bit` is set in `mask`.
    #[inline]
    pub fn from_bit(mask: u8, bit: u8) -> Self {
        if mask & bit != 0 {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Write access to the expander's PWM channels.
///
/// Channel numbers are 0-15. The expander has no separate digital mode, so
/// digital levels are emulated with duty-cycle extremes.
pub trait ChannelDriver {
    /// Error raised by the underlying bus.
    type Error: core::fmt::Debug;

    /// Set a channel's duty cycle (0-4095). Larger values mean fully on.
    fn set_duty_cycle(&mut self, channel: u8, value: u16) -> Result<(), Self::Error>;

    /// Drive a channel fully on or fully off.
    fn set_digital(&mut self, channel: u8, level: Level) -> Result<(), Self::Error> {
        match level {
            Level::High => self.set_duty_cycle(channel, DUTY_MAX),
            Level::Low => self.set_duty_cycle(channel, 0),
        }
    }

    /// Set the PWM frequency shared by all channels.
    ///
    /// The default does nothing, for outputs whose frequency is fixed when
    /// the HAL configures them.
    fn set_frequency(&mut self, _hz: u16) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: ChannelDriver + ?Sized> ChannelDriver for &mut T {
    type Error = T::Error;

    #[inline]
    fn set_duty_cycle(&mut self, channel: u8, value: u16) -> Result<(), Self::Error> {
        T::set_duty_cycle(self, channel, value)
    }

    #[inline]
    fn set_digital(&mut self, channel: u8, level: Level) -> Result<(), Self::Error> {
        T::set_digital(self, channel, level)
    }

    #[inline]
    fn set_frequency(&mut self, hz: u16) -> Result<(), Self::Error> {
        T::set_frequency(self, hz)
    }
}
