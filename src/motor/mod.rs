//! Motor module for motor-shield.
//!
//! Provides the DC motor controller and the stepper sequencer. Both are plain
//! values that start unbound; only a shield can bind them to a port.

mod dc;
mod stepper;

pub use dc::{DcMode, DcMotor};
pub use stepper::StepperMotor;

use crate::channel::{ChannelDriver, Level};
use crate::error::{MotorError, Result};
use crate::port::ShieldId;

/// A motor that can be attached to a shield port.
///
/// Sealed: binding is reserved to the shield and its port allocator.
pub trait Attachable: private::Sealed {
    /// Allocation bits claimed by port `port`, or `None` if out of range.
    fn port_mask(port: u8) -> Option<u8>;

    /// Port the motor is attached to.
    fn attached_port(&self) -> Option<u8>;

    /// Shield the motor is attached to.
    fn attached_shield(&self) -> Option<ShieldId>;

    /// Indicates if the motor is attached to any shield.
    fn is_attached(&self) -> bool {
        self.attached_shield().is_some()
    }

    /// Indicates if the motor is attached to `shield`.
    fn is_attached_to(&self, shield: ShieldId) -> bool {
        self.attached_shield() == Some(shield)
    }

    /// Take all drive off the motor's channels.
    fn release<D: ChannelDriver>(&mut self, driver: &mut D) -> Result<()>;
}

pub(crate) mod private {
    use crate::port::ShieldId;

    pub trait Sealed {
        /// Bind to `port` on `shield`. Returns `false` if `port` is out of range.
        fn bind(&mut self, shield: ShieldId, port: u8) -> bool;

        /// Reset to the unbound state.
        fn unbind(&mut self);
    }
}

pub(crate) fn write_duty<D: ChannelDriver>(driver: &mut D, channel: u8, value: u16) -> Result<()> {
    driver
        .set_duty_cycle(channel, value)
        .map_err(|_| MotorError::ChannelError.into())
}

pub(crate) fn write_digital<D: ChannelDriver>(driver: &mut D, channel: u8, level: Level) -> Result<()> {
    driver
        .set_digital(channel, level)
        .map_err(|_| MotorError::ChannelError.into())
}
