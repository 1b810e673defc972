//! Shield facades.
//!
//! A shield owns the channel driver and the delay provider. Motors are driven
//! through short-lived handles that borrow one motor together with them.
//!
//! Two binding strategies share the same motor types:
//!
//! - [`MotorShield`]: four DC motors and two steppers built in, bound at
//!   [`begin`](MotorShield::begin).
//! - [`AttachableShield`]: caller-owned motors attached to free ports and
//!   detached again, with port exclusivity enforced.

mod attachable;
mod fixed;
mod handle;

pub use attachable::AttachableShield;
pub use fixed::MotorShield;
pub use handle::{DcMotorHandle, StepperHandle};

use crate::channel::{ChannelDriver, CHANNEL_COUNT};
use crate::error::{MotorError, Result};
use crate::motor::write_duty;

/// Bus address of a shield with no address jumpers set.
pub const DEFAULT_ADDRESS: u8 = 0x60;

/// PWM frequency used when none is given.
pub const DEFAULT_FREQUENCY_HZ: u16 = 1600;

/// Apply `frequency_hz` and switch every channel fully off.
fn init_channels<D: ChannelDriver>(driver: &mut D, frequency_hz: u16) -> Result<()> {
    driver
        .set_frequency(frequency_hz)
        .map_err(|_| MotorError::ChannelError)?;

    for channel in 0..CHANNEL_COUNT {
        write_duty(driver, channel, 0)?;
    }
    Ok(())
}
