//! Shield with built-in motors.

use embedded_hal::delay::DelayNs;

use crate::channel::map::{DC_PORTS, STEPPER_PORTS};
use crate::channel::ChannelDriver;
use crate::config::{validate_address, validate_frequency};
use crate::error::Result;
use crate::motor::private::Sealed;
use crate::motor::{Attachable, DcMode, DcMotor, StepperMotor};
use crate::port::ShieldId;

use super::{init_channels, DcMotorHandle, StepperHandle, DEFAULT_ADDRESS, DEFAULT_FREQUENCY_HZ};

/// Shield with four DC motors and two steppers bound to fixed ports.
///
/// The DC and stepper ports share channels (stepper 0 drives DC ports 0 and
/// 1, stepper 1 drives DC ports 2 and 3). This shield does not arbitrate;
/// use [`AttachableShield`](super::AttachableShield) for enforced
/// exclusivity.
///
/// # Example
///
/// ```rust,ignore
/// use motor_shield::{DcMode, MotorShield, StepMode};
///
/// let mut shield = MotorShield::new(driver, delay);
/// shield.begin(1600)?;
///
/// let mut fan = shield.dc_motor(2).unwrap();
/// fan.set_speed(150)?;
/// fan.run(DcMode::Forward)?;
///
/// let mut pan = shield.stepper_motor(0, 200).unwrap();
/// pan.run_at(100, StepMode::Double, 30)?;
/// ```
pub struct MotorShield<D, DELAY> {
    id: ShieldId,
    frequency_hz: u16,
    driver: D,
    delay: DELAY,
    dc: [DcMotor; DC_PORTS as usize],
    steppers: [StepperMotor; STEPPER_PORTS as usize],
}

impl<D, DELAY> MotorShield<D, DELAY>
where
    D: ChannelDriver,
    DELAY: DelayNs,
{
    /// Create a shield at the default bus address.
    pub fn new(driver: D, delay: DELAY) -> Self {
        Self::build(driver, delay, DEFAULT_ADDRESS)
    }

    fn build(driver: D, delay: DELAY, address: u8) -> Self {
        Self {
            id: ShieldId::allocate(address),
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            driver,
            delay,
            dc: [DcMotor::new(), DcMotor::new(), DcMotor::new(), DcMotor::new()],
            steppers: [StepperMotor::new(), StepperMotor::new()],
        }
    }

    /// Create a shield at `address`.
    ///
    /// # Errors
    ///
    /// `InvalidAddress` outside 0x60-0x7F or for the all-call address 0x70.
    pub fn with_address(driver: D, delay: DELAY, address: u8) -> Result<Self> {
        validate_address(address)?;
        Ok(Self::build(driver, delay, address))
    }

    /// Initialize the expander and bind every built-in motor.
    ///
    /// Applies `frequency_hz`, zeroes all channels, then releases each DC
    /// motor and each stepper. Calling `begin` again resets every motor.
    pub fn begin(&mut self, frequency_hz: u16) -> Result<()> {
        validate_frequency(frequency_hz)?;
        self.frequency_hz = frequency_hz;
        init_channels(&mut self.driver, frequency_hz)?;

        for (port, motor) in (0u8..).zip(self.dc.iter_mut()) {
            motor.bind(self.id, port);
            motor.run(&mut self.driver, DcMode::Release)?;
        }
        for (port, motor) in (0u8..).zip(self.steppers.iter_mut()) {
            motor.bind(self.id, port);
            motor.release(&mut self.driver)?;
        }

        info!("shield {=u8:#x}: begin at {} Hz", self.id.address(), frequency_hz);
        Ok(())
    }

    /// DC motor on port `port` (0-3), or `None` if out of range.
    pub fn dc_motor(&mut self, port: u8) -> Option<DcMotorHandle<'_, D>> {
        let driver = &mut self.driver;
        self.dc
            .get_mut(port as usize)
            .map(move |motor| DcMotorHandle::new(motor, driver))
    }

    /// Stepper on port `port` (0-1) with `steps_per_revolution` full steps,
    /// or `None` if out of range.
    pub fn stepper_motor(
        &mut self,
        port: u8,
        steps_per_revolution: u16,
    ) -> Option<StepperHandle<'_, D, DELAY>> {
        let driver = &mut self.driver;
        let delay = &mut self.delay;
        self.steppers.get_mut(port as usize).map(move |motor| {
            motor.set_steps_per_revolution(steps_per_revolution);
            StepperHandle::new(motor, driver, delay)
        })
    }

    /// Shield identity.
    #[inline]
    pub fn id(&self) -> ShieldId {
        self.id
    }

    /// Bus address.
    #[inline]
    pub fn address(&self) -> u8 {
        self.id.address()
    }

    /// PWM frequency applied by the last [`begin`](Self::begin).
    #[inline]
    pub fn frequency(&self) -> u16 {
        self.frequency_hz
    }

    /// Channel driver.
    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Channel driver, for writes outside the motor model.
    #[inline]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Delay provider.
    #[inline]
    pub fn delay(&self) -> &DELAY {
        &self.delay
    }

    /// Give back the driver and the delay provider.
    pub fn into_inner(self) -> (D, DELAY) {
        (self.driver, self.delay)
    }
}
