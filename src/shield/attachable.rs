//! Shield with caller-owned motors attached at runtime.

use embedded_hal::delay::DelayNs;
use heapless::String;

use crate::channel::ChannelDriver;
use crate::config::{validate_address, validate_config, validate_frequency, ShieldConfig};
use crate::error::{ConfigError, Error, MotorError, Result};
use crate::motor::{Attachable, DcMotor, StepperMotor};
use crate::port::{PortAllocator, ShieldId};

use super::{init_channels, DcMotorHandle, StepperHandle, DEFAULT_ADDRESS, DEFAULT_FREQUENCY_HZ};

/// Shield that lends its ports to caller-owned motors.
///
/// A port is held by at most one motor at a time. A stepper holds two DC
/// ports: stepper 0 takes ports 0 and 1, stepper 1 takes ports 2 and 3.
/// Attaching releases the motor's pins once the port is claimed; detaching
/// releases them before the port is freed.
///
/// # Example
///
/// ```rust,ignore
/// use motor_shield::{AttachableShield, DcMotor, StepMode, StepperMotor};
///
/// let mut shield = AttachableShield::new(driver, delay);
/// shield.begin(1600)?;
///
/// let mut pan = StepperMotor::new();
/// let mut fan = DcMotor::new();
/// assert!(shield.attach_stepper(&mut pan, 0, 200));
/// assert!(shield.attach_dc(&mut fan, 2));
///
/// shield.stepper(&mut pan).unwrap().run_at(50, StepMode::Single, 20)?;
/// shield.detach_stepper(&mut pan)?;
/// ```
pub struct AttachableShield<D, DELAY> {
    id: ShieldId,
    frequency_hz: u16,
    driver: D,
    delay: DELAY,
    ports: PortAllocator,
}

impl<D, DELAY> AttachableShield<D, DELAY>
where
    D: ChannelDriver,
    DELAY: DelayNs,
{
    /// Create a shield at the default bus address with every port free.
    pub fn new(driver: D, delay: DELAY) -> Self {
        Self::build(driver, delay, DEFAULT_ADDRESS)
    }

    fn build(driver: D, delay: DELAY, address: u8) -> Self {
        Self {
            id: ShieldId::allocate(address),
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            driver,
            delay,
            ports: PortAllocator::new(),
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

    /// Create a shield from a validated configuration.
    ///
    /// Takes the address and PWM frequency; motors are attached afterwards
    /// with [`attach_dc_from`](Self::attach_dc_from) and
    /// [`attach_stepper_from`](Self::attach_stepper_from).
    pub fn from_config(driver: D, delay: DELAY, config: &ShieldConfig) -> Result<Self> {
        validate_config(config)?;
        let mut shield = Self::with_address(driver, delay, config.address)?;
        shield.frequency_hz = config.pwm_frequency_hz;
        Ok(shield)
    }

    /// Initialize the expander: apply `frequency_hz` and zero all channels.
    ///
    /// # Errors
    ///
    /// `PortsInUse` while any motor is attached; detach every motor first.
    pub fn begin(&mut self, frequency_hz: u16) -> Result<()> {
        validate_frequency(frequency_hz)?;
        if self.ports.in_use() != 0 {
            warn!(
                "shield {=u8:#x}: begin refused, ports {=u8:#b} in use",
                self.id.address(),
                self.ports.in_use()
            );
            return Err(MotorError::PortsInUse.into());
        }
        self.frequency_hz = frequency_hz;
        init_channels(&mut self.driver, frequency_hz)?;
        info!("shield {=u8:#x}: begin at {} Hz", self.id.address(), frequency_hz);
        Ok(())
    }

    /// [`begin`](Self::begin) at the stored frequency.
    pub fn begin_default(&mut self) -> Result<()> {
        self.begin(self.frequency_hz)
    }

    /// Attach `motor` to DC port `port` (0-3) and release it.
    ///
    /// Returns `false`, changing nothing, when the port is out of range or
    /// taken, or the motor is already attached. A failed release write also
    /// returns `false` and leaves the port free.
    pub fn attach_dc(&mut self, motor: &mut DcMotor, port: u8) -> bool {
        self.attach_released(motor, port)
    }

    /// Attach `motor` to stepper port `port` (0-1) with
    /// `steps_per_revolution` full steps.
    ///
    /// Both coils are released once the ports are claimed. Returns `false`,
    /// changing nothing, when either DC port behind it is taken, the port is
    /// out of range, the motor is already attached, or the release write
    /// fails.
    pub fn attach_stepper(&mut self, motor: &mut StepperMotor, port: u8, steps_per_revolution: u16) -> bool {
        if !self.attach_released(motor, port) {
            return false;
        }
        motor.set_steps_per_revolution(steps_per_revolution);
        true
    }

    fn attach_released<M: Attachable>(&mut self, motor: &mut M, port: u8) -> bool {
        if !self.ports.attach(self.id, motor, port) {
            return false;
        }
        if motor.release(&mut self.driver).is_err() {
            warn!("shield {=u8:#x}: release failed, port {} freed", self.id.address(), port);
            self.ports.forget(self.id, motor);
            return false;
        }
        true
    }

    /// Release `motor` and free its port. No-op unless attached here.
    pub fn detach_dc(&mut self, motor: &mut DcMotor) -> Result<()> {
        self.ports.detach(self.id, motor, &mut self.driver)
    }

    /// Release `motor` and free both of its ports. No-op unless attached here.
    pub fn detach_stepper(&mut self, motor: &mut StepperMotor) -> Result<()> {
        self.ports.detach(self.id, motor, &mut self.driver)
    }

    /// Attach `motor` to the port of the DC entry `name` and apply its
    /// initial speed.
    ///
    /// Returns `Ok(false)` when the attach itself is refused.
    ///
    /// # Errors
    ///
    /// `MotorNotFound` if `config` has no such entry. `ChannelError` if the
    /// initial speed cannot be written; the motor is left unattached.
    pub fn attach_dc_from(&mut self, motor: &mut DcMotor, config: &ShieldConfig, name: &str) -> Result<bool> {
        let entry = config.dc_motor(name).ok_or_else(|| not_found(name))?;

        if !self.attach_dc(motor, entry.port) {
            return Ok(false);
        }
        if entry.speed > 0 {
            if let Err(e) = motor.set_speed(&mut self.driver, entry.speed) {
                self.ports.forget(self.id, motor);
                return Err(e);
            }
        }
        Ok(true)
    }

    /// Attach `motor` to the port of the stepper entry `name` and apply its
    /// steps per revolution, speed and mode.
    ///
    /// Returns `Ok(false)` when the attach itself is refused.
    ///
    /// # Errors
    ///
    /// `MotorNotFound` if `config` has no such entry, `InvalidRpm` or
    /// `InvalidStepsPerRevolution` for an entry that would leave the motor
    /// without a speed. The motor is not attached in either case.
    pub fn attach_stepper_from(
        &mut self,
        motor: &mut StepperMotor,
        config: &ShieldConfig,
        name: &str,
    ) -> Result<bool> {
        let entry = config.stepper(name).ok_or_else(|| not_found(name))?;
        if entry.steps_per_revolution == 0 {
            return Err(Error::Config(ConfigError::InvalidStepsPerRevolution(0)));
        }
        if entry.rpm == 0 {
            return Err(Error::Config(ConfigError::InvalidRpm(0)));
        }

        if !self.attach_stepper(motor, entry.port, entry.steps_per_revolution) {
            return Ok(false);
        }
        motor.set_speed(entry.rpm)?;
        motor.set_mode(entry.mode);
        Ok(true)
    }

    /// Handle for `motor`, if it is attached to this shield.
    pub fn dc<'a>(&'a mut self, motor: &'a mut DcMotor) -> Option<DcMotorHandle<'a, D>> {
        if !motor.is_attached_to(self.id) {
            return None;
        }
        Some(DcMotorHandle::new(motor, &mut self.driver))
    }

    /// Handle for `motor`, if it is attached to this shield.
    pub fn stepper<'a>(&'a mut self, motor: &'a mut StepperMotor) -> Option<StepperHandle<'a, D, DELAY>> {
        if !motor.is_attached_to(self.id) {
            return None;
        }
        Some(StepperHandle::new(motor, &mut self.driver, &mut self.delay))
    }

    /// Allocated port bits (bit n is DC port n).
    #[inline]
    pub fn ports(&self) -> u8 {
        self.ports.in_use()
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

    /// PWM frequency applied at [`begin`](Self::begin).
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
    ///
    /// Motors still attached keep their binding; detach them first.
    pub fn into_inner(self) -> (D, DELAY) {
        (self.driver, self.delay)
    }
}

fn not_found(name: &str) -> Error {
    Error::Config(ConfigError::MotorNotFound(
        String::try_from(name).unwrap_or_default(),
    ))
}
