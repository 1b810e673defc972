//! Borrowed motor handles.

use core::ops::Deref;

use embedded_hal::delay::DelayNs;

use crate::channel::ChannelDriver;
use crate::error::Result;
use crate::motion::{Direction, StepMode, StepRun};
use crate::motor::{Attachable, DcMode, DcMotor, StepperMotor};

/// A DC motor borrowed together with its shield's driver.
///
/// Dereferences to [`DcMotor`] for the read-only accessors.
pub struct DcMotorHandle<'a, D> {
    motor: &'a mut DcMotor,
    driver: &'a mut D,
}

impl<'a, D: ChannelDriver> DcMotorHandle<'a, D> {
    pub(crate) fn new(motor: &'a mut DcMotor, driver: &'a mut D) -> Self {
        Self { motor, driver }
    }

    /// Switch the H-bridge to `mode`.
    pub fn run(&mut self, mode: DcMode) -> Result<()> {
        self.motor.run(self.driver, mode)
    }

    /// Set speed (0-255).
    pub fn set_speed(&mut self, speed: u8) -> Result<()> {
        self.motor.set_speed(self.driver, speed)
    }

    /// Run at a signed speed; see [`DcMotor::drive`].
    pub fn drive(&mut self, velocity: i16) -> Result<()> {
        self.motor.drive(self.driver, velocity)
    }

    /// Both direction pins low, PWM to zero.
    pub fn release(&mut self) -> Result<()> {
        self.motor.release(self.driver)
    }
}

impl<D> Deref for DcMotorHandle<'_, D> {
    type Target = DcMotor;

    fn deref(&self) -> &DcMotor {
        self.motor
    }
}

/// A stepper motor borrowed together with its shield's driver and delay.
///
/// Dereferences to [`StepperMotor`] for the read-only accessors.
pub struct StepperHandle<'a, D, DELAY> {
    motor: &'a mut StepperMotor,
    driver: &'a mut D,
    delay: &'a mut DELAY,
}

impl<'a, D, DELAY> StepperHandle<'a, D, DELAY>
where
    D: ChannelDriver,
    DELAY: DelayNs,
{
    pub(crate) fn new(motor: &'a mut StepperMotor, driver: &'a mut D, delay: &'a mut DELAY) -> Self {
        Self { motor, driver, delay }
    }

    /// Set the speed in RPM.
    pub fn set_speed(&mut self, rpm: u16) -> Result<()> {
        self.motor.set_speed(rpm)
    }

    /// Set the mode used by [`one_step`](Self::one_step).
    pub fn set_mode(&mut self, mode: StepMode) {
        self.motor.set_mode(mode);
    }

    /// Advance exactly one step in the current mode, without waiting.
    pub fn one_step(&mut self, direction: Direction) -> Result<()> {
        self.motor.one_step(self.driver, direction)
    }

    /// Run `steps` (negative for backward) in `mode` at the current speed.
    pub fn run(&mut self, steps: i32, mode: StepMode) -> Result<()> {
        self.motor.run(self.driver, self.delay, steps, mode)
    }

    /// Set the speed to `rpm`, then run `steps` in `mode`.
    pub fn run_at(&mut self, steps: i32, mode: StepMode, rpm: u16) -> Result<()> {
        self.motor.run_at(self.driver, self.delay, steps, mode, rpm)
    }

    /// Plan a run to be driven step by step with [`advance`](Self::advance).
    pub fn begin_run(&mut self, steps: i32, mode: StepMode, rpm: Option<u16>) -> Result<StepRun> {
        self.motor.begin_run(steps, mode, rpm)
    }

    /// Issue the next coil command of `run` without waiting.
    ///
    /// Returns `true` once the run is complete.
    pub fn advance(&mut self, run: &mut StepRun) -> Result<bool> {
        self.motor.advance(self.driver, run)
    }

    /// Zero both coils.
    pub fn release(&mut self) -> Result<()> {
        self.motor.release(self.driver)
    }
}

impl<D, DELAY> Deref for StepperHandle<'_, D, DELAY> {
    type Target = StepperMotor;

    fn deref(&self) -> &StepperMotor {
        self.motor
    }
}
