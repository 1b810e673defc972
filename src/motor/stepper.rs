//! Stepper motor sequencer.
//!
//! Drives a two-coil stepper through two shield ports: one PWM channel and
//! two direction pins per coil.

use embedded_hal::delay::DelayNs;

use crate::channel::{scale_duty, ChannelDriver, Level, StepperChannels};
use crate::error::{ConfigError, MotorError, Result};
use crate::motion::{next_step, Direction, MicrostepCurve, StepMode, StepRun};
use crate::port::{Binding, ShieldId};

use super::{private, write_digital, write_duty, Attachable};

const MICROS_PER_MINUTE: u32 = 60_000_000;

/// Stepper motor on one shield stepper port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepperMotor {
    /// Port binding, `None` while unattached.
    binding: Option<Binding<StepperChannels>>,

    /// Mode used by [`one_step`](Self::one_step).
    mode: StepMode,

    /// Position in the coil sequence. Survives across runs.
    current_step: u8,

    /// Full steps per motor revolution.
    steps_per_revolution: u16,

    /// Full-step interval derived from the last speed setting.
    us_per_step: u32,
}

impl StepperMotor {
    /// Create an unattached motor.
    pub const fn new() -> Self {
        Self {
            binding: None,
            mode: StepMode::Single,
            current_step: 0,
            steps_per_revolution: 0,
            us_per_step: 0,
        }
    }

    /// Port number (0-1) while attached.
    #[inline]
    pub fn id(&self) -> Option<u8> {
        self.attached_port()
    }

    /// Channel map while attached.
    #[inline]
    pub fn channels(&self) -> Option<StepperChannels> {
        self.binding.map(|b| b.channels)
    }

    /// Full steps per motor revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u16 {
        self.steps_per_revolution
    }

    pub(crate) fn set_steps_per_revolution(&mut self, steps: u16) {
        self.steps_per_revolution = steps;
    }

    /// Current stepping mode.
    #[inline]
    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Set the stepping mode used by [`one_step`](Self::one_step).
    #[inline]
    pub fn set_mode(&mut self, mode: StepMode) {
        self.mode = mode;
    }

    /// Position in the coil sequence.
    #[inline]
    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    /// Full-step interval in microseconds.
    #[inline]
    pub fn us_per_step(&self) -> u32 {
        self.us_per_step
    }

    /// Set the speed in RPM.
    ///
    /// # Errors
    ///
    /// `InvalidRpm` for zero RPM, `InvalidStepsPerRevolution` when the motor
    /// has no steps per revolution configured. The speed is unchanged.
    pub fn set_speed(&mut self, rpm: u16) -> Result<()> {
        if rpm == 0 {
            return Err(ConfigError::InvalidRpm(rpm).into());
        }
        if self.steps_per_revolution == 0 {
            return Err(ConfigError::InvalidStepsPerRevolution(0).into());
        }
        self.us_per_step = MICROS_PER_MINUTE / (self.steps_per_revolution as u32 * rpm as u32);
        Ok(())
    }

    /// Speed in RPM implied by the current step interval, 0 if unset.
    pub fn speed(&self) -> u16 {
        let per_rev = self.steps_per_revolution as u64 * self.us_per_step as u64;
        if per_rev == 0 {
            return 0;
        }
        (MICROS_PER_MINUTE as u64 / per_rev).min(u16::MAX as u64) as u16
    }

    fn bound_channels(&self) -> Result<StepperChannels> {
        self.channels().ok_or_else(|| MotorError::NotAttached.into())
    }

    /// Advance exactly one step in the current mode.
    pub fn one_step<D: ChannelDriver>(&mut self, driver: &mut D, direction: Direction) -> Result<()> {
        self.emit(driver, self.mode, direction)
    }

    fn emit<D: ChannelDriver>(&mut self, driver: &mut D, mode: StepMode, direction: Direction) -> Result<()> {
        let ch = self.bound_channels()?;
        let (next, cmd) = next_step(mode, self.current_step, direction, MicrostepCurve::DEFAULT);

        trace!(
            "stepper {}: step {} latch {=u8:#x} pwm {}/{}",
            self.id(),
            next,
            cmd.latch,
            cmd.pwm_a,
            cmd.pwm_b
        );

        write_duty(driver, ch.pwm_a, scale_duty(cmd.pwm_a))?;
        write_duty(driver, ch.pwm_b, scale_duty(cmd.pwm_b))?;
        write_digital(driver, ch.a2, Level::from_bit(cmd.latch, 0x1))?;
        write_digital(driver, ch.b1, Level::from_bit(cmd.latch, 0x2))?;
        write_digital(driver, ch.a1, Level::from_bit(cmd.latch, 0x4))?;
        write_digital(driver, ch.b2, Level::from_bit(cmd.latch, 0x8))?;

        self.current_step = next;
        Ok(())
    }

    /// Plan a run of `steps` (negative for backward) in `mode`.
    ///
    /// When `rpm` is given the speed is set first. The mode becomes the
    /// motor's current mode. Drive the returned run with
    /// [`advance`](Self::advance).
    pub fn begin_run(&mut self, steps: i32, mode: StepMode, rpm: Option<u16>) -> Result<StepRun> {
        self.bound_channels()?;
        if let Some(rpm) = rpm {
            self.set_speed(rpm)?;
        }
        self.mode = mode;

        debug!("stepper {}: run {} steps in {}", self.id(), steps, mode);
        Ok(StepRun::new(steps, mode, self.us_per_step, MicrostepCurve::DEFAULT))
    }

    /// Issue the next coil command of `run`.
    ///
    /// Returns `true` once the run is complete. The caller waits
    /// `run.interval_us()` before the next call.
    pub fn advance<D: ChannelDriver>(&mut self, driver: &mut D, run: &mut StepRun) -> Result<bool> {
        if run.is_complete() {
            return Ok(true);
        }
        self.emit(driver, run.mode(), run.direction())?;
        run.consume();
        Ok(run.is_complete())
    }

    /// Run `steps` in `mode` at the current speed, blocking until done.
    ///
    /// Interleave counts half-steps. Microstep counts full steps and issues
    /// `MICROSTEPS` coil commands for each.
    pub fn run<D, DELAY>(&mut self, driver: &mut D, delay: &mut DELAY, steps: i32, mode: StepMode) -> Result<()>
    where
        D: ChannelDriver,
        DELAY: DelayNs,
    {
        let run = self.begin_run(steps, mode, None)?;
        self.run_to_completion(driver, delay, run)
    }

    /// Set the speed to `rpm`, then [`run`](Self::run).
    pub fn run_at<D, DELAY>(
        &mut self,
        driver: &mut D,
        delay: &mut DELAY,
        steps: i32,
        mode: StepMode,
        rpm: u16,
    ) -> Result<()>
    where
        D: ChannelDriver,
        DELAY: DelayNs,
    {
        let run = self.begin_run(steps, mode, Some(rpm))?;
        self.run_to_completion(driver, delay, run)
    }

    fn run_to_completion<D, DELAY>(&mut self, driver: &mut D, delay: &mut DELAY, mut run: StepRun) -> Result<()>
    where
        D: ChannelDriver,
        DELAY: DelayNs,
    {
        while !run.is_complete() {
            self.advance(driver, &mut run)?;
            delay.delay_us(run.interval_us());
        }
        Ok(())
    }
}

impl private::Sealed for StepperMotor {
    fn bind(&mut self, shield: ShieldId, port: u8) -> bool {
        match Binding::stepper(shield, port) {
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

impl Attachable for StepperMotor {
    fn port_mask(port: u8) -> Option<u8> {
        StepperChannels::port_mask(port)
    }

    fn attached_port(&self) -> Option<u8> {
        self.binding.map(|b| b.port)
    }

    fn attached_shield(&self) -> Option<ShieldId> {
        self.binding.map(|b| b.shield)
    }

    /// Zero both coil currents and take all four drive lines low.
    fn release<D: ChannelDriver>(&mut self, driver: &mut D) -> Result<()> {
        let ch = self.bound_channels()?;
        write_duty(driver, ch.pwm_a, 0)?;
        write_digital(driver, ch.a1, Level::Low)?;
        write_digital(driver, ch.a2, Level::Low)?;
        write_duty(driver, ch.pwm_b, 0)?;
        write_digital(driver, ch.b1, Level::Low)?;
        write_digital(driver, ch.b2, Level::Low)
    }
}
