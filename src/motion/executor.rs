//! Step-run execution state.

use super::sequence::{Direction, MicrostepCurve, StepMode};

/// Runtime state of a bounded stepper run.
///
/// Created by [`StepperMotor::begin_run`](crate::motor::StepperMotor::begin_run).
/// Each call to `StepperMotor::advance` issues one coil command and consumes
/// one step; the caller waits [`interval_us`](Self::interval_us) between
/// calls. Blocking runs drive this in a loop, cooperative callers can yield
/// between steps.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepRun {
    /// Step mode for the whole run.
    mode: StepMode,

    /// Direction for the whole run.
    direction: Direction,

    /// Coil commands issued so far.
    issued: u32,

    /// Total coil commands in this run.
    total: u32,

    /// Wait between coil commands in microseconds.
    interval_us: u32,
}

impl StepRun {
    /// Plan a run of `steps` (signed) at `us_per_step` per full step.
    ///
    /// Interleave mode keeps the count (the caller counts half-steps) but
    /// halves the interval. Microstep mode multiplies the count and divides
    /// the interval by the curve's resolution, so the run covers the
    /// requested full-step distance.
    pub fn new(steps: i32, mode: StepMode, us_per_step: u32, curve: MicrostepCurve) -> Self {
        let direction = Direction::from_steps(steps);
        let mut total = steps.unsigned_abs();
        let mut interval_us = us_per_step;

        match mode {
            StepMode::Interleave => interval_us /= 2,
            StepMode::Microstep => {
                let res = curve.resolution() as u32;
                interval_us /= res;
                total = total.saturating_mul(res);
            }
            StepMode::Single | StepMode::Double => {}
        }

        Self {
            mode,
            direction,
            issued: 0,
            total,
            interval_us,
        }
    }

    /// Check if the run is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.issued >= self.total
    }

    /// Step mode of the run.
    #[inline]
    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Direction of the run.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Total coil commands in the run.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total
    }

    /// Coil commands still to issue.
    #[inline]
    pub fn steps_remaining(&self) -> u32 {
        self.total.saturating_sub(self.issued)
    }

    /// Wait between coil commands in microseconds.
    #[inline]
    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }

    /// Count one issued step.
    ///
    /// Returns `false` when the run was already complete.
    pub(crate) fn consume(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.issued += 1;
        true
    }

    /// Get progress (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.issued as f32 / self.total as f32
        }
    }
}
