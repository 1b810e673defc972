//! Coil energization sequences for two-coil stepper motors.
//!
//! A step index walks a fixed table of "latch" patterns. Each bit of a latch
//! asserts one coil-half drive line:
//!
//! | bit   | line      |
//! |-------|-----------|
//! | `0x1` | coil A, 2 |
//! | `0x2` | coil B, 1 |
//! | `0x4` | coil A, 1 |
//! | `0x8` | coil B, 2 |

use serde::Deserialize;

/// Stepping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepMode {
    /// Full steps, four-state table.
    #[default]
    Single,
    /// Full steps, same table as `Single` (drive current differs electrically).
    Double,
    /// Half steps, alternating one and two energized coils.
    Interleave,
    /// Sine-weighted micro-steps between full steps.
    Microstep,
}

/// Direction of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Advance the step index.
    Forward,
    /// Retreat the step index.
    Backward,
}

impl Direction {
    /// Forward for positive step counts, backward otherwise.
    #[inline]
    pub fn from_steps(steps: i32) -> Self {
        if steps > 0 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Quarter-sine duty ramp used for micro-stepping.
///
/// Holds `resolution + 1` ascending entries from 0 to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicrostepCurve(&'static [u8]);

impl MicrostepCurve {
    /// 8 micro-steps per full step.
    pub const EIGHTH: Self = Self(&[0, 50, 98, 142, 180, 212, 236, 250, 255]);

    /// 16 micro-steps per full step.
    pub const SIXTEENTH: Self = Self(&[
        0, 25, 50, 74, 98, 120, 141, 162, 180, 197, 212, 225, 236, 244, 250, 253, 255,
    ]);

    /// Curve selected at build time (`microstep-16` feature).
    #[cfg(not(feature = "microstep-16"))]
    pub const DEFAULT: Self = Self::EIGHTH;

    /// Curve selected at build time (`microstep-16` feature).
    #[cfg(feature = "microstep-16")]
    pub const DEFAULT: Self = Self::SIXTEENTH;

    /// Micro-steps per full step.
    #[inline]
    pub const fn resolution(self) -> u8 {
        (self.0.len() - 1) as u8
    }

    /// Raw duty table.
    #[inline]
    pub const fn values(self) -> &'static [u8] {
        self.0
    }

    #[inline]
    fn at(self, i: u8) -> u8 {
        self.0[i as usize]
    }
}

/// Micro-steps per full step for this build.
pub const MICROSTEPS: u8 = MicrostepCurve::DEFAULT.resolution();

const FULL_STEP_LATCH: [u8; 4] = [0x3, 0x6, 0xC, 0x9];

const HALF_STEP_LATCH: [u8; 8] = [0x1, 0x3, 0x2, 0x6, 0x4, 0xC, 0x8, 0x9];

/// Coil drive produced by one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilCommand {
    /// Coil A current, 0-255.
    pub pwm_a: u8,
    /// Coil B current, 0-255.
    pub pwm_b: u8,
    /// Asserted drive lines (see module docs).
    pub latch: u8,
}

impl StepMode {
    /// Number of step indices before the coil pattern repeats.
    #[inline]
    pub fn cycle_len(self, curve: MicrostepCurve) -> u8 {
        match self {
            StepMode::Single | StepMode::Double => 4,
            StepMode::Interleave => 8,
            StepMode::Microstep => curve.resolution() * 4,
        }
    }
}

/// Advance a step index one position and return the new index and coil drive.
///
/// The index is taken modulo the mode's cycle length first, so an index left
/// over from a longer-cycle mode is folded into range.
pub fn next_step(
    mode: StepMode,
    index: u8,
    direction: Direction,
    curve: MicrostepCurve,
) -> (u8, CoilCommand) {
    let len = mode.cycle_len(curve);
    let index = index % len;
    let next = match direction {
        Direction::Forward => (index + 1) % len,
        Direction::Backward => (index + len - 1) % len,
    };

    let command = match mode {
        StepMode::Single | StepMode::Double => CoilCommand {
            pwm_a: 255,
            pwm_b: 255,
            latch: FULL_STEP_LATCH[next as usize],
        },
        StepMode::Interleave => CoilCommand {
            pwm_a: 255,
            pwm_b: 255,
            latch: HALF_STEP_LATCH[next as usize],
        },
        StepMode::Microstep => {
            let res = curve.resolution();
            let phase = next / res;
            let micro = next % res;
            // Even phases ramp coil A down while B ramps up; odd phases swap.
            let (pwm_a, pwm_b) = if phase % 2 == 0 {
                (curve.at(res - micro), curve.at(micro))
            } else {
                (curve.at(micro), curve.at(res - micro))
            };
            CoilCommand {
                pwm_a,
                pwm_b,
                latch: FULL_STEP_LATCH[phase as usize],
            }
        }
    };

    (next, command)
}
