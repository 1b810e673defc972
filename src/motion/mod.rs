//! Motion module for motor-shield.
//!
//! Provides stepper coil sequencing and step-run execution.

mod executor;
mod sequence;

pub use executor::StepRun;
pub use sequence::{next_step, CoilCommand, Direction, MicrostepCurve, StepMode, MICROSTEPS};
