//! Unit test harness for motor-shield.
//!
//! This module organizes configuration tests against the public API.

mod config_parsing;
mod config_validation;
