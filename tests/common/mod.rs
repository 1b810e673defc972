//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use motor_shield::{ChannelDriver, Level};

/// One write observed by [`RecordingDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Write {
    Duty(u8, u16),
    Digital(u8, Level),
}

/// Bus error raised once the driver's write budget is spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusError;

/// Channel driver that records every write, optionally failing after a
/// fixed number of writes.
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub writes: Vec<Write>,
    pub frequency: Option<u16>,
    pub fail_after: Option<usize>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::default()
        }
    }

    pub fn take(&mut self) -> Vec<Write> {
        std::mem::take(&mut self.writes)
    }

    fn record(&mut self, write: Write) -> Result<(), BusError> {
        if self.fail_after.is_some_and(|n| self.writes.len() >= n) {
            return Err(BusError);
        }
        self.writes.push(write);
        Ok(())
    }
}

impl ChannelDriver for RecordingDriver {
    type Error = BusError;

    fn set_duty_cycle(&mut self, channel: u8, value: u16) -> Result<(), BusError> {
        self.record(Write::Duty(channel, value))
    }

    fn set_digital(&mut self, channel: u8, level: Level) -> Result<(), BusError> {
        self.record(Write::Digital(channel, level))
    }

    fn set_frequency(&mut self, hz: u16) -> Result<(), BusError> {
        self.frequency = Some(hz);
        Ok(())
    }
}

/// Delay provider that only adds up the requested time.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub total_us: u64,
    pub calls: usize,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_us += ns as u64 / 1000;
        self.calls += 1;
    }

    fn delay_us(&mut self, us: u32) {
        self.total_us += us as u64;
        self.calls += 1;
    }
}

/// Latch pattern asserted by one stepper coil command.
pub fn latch_of(writes: &[Write], a2: u8, b1: u8, a1: u8, b2: u8) -> u8 {
    writes.iter().fold(0, |latch, w| match *w {
        Write::Digital(pin, Level::High) if pin == a2 => latch | 0x1,
        Write::Digital(pin, Level::High) if pin == b1 => latch | 0x2,
        Write::Digital(pin, Level::High) if pin == a1 => latch | 0x4,
        Write::Digital(pin, Level::High) if pin == b2 => latch | 0x8,
        _ => latch,
    })
}
