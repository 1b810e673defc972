//! Port allocation for motors sharing the shield's drive channels.
//!
//! Each of the four H-bridge ports has one bit in the allocation table. A bit
//! is set exactly while one attached motor references that port. DC motors
//! claim one bit, steppers claim two.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::channel::{ChannelDriver, DcChannels, StepperChannels};
use crate::error::Result;
use crate::motor::private::Sealed;
use crate::motor::Attachable;

/// Identity of one shield instance.
///
/// Two shields at the same bus address still get distinct ids, so neither
/// can drive or detach the other's motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShieldId {
    address: u8,
    instance: u32,
}

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(0);

impl ShieldId {
    /// Fresh id for a shield at `address`.
    pub(crate) fn allocate(address: u8) -> Self {
        Self {
            address,
            instance: NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Bus address of the shield.
    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }
}

/// A motor's binding to a shield port.
///
/// An unbound motor holds no `Binding` at all; that is the unbound sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<C> {
    /// Shield the motor is attached to.
    pub shield: ShieldId,
    /// Port (motor slot) number on that shield.
    pub port: u8,
    /// Fixed channel map for that port.
    pub channels: C,
}

impl Binding<DcChannels> {
    /// Binding for DC port `port`, or `None` if out of range.
    pub fn dc(shield: ShieldId, port: u8) -> Option<Self> {
        DcChannels::for_port(port).map(|channels| Self { shield, port, channels })
    }
}

impl Binding<StepperChannels> {
    /// Binding for stepper port `port`, or `None` if out of range.
    pub fn stepper(shield: ShieldId, port: u8) -> Option<Self> {
        StepperChannels::for_port(port).map(|channels| Self { shield, port, channels })
    }
}

/// Bitmask of in-use ports (low 4 bits).
///
/// Binding motors to ports is reserved to the shields:
///
/// ```compile_fail
/// use motor_shield::{DcMotor, PortAllocator, ShieldId};
///
/// fn bind_behind_the_shields_back(id: ShieldId) {
///     let mut motor = DcMotor::new();
///     PortAllocator::new().attach(id, &mut motor, 0);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortAllocator {
    ports: u8,
}

impl PortAllocator {
    /// Create an allocator with every port free.
    pub const fn new() -> Self {
        Self { ports: 0 }
    }

    /// Currently allocated bits.
    #[inline]
    pub fn in_use(&self) -> u8 {
        self.ports
    }

    /// True when none of `mask`'s bits are allocated.
    #[inline]
    pub fn is_free(&self, mask: u8) -> bool {
        self.ports & mask == 0
    }

    /// Claim every bit of `mask`, all or nothing.
    ///
    /// Returns `false` and leaves the table unchanged if any bit is taken.
    pub fn claim(&mut self, mask: u8) -> bool {
        if !self.is_free(mask) {
            return false;
        }
        self.ports |= mask;
        true
    }

    /// Free every bit of `mask`.
    pub fn release(&mut self, mask: u8) {
        self.ports &= !mask;
    }

    /// Attach `motor` to `port` on `shield`.
    ///
    /// Fails, changing nothing, when `port` is out of range, the motor is
    /// already attached anywhere, or any of the port's bits are taken.
    pub(crate) fn attach<M: Attachable>(&mut self, shield: ShieldId, motor: &mut M, port: u8) -> bool {
        let Some(mask) = M::port_mask(port) else {
            warn!("attach: port {} out of range", port);
            return false;
        };
        if motor.is_attached() {
            warn!("attach: motor already attached to port {}", motor.attached_port());
            return false;
        }
        if !self.claim(mask) {
            warn!("attach: port {} in use ({=u8:#b})", port, self.ports);
            return false;
        }
        let bound = motor.bind(shield, port);
        debug_assert!(bound);
        info!("attached port {} ({=u8:#b})", port, self.ports);
        true
    }

    /// Release `motor`'s drive and detach it from `shield`.
    ///
    /// A motor not attached to `shield` is left alone. The pins are released
    /// before the binding is cleared; if that write fails the motor stays
    /// attached.
    pub(crate) fn detach<M, D>(&mut self, shield: ShieldId, motor: &mut M, driver: &mut D) -> Result<()>
    where
        M: Attachable,
        D: ChannelDriver,
    {
        if !motor.is_attached_to(shield) {
            return Ok(());
        }
        let port = motor.attached_port();

        motor.release(driver)?;
        if let Some(mask) = port.and_then(M::port_mask) {
            self.release(mask);
        }
        motor.unbind();
        info!("detached port {} ({=u8:#b})", port, self.ports);
        Ok(())
    }

    /// Undo an attach without touching any pin.
    ///
    /// Used when a write right after attaching fails, so the failed attach
    /// leaves no claimed port behind.
    pub(crate) fn forget<M: Attachable>(&mut self, shield: ShieldId, motor: &mut M) {
        if !motor.is_attached_to(shield) {
            return;
        }
        if let Some(mask) = motor.attached_port().and_then(M::port_mask) {
            self.release(mask);
        }
        motor.unbind();
    }
}
