//! Lock-protected switch handle.
//!
//! The Realtek API serializes every call behind one global lock so that a
//! multi-register sequence (for example the TX portmask retrigger in
//! `rldp_config_set`) is never interleaved with another caller's register
//! traffic. [`SharedSwitch`] provides that lock with a critical section.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::driver::ports::{Port, PortMask};
use crate::driver::rldp::{RldpConfig, RldpPortConfig, RldpPortStatus, RldpStatus};
use crate::driver::switch::Switch;
use crate::error::Result;
use crate::hal::mdio::SmiBus;

/// Switch handle shared between contexts.
///
/// All access goes through `critical_section::with()`; interrupts are
/// disabled while the closure (or the wrapped API call) runs, so keep bus
/// transactions short.
///
/// # Example
///
/// ```ignore
/// static SWITCH: SharedSwitch<MdcMdioSmi<MyMdio>> =
///     SharedSwitch::new(Switch::new(MdcMdioSmi::new(MyMdio::new()), &ChipProfile::RTL8363NB));
///
/// SWITCH.init()?;
/// SWITCH.rldp_config_set(&config)?;
/// ```
pub struct SharedSwitch<S: SmiBus> {
    inner: Mutex<RefCell<Switch<S>>>,
}

impl<S: SmiBus> SharedSwitch<S> {
    /// Wrap a switch (const, suitable for static initialization).
    pub const fn new(switch: Switch<S>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(switch)),
        }
    }

    /// Execute a closure with exclusive access to the switch.
    ///
    /// # Panics
    ///
    /// Panics if called from inside another `with` on the same handle.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Switch<S>) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Switch<S>) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut switch| f(&mut switch))
        })
    }

    /// Take the switch back out
    pub fn into_inner(self) -> Switch<S> {
        self.inner.into_inner().into_inner()
    }

    /// [`Switch::init`] under the lock
    pub fn init(&self) -> Result<()> {
        self.with(Switch::init)
    }

    /// [`Switch::is_initialized`] under the lock
    pub fn is_initialized(&self) -> bool {
        self.with(|switch| switch.is_initialized())
    }

    // =========================================================================
    // RLDP
    // =========================================================================

    /// [`Switch::rldp_config_set`] under the lock
    pub fn rldp_config_set(&self, config: &RldpConfig) -> Result<()> {
        self.with(|switch| switch.rldp_config_set(config))
    }

    /// [`Switch::rldp_config_get`] under the lock
    pub fn rldp_config_get(&self) -> Result<RldpConfig> {
        self.with(Switch::rldp_config_get)
    }

    /// [`Switch::rldp_port_config_set`] under the lock
    pub fn rldp_port_config_set(&self, port: Port, config: &RldpPortConfig) -> Result<()> {
        self.with(|switch| switch.rldp_port_config_set(port, config))
    }

    /// [`Switch::rldp_port_config_get`] under the lock
    pub fn rldp_port_config_get(&self, port: Port) -> Result<RldpPortConfig> {
        self.with(|switch| switch.rldp_port_config_get(port))
    }

    /// [`Switch::rldp_status_get`] under the lock
    pub fn rldp_status_get(&self) -> Result<RldpStatus> {
        self.with(Switch::rldp_status_get)
    }

    /// [`Switch::rldp_port_status_get`] under the lock
    pub fn rldp_port_status_get(&self, port: Port) -> Result<RldpPortStatus> {
        self.with(|switch| switch.rldp_port_status_get(port))
    }

    /// [`Switch::rldp_port_status_set`] under the lock
    pub fn rldp_port_status_set(&self, port: Port, status: &RldpPortStatus) -> Result<()> {
        self.with(|switch| switch.rldp_port_status_set(port, status))
    }

    /// [`Switch::rldp_port_loop_pair_get`] under the lock
    pub fn rldp_port_loop_pair_get(&self, port: Port) -> Result<PortMask> {
        self.with(|switch| switch.rldp_port_loop_pair_get(port))
    }
}

impl<S: SmiBus> From<Switch<S>> for SharedSwitch<S> {
    fn from(switch: Switch<S>) -> Self {
        Self::new(switch)
    }
}
