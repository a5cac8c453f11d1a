//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the switch driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::HashMap;
use std::vec::Vec;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};

use crate::asic::chip::{REG_CHIP_NUMBER, REG_CHIP_VER};
use crate::asic::{
    INDIRECT_ACCESS_BUSY_BIT, INDIRECT_ACCESS_CMD, INDIRECT_ACCESS_RW_WRITE, PHY_BASE, PHY_SHIFT,
    REG_INDIRECT_ACCESS_ADDRESS, REG_INDIRECT_ACCESS_CTRL, REG_INDIRECT_ACCESS_READ_DATA,
    REG_INDIRECT_ACCESS_STATUS, REG_INDIRECT_ACCESS_WRITE_DATA,
};
use crate::constants::{
    MDC_MDIO_ADDRESS_REG, MDC_MDIO_CTRL1_REG, MDC_MDIO_DATA_READ_REG, MDC_MDIO_DATA_WRITE_REG,
    MDC_MDIO_READ_OP, MDC_MDIO_WRITE_OP,
};
use crate::error::{IoError, Result};
use crate::hal::mdio::{MdioBus, SmiBus};

/// Chip number an RTL8367C reports
pub const RTL8367C_CHIP_NUMBER: u16 = 0x6367;

// =============================================================================
// Mock SMI Register File
// =============================================================================

/// Mock ASIC register file
///
/// Behaves like an RTL8367C as far as the driver can tell: plain registers
/// read back what was written, and the indirect-access block forwards
/// commands to a bank of internal PHY registers.
///
/// # Example
///
/// ```ignore
/// let smi = MockSmi::rtl8367c();
/// smi.set_phy_register(1, 0, 0x1940);
///
/// let mut asic = Asic::new(smi);
/// assert_eq!(asic.phy_reg(1, 0).unwrap(), 0x1940);
/// ```
#[derive(Debug, Default)]
pub struct MockSmi {
    /// ASIC registers
    registers: RefCell<HashMap<u16, u16>>,
    /// Internal PHY registers: (phy, reg) -> value
    phy_registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Record of register writes: (addr, value)
    write_log: RefCell<Vec<(u16, u16)>>,
    /// Indirect-access busy flag stuck high
    indirect_busy: RefCell<bool>,
    /// Every access fails with a bus error
    failing: RefCell<bool>,
}

impl MockSmi {
    /// Create an empty register file
    pub fn new() -> Self {
        Self::default()
    }

    /// Register file with RTL8367C identification preset
    pub fn rtl8367c() -> Self {
        let smi = Self::new();
        smi.set_register(REG_CHIP_NUMBER, RTL8367C_CHIP_NUMBER);
        smi.set_register(REG_CHIP_VER, 0x2000);
        smi
    }

    /// Current value of a register (for test verification)
    pub fn register(&self, addr: u16) -> u16 {
        self.registers.borrow().get(&addr).copied().unwrap_or(0)
    }

    /// Set a register without logging a write
    pub fn set_register(&self, addr: u16, value: u16) {
        self.registers.borrow_mut().insert(addr, value);
    }

    /// Current value of an internal PHY register
    pub fn phy_register(&self, phy: u8, reg: u8) -> u16 {
        self.phy_registers
            .borrow()
            .get(&(phy, reg))
            .copied()
            .unwrap_or(0)
    }

    /// Set an internal PHY register
    pub fn set_phy_register(&self, phy: u8, reg: u8, value: u16) {
        self.phy_registers.borrow_mut().insert((phy, reg), value);
    }

    /// Keep the indirect-access busy flag set
    pub fn set_indirect_busy(&self, busy: bool) {
        *self.indirect_busy.borrow_mut() = busy;
    }

    /// Make every access fail
    pub fn set_failing(&self, failing: bool) {
        *self.failing.borrow_mut() = failing;
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u16, u16)> {
        self.write_log.borrow().clone()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    fn load(&self, addr: u16) -> u16 {
        let value = self.register(addr);
        if addr == REG_INDIRECT_ACCESS_STATUS && *self.indirect_busy.borrow() {
            return value | (1 << INDIRECT_ACCESS_BUSY_BIT);
        }
        value
    }

    fn store(&self, addr: u16, value: u16) {
        self.write_log.borrow_mut().push((addr, value));
        self.set_register(addr, value);

        if addr == REG_INDIRECT_ACCESS_CTRL && value & INDIRECT_ACCESS_CMD != 0 {
            let target = self.register(REG_INDIRECT_ACCESS_ADDRESS).wrapping_sub(PHY_BASE);
            let phy = (target >> PHY_SHIFT) as u8;
            let reg = (target & 0x1F) as u8;
            if value & INDIRECT_ACCESS_RW_WRITE != 0 {
                let data = self.register(REG_INDIRECT_ACCESS_WRITE_DATA);
                self.set_phy_register(phy, reg, data);
            } else {
                let data = self.phy_register(phy, reg);
                self.set_register(REG_INDIRECT_ACCESS_READ_DATA, data);
            }
        }
    }

    fn check(&self) -> Result<()> {
        if *self.failing.borrow() {
            return Err(IoError::BusError.into());
        }
        Ok(())
    }
}

impl SmiBus for MockSmi {
    fn read_reg(&mut self, addr: u16) -> Result<u16> {
        self.check()?;
        Ok(self.load(addr))
    }

    fn write_reg(&mut self, addr: u16, value: u16) -> Result<()> {
        self.check()?;
        self.store(addr, value);
        Ok(())
    }
}

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus with an RTL8367C answering SMI behind it
///
/// Raw MDIO registers are stored as written. A write of the read or write
/// opcode to the SMI control register performs the ASIC access addressed by
/// the address register, using a [`MockSmi`] as the register file.
///
/// # Example
///
/// ```ignore
/// let mdio = MockMdioBus::rtl8367c();
/// let mut smi = MdcMdioSmi::new(mdio);
/// assert_eq!(smi.read_reg(0x1300).unwrap(), 0x6367);
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// MDIO register values: (phy_addr, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// Switch register file behind the SMI tunnel
    asic: MockSmi,
    /// Every access fails with a bus error
    failing: RefCell<bool>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus with an empty switch behind it
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock bus with an identifiable RTL8367C behind it
    pub fn rtl8367c() -> Self {
        Self {
            asic: MockSmi::rtl8367c(),
            ..Self::default()
        }
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Switch register file
    pub fn asic(&self) -> &MockSmi {
        &self.asic
    }

    /// Current value of a switch register
    pub fn asic_register(&self, addr: u16) -> u16 {
        self.asic.register(addr)
    }

    /// Set a switch register
    pub fn set_asic_register(&self, addr: u16, value: u16) {
        self.asic.set_register(addr, value);
    }

    /// Make every access fail
    pub fn set_failing(&self, failing: bool) {
        *self.failing.borrow_mut() = failing;
    }

    fn register(&self, phy_addr: u8, reg_addr: u8) -> u16 {
        self.registers
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0)
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        if *self.failing.borrow() {
            return Err(IoError::BusError.into());
        }
        Ok(self.register(phy_addr, reg_addr))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        if *self.failing.borrow() {
            return Err(IoError::BusError.into());
        }

        // Log the write
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);

        if reg_addr == MDC_MDIO_CTRL1_REG {
            let addr = self.register(phy_addr, MDC_MDIO_ADDRESS_REG);
            match value {
                MDC_MDIO_READ_OP => {
                    let data = self.asic.load(addr);
                    self.registers
                        .borrow_mut()
                        .insert((phy_addr, MDC_MDIO_DATA_READ_REG), data);
                }
                MDC_MDIO_WRITE_OP => {
                    let data = self.register(phy_addr, MDC_MDIO_DATA_WRITE_REG);
                    self.asic.store(addr, data);
                }
                _ => {}
            }
        }
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Mock Output Pin
// =============================================================================

/// Mock GPIO output recording every level it is driven to
#[derive(Debug, Default)]
pub struct MockPin {
    /// Levels driven, oldest first (`true` = high)
    history: RefCell<Vec<bool>>,
    /// Every set call fails
    failing: bool,
}

impl MockPin {
    /// Create a working pin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pin whose every set call fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Levels driven so far
    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }

    fn drive(&self, level: bool) -> core::result::Result<(), ErrorKind> {
        if self.failing {
            return Err(ErrorKind::Other);
        }
        self.history.borrow_mut().push(level);
        Ok(())
    }
}

impl ErrorType for MockPin {
    type Error = ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(true)
    }
}

// =============================================================================
// Self-tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asic::Asic;
    use crate::hal::mdio::MdcMdioSmi;

    #[test]
    fn mock_mdio_tunnels_to_asic() {
        let mut smi = MdcMdioSmi::new(MockMdioBus::rtl8367c());
        assert_eq!(smi.read_reg(REG_CHIP_NUMBER).unwrap(), RTL8367C_CHIP_NUMBER);

        smi.write_reg(0x0A00, 0x4001).unwrap();
        assert_eq!(smi.mdio().asic_register(0x0A00), 0x4001);
    }

    #[test]
    fn mock_indirect_window_reaches_phys() {
        let mut asic = Asic::new(MdcMdioSmi::new(MockMdioBus::rtl8367c()));
        asic.bus().mdio().asic().set_phy_register(1, 0, 0x1940);

        assert_eq!(asic.phy_reg(1, 0).unwrap(), 0x1940);
        asic.set_phy_reg(1, 0, 0x1140).unwrap();
        assert_eq!(asic.bus().mdio().asic().phy_register(1, 0), 0x1140);
    }

    #[test]
    fn mock_pin_records_levels() {
        let mut pin = MockPin::new();
        pin.set_low().unwrap();
        pin.set_high().unwrap();
        assert_eq!(pin.history(), std::vec![false, true]);
    }
}
