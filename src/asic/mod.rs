//! RTL8367C register layer
//!
//! [`Asic`] wraps an [`SmiBus`] and provides the read/modify/write helpers the
//! rest of the driver is written in terms of: whole registers, single bits,
//! masked fields, and the indirect window onto the internal PHYs.
//!
//! Feature blocks add their own `impl Asic` in submodules:
//!
//! - [`chip`]: chip number/version detection
//! - [`rldp`]: loop detection registers
//! - [`port`]: external interface mode, force-link, RGMII delay, PHY power
//!
//! Nothing here checks whether the switch has been initialized or whether a
//! port exists on the chip; that is the job of [`crate::driver::Switch`].

pub mod chip;
pub mod port;
pub mod rldp;

use crate::constants::{INDIRECT_ACCESS_POLLS, MAX_INTERNAL_PHY};
use crate::error::{ConfigError, IoError, Result};
use crate::hal::mdio::{MAX_REG_ADDR, SmiBus};

// =============================================================================
// Indirect PHY Access Registers
// =============================================================================

/// Indirect access command register
pub const REG_INDIRECT_ACCESS_CTRL: u16 = 0x1F00;
/// Indirect access status register
pub const REG_INDIRECT_ACCESS_STATUS: u16 = 0x1F01;
/// Indirect access target address
pub const REG_INDIRECT_ACCESS_ADDRESS: u16 = 0x1F02;
/// Indirect access write data
pub const REG_INDIRECT_ACCESS_WRITE_DATA: u16 = 0x1F03;
/// Indirect access read data
pub const REG_INDIRECT_ACCESS_READ_DATA: u16 = 0x1F04;

/// Busy flag in the status register
pub const INDIRECT_ACCESS_BUSY_BIT: u8 = 2;
/// Command bit: start access
pub const INDIRECT_ACCESS_CMD: u16 = 1 << 0;
/// Command bit: write (clear for read)
pub const INDIRECT_ACCESS_RW_WRITE: u16 = 1 << 1;

/// Base of the internal PHY register window
pub const PHY_BASE: u16 = 0x2000;
/// Shift applied to the PHY number inside the window
pub const PHY_SHIFT: u16 = 5;

/// Indirect address for `reg` of internal PHY `phy`
pub const fn phy_window_addr(phy: u8, reg: u8) -> u16 {
    PHY_BASE + ((phy as u16) << PHY_SHIFT) + reg as u16
}

// =============================================================================
// Register Access
// =============================================================================

/// Register-level access to an RTL8367C-family switch
#[derive(Debug)]
pub struct Asic<S: SmiBus> {
    bus: S,
}

impl<S: SmiBus> Asic<S> {
    /// Wrap an SMI bus
    pub const fn new(bus: S) -> Self {
        Self { bus }
    }

    /// Access the underlying bus
    pub fn bus(&self) -> &S {
        &self.bus
    }

    /// Access the underlying bus mutably
    pub fn bus_mut(&mut self) -> &mut S {
        &mut self.bus
    }

    /// Give back the bus
    pub fn release(self) -> S {
        self.bus
    }

    /// Read a register
    #[inline]
    pub fn reg(&mut self, addr: u16) -> Result<u16> {
        self.bus.read_reg(addr)
    }

    /// Write a register
    #[inline]
    pub fn set_reg(&mut self, addr: u16, value: u16) -> Result<()> {
        self.bus.write_reg(addr, value)
    }

    /// Read one bit of a register
    pub fn reg_bit(&mut self, addr: u16, bit: u8) -> Result<bool> {
        check_bit(bit)?;
        Ok(self.reg(addr)? & (1 << bit) != 0)
    }

    /// Set or clear one bit of a register
    pub fn set_reg_bit(&mut self, addr: u16, bit: u8, set: bool) -> Result<()> {
        check_bit(bit)?;
        let mut value = self.reg(addr)?;
        if set {
            value |= 1 << bit;
        } else {
            value &= !(1 << bit);
        }
        self.set_reg(addr, value)
    }

    /// Read the field selected by `mask`, shifted down to bit 0
    pub fn reg_bits(&mut self, addr: u16, mask: u16) -> Result<u16> {
        let shift = mask_shift(mask)?;
        Ok((self.reg(addr)? & mask) >> shift)
    }

    /// Write `value` into the field selected by `mask`
    ///
    /// Fails with `InvalidInput` when `value` is wider than the field.
    pub fn set_reg_bits(&mut self, addr: u16, mask: u16, value: u16) -> Result<()> {
        let shift = mask_shift(mask)?;
        if value > (mask >> shift) {
            return Err(ConfigError::InvalidInput.into());
        }
        let current = self.reg(addr)?;
        self.set_reg(addr, (current & !mask) | (value << shift))
    }

    // =========================================================================
    // Internal PHY Access
    // =========================================================================

    fn wait_indirect_idle(&mut self) -> Result<()> {
        for _ in 0..INDIRECT_ACCESS_POLLS {
            if !self.reg_bit(REG_INDIRECT_ACCESS_STATUS, INDIRECT_ACCESS_BUSY_BIT)? {
                return Ok(());
            }
        }
        Err(IoError::Timeout.into())
    }

    /// Read a Clause 22 register of an internal PHY
    pub fn phy_reg(&mut self, phy: u8, reg: u8) -> Result<u16> {
        check_phy(phy, reg)?;
        self.wait_indirect_idle()?;
        self.set_reg(REG_INDIRECT_ACCESS_ADDRESS, phy_window_addr(phy, reg))?;
        self.set_reg(REG_INDIRECT_ACCESS_CTRL, INDIRECT_ACCESS_CMD)?;
        self.wait_indirect_idle()?;
        self.reg(REG_INDIRECT_ACCESS_READ_DATA)
    }

    /// Write a Clause 22 register of an internal PHY
    pub fn set_phy_reg(&mut self, phy: u8, reg: u8, value: u16) -> Result<()> {
        check_phy(phy, reg)?;
        self.wait_indirect_idle()?;
        self.set_reg(REG_INDIRECT_ACCESS_WRITE_DATA, value)?;
        self.set_reg(REG_INDIRECT_ACCESS_ADDRESS, phy_window_addr(phy, reg))?;
        self.set_reg(
            REG_INDIRECT_ACCESS_CTRL,
            INDIRECT_ACCESS_CMD | INDIRECT_ACCESS_RW_WRITE,
        )?;
        self.wait_indirect_idle()
    }
}

fn check_bit(bit: u8) -> Result<()> {
    if bit > 15 {
        return Err(ConfigError::InvalidInput.into());
    }
    Ok(())
}

fn mask_shift(mask: u16) -> Result<u32> {
    if mask == 0 {
        return Err(ConfigError::InvalidInput.into());
    }
    Ok(mask.trailing_zeros())
}

fn check_phy(phy: u8, reg: u8) -> Result<()> {
    if phy > MAX_INTERNAL_PHY {
        return Err(ConfigError::InvalidPhyAddress.into());
    }
    if reg > MAX_REG_ADDR {
        return Err(ConfigError::InvalidInput.into());
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
