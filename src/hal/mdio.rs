//! MDIO (Management Data Input/Output) HAL
//!
//! The RTL8367C family is managed through SMI, a 16-bit register space
//! reached by tunnelling through a handful of Clause 22 MDIO registers. This
//! module defines the MDIO bus the host provides ([`MdioBus`]), the SMI
//! register interface the rest of the driver uses ([`SmiBus`]), and the
//! adapter between the two ([`MdcMdioSmi`]).

use crate::constants::{
    DEFAULT_SMI_PHY_ADDR, MDC_MDIO_ADDR_OP, MDC_MDIO_ADDRESS_REG, MDC_MDIO_CTRL0_REG,
    MDC_MDIO_CTRL1_REG, MDC_MDIO_DATA_READ_REG, MDC_MDIO_DATA_WRITE_REG, MDC_MDIO_READ_OP,
    MDC_MDIO_START_OP, MDC_MDIO_START_REG, MDC_MDIO_WRITE_OP,
};
use crate::error::{ConfigError, Result};

// =============================================================================
// MDIO Constants
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

// =============================================================================
// Bus Traits
// =============================================================================

/// Trait for MDIO bus operations
///
/// Implemented by whatever owns the MDC/MDIO pins: an EMAC's SMI block,
/// a bit-banged GPIO pair, or the bootloader's `miiphy` layer.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;
}

impl<T: MdioBus + ?Sized> MdioBus for &mut T {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        T::read(self, phy_addr, reg_addr)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        T::write(self, phy_addr, reg_addr, value)
    }
}

/// Trait for 16-bit switch register access
///
/// Everything above this layer is expressed in ASIC register addresses.
pub trait SmiBus {
    /// Read an ASIC register
    fn read_reg(&mut self, addr: u16) -> Result<u16>;

    /// Write an ASIC register
    fn write_reg(&mut self, addr: u16, value: u16) -> Result<()>;
}

impl<T: SmiBus + ?Sized> SmiBus for &mut T {
    fn read_reg(&mut self, addr: u16) -> Result<u16> {
        T::read_reg(self, addr)
    }

    fn write_reg(&mut self, addr: u16, value: u16) -> Result<()> {
        T::write_reg(self, addr, value)
    }
}

/// Validate a Clause 22 address pair
pub fn check_mdio_addr(phy_addr: u8, reg_addr: u8) -> Result<()> {
    if phy_addr > MAX_PHY_ADDR {
        return Err(ConfigError::InvalidPhyAddress.into());
    }
    if reg_addr > MAX_REG_ADDR {
        return Err(ConfigError::InvalidInput.into());
    }
    Ok(())
}

// =============================================================================
// SMI over MDC/MDIO
// =============================================================================

/// SMI access tunnelled through MDIO
///
/// Every phase of a transaction is preceded by a write of `0xFFFF` to
/// register 29. A read is: address opcode, register address, read opcode,
/// then data from register 25. A write is: address opcode, register address,
/// data into register 24, then the write opcode.
#[derive(Debug)]
pub struct MdcMdioSmi<M: MdioBus> {
    mdio: M,
    phy_addr: u8,
}

impl<M: MdioBus> MdcMdioSmi<M> {
    /// Create an SMI adapter talking to the default PHY address (0)
    pub const fn new(mdio: M) -> Self {
        Self {
            mdio,
            phy_addr: DEFAULT_SMI_PHY_ADDR,
        }
    }

    /// Create an SMI adapter talking to a specific PHY address
    pub fn with_phy_addr(mdio: M, phy_addr: u8) -> Result<Self> {
        check_mdio_addr(phy_addr, 0)?;
        Ok(Self { mdio, phy_addr })
    }

    /// PHY address used for SMI transactions
    pub fn phy_addr(&self) -> u8 {
        self.phy_addr
    }

    /// Access the underlying MDIO bus
    pub fn mdio(&self) -> &M {
        &self.mdio
    }

    /// Access the underlying MDIO bus mutably
    pub fn mdio_mut(&mut self) -> &mut M {
        &mut self.mdio
    }

    /// Give back the MDIO bus
    pub fn release(self) -> M {
        self.mdio
    }

    fn start(&mut self) -> Result<()> {
        self.mdio
            .write(self.phy_addr, MDC_MDIO_START_REG, MDC_MDIO_START_OP)
    }

    fn phase(&mut self, reg: u8, value: u16) -> Result<()> {
        self.start()?;
        self.mdio.write(self.phy_addr, reg, value)
    }
}

impl<M: MdioBus> SmiBus for MdcMdioSmi<M> {
    fn read_reg(&mut self, addr: u16) -> Result<u16> {
        self.phase(MDC_MDIO_CTRL0_REG, MDC_MDIO_ADDR_OP)?;
        self.phase(MDC_MDIO_ADDRESS_REG, addr)?;
        self.phase(MDC_MDIO_CTRL1_REG, MDC_MDIO_READ_OP)?;
        self.start()?;
        self.mdio.read(self.phy_addr, MDC_MDIO_DATA_READ_REG)
    }

    fn write_reg(&mut self, addr: u16, value: u16) -> Result<()> {
        self.phase(MDC_MDIO_CTRL0_REG, MDC_MDIO_ADDR_OP)?;
        self.phase(MDC_MDIO_ADDRESS_REG, addr)?;
        self.phase(MDC_MDIO_DATA_WRITE_REG, value)?;
        self.phase(MDC_MDIO_CTRL1_REG, MDC_MDIO_WRITE_OP)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
