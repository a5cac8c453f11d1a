//! Chip identification
//!
//! The chip number and version registers only read back correctly while the
//! access-unlock register holds the magic value, so detection is an
//! unlock / read / read / lock sequence.

use super::Asic;
use crate::error::Result;
use crate::hal::mdio::SmiBus;

/// Chip number register
pub const REG_CHIP_NUMBER: u16 = 0x1300;
/// Chip version register
pub const REG_CHIP_VER: u16 = 0x1301;
/// Version field inside [`REG_CHIP_VER`]
pub const CHIP_VER_MASK: u16 = 0xF000;
/// Register gating access to the identification block
pub const REG_CHIP_ACCESS_UNLOCK: u16 = 0x13C2;
/// Value that opens the identification block
pub const CHIP_ACCESS_UNLOCK_MAGIC: u16 = 0x0249;

/// Silicon family reported by the chip number register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipFamily {
    /// RTL8367C and its package variants (RTL8363NB, RTL8365MB, RTL8367RB-VB, ...)
    Rtl8367c,
    /// RTL8370B
    Rtl8370b,
    /// RTL8364B / RTL8363SC-VB
    Rtl8364b,
    /// Anything else
    Unknown,
}

/// Raw chip identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipId {
    /// Value of the chip number register
    pub number: u16,
    /// Silicon revision (version field of the version register)
    pub version: u8,
}

impl ChipId {
    /// Family this chip number belongs to
    pub const fn family(&self) -> ChipFamily {
        match self.number {
            0x0276 | 0x0597 | 0x6367 => ChipFamily::Rtl8367c,
            0x0652 | 0x6368 => ChipFamily::Rtl8370b,
            0x0801 | 0x6511 => ChipFamily::Rtl8364b,
            _ => ChipFamily::Unknown,
        }
    }
}

impl<S: SmiBus> Asic<S> {
    /// Read chip number and version
    pub fn chip_id(&mut self) -> Result<ChipId> {
        self.set_reg(REG_CHIP_ACCESS_UNLOCK, CHIP_ACCESS_UNLOCK_MAGIC)?;
        let number = self.reg(REG_CHIP_NUMBER);
        let version = self.reg_bits(REG_CHIP_VER, CHIP_VER_MASK);
        // Relock even when a read failed
        self.set_reg(REG_CHIP_ACCESS_UNLOCK, 0)?;

        Ok(ChipId {
            number: number?,
            version: version? as u8,
        })
    }
}
