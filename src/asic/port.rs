//! Port registers
//!
//! External interfaces are addressed by an *ext id*: ext id 0 is the
//! internal CPU-side interface, ext ids 1 and 2 are the `EXT_PORT0` and
//! `EXT_PORT1` pins.

use super::Asic;
use crate::error::{ConfigError, Result};
use crate::hal::mdio::SmiBus;

// =============================================================================
// Register Map
// =============================================================================

/// Interface mode of ext ids 0 and 1, four bits each
pub const REG_DIGITAL_INTERFACE_SELECT: u16 = 0x1305;
/// Interface mode of ext id 2
pub const REG_DIGITAL_INTERFACE_SELECT_1: u16 = 0x13C3;
/// Mode field width
pub const INTERFACE_SELECT_MASK: u16 = 0x000F;
/// Distance between mode fields of consecutive ext ids
pub const INTERFACE_SELECT_SHIFT: u16 = 4;

/// RGMII delay control of ext id 0 (ext ids 1 follows it)
pub const REG_EXT0_RGMXF: u16 = 0x1306;
/// RGMII delay control of ext id 2
pub const REG_EXT2_RGMXF: u16 = 0x13C5;
/// RX delay step field
pub const RGMXF_RX_DELAY_MASK: u16 = 0x0007;
/// TX delay enable bit
pub const RGMXF_TX_DELAY_BIT: u8 = 3;

/// Force-link ability of ext id 0 (ext id 1 follows it)
pub const REG_DIGITAL_INTERFACE0_FORCE: u16 = 0x1310;
/// Force-link ability of ext id 2
pub const REG_DIGITAL_INTERFACE2_FORCE: u16 = 0x13C4;
/// Speed field
pub const FORCE_SPEED_MASK: u16 = 0x0003;
/// Full duplex
pub const FORCE_DUPLEX: u16 = 1 << 2;
/// Link up
pub const FORCE_LINK: u16 = 1 << 4;
/// RX pause
pub const FORCE_RXPAUSE: u16 = 1 << 5;
/// TX pause
pub const FORCE_TXPAUSE: u16 = 1 << 6;
/// Auto-negotiation
pub const FORCE_NWAY: u16 = 1 << 7;
/// Use forced values instead of the PHY's
pub const FORCE_MODE: u16 = 1 << 12;

/// Global PHY address/power register
pub const REG_PHY_AD: u16 = 0x130F;
/// Power down all internal PHYs
pub const PHY_AD_PDNPHY_BIT: u8 = 5;

/// Largest valid ext id
pub const MAX_EXT_ID: u8 = 2;
/// Largest RGMII TX delay setting
pub const MAX_RGMII_TX_DELAY: u8 = 1;
/// Largest RGMII RX delay step
pub const MAX_RGMII_RX_DELAY: u8 = 7;

/// Raw force-link register contents, one field per bit group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ForceAbility {
    /// Forced values take effect
    pub force_mode: bool,
    /// Speed code (0 = 10M, 1 = 100M, 2 = 1000M)
    pub speed: u8,
    /// Full duplex
    pub full_duplex: bool,
    /// Link up
    pub link: bool,
    /// Auto-negotiation
    pub nway: bool,
    /// TX pause
    pub tx_pause: bool,
    /// RX pause
    pub rx_pause: bool,
}

impl ForceAbility {
    /// Pack into the register layout
    pub fn to_reg(&self) -> u16 {
        let mut value = self.speed as u16 & FORCE_SPEED_MASK;
        for (set, bit) in [
            (self.full_duplex, FORCE_DUPLEX),
            (self.link, FORCE_LINK),
            (self.rx_pause, FORCE_RXPAUSE),
            (self.tx_pause, FORCE_TXPAUSE),
            (self.nway, FORCE_NWAY),
            (self.force_mode, FORCE_MODE),
        ] {
            if set {
                value |= bit;
            }
        }
        value
    }

    /// Unpack from the register layout
    pub fn from_reg(value: u16) -> Self {
        Self {
            force_mode: value & FORCE_MODE != 0,
            speed: (value & FORCE_SPEED_MASK) as u8,
            full_duplex: value & FORCE_DUPLEX != 0,
            link: value & FORCE_LINK != 0,
            nway: value & FORCE_NWAY != 0,
            tx_pause: value & FORCE_TXPAUSE != 0,
            rx_pause: value & FORCE_RXPAUSE != 0,
        }
    }
}

fn check_ext_id(ext_id: u8) -> Result<()> {
    if ext_id > MAX_EXT_ID {
        return Err(ConfigError::InvalidInput.into());
    }
    Ok(())
}

fn interface_select(ext_id: u8) -> (u16, u16) {
    if ext_id < 2 {
        (
            REG_DIGITAL_INTERFACE_SELECT,
            INTERFACE_SELECT_MASK << (ext_id as u16 * INTERFACE_SELECT_SHIFT),
        )
    } else {
        (REG_DIGITAL_INTERFACE_SELECT_1, INTERFACE_SELECT_MASK)
    }
}

fn force_reg(ext_id: u8) -> u16 {
    if ext_id < 2 {
        REG_DIGITAL_INTERFACE0_FORCE + ext_id as u16
    } else {
        REG_DIGITAL_INTERFACE2_FORCE
    }
}

fn rgmxf_reg(ext_id: u8) -> u16 {
    if ext_id < 2 {
        REG_EXT0_RGMXF + ext_id as u16
    } else {
        REG_EXT2_RGMXF
    }
}

impl<S: SmiBus> Asic<S> {
    /// Select the interface mode code of an external interface
    pub fn set_port_ext_mode(&mut self, ext_id: u8, mode: u16) -> Result<()> {
        check_ext_id(ext_id)?;
        let (reg, mask) = interface_select(ext_id);
        self.set_reg_bits(reg, mask, mode)
    }

    /// Read the interface mode code of an external interface
    pub fn port_ext_mode(&mut self, ext_id: u8) -> Result<u16> {
        check_ext_id(ext_id)?;
        let (reg, mask) = interface_select(ext_id);
        self.reg_bits(reg, mask)
    }

    /// Program the force-link ability of an external interface
    pub fn set_port_force_link_ext(&mut self, ext_id: u8, ability: &ForceAbility) -> Result<()> {
        check_ext_id(ext_id)?;
        if ability.speed > 2 {
            return Err(ConfigError::InvalidInput.into());
        }
        self.set_reg(force_reg(ext_id), ability.to_reg())
    }

    /// Read the force-link ability of an external interface
    pub fn port_force_link_ext(&mut self, ext_id: u8) -> Result<ForceAbility> {
        check_ext_id(ext_id)?;
        Ok(ForceAbility::from_reg(self.reg(force_reg(ext_id))?))
    }

    /// Program RGMII TX delay (0-1) and RX delay step (0-7)
    pub fn set_port_rgmii_delay_ext(&mut self, ext_id: u8, tx_delay: u8, rx_delay: u8) -> Result<()> {
        check_ext_id(ext_id)?;
        if tx_delay > MAX_RGMII_TX_DELAY || rx_delay > MAX_RGMII_RX_DELAY {
            return Err(ConfigError::OutOfRange.into());
        }
        let reg = rgmxf_reg(ext_id);
        let mut value = self.reg(reg)?;
        value &= !(RGMXF_RX_DELAY_MASK | (1 << RGMXF_TX_DELAY_BIT));
        value |= rx_delay as u16 | ((tx_delay as u16) << RGMXF_TX_DELAY_BIT);
        self.set_reg(reg, value)
    }

    /// Read RGMII TX delay and RX delay step
    pub fn port_rgmii_delay_ext(&mut self, ext_id: u8) -> Result<(u8, u8)> {
        check_ext_id(ext_id)?;
        let value = self.reg(rgmxf_reg(ext_id))?;
        let tx = ((value >> RGMXF_TX_DELAY_BIT) & 1) as u8;
        let rx = (value & RGMXF_RX_DELAY_MASK) as u8;
        Ok((tx, rx))
    }

    /// Power all internal PHYs up or down
    pub fn set_port_enable_all(&mut self, enabled: bool) -> Result<()> {
        self.set_reg_bit(REG_PHY_AD, PHY_AD_PDNPHY_BIT, !enabled)
    }

    /// Whether internal PHYs are powered
    pub fn port_enable_all(&mut self) -> Result<bool> {
        Ok(!self.reg_bit(REG_PHY_AD, PHY_AD_PDNPHY_BIT)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::test_utils::MockSmi;

    #[test]
    fn force_ability_bit_layout() {
        let ability = ForceAbility {
            force_mode: true,
            speed: 2,
            full_duplex: true,
            link: true,
            nway: false,
            tx_pause: true,
            rx_pause: true,
        };
        assert_eq!(ability.to_reg(), 0x1076);
        assert_eq!(ForceAbility::from_reg(0x1076), ability);
        assert_eq!(ForceAbility::default().to_reg(), 0);
    }

    #[test]
    fn ext_mode_fields_do_not_overlap() {
        let mut asic = Asic::new(MockSmi::new());

        asic.set_port_ext_mode(0, 0x3).unwrap();
        asic.set_port_ext_mode(1, 0x1).unwrap();
        asic.set_port_ext_mode(2, 0x7).unwrap();

        assert_eq!(asic.bus().register(REG_DIGITAL_INTERFACE_SELECT), 0x0013);
        assert_eq!(asic.bus().register(REG_DIGITAL_INTERFACE_SELECT_1), 0x0007);
        assert_eq!(asic.port_ext_mode(1).unwrap(), 0x1);
    }

    #[test]
    fn ext_id_out_of_range() {
        let mut asic = Asic::new(MockSmi::new());
        assert_eq!(asic.set_port_ext_mode(3, 1), Err(Error::Config(ConfigError::InvalidInput)));
        assert_eq!(asic.port_force_link_ext(3), Err(Error::Config(ConfigError::InvalidInput)));
    }

    #[test]
    fn force_link_targets_per_ext_register() {
        let mut asic = Asic::new(MockSmi::new());
        let ability = ForceAbility {
            force_mode: true,
            speed: 1,
            full_duplex: true,
            link: true,
            ..ForceAbility::default()
        };

        asic.set_port_force_link_ext(1, &ability).unwrap();
        assert_eq!(asic.bus().register(0x1311), ability.to_reg());

        asic.set_port_force_link_ext(2, &ability).unwrap();
        assert_eq!(asic.bus().register(0x13C4), ability.to_reg());
        assert_eq!(asic.port_force_link_ext(2).unwrap(), ability);
    }

    #[test]
    fn force_link_rejects_unknown_speed() {
        let mut asic = Asic::new(MockSmi::new());
        let ability = ForceAbility {
            speed: 3,
            ..ForceAbility::default()
        };
        assert_eq!(
            asic.set_port_force_link_ext(1, &ability),
            Err(Error::Config(ConfigError::InvalidInput))
        );
    }

    #[test]
    fn rgmii_delay_preserves_unrelated_bits() {
        let mut asic = Asic::new(MockSmi::new());
        asic.bus().set_register(0x1307, 0xFF00);

        asic.set_port_rgmii_delay_ext(1, 1, 2).unwrap();

        assert_eq!(asic.bus().register(0x1307), 0xFF0A);
        assert_eq!(asic.port_rgmii_delay_ext(1).unwrap(), (1, 2));
    }

    #[test]
    fn rgmii_delay_bounds() {
        let mut asic = Asic::new(MockSmi::new());
        assert!(asic.set_port_rgmii_delay_ext(1, 2, 0).is_err());
        assert!(asic.set_port_rgmii_delay_ext(1, 0, 8).is_err());
        assert!(asic.set_port_rgmii_delay_ext(1, 1, 7).is_ok());
    }

    #[test]
    fn enable_all_drives_power_down_bit() {
        let mut asic = Asic::new(MockSmi::new());

        asic.set_port_enable_all(false).unwrap();
        assert_eq!(asic.bus().register(REG_PHY_AD), 1 << 5);
        assert!(!asic.port_enable_all().unwrap());

        asic.set_port_enable_all(true).unwrap();
        assert_eq!(asic.bus().register(REG_PHY_AD), 0);
        assert!(asic.port_enable_all().unwrap());
    }
}
