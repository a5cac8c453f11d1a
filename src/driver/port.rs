//! External MAC and PHY power control
//!
//! Only external ports (`EXT_PORT0..2`) can be forced; asking for a UTP
//! port, or an external port the package does not bond out, fails with
//! `InvalidInput`.

use super::config::{ExtMode, MacAbility};
use super::ports::Port;
use super::switch::Switch;
use crate::error::{ConfigError, Result};
use crate::hal::mdio::SmiBus;

/// BMCR register of an internal PHY
const PHY_CONTROL_REG: u8 = 0;
/// BMCR power-down bit
const PHY_CONTROL_POWER_DOWN: u16 = 1 << 11;

impl<S: SmiBus> Switch<S> {
    fn check_ext_port(&self, port: Port) -> Result<u8> {
        match port.ext_id() {
            Some(ext_id) if self.profile().has_port(port) => Ok(ext_id),
            _ => Err(ConfigError::InvalidInput.into()),
        }
    }

    /// Select the interface mode of an external port and force its link
    pub fn mac_force_link_ext_set(&mut self, port: Port, mode: ExtMode, ability: &MacAbility) -> Result<()> {
        self.check_init()?;
        let ext_id = self.check_ext_port(port)?;

        let asic = self.asic_mut();
        asic.set_port_ext_mode(ext_id, mode.code())?;
        asic.set_port_force_link_ext(ext_id, &ability.to_force_ability())
    }

    /// Read the interface mode and forced link of an external port
    pub fn mac_force_link_ext_get(&mut self, port: Port) -> Result<(ExtMode, MacAbility)> {
        self.check_init()?;
        let ext_id = self.check_ext_port(port)?;

        let asic = self.asic_mut();
        let mode = ExtMode::from_code(asic.port_ext_mode(ext_id)?).ok_or(ConfigError::OutOfRange)?;
        let raw = asic.port_force_link_ext(ext_id)?;
        let ability = MacAbility::from_force_ability(raw).ok_or(ConfigError::OutOfRange)?;
        Ok((mode, ability))
    }

    /// Set RGMII TX delay (0 or 1, 2 ns) and RX delay step (0-7)
    pub fn rgmii_delay_ext_set(&mut self, port: Port, tx_delay: u8, rx_delay: u8) -> Result<()> {
        self.check_init()?;
        let ext_id = self.check_ext_port(port)?;
        self.asic_mut().set_port_rgmii_delay_ext(ext_id, tx_delay, rx_delay)
    }

    /// Read RGMII TX delay and RX delay step
    pub fn rgmii_delay_ext_get(&mut self, port: Port) -> Result<(u8, u8)> {
        self.check_init()?;
        let ext_id = self.check_ext_port(port)?;
        self.asic_mut().port_rgmii_delay_ext(ext_id)
    }

    /// Power every UTP PHY up or down
    ///
    /// Sets the global power-down bit, then the BMCR power-down bit of each
    /// internal PHY the package has, overriding the EN_PHY strap.
    pub fn phy_enable_all_set(&mut self, enabled: bool) -> Result<()> {
        self.check_init()?;
        self.asic_mut().set_port_enable_all(enabled)?;

        let profile = self.profile();
        for phy in profile.utp_phys() {
            let asic = self.asic_mut();
            let mut bmcr = asic.phy_reg(phy, PHY_CONTROL_REG)?;
            if enabled {
                bmcr &= !PHY_CONTROL_POWER_DOWN;
            } else {
                bmcr |= PHY_CONTROL_POWER_DOWN;
            }
            asic.set_phy_reg(phy, PHY_CONTROL_REG, bmcr).map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("PHY {} power update failed: {}", phy, e);
                #[cfg(feature = "log")]
                log::warn!("PHY {phy} power update failed: {e}");
                e
            })?;
        }
        Ok(())
    }

    /// Whether the PHYs are globally powered
    pub fn phy_enable_all_get(&mut self) -> Result<bool> {
        self.check_init()?;
        self.asic_mut().port_enable_all()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
