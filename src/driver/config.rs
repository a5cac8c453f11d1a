//! Configuration types for the switch driver

use super::ports::{ChipProfile, Port};
use crate::asic::port::ForceAbility;
use crate::constants::{DEFAULT_SMI_PHY_ADDR, GPIO_ASSERT_MS, GPIO_RECOVERY_MS, SWITCH_SETTLE_MS};
use crate::hal::reset::PulseTiming;

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Speed {
    /// 10 Mbps
    Mbps10 = 0,
    /// 100 Mbps
    Mbps100 = 1,
    /// 1000 Mbps
    #[default]
    Mbps1000 = 2,
}

impl Speed {
    /// Register encoding
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode a register speed field
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Speed::Mbps10),
            1 => Some(Speed::Mbps100),
            2 => Some(Speed::Mbps1000),
            _ => None,
        }
    }
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// Interface mode of an external MAC port
///
/// Discriminants are the values the interface select field takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ExtMode {
    /// Interface disabled
    Disable = 0,
    /// RGMII
    #[default]
    Rgmii = 1,
    /// MII, switch side acts as MAC
    MiiMac = 2,
    /// MII, switch side acts as PHY
    MiiPhy = 3,
    /// Turbo MII, MAC side
    TmiiMac = 4,
    /// Turbo MII, PHY side
    TmiiPhy = 5,
    /// GMII
    Gmii = 6,
    /// RMII, MAC side
    RmiiMac = 7,
    /// RMII, PHY side
    RmiiPhy = 8,
}

impl ExtMode {
    /// Register encoding
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Decode an interface select field
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0 => ExtMode::Disable,
            1 => ExtMode::Rgmii,
            2 => ExtMode::MiiMac,
            3 => ExtMode::MiiPhy,
            4 => ExtMode::TmiiMac,
            5 => ExtMode::TmiiPhy,
            6 => ExtMode::Gmii,
            7 => ExtMode::RmiiMac,
            8 => ExtMode::RmiiPhy,
            _ => return None,
        })
    }
}

/// Forced link parameters of an external MAC port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAbility {
    /// Use these values instead of auto-negotiation results
    pub force_mode: bool,
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
    /// Link up
    pub link: bool,
    /// Auto-negotiation
    pub nway: bool,
    /// Transmit pause frames
    pub tx_pause: bool,
    /// Honor received pause frames
    pub rx_pause: bool,
}

impl Default for MacAbility {
    fn default() -> Self {
        Self::forced(Speed::Mbps1000, Duplex::Full).with_pause(true)
    }
}

impl MacAbility {
    /// Forced link up at the given speed and duplex, pause off, nway off
    #[must_use]
    pub const fn forced(speed: Speed, duplex: Duplex) -> Self {
        Self {
            force_mode: true,
            speed,
            duplex,
            link: true,
            nway: false,
            tx_pause: false,
            rx_pause: false,
        }
    }

    /// Enable or disable both pause directions
    #[must_use]
    pub const fn with_pause(mut self, enabled: bool) -> Self {
        self.tx_pause = enabled;
        self.rx_pause = enabled;
        self
    }

    /// Set link state
    #[must_use]
    pub const fn with_link(mut self, up: bool) -> Self {
        self.link = up;
        self
    }

    pub(crate) fn to_force_ability(self) -> ForceAbility {
        ForceAbility {
            force_mode: self.force_mode,
            speed: self.speed.code(),
            full_duplex: self.duplex == Duplex::Full,
            link: self.link,
            nway: self.nway,
            tx_pause: self.tx_pause,
            rx_pause: self.rx_pause,
        }
    }

    pub(crate) fn from_force_ability(raw: ForceAbility) -> Option<Self> {
        Some(Self {
            force_mode: raw.force_mode,
            speed: Speed::from_code(raw.speed)?,
            duplex: if raw.full_duplex { Duplex::Full } else { Duplex::Half },
            link: raw.link,
            nway: raw.nway,
            tx_pause: raw.tx_pause,
            rx_pause: raw.rx_pause,
        })
    }
}

/// How the host MAC is wired to the switch's uplink port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UplinkMode {
    /// RGMII at 1000M full duplex with pause
    #[default]
    Rgmii,
    /// MII at 100M full duplex; PHYs enabled regardless of the EN_PHY strap
    Mii,
    /// RMII at 100M full duplex; PHYs left to the strap
    Rmii,
}

impl UplinkMode {
    /// Interface mode programmed on the uplink port
    pub const fn ext_mode(self) -> ExtMode {
        match self {
            UplinkMode::Rgmii => ExtMode::Rgmii,
            UplinkMode::Mii => ExtMode::MiiMac,
            UplinkMode::Rmii => ExtMode::RmiiMac,
        }
    }

    /// Forced ability for this wiring
    pub const fn default_ability(self) -> MacAbility {
        match self {
            UplinkMode::Rgmii => MacAbility::forced(Speed::Mbps1000, Duplex::Full).with_pause(true),
            UplinkMode::Mii | UplinkMode::Rmii => MacAbility::forced(Speed::Mbps100, Duplex::Full),
        }
    }

    /// Whether bring-up powers up all PHYs for this wiring
    pub const fn enables_phys(self) -> bool {
        matches!(self, UplinkMode::Rgmii | UplinkMode::Mii)
    }
}

/// Default RGMII TX delay (2 ns)
pub const DEFAULT_RGMII_TX_DELAY: u8 = 1;

/// Default RGMII RX delay step for 2.5 V RGMII
pub const DEFAULT_RGMII_RX_DELAY: u8 = 2;

/// Switch bring-up configuration
#[derive(Debug, Clone, Copy)]
pub struct SwitchConfig {
    /// Chip the board carries
    pub profile: &'static ChipProfile,
    /// MDIO address the switch answers SMI on
    pub smi_phy_addr: u8,
    /// Uplink wiring
    pub uplink: UplinkMode,
    /// External port the host MAC is connected to
    pub uplink_port: Port,
    /// Ability override; `None` uses [`UplinkMode::default_ability`]
    pub ability: Option<MacAbility>,
    /// PHY power override; `None` uses [`UplinkMode::enables_phys`]
    pub enable_phys: Option<bool>,
    /// RGMII TX delay (0-1)
    pub rgmii_tx_delay: u8,
    /// RGMII RX delay step (0-7)
    pub rgmii_rx_delay: u8,
    /// Reset / PHY-enable GPIO pulse timing
    pub gpio_timing: PulseTiming,
    /// Wait after configuration, in milliseconds
    pub settle_ms: u32,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SwitchConfig {
    /// RTL8363NB on an RGMII uplink with 2.5 V delays
    #[must_use]
    pub const fn new() -> Self {
        Self {
            profile: &ChipProfile::RTL8363NB,
            smi_phy_addr: DEFAULT_SMI_PHY_ADDR,
            uplink: UplinkMode::Rgmii,
            uplink_port: Port::Ext0,
            ability: None,
            enable_phys: None,
            rgmii_tx_delay: DEFAULT_RGMII_TX_DELAY,
            rgmii_rx_delay: DEFAULT_RGMII_RX_DELAY,
            gpio_timing: PulseTiming::new(GPIO_ASSERT_MS, GPIO_RECOVERY_MS),
            settle_ms: SWITCH_SETTLE_MS,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the chip profile
    #[must_use]
    pub const fn with_profile(mut self, profile: &'static ChipProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the SMI PHY address
    #[must_use]
    pub const fn with_smi_phy_addr(mut self, addr: u8) -> Self {
        self.smi_phy_addr = addr;
        self
    }

    /// Set the uplink wiring
    #[must_use]
    pub const fn with_uplink(mut self, uplink: UplinkMode) -> Self {
        self.uplink = uplink;
        self
    }

    /// Set the uplink port
    #[must_use]
    pub const fn with_uplink_port(mut self, port: Port) -> Self {
        self.uplink_port = port;
        self
    }

    /// Override the forced uplink ability
    #[must_use]
    pub const fn with_ability(mut self, ability: MacAbility) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Force PHYs on or off regardless of uplink wiring
    #[must_use]
    pub const fn with_enable_phys(mut self, enabled: bool) -> Self {
        self.enable_phys = Some(enabled);
        self
    }

    /// Set RGMII TX delay and RX delay step
    ///
    /// 3.3 V RGMII boards typically use `(1, 0)`.
    #[must_use]
    pub const fn with_rgmii_delay(mut self, tx: u8, rx: u8) -> Self {
        self.rgmii_tx_delay = tx;
        self.rgmii_rx_delay = rx;
        self
    }

    /// Set the GPIO pulse timing
    #[must_use]
    pub const fn with_gpio_timing(mut self, timing: PulseTiming) -> Self {
        self.gpio_timing = timing;
        self
    }

    /// Set the post-configuration wait
    #[must_use]
    pub const fn with_settle_ms(mut self, ms: u32) -> Self {
        self.settle_ms = ms;
        self
    }

    // =========================================================================
    // Resolved Values
    // =========================================================================

    /// Ability programmed on the uplink port
    pub const fn uplink_ability(&self) -> MacAbility {
        match self.ability {
            Some(ability) => ability,
            None => self.uplink.default_ability(),
        }
    }

    /// Whether bring-up powers up all PHYs
    pub const fn uplink_enables_phys(&self) -> bool {
        match self.enable_phys {
            Some(enabled) => enabled,
            None => self.uplink.enables_phys(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SwitchConfig::new();

        assert_eq!(config.profile.name, "RTL8363NB");
        assert_eq!(config.smi_phy_addr, 0);
        assert_eq!(config.uplink, UplinkMode::Rgmii);
        assert_eq!(config.uplink_port, Port::Ext0);
        assert_eq!(config.rgmii_tx_delay, 1);
        assert_eq!(config.rgmii_rx_delay, 2);
        assert_eq!(config.gpio_timing, PulseTiming::new(10, 100));
        assert_eq!(config.settle_ms, 1000);
    }

    #[test]
    fn rgmii_uplink_runs_gigabit_with_pause() {
        let ability = SwitchConfig::new().uplink_ability();

        assert!(ability.force_mode);
        assert_eq!(ability.speed, Speed::Mbps1000);
        assert_eq!(ability.duplex, Duplex::Full);
        assert!(ability.link);
        assert!(!ability.nway);
        assert!(ability.tx_pause && ability.rx_pause);
        assert!(SwitchConfig::new().uplink_enables_phys());
    }

    #[test]
    fn mii_and_rmii_uplinks_run_fast_ethernet() {
        for uplink in [UplinkMode::Mii, UplinkMode::Rmii] {
            let ability = SwitchConfig::new().with_uplink(uplink).uplink_ability();
            assert_eq!(ability.speed, Speed::Mbps100);
            assert_eq!(ability.duplex, Duplex::Full);
            assert!(!ability.tx_pause && !ability.rx_pause);
        }
        assert_eq!(UplinkMode::Mii.ext_mode(), ExtMode::MiiMac);
        assert_eq!(UplinkMode::Rmii.ext_mode(), ExtMode::RmiiMac);
    }

    #[test]
    fn only_rmii_leaves_phys_to_strap() {
        assert!(UplinkMode::Rgmii.enables_phys());
        assert!(UplinkMode::Mii.enables_phys());
        assert!(!UplinkMode::Rmii.enables_phys());
    }

    #[test]
    fn overrides_take_precedence() {
        let ability = MacAbility::forced(Speed::Mbps10, Duplex::Half);
        let config = SwitchConfig::new()
            .with_uplink(UplinkMode::Rmii)
            .with_ability(ability)
            .with_enable_phys(true);

        assert_eq!(config.uplink_ability(), ability);
        assert!(config.uplink_enables_phys());
    }

    #[test]
    fn config_builder_chaining() {
        let config = SwitchConfig::new()
            .with_profile(&ChipProfile::RTL8367C)
            .with_smi_phy_addr(29)
            .with_uplink_port(Port::Ext1)
            .with_rgmii_delay(1, 0)
            .with_gpio_timing(PulseTiming::new(1, 1))
            .with_settle_ms(0);

        assert_eq!(config.profile.name, "RTL8367C");
        assert_eq!(config.smi_phy_addr, 29);
        assert_eq!(config.uplink_port, Port::Ext1);
        assert_eq!((config.rgmii_tx_delay, config.rgmii_rx_delay), (1, 0));
        assert_eq!(config.gpio_timing.assert_ms, 1);
        assert_eq!(config.settle_ms, 0);
    }

    #[test]
    fn ext_mode_codes_follow_register_encoding() {
        assert_eq!(ExtMode::Disable.code(), 0);
        assert_eq!(ExtMode::Rgmii.code(), 1);
        assert_eq!(ExtMode::RmiiPhy.code(), 8);
        assert_eq!(ExtMode::from_code(7), Some(ExtMode::RmiiMac));
        assert_eq!(ExtMode::from_code(9), None);
    }

    #[test]
    fn mac_ability_converts_to_register_fields() {
        let ability = MacAbility::forced(Speed::Mbps100, Duplex::Full);
        let raw = ability.to_force_ability();

        assert_eq!(raw.speed, 1);
        assert!(raw.full_duplex && raw.link && raw.force_mode);
        assert_eq!(MacAbility::from_force_ability(raw), Some(ability));

        let bad = ForceAbility {
            speed: 3,
            ..ForceAbility::default()
        };
        assert_eq!(MacAbility::from_force_ability(bad), None);
    }
}
