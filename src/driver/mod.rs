//! Core driver components for the RTL8367C switch family.
//!
//! This module contains the API the kernel module and bootloader call:
//!
//! - [`config`] - Port types and the bring-up configuration builder
//! - [`ports`] - Logical port numbering and chip profiles
//! - [`switch`] - The switch handle, init state and port translation
//! - [`rldp`] - Loop detection configuration and status
//! - [`port`] - External MAC force-link, RGMII delay, PHY power
//!
//! # Example
//!
//! ```ignore
//! use rtl8363nb_switch::driver::{ChipProfile, Port, RldpPortConfig, Switch};
//! use rtl8363nb_switch::hal::MdcMdioSmi;
//!
//! let mut switch = Switch::new(MdcMdioSmi::new(mdio), &ChipProfile::RTL8363NB);
//! switch.init()?;
//! switch.rldp_port_config_set(Port::Utp1, &RldpPortConfig { tx_enable: true })?;
//! ```

// Submodules
pub mod config;
pub mod port;
pub mod ports;
pub mod rldp;
pub mod switch;

// Re-exports for convenience
pub use config::{
    DEFAULT_RGMII_RX_DELAY, DEFAULT_RGMII_TX_DELAY, Duplex, ExtMode, MacAbility, Speed,
    SwitchConfig, UplinkMode,
};
pub use ports::{ChipProfile, Port, PortMask};
pub use rldp::{
    CompareType, LoopStatus, RldpConfig, RldpPortConfig, RldpPortStatus, RldpStatus, TriggerMode,
};
pub use switch::Switch;
