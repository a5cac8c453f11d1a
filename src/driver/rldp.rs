//! Realtek Loop Detection Protocol
//!
//! Loop detection runs entirely inside the ASIC: it sends RLDP frames out
//! of the ports in the TX portmask, recognizes its own frames coming back by
//! magic number (and optionally its random-number ID), and raises per-port
//! status bits. These calls program the parameters and read the bits back.
//!
//! Every operation fails with `NotInitialized` before [`Switch::init`], and
//! per-port operations fail with `InvalidPort` for ports the package lacks.

use super::ports::{Port, PortMask};
use super::switch::Switch;
use crate::constants::{RLDP_INTERVAL_MAX, RLDP_NUM_MAX};
use crate::error::{ConfigError, Result};
use crate::hal::mdio::SmiBus;

// =============================================================================
// Types
// =============================================================================

/// When RLDP frames are sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerMode {
    /// On link-up sampling only
    #[default]
    Sample,
    /// Periodically
    Periodic,
}

/// What a received RLDP frame must match to count as our own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompareType {
    /// Magic number only
    #[default]
    Magic,
    /// Magic number and random-number ID
    MagicAndId,
}

/// Loop state flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LoopStatus {
    /// Flag clear
    #[default]
    None = 0,
    /// Flag set
    Looping = 1,
}

impl LoopStatus {
    const fn from_flag(set: bool) -> Self {
        if set { LoopStatus::Looping } else { LoopStatus::None }
    }

    const fn bit(self) -> u32 {
        self as u32
    }
}

/// Global RLDP configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RldpConfig {
    /// RLDP on/off
    pub enable: bool,
    /// Trigger mode
    pub trigger_mode: TriggerMode,
    /// Magic number carried in RLDP frames
    pub magic: [u8; 6],
    /// Frame matching rule
    pub compare_type: CompareType,
    /// Retry period while checking for a loop (below `0xFFFF`)
    pub interval_check: u16,
    /// Retry count while checking for a loop (below `0xFF`)
    pub num_check: u8,
    /// Retry period once looped (below `0xFFFF`)
    pub interval_loop: u16,
    /// Retry count once looped (below `0xFF`)
    pub num_loop: u8,
}

impl RldpConfig {
    /// Reject counts and intervals at or above the API limits
    pub fn validate(&self) -> Result<()> {
        if self.num_check >= RLDP_NUM_MAX
            || self.num_loop >= RLDP_NUM_MAX
            || self.interval_check >= RLDP_INTERVAL_MAX
            || self.interval_loop >= RLDP_INTERVAL_MAX
        {
            return Err(ConfigError::InvalidInput.into());
        }
        Ok(())
    }
}

/// Per-port RLDP configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RldpPortConfig {
    /// Port sends RLDP frames
    pub tx_enable: bool,
}

/// Global RLDP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RldpStatus {
    /// Random-number ID the switch puts in its RLDP frames
    pub id: [u8; 6],
}

/// Per-port RLDP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RldpPortStatus {
    /// Port is currently looped
    pub loop_status: LoopStatus,
    /// Port entered the looped state since the flag was last cleared
    pub loop_enter: LoopStatus,
    /// Port left the looped state since the flag was last cleared
    pub loop_leave: LoopStatus,
}

// =============================================================================
// Operations
// =============================================================================

impl<S: SmiBus> Switch<S> {
    /// Apply the global RLDP configuration
    ///
    /// The TX portmask is cleared and restored first so the ASIC restarts
    /// detection with the new parameters.
    pub fn rldp_config_set(&mut self, config: &RldpConfig) -> Result<()> {
        self.check_init()?;
        config.validate()?;

        let asic = self.asic_mut();
        let pmsk = asic.rldp_tx_portmask()?;
        asic.set_rldp_tx_portmask(0)?;
        asic.set_rldp_tx_portmask(pmsk)?;

        asic.set_rldp_enable(config.enable)?;
        asic.set_rldp_trigger_periodic(config.trigger_mode == TriggerMode::Periodic)?;
        asic.set_rldp_magic_num(&config.magic)?;
        asic.set_rldp_compare_random_number(config.compare_type == CompareType::MagicAndId)?;
        asic.set_rldp_checking_state_para(config.num_check as u32, config.interval_check as u32)?;
        asic.set_rldp_loop_state_para(config.num_loop as u32, config.interval_loop as u32)
    }

    /// Read the global RLDP configuration
    pub fn rldp_config_get(&mut self) -> Result<RldpConfig> {
        self.check_init()?;

        let asic = self.asic_mut();
        let enable = asic.rldp_enable()?;
        let trigger_mode = if asic.rldp_trigger_periodic()? {
            TriggerMode::Periodic
        } else {
            TriggerMode::Sample
        };
        let magic = asic.rldp_magic_num()?;
        let compare_type = if asic.rldp_compare_random_number()? {
            CompareType::MagicAndId
        } else {
            CompareType::Magic
        };
        let (num_check, interval_check) = asic.rldp_checking_state_para()?;
        let (num_loop, interval_loop) = asic.rldp_loop_state_para()?;

        Ok(RldpConfig {
            enable,
            trigger_mode,
            magic,
            compare_type,
            interval_check,
            num_check: num_check as u8,
            interval_loop,
            num_loop: num_loop as u8,
        })
    }

    /// Allow or stop RLDP transmission on `port`
    pub fn rldp_port_config_set(&mut self, port: Port, config: &RldpPortConfig) -> Result<()> {
        self.check_init()?;
        let phy = self.check_port(port)?;

        let asic = self.asic_mut();
        let mut pmsk = asic.rldp_tx_portmask()?;
        if config.tx_enable {
            pmsk |= 1u32 << phy;
        } else {
            pmsk &= !(1u32 << phy);
        }
        asic.set_rldp_tx_portmask(pmsk)
    }

    /// Whether `port` transmits RLDP frames
    pub fn rldp_port_config_get(&mut self, port: Port) -> Result<RldpPortConfig> {
        self.check_init()?;
        self.check_port(port)?;

        let pmsk = self.asic_mut().rldp_tx_portmask()?;
        let logical = self.portmask_p2l(pmsk)?;
        Ok(RldpPortConfig {
            tx_enable: logical.contains(port),
        })
    }

    /// Read the switch's RLDP ID
    pub fn rldp_status_get(&mut self) -> Result<RldpStatus> {
        self.check_init()?;
        Ok(RldpStatus {
            id: self.asic_mut().rldp_random_num()?,
        })
    }

    /// Read the loop flags of `port`
    pub fn rldp_port_status_get(&mut self, port: Port) -> Result<RldpPortStatus> {
        self.check_init()?;
        self.check_port(port)?;

        let looped = self.asic_mut().rldp_looped_portmask()?;
        let loop_status = self.portmask_p2l(looped)?.contains(port);

        let entered = self.asic_mut().rldp_enter_looped_portmask()?;
        let loop_enter = self.portmask_p2l(entered)?.contains(port);

        let left = self.asic_mut().rldp_leave_looped_portmask()?;
        let loop_leave = self.portmask_p2l(left)?.contains(port);

        Ok(RldpPortStatus {
            loop_status: LoopStatus::from_flag(loop_status),
            loop_enter: LoopStatus::from_flag(loop_enter),
            loop_leave: LoopStatus::from_flag(loop_leave),
        })
    }

    /// Clear the enter/leave flags of `port`
    ///
    /// A flag is cleared where `status` has it set to `Looping`.
    /// `loop_status` is ignored: the current loop state cannot be cleared.
    pub fn rldp_port_status_set(&mut self, port: Port, status: &RldpPortStatus) -> Result<()> {
        self.check_init()?;
        let phy = self.check_port(port)?;

        let asic = self.asic_mut();
        asic.set_rldp_enter_looped_portmask(status.loop_enter.bit() << phy)?;
        asic.set_rldp_leave_looped_portmask(status.loop_leave.bit() << phy)
    }

    /// Ports `port` is looped to
    ///
    /// Only meaningful while [`rldp_port_status_get`](Self::rldp_port_status_get)
    /// reports `loop_status == Looping` for `port`. An unlooped port has a
    /// zero partner field, which reads back as physical port 0 (`Utp0` on
    /// an RTL8367C).
    pub fn rldp_port_loop_pair_get(&mut self, port: Port) -> Result<PortMask> {
        self.check_init()?;
        let phy = self.check_port(port)?;

        let pmsk = self.asic_mut().rldp_looped_port_pair(phy)?;
        self.portmask_p2l(pmsk)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
