//! Switch handle
//!
//! [`Switch`] owns the register layer, remembers which package it is
//! driving, and gates every API call on the switch having been initialized.
//! The RLDP and port operations are added by `impl Switch` blocks in
//! [`super::rldp`] and [`super::port`].

use super::ports::{ChipProfile, Port, PortMask};
use crate::asic::Asic;
use crate::asic::chip::ChipId;
use crate::constants::{MAX_PHYSICAL_PORTMASK, PHYSICAL_PORT_COUNT};
use crate::error::{ConfigError, Result, StateError};
use crate::hal::mdio::SmiBus;

/// RTL8367C-family switch
#[derive(Debug)]
pub struct Switch<S: SmiBus> {
    asic: Asic<S>,
    profile: &'static ChipProfile,
    chip: Option<ChipId>,
}

impl<S: SmiBus> Switch<S> {
    /// Wrap an SMI bus; the switch is uninitialized until [`Switch::init`]
    pub const fn new(bus: S, profile: &'static ChipProfile) -> Self {
        Self {
            asic: Asic::new(bus),
            profile,
            chip: None,
        }
    }

    /// Detect the chip and apply the profile's init sequence
    ///
    /// Fails with `UnsupportedChip` when the chip number does not belong to
    /// the profile's family. Calling `init` again re-runs the sequence.
    pub fn init(&mut self) -> Result<()> {
        self.chip = None;

        let id = self.asic.chip_id()?;
        if id.family() != self.profile.family {
            #[cfg(feature = "defmt")]
            defmt::error!("chip number {:#06x} is not a {}", id.number, self.profile.name);
            #[cfg(feature = "log")]
            log::error!("chip number {:#06x} is not a {}", id.number, self.profile.name);
            return Err(ConfigError::UnsupportedChip.into());
        }

        for &(addr, value) in self.profile.init_patch {
            self.asic.set_reg(addr, value)?;
        }

        #[cfg(feature = "defmt")]
        defmt::info!(
            "{} detected: chip {:#06x} rev {}",
            self.profile.name,
            id.number,
            id.version
        );
        #[cfg(feature = "log")]
        log::info!(
            "{} detected: chip {:#06x} rev {}",
            self.profile.name,
            id.number,
            id.version
        );

        self.chip = Some(id);
        Ok(())
    }

    /// Whether [`Switch::init`] has succeeded
    pub fn is_initialized(&self) -> bool {
        self.chip.is_some()
    }

    /// Chip identification read during init
    pub fn chip_id(&self) -> Option<ChipId> {
        self.chip
    }

    /// Package profile
    pub fn profile(&self) -> &'static ChipProfile {
        self.profile
    }

    /// Register layer
    pub fn asic(&self) -> &Asic<S> {
        &self.asic
    }

    /// Register layer, mutably
    ///
    /// Raw register access bypasses the init and port checks.
    pub fn asic_mut(&mut self) -> &mut Asic<S> {
        &mut self.asic
    }

    /// Underlying bus
    pub fn bus(&self) -> &S {
        self.asic.bus()
    }

    /// Give back the bus
    pub fn release(self) -> S {
        self.asic.release()
    }

    // =========================================================================
    // API Guards
    // =========================================================================

    /// Fail with `NotInitialized` before [`Switch::init`]
    pub fn check_init(&self) -> Result<()> {
        if self.chip.is_none() {
            return Err(StateError::NotInitialized.into());
        }
        Ok(())
    }

    /// Physical port of `port`, failing with `InvalidPort` if the package
    /// lacks it
    pub fn check_port(&self, port: Port) -> Result<u8> {
        self.profile
            .phy_port(port)
            .ok_or_else(|| ConfigError::InvalidPort.into())
    }

    // =========================================================================
    // Port Translation
    // =========================================================================

    /// Logical to physical port
    pub fn port_l2p(&self, port: Port) -> Result<u8> {
        self.check_port(port)
    }

    /// Physical to logical port
    pub fn port_p2l(&self, phy_port: u8) -> Result<Port> {
        if phy_port >= PHYSICAL_PORT_COUNT {
            return Err(ConfigError::InvalidPort.into());
        }
        self.profile
            .logical_port(phy_port)
            .ok_or_else(|| ConfigError::InvalidPort.into())
    }

    /// Logical to physical portmask
    ///
    /// Fails with `InvalidPortMask` if any port is missing on this package.
    pub fn portmask_l2p(&self, mask: PortMask) -> Result<u32> {
        if mask.bits() & !Port::ALL.iter().fold(0u32, |acc, p| acc | p.bit()) != 0 {
            return Err(ConfigError::InvalidPortMask.into());
        }
        let mut phy_mask: u32 = 0;
        for port in mask.iter() {
            let phy = self
                .profile
                .phy_port(port)
                .ok_or(ConfigError::InvalidPortMask)?;
            phy_mask |= 1u32 << phy;
        }
        Ok(phy_mask)
    }

    /// Physical to logical portmask
    ///
    /// Physical ports with no logical port on this package are dropped.
    pub fn portmask_p2l(&self, phy_mask: u32) -> Result<PortMask> {
        if phy_mask > MAX_PHYSICAL_PORTMASK {
            return Err(ConfigError::InvalidPortMask.into());
        }
        Ok((0..PHYSICAL_PORT_COUNT)
            .filter(|&phy| phy_mask & (1u32 << phy) != 0)
            .filter_map(|phy| self.profile.logical_port(phy))
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
