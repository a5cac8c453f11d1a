//! RTL8363NB bootloader probe.
//!
//! Bring-up runs in a fixed order:
//!
//! 1. Pulse the reset GPIO, then the PHY-enable GPIO (each optional)
//! 2. Detect the chip and apply its init table
//! 3. Force the uplink MAC (mode and ability from [`UplinkMode`])
//! 4. Power the UTP PHYs when the uplink mode calls for it
//! 5. Program the RGMII delays
//! 6. Let the switch settle
//!
//! A failing step is logged and aborts the probe. The board object is not
//! registered as a network device anywhere; doing so is up to the caller.
//!
//! [`UplinkMode`]: crate::driver::UplinkMode

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::driver::{Switch, SwitchConfig};
use crate::error::Result;
use crate::hal::mdio::{MdcMdioSmi, MdioBus, SmiBus};
use crate::hal::reset::BringUpPins;

/// Device-tree compatible string of the switch node
pub const COMPATIBLE: &str = "dspg,rtl8363nb";

/// Driver name
pub const DRIVER_NAME: &str = "rtl8363nb";

/// Log a failed bring-up step and pass the result through
fn step<T>(what: &'static str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        #[cfg(feature = "defmt")]
        defmt::error!("{} failed: {}", what, e);
        #[cfg(feature = "log")]
        log::error!("{what} failed: {e}");
        #[cfg(not(any(feature = "defmt", feature = "log")))]
        let _ = (what, e);
    }
    result
}

/// Initialize an already-reset switch and configure its uplink.
///
/// Steps 2 to 6 of the bring-up. Useful on its own when the board has no
/// GPIO control over the switch, or after a warm restart.
pub fn switch_init<S: SmiBus, D: DelayNs>(
    switch: &mut Switch<S>,
    config: &SwitchConfig,
    delay: &mut D,
) -> Result<()> {
    step("switch init", switch.init())?;

    let ability = config.uplink_ability();
    step(
        "uplink force link",
        switch.mac_force_link_ext_set(config.uplink_port, config.uplink.ext_mode(), &ability),
    )?;

    if config.uplink_enables_phys() {
        step("PHY enable", switch.phy_enable_all_set(true))?;
    }

    step(
        "RGMII delay",
        switch.rgmii_delay_ext_set(
            config.uplink_port,
            config.rgmii_tx_delay,
            config.rgmii_rx_delay,
        ),
    )?;

    delay.delay_ms(config.settle_ms);

    #[cfg(feature = "defmt")]
    defmt::info!("switch up, uplink {} on {}", config.uplink, config.uplink_port);
    #[cfg(feature = "log")]
    log::info!("switch up, uplink {:?} on {:?}", config.uplink, config.uplink_port);

    Ok(())
}

/// A probed RTL8363NB
///
/// Owns the switch (reached over SMI-on-MDIO) and the bring-up GPIOs.
pub struct Rtl8363nb<M: MdioBus, R: OutputPin, E: OutputPin> {
    switch: Switch<MdcMdioSmi<M>>,
    pins: BringUpPins<R, E>,
    config: SwitchConfig,
}

impl<M: MdioBus, R: OutputPin, E: OutputPin> Rtl8363nb<M, R, E> {
    /// Reset, initialize and configure the switch.
    ///
    /// `reset` and `enable_phy` are the board's GPIO lines, if wired; pass
    /// `None::<NoPin>` for an absent one.
    ///
    /// # Errors
    ///
    /// - `InvalidPhyAddress` if `config.smi_phy_addr` does not fit MDIO
    /// - `GpioError` if a bring-up line cannot be driven
    /// - Any error from chip detection or uplink configuration
    pub fn probe<D: DelayNs>(
        mdio: M,
        reset: Option<R>,
        enable_phy: Option<E>,
        delay: &mut D,
        config: SwitchConfig,
    ) -> Result<Self> {
        let smi = step("SMI setup", MdcMdioSmi::with_phy_addr(mdio, config.smi_phy_addr))?;

        let mut pins = BringUpPins::new(reset, enable_phy).with_timing(config.gpio_timing);
        step("GPIO bring-up", pins.release(delay))?;

        let mut switch = Switch::new(smi, config.profile);
        switch_init(&mut switch, &config, delay)?;

        Ok(Self {
            switch,
            pins,
            config,
        })
    }

    /// The switch
    pub fn switch(&self) -> &Switch<MdcMdioSmi<M>> {
        &self.switch
    }

    /// The switch, mutably
    pub fn switch_mut(&mut self) -> &mut Switch<MdcMdioSmi<M>> {
        &mut self.switch
    }

    /// Configuration the board was probed with
    pub fn config(&self) -> &SwitchConfig {
        &self.config
    }

    /// Put the switch back into reset (no-op without a reset line)
    pub fn hold_in_reset(&mut self) -> Result<()> {
        self.pins.assert_reset()
    }

    /// Keep only the switch, dropping the GPIOs
    pub fn into_switch(self) -> Switch<MdcMdioSmi<M>> {
        self.switch
    }

    /// Take the switch and GPIO lines apart
    pub fn into_parts(self) -> (Switch<MdcMdioSmi<M>>, Option<R>, Option<E>) {
        let (reset, enable_phy) = self.pins.into_inner();
        (self.switch, reset, enable_phy)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
