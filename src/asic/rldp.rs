//! RLDP (Realtek Loop Detection Protocol) registers
//!
//! The ASIC runs loop detection on its own. These accessors program its
//! control block and read back what it found. All portmasks here are
//! physical.

use super::Asic;
use crate::constants::{MAX_PHYSICAL_PORTMASK, PHYSICAL_PORT_COUNT};
use crate::error::{ConfigError, Result};
use crate::hal::mdio::SmiBus;

// =============================================================================
// Register Map
// =============================================================================

/// Control: enable, compare mode, trigger mode
pub const REG_RLDP_CTRL0: u16 = 0x0A00;
/// Retry counts for the checking and loop states
pub const REG_RLDP_CTRL1: u16 = 0x0A01;
/// Retry period in the checking state
pub const REG_RLDP_CTRL2: u16 = 0x0A02;
/// Retry period in the loop state
pub const REG_RLDP_CTRL3: u16 = 0x0A03;
/// Ports allowed to transmit RLDP frames
pub const REG_RLDP_TX_PMSK: u16 = 0x0A04;
/// First of three random-number (switch ID) words
pub const REG_RLDP_RAND_NUM0: u16 = 0x0A05;
/// First of three magic-number words
pub const REG_RLDP_MAGIC_NUM0: u16 = 0x0A08;
/// Ports that entered the looped state (write 1 to clear)
pub const REG_RLDP_LOOPED_INDICATOR: u16 = 0x0A0B;
/// Loop partner of physical ports 0-7, two ports per register
pub const REG_RLDP_LOOP_PORT0: u16 = 0x0A0C;
/// Ports that left the looped state (write 1 to clear)
pub const REG_RLDP_RELEASED_INDICATOR: u16 = 0x0A10;
/// Ports currently looped
pub const REG_RLDP_LOOPSTATUS_INDICATOR: u16 = 0x0A11;
/// Loop partner of physical ports 8-10, two ports per register
pub const REG_RLDP_LOOP_PORT4: u16 = 0x0A12;

/// CTRL0: RLDP enable
pub const RLDP_ENABLE_BIT: u8 = 0;
/// CTRL0: compare the random-number ID as well as the magic number
pub const RLDP_COMP_ID_BIT: u8 = 1;
/// CTRL0: periodic (set) or sample (clear) trigger
pub const RLDP_TRIGGER_MODE_BIT: u8 = 14;
/// CTRL1: retry count in the checking state
pub const RLDP_RETRY_COUNT_CHKSTATE_MASK: u16 = 0x00FF;
/// CTRL1: retry count in the loop state
pub const RLDP_RETRY_COUNT_LOOPSTATE_MASK: u16 = 0xFF00;
/// Width of one loop-partner field
pub const RLDP_LOOP_PORT_FIELD: u16 = 0x001F;

/// Register and mask holding the loop partner of physical port `phy_port`
pub const fn loop_port_field(phy_port: u8) -> (u16, u16) {
    let base = if phy_port < 8 {
        REG_RLDP_LOOP_PORT0 + (phy_port as u16 >> 1)
    } else {
        REG_RLDP_LOOP_PORT4 + ((phy_port as u16 - 8) >> 1)
    };
    let shift = (phy_port as u16 & 1) * 8;
    (base, RLDP_LOOP_PORT_FIELD << shift)
}

// =============================================================================
// Accessors
// =============================================================================

/// Magic/ID words as the ASIC stores them: 16-bit little-endian pairs
pub fn mac_to_words(mac: &[u8; 6]) -> [u16; 3] {
    [
        u16::from_le_bytes([mac[0], mac[1]]),
        u16::from_le_bytes([mac[2], mac[3]]),
        u16::from_le_bytes([mac[4], mac[5]]),
    ]
}

/// Inverse of [`mac_to_words`]
pub fn words_to_mac(words: [u16; 3]) -> [u8; 6] {
    let [a, b, c] = words.map(u16::to_le_bytes);
    [a[0], a[1], b[0], b[1], c[0], c[1]]
}

fn check_portmask(portmask: u32) -> Result<u16> {
    if portmask > MAX_PHYSICAL_PORTMASK {
        return Err(ConfigError::InvalidPortMask.into());
    }
    Ok(portmask as u16)
}

impl<S: SmiBus> Asic<S> {
    /// Enable or disable RLDP
    pub fn set_rldp_enable(&mut self, enabled: bool) -> Result<()> {
        self.set_reg_bit(REG_RLDP_CTRL0, RLDP_ENABLE_BIT, enabled)
    }

    /// Whether RLDP is enabled
    pub fn rldp_enable(&mut self) -> Result<bool> {
        self.reg_bit(REG_RLDP_CTRL0, RLDP_ENABLE_BIT)
    }

    /// Select periodic (`true`) or sample (`false`) triggering
    pub fn set_rldp_trigger_periodic(&mut self, periodic: bool) -> Result<()> {
        self.set_reg_bit(REG_RLDP_CTRL0, RLDP_TRIGGER_MODE_BIT, periodic)
    }

    /// Whether triggering is periodic
    pub fn rldp_trigger_periodic(&mut self) -> Result<bool> {
        self.reg_bit(REG_RLDP_CTRL0, RLDP_TRIGGER_MODE_BIT)
    }

    /// Also compare the random-number ID in received RLDP frames
    pub fn set_rldp_compare_random_number(&mut self, enabled: bool) -> Result<()> {
        self.set_reg_bit(REG_RLDP_CTRL0, RLDP_COMP_ID_BIT, enabled)
    }

    /// Whether the random-number ID is compared
    pub fn rldp_compare_random_number(&mut self) -> Result<bool> {
        self.reg_bit(REG_RLDP_CTRL0, RLDP_COMP_ID_BIT)
    }

    /// Program the magic number carried in RLDP frames
    pub fn set_rldp_magic_num(&mut self, magic: &[u8; 6]) -> Result<()> {
        for (i, word) in mac_to_words(magic).into_iter().enumerate() {
            self.set_reg(REG_RLDP_MAGIC_NUM0 + i as u16, word)?;
        }
        Ok(())
    }

    /// Read the magic number
    pub fn rldp_magic_num(&mut self) -> Result<[u8; 6]> {
        let mut words = [0u16; 3];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.reg(REG_RLDP_MAGIC_NUM0 + i as u16)?;
        }
        Ok(words_to_mac(words))
    }

    /// Read the switch's random-number ID (read-only, generated by the ASIC)
    pub fn rldp_random_num(&mut self) -> Result<[u8; 6]> {
        let mut words = [0u16; 3];
        for (i, word) in words.iter_mut().enumerate() {
            *word = self.reg(REG_RLDP_RAND_NUM0 + i as u16)?;
        }
        Ok(words_to_mac(words))
    }

    /// Retry count and period used while checking for a loop
    pub fn set_rldp_checking_state_para(&mut self, retry_count: u32, retry_period: u32) -> Result<()> {
        let (count, period) = check_state_para(retry_count, retry_period)?;
        self.set_reg_bits(REG_RLDP_CTRL1, RLDP_RETRY_COUNT_CHKSTATE_MASK, count)?;
        self.set_reg(REG_RLDP_CTRL2, period)
    }

    /// Read checking-state retry count and period
    pub fn rldp_checking_state_para(&mut self) -> Result<(u16, u16)> {
        let count = self.reg_bits(REG_RLDP_CTRL1, RLDP_RETRY_COUNT_CHKSTATE_MASK)?;
        let period = self.reg(REG_RLDP_CTRL2)?;
        Ok((count, period))
    }

    /// Retry count and period used once a loop is found
    pub fn set_rldp_loop_state_para(&mut self, retry_count: u32, retry_period: u32) -> Result<()> {
        let (count, period) = check_state_para(retry_count, retry_period)?;
        self.set_reg_bits(REG_RLDP_CTRL1, RLDP_RETRY_COUNT_LOOPSTATE_MASK, count)?;
        self.set_reg(REG_RLDP_CTRL3, period)
    }

    /// Read loop-state retry count and period
    pub fn rldp_loop_state_para(&mut self) -> Result<(u16, u16)> {
        let count = self.reg_bits(REG_RLDP_CTRL1, RLDP_RETRY_COUNT_LOOPSTATE_MASK)?;
        let period = self.reg(REG_RLDP_CTRL3)?;
        Ok((count, period))
    }

    /// Physical ports allowed to send RLDP frames
    pub fn set_rldp_tx_portmask(&mut self, portmask: u32) -> Result<()> {
        let pmsk = check_portmask(portmask)?;
        self.set_reg(REG_RLDP_TX_PMSK, pmsk)
    }

    /// Read the RLDP transmit portmask
    pub fn rldp_tx_portmask(&mut self) -> Result<u32> {
        Ok((self.reg(REG_RLDP_TX_PMSK)? as u32) & MAX_PHYSICAL_PORTMASK)
    }

    /// Physical ports currently looped
    pub fn rldp_looped_portmask(&mut self) -> Result<u32> {
        Ok((self.reg(REG_RLDP_LOOPSTATUS_INDICATOR)? as u32) & MAX_PHYSICAL_PORTMASK)
    }

    /// Clear "entered loop" flags (write 1 to clear)
    pub fn set_rldp_enter_looped_portmask(&mut self, portmask: u32) -> Result<()> {
        let pmsk = check_portmask(portmask)?;
        self.set_reg(REG_RLDP_LOOPED_INDICATOR, pmsk)
    }

    /// Physical ports that entered the looped state
    pub fn rldp_enter_looped_portmask(&mut self) -> Result<u32> {
        Ok((self.reg(REG_RLDP_LOOPED_INDICATOR)? as u32) & MAX_PHYSICAL_PORTMASK)
    }

    /// Clear "left loop" flags (write 1 to clear)
    pub fn set_rldp_leave_looped_portmask(&mut self, portmask: u32) -> Result<()> {
        let pmsk = check_portmask(portmask)?;
        self.set_reg(REG_RLDP_RELEASED_INDICATOR, pmsk)
    }

    /// Physical ports that left the looped state
    pub fn rldp_leave_looped_portmask(&mut self) -> Result<u32> {
        Ok((self.reg(REG_RLDP_RELEASED_INDICATOR)? as u32) & MAX_PHYSICAL_PORTMASK)
    }

    /// Physical port `phy_port` is looped to, as a physical portmask
    ///
    /// The partner field is zero for a port that is not looped, so the
    /// result is only valid while `phy_port` is set in
    /// [`rldp_looped_portmask`](Self::rldp_looped_portmask).
    pub fn rldp_looped_port_pair(&mut self, phy_port: u8) -> Result<u32> {
        if phy_port >= PHYSICAL_PORT_COUNT {
            return Err(ConfigError::InvalidPort.into());
        }
        let (reg, mask) = loop_port_field(phy_port);
        let partner = self.reg_bits(reg, mask)?;
        Ok((1u32 << partner) & MAX_PHYSICAL_PORTMASK)
    }
}

fn check_state_para(retry_count: u32, retry_period: u32) -> Result<(u16, u16)> {
    if retry_count > 0xFF || retry_period > 0xFFFF {
        return Err(ConfigError::OutOfRange.into());
    }
    Ok((retry_count as u16, retry_period as u16))
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
    fn magic_words_are_little_endian_pairs() {
        let mac = [0x00, 0xE0, 0x4C, 0x83, 0x63, 0x01];
        assert_eq!(mac_to_words(&mac), [0xE000, 0x834C, 0x0163]);
        assert_eq!(words_to_mac(mac_to_words(&mac)), mac);
    }

    #[test]
    fn loop_port_field_layout() {
        assert_eq!(loop_port_field(0), (0x0A0C, 0x001F));
        assert_eq!(loop_port_field(1), (0x0A0C, 0x1F00));
        assert_eq!(loop_port_field(6), (0x0A0F, 0x001F));
        assert_eq!(loop_port_field(7), (0x0A0F, 0x1F00));
        assert_eq!(loop_port_field(8), (0x0A12, 0x001F));
        assert_eq!(loop_port_field(10), (0x0A13, 0x001F));
    }

    #[test]
    fn enable_and_trigger_share_ctrl0() {
        let mut asic = Asic::new(MockSmi::new());

        asic.set_rldp_enable(true).unwrap();
        asic.set_rldp_trigger_periodic(true).unwrap();
        asic.set_rldp_compare_random_number(true).unwrap();
        assert_eq!(asic.reg(REG_RLDP_CTRL0).unwrap(), 0x4003);

        asic.set_rldp_enable(false).unwrap();
        assert!(!asic.rldp_enable().unwrap());
        assert!(asic.rldp_trigger_periodic().unwrap());
        assert!(asic.rldp_compare_random_number().unwrap());
    }

    #[test]
    fn magic_number_spans_three_registers() {
        let mut asic = Asic::new(MockSmi::new());
        let magic = [0x11, 0x22, 0x33, 0x44, 0x55, 0x66];

        asic.set_rldp_magic_num(&magic).unwrap();

        assert_eq!(asic.bus().register(0x0A08), 0x2211);
        assert_eq!(asic.bus().register(0x0A09), 0x4433);
        assert_eq!(asic.bus().register(0x0A0A), 0x6655);
        assert_eq!(asic.rldp_magic_num().unwrap(), magic);
    }

    #[test]
    fn random_number_read_from_its_own_block() {
        let mut asic = Asic::new(MockSmi::new());
        asic.bus().set_register(0x0A05, 0xBBAA);
        asic.bus().set_register(0x0A06, 0xDDCC);
        asic.bus().set_register(0x0A07, 0xFFEE);
        assert_eq!(asic.rldp_random_num().unwrap(), [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn state_parameters_share_ctrl1() {
        let mut asic = Asic::new(MockSmi::new());

        asic.set_rldp_checking_state_para(0x12, 1000).unwrap();
        asic.set_rldp_loop_state_para(0x34, 5000).unwrap();

        assert_eq!(asic.reg(REG_RLDP_CTRL1).unwrap(), 0x3412);
        assert_eq!(asic.rldp_checking_state_para().unwrap(), (0x12, 1000));
        assert_eq!(asic.rldp_loop_state_para().unwrap(), (0x34, 5000));
    }

    #[test]
    fn state_parameters_out_of_range() {
        let mut asic = Asic::new(MockSmi::new());
        assert_eq!(
            asic.set_rldp_checking_state_para(0x100, 0),
            Err(Error::Config(ConfigError::OutOfRange))
        );
        assert_eq!(
            asic.set_rldp_loop_state_para(0, 0x1_0000),
            Err(Error::Config(ConfigError::OutOfRange))
        );
        assert!(asic.bus().get_writes().is_empty());
    }

    #[test]
    fn tx_portmask_bounds() {
        let mut asic = Asic::new(MockSmi::new());
        asic.set_rldp_tx_portmask(0x7FF).unwrap();
        assert_eq!(asic.rldp_tx_portmask().unwrap(), 0x7FF);
        assert_eq!(
            asic.set_rldp_tx_portmask(0x800),
            Err(Error::Config(ConfigError::InvalidPortMask))
        );
    }

    #[test]
    fn indicator_masks_read_their_registers() {
        let mut asic = Asic::new(MockSmi::new());
        asic.bus().set_register(REG_RLDP_LOOPSTATUS_INDICATOR, 0x000A);
        asic.bus().set_register(REG_RLDP_LOOPED_INDICATOR, 0x0002);
        asic.bus().set_register(REG_RLDP_RELEASED_INDICATOR, 0x0008);

        assert_eq!(asic.rldp_looped_portmask().unwrap(), 0x000A);
        assert_eq!(asic.rldp_enter_looped_portmask().unwrap(), 0x0002);
        assert_eq!(asic.rldp_leave_looped_portmask().unwrap(), 0x0008);
    }

    #[test]
    fn clearing_indicators_writes_raw_mask() {
        let mut asic = Asic::new(MockSmi::new());
        asic.set_rldp_enter_looped_portmask(1 << 3).unwrap();
        asic.set_rldp_leave_looped_portmask(0).unwrap();

        assert_eq!(
            asic.bus().get_writes(),
            [(REG_RLDP_LOOPED_INDICATOR, 0x0008), (REG_RLDP_RELEASED_INDICATOR, 0x0000)]
        );
    }

    #[test]
    fn looped_port_pair_decodes_partner() {
        let mut asic = Asic::new(MockSmi::new());
        // port 1 looped to port 3, port 3 looped to port 1
        asic.bus().set_register(0x0A0C, 0x0300);
        asic.bus().set_register(0x0A0D, 0x0100);

        assert_eq!(asic.rldp_looped_port_pair(1).unwrap(), 1 << 3);
        assert_eq!(asic.rldp_looped_port_pair(3).unwrap(), 1 << 1);
    }

    #[test]
    fn looped_port_pair_rejects_port_beyond_die() {
        let mut asic = Asic::new(MockSmi::new());
        assert_eq!(
            asic.rldp_looped_port_pair(11),
            Err(Error::Config(ConfigError::InvalidPort))
        );
    }
}
