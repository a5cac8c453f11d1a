//! Centralized Constants
//!
//! Single source of truth for the limits, timings and SMI protocol values
//! used throughout the switch driver.
//!
//! # Organization
//!
//! - **SMI protocol**: MDC/MDIO indirect-access register numbers and opcodes
//! - **Ports**: logical/physical port ranges
//! - **RLDP limits**: API-level bounds on loop detection parameters
//! - **Timing**: GPIO pulse widths and settle times
//!
//! ASIC register addresses live next to the code that touches them
//! (`asic/rldp.rs`, `asic/port.rs`, `asic/chip.rs`).

// =============================================================================
// SMI over MDC/MDIO
// =============================================================================

/// MDIO register that starts an SMI transaction
pub const MDC_MDIO_START_REG: u8 = 29;

/// MDIO register holding the SMI address-phase opcode
pub const MDC_MDIO_CTRL0_REG: u8 = 31;

/// MDIO register holding the SMI read/write opcode
pub const MDC_MDIO_CTRL1_REG: u8 = 21;

/// MDIO register receiving the 16-bit ASIC register address
pub const MDC_MDIO_ADDRESS_REG: u8 = 23;

/// MDIO register receiving data to write
pub const MDC_MDIO_DATA_WRITE_REG: u8 = 24;

/// MDIO register returning read data
pub const MDC_MDIO_DATA_READ_REG: u8 = 25;

/// Value written to the start register before every phase
pub const MDC_MDIO_START_OP: u16 = 0xFFFF;

/// Address-phase opcode
pub const MDC_MDIO_ADDR_OP: u16 = 0x000E;

/// Read opcode
pub const MDC_MDIO_READ_OP: u16 = 0x0001;

/// Write opcode
pub const MDC_MDIO_WRITE_OP: u16 = 0x0003;

/// Default MDIO PHY address the switch answers SMI on
pub const DEFAULT_SMI_PHY_ADDR: u8 = 0;

// =============================================================================
// Ports
// =============================================================================

/// Number of physical port slots on the RTL8367C die
pub const PHYSICAL_PORT_COUNT: u8 = 11;

/// Largest valid physical portmask
pub const MAX_PHYSICAL_PORTMASK: u32 = (1 << PHYSICAL_PORT_COUNT) - 1;

/// Number of logical port ids (`UTP_PORT0` .. `EXT_PORT2`)
pub const LOGICAL_PORT_SLOTS: usize = 19;

/// Highest internal PHY number reachable through indirect access
pub const MAX_INTERNAL_PHY: u8 = 7;

// =============================================================================
// RLDP Limits
// =============================================================================

/// Retry counts must be strictly below this value
pub const RLDP_NUM_MAX: u8 = 0xFF;

/// Retry intervals must be strictly below this value
pub const RLDP_INTERVAL_MAX: u16 = 0xFFFF;

// =============================================================================
// Timing
// =============================================================================

/// Time a bring-up GPIO is held low, in milliseconds
pub const GPIO_ASSERT_MS: u32 = 10;

/// Time after a bring-up GPIO is released, in milliseconds
pub const GPIO_RECOVERY_MS: u32 = 100;

/// Wait after switch configuration before the uplink is used, in milliseconds
pub const SWITCH_SETTLE_MS: u32 = 1000;

/// Busy-flag polls before an indirect PHY access gives up
pub const INDIRECT_ACCESS_POLLS: u32 = 100;
