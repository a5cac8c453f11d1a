//! Hardware Abstraction Layer
//!
//! The pieces of the host platform the switch driver needs:
//!
//! - [`mdio`]: MDIO bus trait and the SMI-over-MDIO register tunnel
//! - [`reset`]: Reset and PHY-enable GPIO sequencing
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL or bootloader.

pub mod mdio;
pub mod reset;

pub use mdio::{MdcMdioSmi, MdioBus, SmiBus};
pub use reset::{BringUpPins, NoPin, PulseTiming};
