//! RTL8363NB / RTL8367C Switch Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Realtek RTL8367C family of
//! managed Ethernet switches, as found on the RTL8363NB.
//!
//! The switch is managed over SMI: a 16-bit register space tunnelled through
//! Clause 22 MDIO. The host only has to provide an MDIO bus, a delay, and
//! (optionally) the GPIOs wired to the switch's reset and PHY-enable pins.
//!
//! # Architecture
//!
//! The driver is organized into four layers:
//!
//! 1. **HAL Layer** ([`hal`]): MDIO bus trait, SMI tunnel, bring-up GPIOs
//! 2. **ASIC Layer** ([`asic`]): Raw register access by physical port number
//! 3. **Driver Layer** ([`driver`]): The [`Switch`] API by logical port,
//!    with init checks and port translation
//! 4. **Board Layer** ([`boards`]): Bootloader probe sequence
//!
//! With the `critical-section` feature, [`sync::SharedSwitch`] serializes
//! API calls behind one lock.
//!
//! # Supported Chips
//!
//! - [`ChipProfile::RTL8363NB`]: 2 UTP ports, 1 external MAC
//! - [`ChipProfile::RTL8367C`]: 5 UTP ports, 2 external MACs
//!
//! # Features
//!
//! - `critical-section` (default): Enable the lock-protected `SharedSwitch`
//! - `defmt`: Enable defmt formatting and logging
//! - `log`: Enable logging through the `log` facade
//!
//! # Example
//!
//! ```ignore
//! use rtl8363nb_switch::{LoopStatus, Port, RldpConfig, RldpPortConfig, Rtl8363nb, SwitchConfig};
//! use rtl8363nb_switch::hal::NoPin;
//!
//! // Reset the switch, bring it up and force the RGMII uplink
//! let mut board = Rtl8363nb::probe(mdio, Some(reset_pin), None::<NoPin>, &mut delay, SwitchConfig::new())?;
//!
//! // Turn on loop detection
//! let switch = board.switch_mut();
//! switch.rldp_config_set(&RldpConfig { enable: true, ..RldpConfig::default() })?;
//! switch.rldp_port_config_set(Port::Utp1, &RldpPortConfig { tx_enable: true })?;
//!
//! if switch.rldp_port_status_get(Port::Utp1)?.loop_status == LoopStatus::Looping {
//!     // ...
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here and in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod asic;
pub mod boards;
pub mod constants;
pub mod driver;
pub mod error;
pub mod hal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use boards::Rtl8363nb;
pub use driver::config::{Duplex, ExtMode, MacAbility, Speed, SwitchConfig, UplinkMode};
pub use driver::ports::{ChipProfile, Port, PortMask};
pub use driver::rldp::{
    CompareType, LoopStatus, RldpConfig, RldpPortConfig, RldpPortStatus, RldpStatus, TriggerMode,
};
pub use driver::switch::Switch;
pub use error::{ConfigError, ConfigResult, Error, IoError, IoResult, Result, StateError};
pub use hal::mdio::{MdcMdioSmi, MdioBus, SmiBus};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedSwitch;
