//! Board-level bring-up.
//!
//! This module turns a bare MDIO bus and a couple of GPIOs into a running
//! switch, the way a bootloader does it before handing over to the OS.
//!
//! # Overview
//!
//! The board helper owns the wiring assumptions: which GPIOs gate reset and
//! PHY enable, which external port is the CPU uplink, and which interface
//! mode that uplink runs in. All of it comes from a
//! [`SwitchConfig`](crate::driver::SwitchConfig).
//!
//! # Supported Boards
//!
//! - RTL8363NB behind a SoC MAC (`dspg,rtl8363nb`)

pub mod rtl8363nb;

pub use rtl8363nb::{Rtl8363nb, switch_init};
