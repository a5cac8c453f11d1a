//! Synchronization Support
//!
//! The Realtek switch API runs every exported call under one global lock.
//! This module provides that lock:
//!
//! - **Shared Wrapper** (`shared`): [`SharedSwitch`], a critical-section
//!   protected [`Switch`](crate::driver::Switch) with locked versions of the
//!   RLDP calls
//!
//! Bring-up (`boards`) runs before anything else can touch the switch and
//! uses the bare [`Switch`](crate::driver::Switch); hand the result to
//! [`SharedSwitch::new`] once it is up.
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use rtl8363nb_switch::sync::SharedSwitch;
//!
//! let board = Rtl8363nb::probe(mdio, Some(reset), None::<NoPin>, &mut delay, SwitchConfig::new())?;
//! let switch = SharedSwitch::new(board.into_switch());
//!
//! // From any context
//! let status = switch.rldp_port_status_get(Port::Utp1)?;
//! ```

mod shared;

pub use shared::SharedSwitch;
