//! Error types for the RTL8363NB switch driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Rejected arguments and unsupported hardware
//! - [`IoError`]: SMI/MDIO transport failures
//! - [`StateError`]: Calls made before the switch was initialized
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods. [`Error::vendor_code`] recovers the numeric
//! status the Realtek API would have returned, for C shims that must hand
//! it back unchanged.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Argument validation and hardware support errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Parameter outside the range accepted by the API
    InvalidInput,
    /// Port is not present on this chip
    InvalidPort,
    /// Portmask has bits beyond the physical port range
    InvalidPortMask,
    /// Value does not fit the register field
    OutOfRange,
    /// Invalid MDIO PHY or register address (must be 0-31)
    InvalidPhyAddress,
    /// Detected chip does not match the configured profile
    UnsupportedChip,
    /// GPIO could not be driven
    GpioError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidInput => "invalid input parameter",
            ConfigError::InvalidPort => "invalid port",
            ConfigError::InvalidPortMask => "invalid portmask",
            ConfigError::OutOfRange => "value out of range",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::UnsupportedChip => "unsupported chip",
            ConfigError::GpioError => "GPIO error",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// SMI / MDIO transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Busy flag did not clear in time
    Timeout,
    /// The management bus reported a failure
    BusError,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Timeout => "busy-wait timed out",
            IoError::BusError => "SMI bus error",
        }
    }
}

// =============================================================================
// State Errors
// =============================================================================

/// Driver lifecycle errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
    /// `Switch::init` has not completed
    NotInitialized,
}

impl core::fmt::Display for StateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            StateError::NotInitialized => "switch not initialized",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match switch.rldp_port_config_get(Port::Ext2) {
///     Err(Error::Config(ConfigError::InvalidPort)) => { /* not on this chip */ }
///     Err(Error::State(StateError::NotInitialized)) => { /* call init first */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
    /// State error
    State(StateError),
}

impl Error {
    /// Numeric status used by the Realtek switch API (`rtk_api_ret_t`)
    ///
    /// Success is `0` in that API and is never produced here.
    #[must_use]
    pub const fn vendor_code(&self) -> i32 {
        match self {
            Error::Config(ConfigError::InvalidInput | ConfigError::InvalidPhyAddress) => 0x01,
            Error::Config(ConfigError::InvalidPort) => 0x03,
            Error::Config(ConfigError::InvalidPortMask) => 0x04,
            Error::Io(IoError::Timeout) => 0x0A,
            Error::Config(ConfigError::OutOfRange) => 0x0C,
            Error::Config(ConfigError::UnsupportedChip) => 0x0D,
            Error::Io(IoError::BusError) => 0x0E,
            Error::State(StateError::NotInitialized) => 0x0F,
            Error::Config(ConfigError::GpioError) => -1,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::State(e) => write!(f, "state: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Error::State(e)
    }
}

/// Result type alias for switch operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for argument validation
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for bus operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
