//! Bring-up GPIO HAL
//!
//! Board designs wire the switch's reset line and, optionally, a PHY-enable
//! strap to host GPIOs. Both are released with the same pattern: drive low,
//! hold, drive high, wait for the chip to come out of reset. Either line may
//! be absent, in which case its step is skipped.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::constants::{GPIO_ASSERT_MS, GPIO_RECOVERY_MS};
use crate::error::{ConfigError, Result};

// =============================================================================
// Pulse Timing
// =============================================================================

/// Low/high hold times for a bring-up GPIO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseTiming {
    /// Time the line is held low, in milliseconds
    pub assert_ms: u32,
    /// Time waited after the line goes high, in milliseconds
    pub recovery_ms: u32,
}

impl PulseTiming {
    /// Create a pulse timing
    pub const fn new(assert_ms: u32, recovery_ms: u32) -> Self {
        Self {
            assert_ms,
            recovery_ms,
        }
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self::new(GPIO_ASSERT_MS, GPIO_RECOVERY_MS)
    }
}

// =============================================================================
// Pulse Helper
// =============================================================================

/// Drive `pin` low, wait, drive it high, wait
pub fn pulse_low<P: OutputPin, D: DelayNs>(
    pin: &mut P,
    delay: &mut D,
    timing: PulseTiming,
) -> Result<()> {
    pin.set_low().map_err(|_| ConfigError::GpioError)?;
    delay.delay_ms(timing.assert_ms);
    pin.set_high().map_err(|_| ConfigError::GpioError)?;
    delay.delay_ms(timing.recovery_ms);
    Ok(())
}

// =============================================================================
// Bring-up Controller
// =============================================================================

/// Stand-in for a GPIO the board does not wire up
///
/// Lets callers write `None::<NoPin>` for an absent line.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Owner of the switch's reset and PHY-enable lines
#[derive(Debug)]
pub struct BringUpPins<R: OutputPin, E: OutputPin> {
    reset: Option<R>,
    enable_phy: Option<E>,
    timing: PulseTiming,
}

impl<R: OutputPin, E: OutputPin> BringUpPins<R, E> {
    /// Take ownership of the (optional) reset and PHY-enable lines
    pub fn new(reset: Option<R>, enable_phy: Option<E>) -> Self {
        Self {
            reset,
            enable_phy,
            timing: PulseTiming::default(),
        }
    }

    /// Override the pulse timing
    #[must_use]
    pub fn with_timing(mut self, timing: PulseTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Whether a reset line is wired
    pub fn has_reset(&self) -> bool {
        self.reset.is_some()
    }

    /// Whether a PHY-enable line is wired
    pub fn has_enable_phy(&self) -> bool {
        self.enable_phy.is_some()
    }

    /// Pulse reset, then PHY-enable
    pub fn release<D: DelayNs>(&mut self, delay: &mut D) -> Result<()> {
        if let Some(pin) = self.reset.as_mut() {
            pulse_low(pin, delay, self.timing)?;
        }
        if let Some(pin) = self.enable_phy.as_mut() {
            pulse_low(pin, delay, self.timing)?;
        }
        Ok(())
    }

    /// Hold the switch in reset
    pub fn assert_reset(&mut self) -> Result<()> {
        if let Some(pin) = self.reset.as_mut() {
            pin.set_low().map_err(|_| ConfigError::GpioError)?;
        }
        Ok(())
    }

    /// Give the pins back
    pub fn into_inner(self) -> (Option<R>, Option<E>) {
        (self.reset, self.enable_phy)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
