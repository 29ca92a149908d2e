//! Bus configuration checks for the MCP23S17 driver.

use embedded_hal::spi::{Mode, Phase, Polarity, MODE_0, MODE_3};

/// Fastest SPI clock the MCP23S17 accepts, in hertz.
pub const MAX_CLOCK_HZ: u32 = 10_000_000;
/// Bits per SPI word the MCP23S17 expects.
pub const WORD_BITS: u8 = 8;
/// Clock modes with the polarity/phase pairing the chip samples correctly.
pub const SUPPORTED_MODES: [Mode; 2] = [MODE_0, MODE_3];

/// Order in which bits of a word are shifted onto the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first.
    MsbFirst,
    /// Least significant bit first.
    LsbFirst,
}

/// Snapshot of how the SPI bus was programmed for this device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusConfig {
    /// Clock polarity and phase.
    pub mode: Mode,
    /// Upper bound of the SCK frequency, in hertz.
    pub max_frequency_hz: u32,
    /// Bit order on the wire.
    pub bit_order: BitOrder,
    /// Bits per transferred word.
    pub word_bits: u8,
    /// Vendor-specific mode flags the bus driver reported, zero when none.
    pub extra_flags: u32,
}

impl BusConfig {
    /// Begins building a [`BusConfig`] using the builder pattern.
    pub fn new() -> BusConfigBuilder {
        BusConfigBuilder::new()
    }

    /// Checks the snapshot against the chip's electrical requirements.
    ///
    /// Parameters are checked in order (clock mode, clock rate, bit order, word
    /// size) and the first violation is reported. Unknown extra flags do not
    /// fail the check and are surfaced as a [`ConfigWarning`] instead.
    pub fn validate(&self) -> core::result::Result<Option<ConfigWarning>, ConfigError> {
        if !SUPPORTED_MODES.contains(&self.mode) {
            return Err(ConfigError::ClockMode);
        }

        if self.max_frequency_hz > MAX_CLOCK_HZ {
            return Err(ConfigError::ClockRate);
        }

        if self.bit_order != BitOrder::MsbFirst {
            return Err(ConfigError::BitOrder);
        }

        if self.word_bits != WORD_BITS {
            return Err(ConfigError::WordSize);
        }

        if self.extra_flags != 0 {
            return Ok(Some(ConfigWarning::UnknownExtraFlags(self.extra_flags)));
        }

        Ok(None)
    }

    /// Returns the SPI mode number (`0..=3`) for the configured clock mode.
    pub const fn mode_number(&self) -> u8 {
        let cpol = matches!(self.mode.polarity, Polarity::IdleHigh) as u8;
        let cpha = matches!(self.mode.phase, Phase::CaptureOnSecondTransition) as u8;
        (cpol << 1) | cpha
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            mode: MODE_0,
            max_frequency_hz: MAX_CLOCK_HZ,
            bit_order: BitOrder::MsbFirst,
            word_bits: WORD_BITS,
            extra_flags: 0,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BusConfig {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "BusConfig {{ mode: {}, max_frequency_hz: {}, bit_order: {}, word_bits: {}, extra_flags: {:#x} }}",
            self.mode_number(),
            self.max_frequency_hz,
            self.bit_order,
            self.word_bits,
            self.extra_flags
        );
    }
}

/// Builder for [`BusConfig`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct BusConfigBuilder {
    config: BusConfig,
}

impl BusConfigBuilder {
    /// Creates a new builder seeded with [`BusConfig::default()`].
    pub fn new() -> Self {
        Self {
            config: BusConfig::default(),
        }
    }

    /// Overrides the clock mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Overrides the maximum clock frequency.
    pub fn max_frequency_hz(mut self, hz: u32) -> Self {
        self.config.max_frequency_hz = hz;
        self
    }

    /// Overrides the bit order.
    pub fn bit_order(mut self, bit_order: BitOrder) -> Self {
        self.config.bit_order = bit_order;
        self
    }

    /// Overrides the word size.
    pub fn word_bits(mut self, bits: u8) -> Self {
        self.config.word_bits = bits;
        self
    }

    /// Records vendor-specific flags reported by the bus driver.
    pub fn extra_flags(mut self, flags: u32) -> Self {
        self.config.extra_flags = flags;
        self
    }

    /// Finalizes the builder and returns the [`BusConfig`].
    pub fn build(self) -> BusConfig {
        self.config
    }
}

impl Default for BusConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation errors naming the parameter that violated its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Clock mode is neither SPI mode 0 nor mode 3.
    ClockMode,
    /// Maximum clock rate exceeds [`MAX_CLOCK_HZ`].
    ClockRate,
    /// Bits are not shifted most significant first.
    BitOrder,
    /// Word size differs from [`WORD_BITS`].
    WordSize,
    /// Hardware address does not fit in the three `A2:A0` straps.
    HardwareAddress,
}

/// Non-fatal findings raised while checking a [`BusConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigWarning {
    /// The bus reported vendor flags this driver does not control.
    UnknownExtraFlags(u32),
}
