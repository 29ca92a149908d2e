//! Reset and interrupt lines wired to the expander, plus the application's
//! interrupt sink.
//!
//! The driver stores these alongside the bus but never drives them itself.
//! Interrupt polling and the decision to notify belong to the application.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::params::Port;
use crate::registers::Iocon;

// Minimum RESET low time from the datasheet is 1 µs.
const RESET_PULSE_US: u32 = 1;

/// GPIO lines and notification sink belonging to one expander.
pub struct ControlLines<RST, INTA, INTB, CB> {
    /// Active-low `RESET` input of the chip.
    pub reset: RST,
    /// `INTA` output of the chip.
    pub interrupt_a: INTA,
    /// `INTB` output of the chip.
    pub interrupt_b: INTB,
    callback: CB,
}

impl<RST, INTA, INTB, CB> ControlLines<RST, INTA, INTB, CB> {
    /// Bundles the lines and the sink.
    pub const fn new(reset: RST, interrupt_a: INTA, interrupt_b: INTB, callback: CB) -> Self {
        Self {
            reset,
            interrupt_a,
            interrupt_b,
            callback,
        }
    }

    /// Splits the bundle back into its parts.
    pub fn release(self) -> (RST, INTA, INTB, CB) {
        (self.reset, self.interrupt_a, self.interrupt_b, self.callback)
    }
}

impl<RST, INT, CB> ControlLines<RST, INT, INT, CB> {
    /// Borrows the interrupt line belonging to `port`.
    ///
    /// Available when both interrupt outputs are wired through the same pin type.
    pub fn interrupt_line(&mut self, port: Port) -> &mut INT {
        match port {
            Port::PortA => &mut self.interrupt_a,
            Port::PortB => &mut self.interrupt_b,
        }
    }
}

impl<RST, INTA, INTB, CB> ControlLines<RST, INTA, INTB, CB>
where
    CB: FnMut(Port),
{
    /// Hands `port` to the application's sink.
    pub fn notify(&mut self, port: Port) {
        (self.callback)(port)
    }
}

impl<RST, INTA, INTB, CB> ControlLines<RST, INTA, INTB, CB>
where
    RST: OutputPin,
{
    /// Drives `RESET` low.
    pub fn hold_in_reset(&mut self) -> core::result::Result<(), RST::Error> {
        self.reset.set_low()
    }

    /// Drives `RESET` high, letting the chip run.
    pub fn release_reset(&mut self) -> core::result::Result<(), RST::Error> {
        self.reset.set_high()
    }

    /// Pulses `RESET` low for the datasheet minimum and releases it.
    pub fn pulse_reset(&mut self, delay: &mut impl DelayNs) -> core::result::Result<(), RST::Error> {
        self.hold_in_reset()?;
        delay.delay_us(RESET_PULSE_US);
        self.release_reset()
    }
}

impl<RST, INTA, INTB, CB, E> ControlLines<RST, INTA, INTB, CB>
where
    INTA: InputPin<Error = E>,
    INTB: InputPin<Error = E>,
{
    /// Reports whether the interrupt output of `port` is asserted.
    ///
    /// `iocon` selects the active level: open-drain outputs (`ODR`) and
    /// `INTPOL = 0` are active-low, otherwise the line is active-high.
    pub fn interrupt_asserted(&mut self, port: Port, iocon: Iocon) -> core::result::Result<bool, E> {
        let active_high = iocon.intpol() && !iocon.odr();
        let high = match port {
            Port::PortA => self.interrupt_a.is_high()?,
            Port::PortB => self.interrupt_b.is_high()?,
        };
        Ok(high == active_high)
    }
}
