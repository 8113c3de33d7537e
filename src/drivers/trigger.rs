// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Trigger actuator output.

use embedded_hal::digital::OutputPin;

/// Whether the actuator is asserted by driving its line high or low.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    High,
    Low,
}

/// Trigger actuator that remembers its active level and last commanded state.
pub struct Trigger<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    asserted: bool,
}

impl<PIN: OutputPin> Trigger<PIN> {
    /// Wrap the actuator line, initializing it released.
    pub fn new(mut pin: PIN, active: ActiveLevel) -> Self {
        match active {
            ActiveLevel::High => pin.set_low().ok(),
            ActiveLevel::Low => pin.set_high().ok(),
        };
        Self {
            pin,
            active,
            asserted: false,
        }
    }

    /// Assert (`true`) or release the actuator.
    pub fn set(&mut self, asserted: bool) {
        match (self.active, asserted) {
            (ActiveLevel::High, true) | (ActiveLevel::Low, false) => self.pin.set_high().ok(),
            (ActiveLevel::High, false) | (ActiveLevel::Low, true) => self.pin.set_low().ok(),
        };
        self.asserted = asserted;
    }

    #[inline]
    pub fn assert(&mut self) {
        self.set(true);
    }

    #[inline]
    pub fn release(&mut self) {
        self.set(false);
    }

    #[inline]
    pub fn is_asserted(&self) -> bool {
        self.asserted
    }
}
