// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! `embedded-hal` 1.0 output adapter over type-erased HAL pins.
//!
//! Erasing the port/pin number lets the five trigger lines live in one array and both drive
//! channels share one pin type.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::gpio::{self, PushPull};

/// Push-pull output line.
pub struct Output {
    pin: gpio::ErasedPin<gpio::Output<PushPull>>,
}

impl Output {
    pub fn new<const P: char, const N: u8>(pin: gpio::Pin<P, N, gpio::Output<PushPull>>) -> Self {
        Self { pin: pin.erase() }
    }
}

impl ErrorType for Output {
    type Error = Infallible;
}

impl OutputPin for Output {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}
