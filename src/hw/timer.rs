// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running 1 MHz timestamp counter on TIM2.
//!
//! TIM2 is 32-bit, so the count wraps every ~71.6 minutes; consumers take wrapping differences.

use stm32f7xx_hal::pac;

/// Configure TIM2 to count microseconds and leave it running. `timclk_hz` is the APB1 timer clock.
///
/// Takes the peripheral so nothing else can reconfigure it; read it back with [`micros`].
pub fn start_tim2(tim: pac::TIM2, timclk_hz: u32) {
    let rcc = unsafe { &*pac::RCC::ptr() };
    rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

    // Disable counter while configuring
    tim.cr1.modify(|_, w| w.cen().clear_bit());

    // 1 MHz tick
    tim.psc.write(|w| unsafe { w.bits(timclk_hz / 1_000_000 - 1) });

    // Auto-reload: max 32-bit
    tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });

    // Latch the prescaler and reset the counter
    tim.egr.write(|w| w.ug().set_bit());
    tim.cnt.write(|w| unsafe { w.bits(0) });

    // Enable the counter
    tim.cr1.modify(|_, w| w.cen().set_bit());
}

/// Read the TIM2 counter from any context, including interrupt handlers.
///
/// Only meaningful after [`start_tim2`] has run.
#[inline]
pub fn micros() -> u32 {
    let tim = unsafe { &*pac::TIM2::ptr() };
    tim.cnt.read().bits()
}
