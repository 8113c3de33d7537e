// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step pulse generation on general-purpose timer channel 1 (TIM3/TIM4).
//!
//! The step pin must be in the timer's alternate function. Continuous stepping uses PWM mode 1 at
//! 50 % duty. A single step uses one-pulse mode in PWM mode 2: the line is held low for the pulse
//! width, rises (the step edge), then drops back when the counter stops.

use stm32f7xx_hal::pac::{self, tim3};

use crate::drivers::stepper::StepOutput;

/// Counter tick rate.
const TICK_HZ: u32 = 1_000_000;

// CR1
const CR1_CEN: u32 = 1 << 0;
const CR1_OPM: u32 = 1 << 3;
const CR1_ARPE: u32 = 1 << 7;

// CCMR1 channel 1 output compare
const OC1M_MASK: u32 = 0b111 << 4 | 1 << 16;
const OC1M_FORCE_LOW: u32 = 0b100 << 4;
const OC1M_PWM1: u32 = 0b110 << 4;
const OC1M_PWM2: u32 = 0b111 << 4;
const OC1PE: u32 = 1 << 3;

const CCER_CC1E: u32 = 1 << 0;
const EGR_UG: u32 = 1 << 0;

/// Channel 1 of TIM3 or TIM4 driving a step line.
pub struct TimerStep {
    regs: *const tim3::RegisterBlock,
    /// Low time before the step edge, in ticks.
    pulse_ticks: u32,
}

impl TimerStep {
    /// Take TIM3 for step output on channel 1.
    pub fn tim3(_tim: pac::TIM3, timclk_hz: u32, pulse_us: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());
        Self::init(pac::TIM3::ptr(), timclk_hz, pulse_us)
    }

    /// Take TIM4 for step output on channel 1.
    pub fn tim4(_tim: pac::TIM4, timclk_hz: u32, pulse_us: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());
        Self::init(pac::TIM4::ptr(), timclk_hz, pulse_us)
    }

    fn init(regs: *const tim3::RegisterBlock, timclk_hz: u32, pulse_us: u32) -> Self {
        let mut this = Self {
            regs,
            pulse_ticks: pulse_us.max(1),
        };

        let tim = this.regs();
        tim.cr1.write(|w| unsafe { w.bits(0) });
        tim.psc.write(|w| unsafe { w.bits(timclk_hz / TICK_HZ - 1) });
        tim.egr.write(|w| unsafe { w.bits(EGR_UG) });
        tim.ccer.modify(|r, w| unsafe { w.bits(r.bits() | CCER_CC1E) });

        this.halt();
        this
    }

    #[inline]
    fn regs(&self) -> &tim3::RegisterBlock {
        unsafe { &*self.regs }
    }

    fn set_mode(&self, oc1m: u32) {
        self.regs()
            .ccmr1_output()
            .modify(|r, w| unsafe { w.bits((r.bits() & !(OC1M_MASK | OC1PE)) | oc1m | OC1PE) });
    }
}

impl StepOutput for TimerStep {
    fn step(&mut self) {
        let tim = self.regs();
        tim.cr1.write(|w| unsafe { w.bits(0) });

        self.set_mode(OC1M_PWM2);
        tim.arr.write(|w| unsafe { w.bits(2 * self.pulse_ticks) });
        tim.ccr1.write(|w| unsafe { w.bits(self.pulse_ticks) });
        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.egr.write(|w| unsafe { w.bits(EGR_UG) });

        tim.cr1.write(|w| unsafe { w.bits(CR1_OPM | CR1_CEN) });
    }

    fn run(&mut self, hz: u32) {
        let tim = self.regs();
        let period = (TICK_HZ / hz.max(1)).clamp(2, 0x1_0000);

        tim.cr1.write(|w| unsafe { w.bits(0) });

        self.set_mode(OC1M_PWM1);
        tim.arr.write(|w| unsafe { w.bits(period - 1) });
        tim.ccr1.write(|w| unsafe { w.bits(period / 2) });
        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.egr.write(|w| unsafe { w.bits(EGR_UG) });

        tim.cr1.write(|w| unsafe { w.bits(CR1_ARPE | CR1_CEN) });
    }

    fn halt(&mut self) {
        self.regs().cr1.write(|w| unsafe { w.bits(0) });
        self.set_mode(OC1M_FORCE_LOW);
    }
}
