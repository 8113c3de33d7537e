// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Busy-wait delay on the DWT cycle counter.
//!
//! The counter is read-only once running, so any number of `DwtDelay` copies can be used from
//! thread and exception context at the same time. SysTick stays free for the ranging loop.
//!
//! The cycle counter must be enabled first:
//! ```no_run
//! cp.DCB.enable_trace();
//! cp.DWT.enable_cycle_counter();
//! ```

use cortex_m::peripheral::DWT;
use embedded_hal::delay::DelayNs;

#[derive(Copy, Clone, Debug)]
pub struct DwtDelay {
    sysclk_hz: u32,
}

impl DwtDelay {
    pub fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl DelayNs for DwtDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * self.sysclk_hz as u64).div_ceil(1_000_000_000) as u32;
        let start = DWT::cycle_count();
        while DWT::cycle_count().wrapping_sub(start) < cycles {}
    }
}
