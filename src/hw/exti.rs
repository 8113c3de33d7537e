// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Echo line interrupt dispatch.
//!
//! All five echo inputs sit on GPIOE lines 5..=9, which share the `EXTI9_5` vector. One handler
//! walks [`ECHO_LINES`] and reports each pending edge with its channel index and the line's level.

use stm32f7xx_hal::pac;

/// One echo input.
#[derive(Copy, Clone, Debug)]
pub struct EchoLine {
    /// Ranger channel index.
    pub channel: usize,
    /// EXTI line / GPIOE pin number.
    pub line: u8,
}

pub const ECHO_LINES: [EchoLine; 5] = [
    EchoLine { channel: 0, line: 5 },
    EchoLine { channel: 1, line: 6 },
    EchoLine { channel: 2, line: 7 },
    EchoLine { channel: 3, line: 8 },
    EchoLine { channel: 4, line: 9 },
];

/// Acknowledge pending echo edges and hand each to `on_edge(channel, rising)`.
///
/// Call only from the `EXTI9_5` handler.
#[inline]
pub fn dispatch(mut on_edge: impl FnMut(usize, bool)) {
    let exti = unsafe { &*pac::EXTI::ptr() };
    let gpioe = unsafe { &*pac::GPIOE::ptr() };

    let pending = exti.pr.read().bits();
    let levels = gpioe.idr.read().bits();

    for echo in ECHO_LINES.iter() {
        let mask = 1u32 << echo.line;
        if pending & mask != 0 {
            // Write-one-to-clear
            exti.pr.write(|w| unsafe { w.bits(mask) });
            on_edge(echo.channel, levels & mask != 0);
        }
    }
}
