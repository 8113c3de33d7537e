// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 rover board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiod, Alternate, Edge, ExtiPin},
    pac,
    prelude::*,
    rcc::APB2,
};

use crate::hw::gpio::Output;

/// All board pins. Construct this once at startup using:
///
/// ```rust
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOD, dp.GPIOE, &mut dp.SYSCFG, &mut dp.EXTI, &mut apb2);
/// ```
pub struct BoardPins {
    pub usart1: Usart1Pins,
    pub left: LeftMotorPins,
    pub right: RightMotorPins,
    pub gun: Output,
    pub triggers: [Output; 5],
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// Left stepper driver pins
pub struct LeftMotorPins {
    pub enable: Output,
    pub dir: Output,
    pub step: gpioa::PA6<Alternate<2>>, // TIM3_CH1
}

/// Right stepper driver pins
pub struct RightMotorPins {
    pub enable: Output,
    pub dir: Output,
    pub step: gpiod::PD12<Alternate<2>>, // TIM4_CH1
}

// Echo input on both edges, routed to its EXTI line.
macro_rules! echo_input {
    ($pin:expr, $syscfg:expr, $exti:expr, $apb2:expr) => {{
        let mut pin = $pin.into_floating_input();
        pin.make_interrupt_source($syscfg, $apb2);
        pin.trigger_on_edge($exti, Edge::RisingFalling);
        pin.enable_interrupt($exti);
    }};
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals and arm the echo interrupts
    /// (GPIOE lines 5..=9, see [`crate::hw::exti::ECHO_LINES`]).
    pub fn new(
        gpioa: pac::GPIOA,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
        syscfg: &mut pac::SYSCFG,
        exti: &mut pac::EXTI,
        apb2: &mut APB2,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        echo_input!(gpioe.pe5, syscfg, exti, apb2);
        echo_input!(gpioe.pe6, syscfg, exti, apb2);
        echo_input!(gpioe.pe7, syscfg, exti, apb2);
        echo_input!(gpioe.pe8, syscfg, exti, apb2);
        echo_input!(gpioe.pe9, syscfg, exti, apb2);

        Self {
            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            left: LeftMotorPins {
                enable: Output::new(gpioa.pa3.into_push_pull_output()),
                dir: Output::new(gpioa.pa4.into_push_pull_output()),
                step: gpioa.pa6.into_alternate::<2>(),
            },

            right: RightMotorPins {
                enable: Output::new(gpiod.pd1.into_push_pull_output()),
                dir: Output::new(gpiod.pd2.into_push_pull_output()),
                step: gpiod.pd12.into_alternate::<2>(),
            },

            gun: Output::new(gpiod.pd8.into_push_pull_output()),

            triggers: [
                Output::new(gpioe.pe10.into_push_pull_output()),
                Output::new(gpioe.pe11.into_push_pull_output()),
                Output::new(gpioe.pe12.into_push_pull_output()),
                Output::new(gpioe.pe13.into_push_pull_output()),
                Output::new(gpioe.pe14.into_push_pull_output()),
            ],
        }
    }
}
