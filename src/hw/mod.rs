// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Board Layer
//!
//! MCU-level wrappers for the STM32F777: pin map, USART, timers and the echo interrupt. Only built
//! with the `board` feature.

pub mod delay;
pub mod exti;
pub mod gpio;
pub mod pins;
pub mod step;
pub mod timer;
pub mod usart;

pub use delay::DwtDelay;
pub use gpio::Output;
pub use pins::BoardPins;
pub use step::TimerStep;
pub use usart::{UsartRx, UsartTx};
