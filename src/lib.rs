// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Sentry Rover Firmware
//!
//! Firmware for a two-stepper rover with a trigger actuator and five ultrasonic rangers, written in
//! Rust, targeting an STM32F777 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`protocol`] | Serial command packets and teleop keys |
//! | [`drivers`] | Device-level drivers (stepper, trigger, HC-SR04 ranger) |
//! | [`motors`] | The drivetrain actuator |
//! | [`control`] | Control loop, mode arbitration, roam decisions |
//! | [`config`] | Build-time operating profiles |
//! | `hw` | MCU-level wrappers around USART, timers, EXTI (`board` feature) |
//!
//! Everything except `hw` is hardware-independent and tested on the host:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cargo run --release --features board --target thumbv7em-none-eabihf
//! ```
//!
//! Pick the wire protocol with `--features layout-a` or `--features layout-b`; without either the
//! firmware takes single-character teleop keys.
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod log;

pub mod config;
pub mod control;
pub mod drivers;
pub mod motors;
pub mod protocol;

#[cfg(feature = "board")]
pub mod hw;

#[cfg(test)]
mod mock;
