// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-level drivers that sit below the motion and control logic. They
//! are generic over `embedded-hal` traits; the board glue lives in `hw`.
//!
//! ## Existing drivers
//!
//! - [`stepper`] – step/direction/enable stepper driver channel
//! - [`trigger`] – single-line trigger actuator
//! - [`hcsr04`] – five-channel ultrasonic ranger with interrupt-fed echo timing

pub mod hcsr04;
pub mod stepper;
pub mod trigger;

pub use hcsr04::{EchoTimes, Ranger};
pub use stepper::{Direction, StepOutput, Stepper};
pub use trigger::{ActiveLevel, Trigger};
