// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control Logic
//!
//! This module turns serial input and ultrasonic readings into drivetrain actions.
//!
//! ## Modules
//!
//! - [`control_loop`] - Motor control loop: serial polling, debounce, dispatch, roam steering.
//! - [`mode`] - Manual/roam state machine.
//! - [`roam`] - Reactive steering decision from the ranger readings.
//! - [`teleop`] - Key debounce and key-to-motion mapping.
//! - [`dispatch`] - Packet command execution.

pub mod control_loop;
pub mod dispatch;
pub mod mode;
pub mod roam;
pub mod teleop;

pub use control_loop::ControlLoop;
pub use mode::{Mode, ModeArbiter};
pub use roam::{decide, RoamPolicy, SteeringCommand};
