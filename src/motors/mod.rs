// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Actuator Abstractions
//!
//! This module contains the two-channel drivetrain and trigger actuator that sit above the
//! device-level drivers in `drivers`.
//!
//! ## Modules
//!
//! - [`drivetrain`] - Left/right stepper channels plus the trigger actuator.

pub mod drivetrain;

pub use drivetrain::Drivetrain;

use crate::drivers::stepper::Direction;

/// Drive channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Step rate class.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rate {
    /// Base rate.
    Full,
    /// Base rate divided by the turn reduction.
    Reduced,
}

/// Whole-drivetrain motion request.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Drive {
    /// Both channels held at rest.
    Halt,
    /// Both channels enabled and stepping continuously.
    Run {
        left: Direction,
        right: Direction,
        rate: Rate,
    },
}

/// Actuation surface driven by the control loop.
pub trait Actuator {
    /// One step on one channel.
    fn pulse(&mut self, side: Side, direction: Direction);

    /// Zero holds the channel; anything else runs it at the fixed velocity rate.
    fn set_velocity(&mut self, side: Side, velocity: i16);

    fn drive(&mut self, drive: Drive);

    /// Disable both channels, assert the trigger for `duration_ms`, then release it.
    /// Blocks for the whole duration and re-enables nothing.
    fn fire(&mut self, duration_ms: u32);

    fn set_trigger(&mut self, asserted: bool);

    /// Disable both channels.
    fn stop_all(&mut self);
}
