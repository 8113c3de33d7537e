// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Reactive roam steering from the five ultrasonic readings.
//!
//! Pure and allocation-free; the control loop calls [`decide`] once per iteration while roaming.

use crate::drivers::hcsr04::{Readings, CENTER, FAR_LEFT, FAR_RIGHT, LEFT, RIGHT};
use crate::drivers::stepper::Direction;
use crate::motors::{Drive, Rate};

/// Steering command applied to the drivetrain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SteeringCommand {
    Forward,
    Left,
    Right,
    Stop,
}

impl SteeringCommand {
    /// Drivetrain motion for this command. Steering always runs at the reduced rate.
    pub fn drive(self) -> Drive {
        let (left, right) = match self {
            SteeringCommand::Forward => (Direction::Forward, Direction::Reverse),
            SteeringCommand::Left => (Direction::Forward, Direction::Forward),
            SteeringCommand::Right => (Direction::Reverse, Direction::Reverse),
            SteeringCommand::Stop => return Drive::Halt,
        };

        Drive::Run {
            left,
            right,
            rate: Rate::Reduced,
        }
    }
}

/// What to do when the center channel sees a wall.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoamPolicy {
    /// Always turn right. Matches the deployed firmware, whose side comparison picks right on
    /// both branches.
    AlwaysRight,
    /// Turn away from the side with the shorter average echo.
    Balanced,
}

/// Map readings (round-trip µs) to a steering command.
pub fn decide(readings: &Readings, wall_limit_us: u32, policy: RoamPolicy) -> SteeringCommand {
    if readings[CENTER] >= wall_limit_us {
        return SteeringCommand::Forward;
    }

    match policy {
        RoamPolicy::AlwaysRight => SteeringCommand::Right,
        RoamPolicy::Balanced => {
            let left = side_average(readings[FAR_LEFT], readings[LEFT]);
            let right = side_average(readings[RIGHT], readings[FAR_RIGHT]);
            if left < right {
                SteeringCommand::Right
            } else {
                SteeringCommand::Left
            }
        }
    }
}

#[inline]
fn side_average(a: u32, b: u32) -> u64 {
    (a as u64 + b as u64) / 2
}
