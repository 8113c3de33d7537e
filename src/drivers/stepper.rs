// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step/direction stepper driver channel.
//!
//! The external driver latches a step on the rising edge of its pulse input. Each channel has three
//! lines:
//! - enable: active-low; high holds the motor at rest
//! - direction: line level selects rotation
//! - step: rising edge advances one step, or a square wave for continuous motion
//!
//! Direction is always written and allowed to settle before any step edge is produced.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

/// Rotation selected by the direction line.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Direction line high.
    Forward,
    /// Direction line low.
    Reverse,
}

impl Direction {
    /// Direction for a signed velocity. Zero maps to `Forward`.
    #[inline]
    pub fn from_sign(velocity: i16) -> Self {
        if velocity < 0 {
            Direction::Reverse
        } else {
            Direction::Forward
        }
    }

    #[inline]
    fn pin_state(self) -> PinState {
        match self {
            Direction::Forward => PinState::High,
            Direction::Reverse => PinState::Low,
        }
    }
}

/// Step line of a driver channel.
pub trait StepOutput {
    /// Emit exactly one rising edge: drive low, hold, drive high.
    fn step(&mut self);

    /// Start a continuous square wave at `hz`.
    fn run(&mut self, hz: u32);

    /// Stop any continuous output.
    fn halt(&mut self);
}

/// One drive channel.
pub struct Stepper<EN, DIR, STEP> {
    enable: EN,
    dir: DIR,
    step: STEP,
    direction: Direction,
    enabled: bool,
    settle_us: u32,
}

impl<EN, DIR, STEP> Stepper<EN, DIR, STEP>
where
    EN: OutputPin,
    DIR: OutputPin,
    STEP: StepOutput,
{
    /// Wrap the three channel lines. `settle_us` is the minimum direction-to-step setup time.
    ///
    /// The channel starts disabled with the direction line high.
    pub fn new(mut enable: EN, mut dir: DIR, mut step: STEP, settle_us: u32) -> Self {
        step.halt();
        enable.set_high().ok();
        dir.set_high().ok();

        Self {
            enable,
            dir,
            step,
            direction: Direction::Forward,
            enabled: false,
            settle_us,
        }
    }

    /// Release the hold so the driver energizes the motor.
    pub fn enable(&mut self) {
        self.enable.set_low().ok();
        self.enabled = true;
    }

    /// Stop stepping and hold the channel at rest.
    pub fn disable(&mut self) {
        self.step.halt();
        self.enable.set_high().ok();
        self.enabled = false;
    }

    /// Write the direction line and wait for it to settle.
    pub fn set_direction<D: DelayNs>(&mut self, direction: Direction, delay: &mut D) {
        self.dir.set_state(direction.pin_state()).ok();
        self.direction = direction;
        delay.delay_us(self.settle_us);
    }

    /// Emit a single step in `direction`.
    pub fn pulse<D: DelayNs>(&mut self, direction: Direction, delay: &mut D) {
        self.set_direction(direction, delay);
        self.step.step();
    }

    /// Enable the channel and step continuously at `hz` in `direction`.
    pub fn run<D: DelayNs>(&mut self, direction: Direction, hz: u32, delay: &mut D) {
        self.set_direction(direction, delay);
        self.enable();
        self.step.run(hz);
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
