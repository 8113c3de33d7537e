// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Two-channel stepper drivetrain with a trigger actuator.
//!
//! The control loop is the only owner; every method runs to completion in the caller's context.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{SpeedConfig, StopPolicy};
use crate::drivers::stepper::{Direction, StepOutput, Stepper};
use crate::drivers::trigger::Trigger;
use crate::motors::{Actuator, Drive, Rate, Side};

pub struct Drivetrain<EN, DIR, LSTEP, RSTEP, TRIG: OutputPin, D> {
    left: Stepper<EN, DIR, LSTEP>,
    right: Stepper<EN, DIR, RSTEP>,
    trigger: Trigger<TRIG>,
    delay: D,
    speed: SpeedConfig,
    stop_policy: StopPolicy,
}

impl<EN, DIR, LSTEP, RSTEP, TRIG, D> Drivetrain<EN, DIR, LSTEP, RSTEP, TRIG, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    LSTEP: StepOutput,
    RSTEP: StepOutput,
    TRIG: OutputPin,
    D: DelayNs,
{
    pub fn new(
        left: Stepper<EN, DIR, LSTEP>,
        right: Stepper<EN, DIR, RSTEP>,
        trigger: Trigger<TRIG>,
        delay: D,
        speed: SpeedConfig,
        stop_policy: StopPolicy,
    ) -> Self {
        Self {
            left,
            right,
            trigger,
            delay,
            speed,
            stop_policy,
        }
    }

    /// Enable both channels without stepping, e.g. for single-step operation.
    pub fn enable_all(&mut self) {
        self.left.enable();
        self.right.enable();
    }

    #[inline]
    pub fn left(&self) -> &Stepper<EN, DIR, LSTEP> {
        &self.left
    }

    #[inline]
    pub fn right(&self) -> &Stepper<EN, DIR, RSTEP> {
        &self.right
    }

    #[inline]
    pub fn trigger_asserted(&self) -> bool {
        self.trigger.is_asserted()
    }

    fn rate_hz(&self, rate: Rate) -> u32 {
        match rate {
            Rate::Full => self.speed.full_hz(),
            Rate::Reduced => self.speed.reduced_hz(),
        }
    }

    fn disable_both(&mut self) {
        self.left.disable();
        self.right.disable();
    }
}

impl<EN, DIR, LSTEP, RSTEP, TRIG, D> Actuator for Drivetrain<EN, DIR, LSTEP, RSTEP, TRIG, D>
where
    EN: OutputPin,
    DIR: OutputPin,
    LSTEP: StepOutput,
    RSTEP: StepOutput,
    TRIG: OutputPin,
    D: DelayNs,
{
    fn pulse(&mut self, side: Side, direction: Direction) {
        match side {
            Side::Left => self.left.pulse(direction, &mut self.delay),
            Side::Right => self.right.pulse(direction, &mut self.delay),
        }
    }

    fn set_velocity(&mut self, side: Side, velocity: i16) {
        let hz = self.speed.velocity_hz();
        let direction = Direction::from_sign(velocity);

        match (side, velocity) {
            (Side::Left, 0) => self.left.disable(),
            (Side::Right, 0) => self.right.disable(),
            (Side::Left, _) => self.left.run(direction, hz, &mut self.delay),
            (Side::Right, _) => self.right.run(direction, hz, &mut self.delay),
        }
    }

    fn drive(&mut self, drive: Drive) {
        match drive {
            Drive::Halt => self.disable_both(),
            Drive::Run { left, right, rate } => {
                let hz = self.rate_hz(rate);
                self.left.run(left, hz, &mut self.delay);
                self.right.run(right, hz, &mut self.delay);
            }
        }
    }

    fn fire(&mut self, duration_ms: u32) {
        self.disable_both();
        self.trigger.assert();
        self.delay.delay_ms(duration_ms);
        self.trigger.release();
    }

    fn set_trigger(&mut self, asserted: bool) {
        self.trigger.set(asserted);
    }

    fn stop_all(&mut self) {
        self.disable_both();
        if self.stop_policy == StopPolicy::ReleaseTrigger {
            self.trigger.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::trigger::ActiveLevel;
    use crate::mock::{Event, Journal, MockDelay, MockPin, MockStep};

    type TestDrivetrain = Drivetrain<MockPin, MockPin, MockStep, MockStep, MockPin, MockDelay>;

    const SPEED: SpeedConfig = SpeedConfig {
        base_hz: 750,
        reduction: 2,
        velocity_reduction: 3,
    };

    fn drivetrain(j: &Journal, stop_policy: StopPolicy) -> TestDrivetrain {
        let left = Stepper::new(j.pin("en1"), j.pin("dir1"), j.step("pul1"), 5);
        let right = Stepper::new(j.pin("en2"), j.pin("dir2"), j.step("pul2"), 5);
        let gun = Trigger::new(j.pin("gun"), ActiveLevel::Low);
        let dt = Drivetrain::new(left, right, gun, j.delay(), SPEED, stop_policy);
        j.clear();
        dt
    }

    #[test]
    fn pulse_touches_one_channel() {
        let j = Journal::new();
        let mut dt = drivetrain(&j, StopPolicy::KeepTrigger);

        dt.pulse(Side::Right, Direction::Reverse);

        assert_eq!(
            j.events(),
            vec![Event::Low("dir2"), Event::Delay(5), Event::Step("pul2")]
        );
        assert!(!j.touched("dir1"));
        assert!(!j.touched("pul1"));
    }

    #[test]
    fn velocity_zero_holds_channel() {
        let j = Journal::new();
        let mut dt = drivetrain(&j, StopPolicy::KeepTrigger);

        dt.set_velocity(Side::Left, -200);
        assert!(dt.left().is_enabled());
        assert_eq!(dt.left().direction(), Direction::Reverse);
        assert_eq!(j.count(&Event::Run("pul1", 250)), 1);

        dt.set_velocity(Side::Left, 0);
        assert!(!dt.left().is_enabled());
        assert_eq!(j.level("en1"), Some(true));
        assert!(!j.touched("en2"));
    }

    #[test]
    fn drive_uses_rate_class() {
        let j = Journal::new();
        let mut dt = drivetrain(&j, StopPolicy::KeepTrigger);

        dt.drive(Drive::Run {
            left: Direction::Forward,
            right: Direction::Reverse,
            rate: Rate::Full,
        });
        assert_eq!(j.count(&Event::Run("pul1", 750)), 1);
        assert_eq!(j.count(&Event::Run("pul2", 750)), 1);
        assert_eq!(j.level("dir1"), Some(true));
        assert_eq!(j.level("dir2"), Some(false));

        dt.drive(Drive::Run {
            left: Direction::Reverse,
            right: Direction::Reverse,
            rate: Rate::Reduced,
        });
        assert_eq!(j.count(&Event::Run("pul1", 375)), 1);

        dt.drive(Drive::Halt);
        assert!(!dt.left().is_enabled());
        assert!(!dt.right().is_enabled());
    }

    #[test]
    fn fire_holds_trigger_for_duration() {
        let j = Journal::new();
        let mut dt = drivetrain(&j, StopPolicy::KeepTrigger);
        dt.enable_all();
        j.clear();

        dt.fire(1_000);

        let events = j.events();
        let assert_at = events.iter().position(|e| *e == Event::Low("gun")).unwrap();
        let release_at = events.iter().position(|e| *e == Event::High("gun")).unwrap();
        assert_eq!(events[assert_at + 1], Event::Delay(1_000_000));
        assert_eq!(release_at, assert_at + 2);

        // Channels were disabled before the trigger went active and stay disabled.
        let en_off = events.iter().position(|e| *e == Event::High("en2")).unwrap();
        assert!(en_off < assert_at);
        assert!(!dt.left().is_enabled());
        assert!(!dt.right().is_enabled());
        assert!(!dt.trigger_asserted());
    }

    #[test]
    fn stop_all_keeps_trigger_by_default() {
        let j = Journal::new();
        let mut dt = drivetrain(&j, StopPolicy::KeepTrigger);
        dt.set_trigger(true);
        dt.stop_all();
        assert!(dt.trigger_asserted());
        assert_eq!(j.level("gun"), Some(false));
    }

    #[test]
    fn stop_all_can_release_trigger() {
        let j = Journal::new();
        let mut dt = drivetrain(&j, StopPolicy::ReleaseTrigger);
        dt.set_trigger(true);
        dt.stop_all();
        assert!(!dt.trigger_asserted());
        assert_eq!(j.level("gun"), Some(true));
    }
}
