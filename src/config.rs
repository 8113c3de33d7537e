// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Build-time configuration profiles.
//!
//! A [`Profile`] bundles everything that differs between the firmware variants: serial framing,
//! baud rate, step rates, timing constants and the policy switches for behaviors whose intent is
//! ambiguous. The binary picks one with cargo features (`layout-a`, `layout-b`, or the default
//! teleop profile); nothing forks on the variant outside of [`Framing`].

use crate::control::roam::RoamPolicy;
use crate::drivers::trigger::ActiveLevel;
use crate::protocol::{Layout, TerminatorCheck};

/// How bytes on the serial line are framed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Framing {
    /// Single unframed ASCII control characters (teleoperation, roam available).
    Keys,
    /// Fixed-size binary command packets.
    Packets(Layout),
}

/// What `StopAll` does to a trigger actuator that is currently asserted.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopPolicy {
    /// Leave the trigger actuator as it is.
    KeepTrigger,
    /// Deassert the trigger actuator as well.
    ReleaseTrigger,
}

/// Step-rate settings, in step pulses per second.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SpeedConfig {
    /// Full-speed step rate.
    pub base_hz: u32,
    /// Divisor applied for pivots and roam steering.
    pub reduction: u32,
    /// Divisor applied to packet velocity commands. Velocity magnitude is not used.
    pub velocity_reduction: u32,
}

impl SpeedConfig {
    #[inline]
    pub const fn full_hz(&self) -> u32 {
        self.base_hz
    }

    #[inline]
    pub const fn reduced_hz(&self) -> u32 {
        self.base_hz / nonzero(self.reduction)
    }

    #[inline]
    pub const fn velocity_hz(&self) -> u32 {
        self.base_hz / nonzero(self.velocity_reduction)
    }
}

const fn nonzero(divisor: u32) -> u32 {
    if divisor == 0 {
        1
    } else {
        divisor
    }
}

/// Firmware profile.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    pub baud_rate: u32,
    pub framing: Framing,
    pub speed: SpeedConfig,

    /// Center round-trip time (µs) under which roam mode treats the way ahead as blocked.
    pub wall_limit_us: u32,
    /// How long a teleop fire holds the trigger actuator.
    pub fire_duration_ms: u32,
    /// Idle sleep between control loop iterations.
    pub control_period_ms: u32,
    /// Idle sleep between ranging loop iterations.
    pub ranging_period_ms: u32,
    /// Time the direction line is held stable before a step edge.
    pub settle_delay_us: u32,
    /// Low time of a single step pulse before the rising edge.
    pub step_pulse_us: u32,
    /// High time of an ultrasonic trigger pulse.
    pub trigger_pulse_us: u32,

    pub trigger_active: ActiveLevel,
    /// Enable both drive channels during initialization.
    pub drive_enabled_at_start: bool,

    pub terminator_check: TerminatorCheck,
    pub roam_policy: RoamPolicy,
    pub stop_policy: StopPolicy,
}

impl Profile {
    /// Keyboard teleoperation with ultrasonic roam mode.
    pub const TELEOP: Profile = Profile {
        baud_rate: 9_600,
        framing: Framing::Keys,
        speed: SpeedConfig {
            base_hz: 750,
            reduction: 1,
            velocity_reduction: 1,
        },
        wall_limit_us: 4_000,
        fire_duration_ms: 1_000,
        control_period_ms: 100,
        ranging_period_ms: 10,
        settle_delay_us: 5,
        step_pulse_us: 3,
        trigger_pulse_us: 10,
        trigger_active: ActiveLevel::Low,
        drive_enabled_at_start: false,
        terminator_check: TerminatorCheck::Newline,
        roam_policy: RoamPolicy::AlwaysRight,
        stop_policy: StopPolicy::KeepTrigger,
    };

    /// 3-byte packets, one step pulse per command.
    pub const PULSE: Profile = Profile {
        baud_rate: 115_200,
        framing: Framing::Packets(Layout::A),
        drive_enabled_at_start: true,
        terminator_check: TerminatorCheck::Ignore,
        ..Profile::TELEOP
    };

    /// 4-byte packets carrying signed velocities.
    pub const VELOCITY: Profile = Profile {
        baud_rate: 115_200,
        framing: Framing::Packets(Layout::B),
        trigger_active: ActiveLevel::High,
        terminator_check: TerminatorCheck::Newline,
        ..Profile::TELEOP
    };

    /// Profile selected by cargo features.
    pub const fn selected() -> Profile {
        if cfg!(feature = "layout-a") {
            Profile::PULSE
        } else if cfg!(feature = "layout-b") {
            Profile::VELOCITY
        } else {
            Profile::TELEOP
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::selected()
    }
}
