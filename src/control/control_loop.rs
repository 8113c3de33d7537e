// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Motor control loop.
//!
//! One [`ControlLoop::poll`] call is one iteration: poll the serial line without blocking, act on
//! what arrived, then (in roam mode) steer from the latest ultrasonic readings. The loop is the
//! sole owner of the actuator. It reads echo timing but never waits on it.
//!
//! A teleop fire blocks the iteration for the whole fire duration; serial input queues up in the
//! meantime and is handled afterwards.

use embedded_hal::delay::DelayNs;

use crate::config::{Framing, Profile};
use crate::control::mode::{Mode, ModeArbiter};
use crate::control::roam::{self, SteeringCommand};
use crate::control::{dispatch, teleop};
use crate::drivers::hcsr04::EchoTimes;
use crate::motors::Actuator;
use crate::protocol::{FrameReader, Key, ReadByte};
use crate::{log_debug, log_info, log_warn};

pub struct ControlLoop<'a, RX, A> {
    serial: RX,
    actuator: A,
    echoes: &'a EchoTimes,
    profile: Profile,

    frames: Option<FrameReader>,
    debounce: teleop::Debounce,
    arbiter: ModeArbiter,
    /// Set by a fire, cleared by driving, roam and stop keys.
    fire_locked: bool,
}

impl<'a, RX, A> ControlLoop<'a, RX, A>
where
    RX: ReadByte,
    A: Actuator,
{
    pub fn new(serial: RX, actuator: A, echoes: &'a EchoTimes, profile: Profile) -> Self {
        let frames = match profile.framing {
            Framing::Keys => None,
            Framing::Packets(layout) => Some(FrameReader::new(layout, profile.terminator_check)),
        };

        Self {
            serial,
            actuator,
            echoes,
            profile,
            frames,
            debounce: teleop::Debounce::new(),
            arbiter: ModeArbiter::new(),
            fire_locked: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.arbiter.mode()
    }

    /// Steering command last applied by roam mode.
    #[inline]
    pub fn steering(&self) -> Option<SteeringCommand> {
        self.arbiter.applied()
    }

    #[inline]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    #[inline]
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Run one loop iteration.
    pub fn poll(&mut self) {
        if self.frames.is_some() {
            self.poll_packets();
        } else {
            if let Some(byte) = self.read_byte() {
                self.handle_key(byte);
            }
            self.roam_step();
        }
    }

    /// Run forever, idling `control_period_ms` between iterations.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        loop {
            self.poll();
            delay.delay_ms(self.profile.control_period_ms);
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        match self.serial.read_byte() {
            Ok(byte) => Some(byte),
            Err(nb::Error::WouldBlock) => None,
            Err(nb::Error::Other(_)) => {
                log_warn!("Serial receive error");
                None
            }
        }
    }

    /// Drain buffered bytes until one frame completes.
    fn poll_packets(&mut self) {
        while let Some(byte) = self.read_byte() {
            let Some(frames) = self.frames.as_mut() else {
                return;
            };
            match frames.push(byte) {
                None => continue,
                Some(Ok(packet)) => dispatch::execute_packet(&mut self.actuator, &packet),
                Some(Err(err)) => log_warn!("Invalid packet: {:?}", err),
            }
            return;
        }
    }

    fn handle_key(&mut self, byte: u8) {
        if !self.debounce.is_new(byte) {
            return;
        }

        let key = Key::from_byte(byte);
        if key == Key::Fire && self.fire_locked {
            log_debug!("Fire ignored, trigger locked");
            return;
        }

        self.debounce.accept(byte);
        self.arbiter.on_key(key);

        if let Some(drive) = teleop::key_drive(key) {
            self.actuator.drive(drive);
            self.fire_locked = false;
            return;
        }

        match key {
            Key::Fire => {
                self.fire_locked = true;
                self.actuator.fire(self.profile.fire_duration_ms);
            }
            Key::Roam => {
                log_info!("Roam mode");
                self.fire_locked = false;
            }
            Key::Stop => {
                self.actuator.stop_all();
                self.fire_locked = false;
            }
            // Fallback stop leaves the fire lock alone.
            _ => self.actuator.stop_all(),
        }
    }

    fn roam_step(&mut self) {
        if self.arbiter.mode() != Mode::Roam {
            return;
        }

        let readings = self.echoes.latest_readings();
        let decision = roam::decide(
            &readings,
            self.profile.wall_limit_us,
            self.profile.roam_policy,
        );

        if let Some(command) = self.arbiter.steer(decision) {
            log_info!("Motion changed: {:?}", command);
            self.actuator.drive(command.drive());
        }
    }
}
