// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! HC-SR04 style ultrasonic rangers, five trigger/echo pairs.
//!
//! A trigger pulse makes the sensor emit a burst; its echo line then goes high for as long as the
//! sound took to come back. Echo edges are timestamped from interrupt context by
//! [`EchoTimes::on_edge`], and the latest round-trip time per channel is read back without
//! blocking by [`EchoTimes::latest_readings`].
//!
//! Each field is a single aligned `AtomicU32` with one writer (the echo interrupt), so a reader
//! sees either the old or the new value, never a torn one. Readings of different channels are
//! not captured at a single instant.
//!
//! Triggering faster than the longest echo of the sensor can mix one channel's echo into the next
//! measurement. Nothing here guards against that; keep the ranging period at or above ~10 ms.

use core::sync::atomic::{AtomicU32, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Number of ranger channels.
pub const CHANNELS: usize = 5;

// Channel layout, left to right
pub const FAR_LEFT: usize = 0;
pub const LEFT: usize = 1;
pub const CENTER: usize = 2;
pub const RIGHT: usize = 3;
pub const FAR_RIGHT: usize = 4;

/// Round-trip time in microseconds, one per channel.
pub type Readings = [u32; CHANNELS];

/// Timing state of one echo line.
pub struct ChannelState {
    /// Written only by the rising edge.
    rise_us: AtomicU32,
    /// Written only by the falling edge.
    round_trip_us: AtomicU32,
}

impl ChannelState {
    pub const fn new() -> Self {
        Self {
            rise_us: AtomicU32::new(0),
            round_trip_us: AtomicU32::new(0),
        }
    }
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Echo timing shared between the echo interrupt and the control loop.
pub struct EchoTimes {
    channels: [ChannelState; CHANNELS],
}

impl EchoTimes {
    pub const fn new() -> Self {
        Self {
            channels: [
                ChannelState::new(),
                ChannelState::new(),
                ChannelState::new(),
                ChannelState::new(),
                ChannelState::new(),
            ],
        }
    }

    /// Record an edge on echo line `index`. Interrupt-safe: no allocation, no blocking.
    ///
    /// `now_us` is a free-running microsecond counter; wraparound is handled.
    #[inline]
    pub fn on_edge(&self, index: usize, rising: bool, now_us: u32) {
        let Some(ch) = self.channels.get(index) else {
            return;
        };

        if rising {
            ch.rise_us.store(now_us, Ordering::Relaxed);
        } else {
            let rise = ch.rise_us.load(Ordering::Relaxed);
            ch.round_trip_us
                .store(now_us.wrapping_sub(rise), Ordering::Release);
        }
    }

    /// Latest round-trip time of channel `index` (0 until the first echo completes).
    #[inline]
    pub fn round_trip_us(&self, index: usize) -> u32 {
        self.channels
            .get(index)
            .map_or(0, |ch| ch.round_trip_us.load(Ordering::Acquire))
    }

    /// Snapshot of every channel.
    pub fn latest_readings(&self) -> Readings {
        core::array::from_fn(|i| self.round_trip_us(i))
    }
}

impl Default for EchoTimes {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner of the five trigger lines.
pub struct Ranger<'a, T, D> {
    triggers: [T; CHANNELS],
    echoes: &'a EchoTimes,
    delay: D,
    pulse_us: u32,
}

impl<'a, T, D> Ranger<'a, T, D>
where
    T: OutputPin,
    D: DelayNs,
{
    /// Take the trigger lines and drive them all low. `pulse_us` should be at least 10.
    pub fn new(mut triggers: [T; CHANNELS], echoes: &'a EchoTimes, delay: D, pulse_us: u32) -> Self {
        for t in triggers.iter_mut() {
            t.set_low().ok();
        }

        Self {
            triggers,
            echoes,
            delay,
            pulse_us,
        }
    }

    /// Pulse every trigger line in turn.
    pub fn trigger_all(&mut self) {
        for t in self.triggers.iter_mut() {
            t.set_high().ok();
            self.delay.delay_us(self.pulse_us);
            t.set_low().ok();
        }
    }

    /// One ranging loop iteration. Call once per ranging period.
    #[inline]
    pub fn tick(&mut self) {
        self.trigger_all();
    }

    #[inline]
    pub fn latest_readings(&self) -> Readings {
        self.echoes.latest_readings()
    }
}
