// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Teleop key handling helpers.

use crate::drivers::stepper::Direction;
use crate::motors::{Drive, Rate};
use crate::protocol::Key;

/// Edge-triggered key filter: a byte equal to the last accepted one has no effect.
pub struct Debounce {
    last: Option<u8>,
}

impl Debounce {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Whether `byte` differs from the last accepted byte.
    #[inline]
    pub fn is_new(&self, byte: u8) -> bool {
        self.last != Some(byte)
    }

    /// Remember `byte` as accepted.
    #[inline]
    pub fn accept(&mut self, byte: u8) {
        self.last = Some(byte);
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new()
    }
}

/// Drivetrain motion requested by a driving key.
pub fn key_drive(key: Key) -> Option<Drive> {
    use Direction::{Forward as F, Reverse as R};

    let (left, right, rate) = match key {
        Key::Backward => (F, R, Rate::Full),
        Key::Forward => (R, F, Rate::Full),
        Key::TurnLeft => (F, F, Rate::Reduced),
        Key::TurnRight => (R, R, Rate::Reduced),
        _ => return None,
    };

    Some(Drive::Run { left, right, rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_byte_is_filtered() {
        let mut d = Debounce::new();
        assert!(d.is_new(b'w'));
        d.accept(b'w');
        assert!(!d.is_new(b'w'));
        assert!(d.is_new(b's'));
        d.accept(b's');
        assert!(d.is_new(b'w'));
    }

    #[test]
    fn only_driving_keys_move() {
        assert_eq!(
            key_drive(Key::Backward),
            Some(Drive::Run {
                left: Direction::Forward,
                right: Direction::Reverse,
                rate: Rate::Full
            })
        );
        assert_eq!(
            key_drive(Key::TurnRight),
            Some(Drive::Run {
                left: Direction::Reverse,
                right: Direction::Reverse,
                rate: Rate::Reduced
            })
        );
        assert_eq!(key_drive(Key::Fire), None);
        assert_eq!(key_drive(Key::Stop), None);
        assert_eq!(key_drive(Key::Other(b'z')), None);
    }
}
