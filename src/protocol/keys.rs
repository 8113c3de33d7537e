// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Single-character teleoperation commands.

/// Teleop key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// `w`: drive both channels at full rate, left high / right low.
    Backward,
    /// `s`: drive both channels at full rate, left low / right high.
    Forward,
    /// `a`: pivot at the reduced rate, both directions low.
    TurnRight,
    /// `d`: pivot at the reduced rate, both directions high.
    TurnLeft,
    /// `f`: timed single-shot fire.
    Fire,
    /// `r`: enter roam mode.
    Roam,
    /// `q`: stop.
    Stop,
    /// Anything else. Treated as stop.
    Other(u8),
}

impl Key {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'w' => Key::Backward,
            b's' => Key::Forward,
            b'a' => Key::TurnRight,
            b'd' => Key::TurnLeft,
            b'f' => Key::Fire,
            b'r' => Key::Roam,
            b'q' => Key::Stop,
            other => Key::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_control_characters() {
        assert_eq!(Key::from_byte(b'w'), Key::Backward);
        assert_eq!(Key::from_byte(b'r'), Key::Roam);
        assert_eq!(Key::from_byte(b'q'), Key::Stop);
        assert_eq!(Key::from_byte(b'W'), Key::Other(b'W'));
        assert_eq!(Key::from_byte(b'\n'), Key::Other(b'\n'));
    }
}
