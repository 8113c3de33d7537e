// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Command packets and the typed commands decoded from them.

use core::fmt;

use crate::drivers::stepper::Direction;
use crate::motors::Side;

/// Terminator byte closing every packet.
pub const TERMINATOR: u8 = b'\n';

/// `units` value that encodes zero velocity.
pub const VELOCITY_ZERO: u16 = 32_768;

// Command IDs
pub const CMD_STOP_ALL: u8 = 0x00;
pub const CMD_SET_GUN: u8 = 0x01;
pub const CMD_LEFT: u8 = 0x02;
pub const CMD_RIGHT: u8 = 0x03;

// Layout A step selectors carried by `CMD_LEFT`.
pub const STEP_LEFT_FORWARD: u8 = 0x00;
pub const STEP_LEFT_REVERSE: u8 = 0x01;
pub const STEP_RIGHT_FORWARD: u8 = 0x02;
pub const STEP_RIGHT_REVERSE: u8 = 0x03;

/// Packet layout on the wire.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layout {
    /// `[command_id: u8, parameter: u8, terminator: u8]`
    A,
    /// `[command_id: u8, units: u16 (big-endian), terminator: u8]`
    B,
}

impl Layout {
    /// Size of one packet in bytes.
    #[inline]
    pub const fn frame_len(self) -> usize {
        match self {
            Layout::A => 3,
            Layout::B => 4,
        }
    }
}

/// Packet parameter field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    /// Layout A: 8-bit selector.
    Byte(u8),
    /// Layout B: 16-bit units, zero-centered at [`VELOCITY_ZERO`].
    Units(u16),
}

impl Parameter {
    #[inline]
    pub fn raw(self) -> u16 {
        match self {
            Parameter::Byte(b) => b as u16,
            Parameter::Units(u) => u,
        }
    }
}

/// One decoded packet. Built per read and consumed immediately.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandPacket {
    pub command_id: u8,
    pub parameter: Parameter,
    pub terminator: u8,
}

/// Typed command.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Disable both drive channels.
    StopAll,
    /// Assert (`true`) or release the trigger actuator.
    SetGun(bool),
    /// Emit one step pulse on a channel.
    Pulse { side: Side, direction: Direction },
    /// Run a channel continuously; zero holds it.
    SetVelocity { side: Side, velocity: i16 },
    /// Opcode accepted but reserved in this layout. No effect.
    Reserved(u8),
}

/// Recognized frame carrying an opcode (or Layout A selector) with no meaning.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownCommand {
    pub id: u8,
    pub parameter: u16,
}

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command {} (parameter {})", self.id, self.parameter)
    }
}

/// Convert zero-centered units into a signed velocity (`units - 32768`).
#[inline]
pub const fn signed_velocity(units: u16) -> i16 {
    (units ^ 0x8000) as i16
}

impl CommandPacket {
    /// Interpret the packet.
    pub fn command(&self) -> Result<Command, UnknownCommand> {
        let unknown = UnknownCommand {
            id: self.command_id,
            parameter: self.parameter.raw(),
        };

        match (self.command_id, self.parameter) {
            // Layout A only steps with the channels left enabled; it cannot re-enable them.
            (CMD_STOP_ALL | CMD_SET_GUN, Parameter::Byte(_)) => Ok(Command::Reserved(self.command_id)),

            (CMD_STOP_ALL, _) => Ok(Command::StopAll),
            (CMD_SET_GUN, p) => Ok(Command::SetGun(p.raw() == 1)),

            (CMD_LEFT, Parameter::Byte(sel)) => {
                let (side, direction) = match sel {
                    STEP_LEFT_FORWARD => (Side::Left, Direction::Forward),
                    STEP_LEFT_REVERSE => (Side::Left, Direction::Reverse),
                    STEP_RIGHT_FORWARD => (Side::Right, Direction::Forward),
                    STEP_RIGHT_REVERSE => (Side::Right, Direction::Reverse),
                    _ => return Err(unknown),
                };
                Ok(Command::Pulse { side, direction })
            }

            (CMD_LEFT, Parameter::Units(units)) => Ok(Command::SetVelocity {
                side: Side::Left,
                velocity: signed_velocity(units),
            }),
            (CMD_RIGHT, Parameter::Units(units)) => Ok(Command::SetVelocity {
                side: Side::Right,
                velocity: signed_velocity(units),
            }),

            _ => Err(unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(id: u8, parameter: Parameter) -> CommandPacket {
        CommandPacket {
            command_id: id,
            parameter,
            terminator: TERMINATOR,
        }
    }

    #[test]
    fn signed_velocity_covers_full_range() {
        for units in 0..=u16::MAX {
            assert_eq!(signed_velocity(units) as i32, units as i32 - 32_768);
        }
        assert_eq!(signed_velocity(0), i16::MIN);
        assert_eq!(signed_velocity(u16::MAX), i16::MAX);
        assert_eq!(signed_velocity(VELOCITY_ZERO), 0);
    }

    #[test]
    fn layout_a_step_selectors() {
        assert_eq!(
            packet(CMD_LEFT, Parameter::Byte(STEP_LEFT_FORWARD)).command(),
            Ok(Command::Pulse {
                side: Side::Left,
                direction: Direction::Forward
            })
        );
        assert_eq!(
            packet(CMD_LEFT, Parameter::Byte(STEP_RIGHT_REVERSE)).command(),
            Ok(Command::Pulse {
                side: Side::Right,
                direction: Direction::Reverse
            })
        );
        assert_eq!(
            packet(CMD_LEFT, Parameter::Byte(0x04)).command(),
            Err(UnknownCommand {
                id: CMD_LEFT,
                parameter: 4
            })
        );
    }

    #[test]
    fn gun_fires_only_on_one() {
        assert_eq!(
            packet(CMD_SET_GUN, Parameter::Units(1)).command(),
            Ok(Command::SetGun(true))
        );
        assert_eq!(
            packet(CMD_SET_GUN, Parameter::Units(0)).command(),
            Ok(Command::SetGun(false))
        );
        assert_eq!(
            packet(CMD_SET_GUN, Parameter::Units(2)).command(),
            Ok(Command::SetGun(false))
        );
    }

    #[test]
    fn layout_a_stop_and_gun_are_reserved() {
        assert_eq!(
            packet(CMD_STOP_ALL, Parameter::Byte(0)).command(),
            Ok(Command::Reserved(CMD_STOP_ALL))
        );
        assert_eq!(
            packet(CMD_SET_GUN, Parameter::Byte(1)).command(),
            Ok(Command::Reserved(CMD_SET_GUN))
        );
        assert_eq!(
            packet(CMD_STOP_ALL, Parameter::Units(0)).command(),
            Ok(Command::StopAll)
        );
    }

    #[test]
    fn unknown_ids_are_reported() {
        let err = packet(0x09, Parameter::Units(7)).command().unwrap_err();
        assert_eq!(err.id, 0x09);
        assert_eq!(err.parameter, 7);
        // Layout A has no right-channel opcode.
        assert!(packet(CMD_RIGHT, Parameter::Byte(0)).command().is_err());
    }
}
