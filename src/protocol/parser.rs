// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Packet decoder for the binary command protocol.
//!
//! Bytes are accumulated until a full frame is buffered, then decoded in one step. A frame that
//! fails validation is dropped whole and the next frame starts with the next byte received; there
//! is no resynchronization, so a producer that is not byte-aligned with us stays misaligned until
//! the framing happens to line up again.

use core::fmt;

use crate::protocol::messages::*;

/// Largest frame of any layout.
pub const MAX_FRAME_LEN: usize = 4;

/// Whether the terminator byte is checked.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TerminatorCheck {
    /// Accept any terminator byte (Layout A reference behavior).
    Ignore,
    /// Require [`TERMINATOR`].
    Newline,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Fewer bytes than one frame. Nothing was consumed.
    Incomplete { needed: usize, got: usize },
    /// Terminator byte did not match; the frame was discarded.
    BadTerminator(u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Incomplete { needed, got } => {
                write!(f, "incomplete frame ({got} of {needed} bytes)")
            }
            FrameError::BadTerminator(b) => write!(f, "invalid packet terminator 0x{b:02X}"),
        }
    }
}

/// Decode the first frame of `buf`.
///
/// Layout B always requires the newline terminator; `check` only relaxes Layout A.
pub fn decode(
    layout: Layout,
    check: TerminatorCheck,
    buf: &[u8],
) -> Result<CommandPacket, FrameError> {
    let needed = layout.frame_len();
    if buf.len() < needed {
        return Err(FrameError::Incomplete {
            needed,
            got: buf.len(),
        });
    }

    let (parameter, terminator) = match layout {
        Layout::A => (Parameter::Byte(buf[1]), buf[2]),
        Layout::B => (
            Parameter::Units(u16::from_be_bytes([buf[1], buf[2]])),
            buf[3],
        ),
    };

    let strict = layout == Layout::B || check == TerminatorCheck::Newline;
    if strict && terminator != TERMINATOR {
        return Err(FrameError::BadTerminator(terminator));
    }

    Ok(CommandPacket {
        command_id: buf[0],
        parameter,
        terminator,
    })
}

/// Byte-at-a-time frame accumulator.
pub struct FrameReader {
    layout: Layout,
    check: TerminatorCheck,
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl FrameReader {
    pub fn new(layout: Layout, check: TerminatorCheck) -> Self {
        Self {
            layout,
            check,
            buf: [0; MAX_FRAME_LEN],
            len: 0,
        }
    }

    /// Bytes buffered towards the next frame.
    #[inline]
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Process a single incoming byte. Returns a result once a full frame has been buffered.
    pub fn push(&mut self, byte: u8) -> Option<Result<CommandPacket, FrameError>> {
        self.buf[self.len] = byte;
        self.len += 1;

        if self.len < self.layout.frame_len() {
            return None;
        }

        // Consumed either way
        self.len = 0;
        Some(decode(self.layout, self.check, &self.buf))
    }
}
