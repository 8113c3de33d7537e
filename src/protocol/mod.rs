// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial command protocol.
//!
//! Two mutually exclusive framings exist: fixed-size binary packets ([`parser`], [`messages`])
//! and single ASCII control characters ([`keys`]). Either way bytes reach the control loop through
//! the interrupt-fed buffer in [`rx`].

pub mod keys;
pub mod messages;
pub mod parser;
pub mod rx;

pub use keys::Key;
pub use messages::{Command, CommandPacket, Layout, Parameter, UnknownCommand};
pub use parser::{decode, FrameError, FrameReader, TerminatorCheck};
pub use rx::{RxPump, RX_CAPACITY};

/// Non-blocking byte source.
///
/// `read_byte` returns `Err(nb::Error::WouldBlock)` when nothing is buffered.
pub trait ReadByte {
    type Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;
}
