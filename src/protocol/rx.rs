// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-fed receive buffer.
//!
//! The USART holds a single received byte, while the control loop only polls once per control
//! period. [`RxPump::service`] runs in the receive interrupt and moves every byte from the data
//! register into a lock-free single-producer/single-consumer queue. The control loop reads the
//! consumer end through [`ReadByte`].
//!
//! The queue holds `N - 1` bytes. Bytes arriving while it is full are dropped and counted.

use core::convert::Infallible;

use heapless::spsc::{Consumer, Producer};

use crate::log_warn;
use crate::protocol::ReadByte;

/// Receive queue depth: a few hundred milliseconds of packets at 115200 baud.
pub const RX_CAPACITY: usize = 64;

/// Interrupt-side half of the receive buffer.
pub struct RxPump<'q, R, const N: usize> {
    source: R,
    producer: Producer<'q, u8, N>,
    errors: u32,
    dropped: u32,
}

impl<'q, R, const N: usize> RxPump<'q, R, N>
where
    R: ReadByte,
{
    pub fn new(source: R, producer: Producer<'q, u8, N>) -> Self {
        Self {
            source,
            producer,
            errors: 0,
            dropped: 0,
        }
    }

    /// Drain the receive register into the queue. Call from the receive interrupt.
    ///
    /// Receive errors are counted and skipped; the byte still held by the register is read on
    /// the next pass of the loop.
    pub fn service(&mut self) {
        loop {
            match self.source.read_byte() {
                Ok(byte) => {
                    if self.producer.enqueue(byte).is_err() {
                        self.dropped = self.dropped.wrapping_add(1);
                        log_warn!("Receive queue full, byte dropped");
                    }
                }
                Err(nb::Error::WouldBlock) => return,
                Err(nb::Error::Other(_)) => {
                    self.errors = self.errors.wrapping_add(1);
                    log_warn!("Serial receive error");
                }
            }
        }
    }

    /// Receive errors reported by the source so far.
    #[inline]
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Bytes lost to a full queue so far.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl<const N: usize> ReadByte for Consumer<'_, u8, N> {
    type Error = Infallible;

    #[inline]
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.dequeue().ok_or(nb::Error::WouldBlock)
    }
}
