// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! [`split`] enables the receive interrupt and separates the port: [`UsartTx`] carries
//! short status lines to the attached host, [`UsartRx`] is the raw data register that the
//! receive interrupt drains into [`crate::protocol::RxPump`].

use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{self, Event, Instance, Pins, Rx, Serial, Tx},
};

use crate::protocol::ReadByte;

/// Enable RXNE interrupts and split the port.
pub fn split<U: Instance, PINS: Pins<U>>(mut serial: Serial<U, PINS>) -> (UsartTx<U>, UsartRx<U>) {
    serial.listen(Event::Rxne);
    let (tx, rx) = serial.split();
    (UsartTx { tx }, UsartRx { rx })
}

pub struct UsartTx<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> UsartTx<U> {
    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }
}

/// Receive data register. Read only from the receive interrupt.
pub struct UsartRx<U: Instance> {
    rx: Rx<U>,
}

impl<U: Instance> ReadByte for UsartRx<U> {
    type Error = serial::Error;

    #[inline]
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.rx.read()
    }
}
