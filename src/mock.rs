// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side test doubles.
//!
//! Every double writes into a shared [`Journal`], so tests can assert the exact order in which
//! lines were driven, delays were spent and step generators were started.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::stepper::StepOutput;
use crate::protocol::ReadByte;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    High(&'static str),
    Low(&'static str),
    /// Busy-wait, normalized to microseconds.
    Delay(u64),
    Step(&'static str),
    Run(&'static str, u32),
    Halt(&'static str),
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Last level driven on `name`, if any.
    pub fn level(&self, name: &str) -> Option<bool> {
        self.0.borrow().iter().rev().find_map(|e| match e {
            Event::High(n) if *n == name => Some(true),
            Event::Low(n) if *n == name => Some(false),
            _ => None,
        })
    }

    /// Whether any event touched `name`.
    pub fn touched(&self, name: &str) -> bool {
        self.0.borrow().iter().any(|e| match e {
            Event::High(n) | Event::Low(n) | Event::Step(n) | Event::Halt(n) => *n == name,
            Event::Run(n, _) => *n == name,
            Event::Delay(_) => false,
        })
    }

    pub fn count(&self, event: &Event) -> usize {
        self.0.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn pin(&self, name: &'static str) -> MockPin {
        MockPin {
            name,
            journal: self.clone(),
        }
    }

    pub fn step(&self, name: &'static str) -> MockStep {
        MockStep {
            name,
            journal: self.clone(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay {
            journal: self.clone(),
        }
    }
}

pub struct MockPin {
    name: &'static str,
    journal: Journal,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.journal.push(Event::Low(self.name));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.journal.push(Event::High(self.name));
        Ok(())
    }
}

pub struct MockStep {
    name: &'static str,
    journal: Journal,
}

impl StepOutput for MockStep {
    fn step(&mut self) {
        self.journal.push(Event::Step(self.name));
    }

    fn run(&mut self, hz: u32) {
        self.journal.push(Event::Run(self.name, hz));
    }

    fn halt(&mut self) {
        self.journal.push(Event::Halt(self.name));
    }
}

pub struct MockDelay {
    journal: Journal,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.journal.push(Event::Delay(ns as u64 / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.journal.push(Event::Delay(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.journal.push(Event::Delay(ms as u64 * 1_000));
    }
}

/// Serial receive queue. Clones share the same queue.
#[derive(Clone, Default)]
pub struct MockSerial(Rc<RefCell<VecDeque<u8>>>);

impl MockSerial {
    pub fn feed(&self, bytes: &[u8]) {
        self.0.borrow_mut().extend(bytes.iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.0.borrow().len()
    }
}

impl ReadByte for MockSerial {
    type Error = Infallible;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.0.borrow_mut().pop_front().ok_or(nb::Error::WouldBlock)
    }
}

/// Why a [`MockRdr`] read failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RdrError {
    Overrun,
}

#[derive(Default)]
struct RdrState {
    data: Option<u8>,
    overrun: bool,
}

/// Single-byte receive data register. A byte arriving while the register is still full is lost
/// and raises the overrun flag, which the next read reports and clears.
#[derive(Clone, Default)]
pub struct MockRdr(Rc<RefCell<RdrState>>);

impl MockRdr {
    pub fn arrive(&self, byte: u8) {
        let mut state = self.0.borrow_mut();
        if state.data.is_some() {
            state.overrun = true;
        } else {
            state.data = Some(byte);
        }
    }
}

impl ReadByte for MockRdr {
    type Error = RdrError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        let mut state = self.0.borrow_mut();
        if state.overrun {
            state.overrun = false;
            return Err(nb::Error::Other(RdrError::Overrun));
        }
        state.data.take().ok_or(nb::Error::WouldBlock)
    }
}
