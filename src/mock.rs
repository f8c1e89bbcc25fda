//! Recording fakes for the embedded-hal traits, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, ErrorKind, Operation, SpiDevice};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusEvent {
    Dc(bool),
    Rst(bool),
    Write(Vec<u8>),
    DelayMs(u32),
}

/// Ordered record of everything the fakes saw.
#[derive(Clone, Default)]
pub struct BusLog(Rc<RefCell<Vec<BusEvent>>>);

impl BusLog {
    fn push(&self, e: BusEvent) {
        self.0.borrow_mut().push(e);
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.0.borrow().clone()
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                BusEvent::Write(b) => Some(b.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(opcode, parameter bytes)` pairs, rebuilt from the D/C level at each write.
    pub fn commands(&self) -> Vec<(u8, Vec<u8>)> {
        let mut out: Vec<(u8, Vec<u8>)> = Vec::new();
        let mut dc_high = false;
        for e in self.0.borrow().iter() {
            match e {
                BusEvent::Dc(level) => dc_high = *level,
                BusEvent::Write(bytes) if !dc_high => {
                    for b in bytes {
                        out.push((*b, Vec::new()));
                    }
                }
                BusEvent::Write(bytes) => {
                    if let Some(last) = out.last_mut() {
                        last.1.extend_from_slice(bytes);
                    }
                }
                _ => {}
            }
        }
        out
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl spi::Error for BusFault {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct MockSpi {
    log: BusLog,
    writes_left: Option<usize>,
}

impl MockSpi {
    pub fn new(log: &BusLog) -> Self {
        Self {
            log: log.clone(),
            writes_left: None,
        }
    }

    /// Accepts `n` writes, then reports a bus fault on every write.
    pub fn failing_after(log: &BusLog, n: usize) -> Self {
        Self {
            log: log.clone(),
            writes_left: Some(n),
        }
    }
}

impl spi::ErrorType for MockSpi {
    type Error = BusFault;
}

impl SpiDevice for MockSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        for op in operations {
            if let Operation::Write(buf) = op {
                match self.writes_left.as_mut() {
                    Some(0) => return Err(BusFault),
                    Some(n) => *n -= 1,
                    None => {}
                }
                self.log.push(BusEvent::Write(buf.to_vec()));
            }
        }
        Ok(())
    }
}

enum PinRole {
    Dc,
    Rst,
}

pub struct MockPin {
    log: BusLog,
    role: PinRole,
}

impl MockPin {
    pub fn dc(log: &BusLog) -> Self {
        Self {
            log: log.clone(),
            role: PinRole::Dc,
        }
    }

    pub fn rst(log: &BusLog) -> Self {
        Self {
            log: log.clone(),
            role: PinRole::Rst,
        }
    }

    fn record(&self, level: bool) {
        self.log.push(match self.role {
            PinRole::Dc => BusEvent::Dc(level),
            PinRole::Rst => BusEvent::Rst(level),
        });
    }
}

impl digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true);
        Ok(())
    }
}

pub struct MockDelay {
    log: BusLog,
}

impl MockDelay {
    pub fn new(log: &BusLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(BusEvent::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(BusEvent::DelayMs(ms));
    }
}

/// Button input; `true` in the shared cell means the line is held low.
pub struct MockButton {
    pressed: Rc<Cell<bool>>,
}

impl MockButton {
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let pressed = Rc::new(Cell::new(false));
        (
            Self {
                pressed: pressed.clone(),
            },
            pressed,
        )
    }
}

impl digital::ErrorType for MockButton {
    type Error = Infallible;
}

impl InputPin for MockButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.pressed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pressed.get())
    }
}
