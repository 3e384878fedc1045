extern crate std;

use core::cell::{Cell, RefCell};
use embedded_hal::digital::{Error, ErrorKind, ErrorType, InputPin};
use std::rc::Rc;

use crate::sampler::{KeySampler, Level, PortRead};

#[derive(Debug)]
pub struct TestError;

impl Error for TestError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

#[derive(Default)]
struct PinShared {
    closed: Cell<bool>,
    faulty: Cell<bool>,
}

/// Pulled up input with a switch to ground. Clones share the same switch.
#[derive(Clone, Default)]
pub struct Pin(Rc<PinShared>);

impl core::fmt::Debug for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pin")
            .field("closed", &self.0.closed.get())
            .field("faulty", &self.0.faulty.get())
            .finish()
    }
}

impl Pin {
    pub fn close(&self) {
        self.0.closed.set(true);
    }

    pub fn open(&self) {
        self.0.closed.set(false);
    }

    /// Make reads fail.
    pub fn set_faulty(&self, faulty: bool) {
        self.0.faulty.set(faulty);
    }
}

impl ErrorType for Pin {
    type Error = TestError;
}

impl InputPin for Pin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.0.faulty.get() {
            return Err(TestError);
        }
        Ok(!self.0.closed.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        if self.0.faulty.get() {
            return Err(TestError);
        }
        Ok(self.0.closed.get())
    }
}

/// A bank of `N` key switches, each on its own [`Pin`]. Clones share the same switches.
#[derive(Clone)]
pub struct KeySwitches<const N: usize> {
    pins: [Pin; N],
}

impl<const N: usize> Default for KeySwitches<N> {
    fn default() -> Self {
        Self {
            pins: core::array::from_fn(|_| Pin::default()),
        }
    }
}

impl<const N: usize> KeySwitches<N> {
    pub fn down(&self, key: usize) {
        self.pins[key].close();
    }

    pub fn up(&self, key: usize) {
        self.pins[key].open();
    }

    pub fn pins(&self) -> [Pin; N] {
        self.pins.clone()
    }
}

impl<const N: usize> KeySampler<N> for KeySwitches<N> {
    fn sample(&mut self, levels: &mut [Level; N]) {
        for (pin, level) in self.pins.iter().zip(levels.iter_mut()) {
            *level = if pin.0.closed.get() {
                Level::Low
            } else {
                Level::High
            };
        }
    }
}

/// GPIO input registers with every pin pulled up. Clones share the same registers.
#[derive(Clone)]
pub struct PortBank<const P: usize> {
    inner: Rc<RefCell<PortBankInner<P>>>,
}

struct PortBankInner<const P: usize> {
    input: [u32; P],
    reads: [usize; P],
}

impl<const P: usize> Default for PortBank<P> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(PortBankInner {
                input: [u32::MAX; P],
                reads: [0; P],
            })),
        }
    }
}

impl<const P: usize> PortBank<P> {
    pub fn down(&self, port: u8, bit: u8) {
        self.inner.borrow_mut().input[port as usize] &= !(1 << bit);
    }

    pub fn up(&self, port: u8, bit: u8) {
        self.inner.borrow_mut().input[port as usize] |= 1 << bit;
    }

    /// How many times `port` has been read.
    pub fn reads(&self, port: u8) -> usize {
        self.inner.borrow().reads[port as usize]
    }
}

impl<const P: usize> PortRead for PortBank<P> {
    fn read_port(&mut self, port: u8) -> u32 {
        let mut inner = self.inner.borrow_mut();
        inner.reads[port as usize] += 1;
        inner.input[port as usize]
    }
}
