extern crate std;

use core::cell::Cell;
use std::rc::Rc;

use crate::clock::{Clock, Millis};

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u32>>);

impl ManualClock {
    pub fn set(&self, ms: u32) {
        self.0.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.0.set(self.0.get().wrapping_add(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        Millis(self.0.get())
    }
}
