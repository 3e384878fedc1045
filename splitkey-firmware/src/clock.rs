//! Millisecond clock collaborator.

use embassy_time::Instant;

/// Reading of a free running millisecond counter. The counter wraps at `u32::MAX`, so only
/// differences between two readings are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Millis(pub u32);

impl Millis {
    pub const fn wrapping_add(self, ms: u32) -> Self {
        Self(self.0.wrapping_add(ms))
    }

    /// Milliseconds left from `self` until `deadline`. Zero once the deadline is reached; a passed
    /// deadline yields a value close to `u32::MAX`.
    pub const fn until(self, deadline: Millis) -> u32 {
        deadline.0.wrapping_sub(self.0)
    }
}

pub trait Clock {
    fn now(&self) -> Millis;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Millis {
        (**self).now()
    }
}

/// Clock backed by the embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        Millis(Instant::now().as_millis() as u32)
    }
}

#[cfg(test)]
#[path = "clock_test.rs"]
mod test;
