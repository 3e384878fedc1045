//! Key sampling collaborators.
//!
//! Switches are wired between the input pin and ground with a pull-up, so an idle key reads
//! [`Level::High`] and a closed key reads [`Level::Low`]. How keys map onto pins or ports is board
//! data and is supplied when the sampler is built.

use embedded_hal::digital::InputPin;

/// Instantaneous electrical level of a key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    pub const PRESSED: Level = Level::Low;
    pub const RELEASED: Level = Level::High;

    pub fn is_pressed(self) -> bool {
        self == Self::PRESSED
    }
}

/// Something that can read every key in one go.
pub trait KeySampler<const N: usize> {
    /// Fill `levels` with the current level of each key, indexed by key number.
    fn sample(&mut self, levels: &mut [Level; N]);
}

impl<T: KeySampler<N> + ?Sized, const N: usize> KeySampler<N> for &mut T {
    fn sample(&mut self, levels: &mut [Level; N]) {
        (**self).sample(levels)
    }
}

/// One `embedded-hal` input pin per key.
pub struct PinSampler<I: InputPin, const N: usize> {
    pins: [I; N],
}

impl<I: InputPin, const N: usize> PinSampler<I, N> {
    pub fn new(pins: [I; N]) -> Self {
        Self { pins }
    }
}

impl<I: InputPin, const N: usize> KeySampler<N> for PinSampler<I, N> {
    fn sample(&mut self, levels: &mut [Level; N]) {
        for (pin, level) in self.pins.iter_mut().zip(levels.iter_mut()) {
            // a pin that cannot be read counts as released
            *level = if pin.is_low().unwrap_or(false) {
                Level::Low
            } else {
                Level::High
            };
        }
    }
}

/// Where a key lives: the GPIO port and the bit mask within that port's input register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPin {
    pub port: u8,
    pub mask: u32,
}

impl KeyPin {
    /// `bit` is the line number within the port and must be below 32.
    pub const fn new(port: u8, bit: u8) -> Self {
        assert!(bit < 32, "port bit out of range");
        Self {
            port,
            mask: 1 << bit,
        }
    }
}

/// Raw access to GPIO input registers.
pub trait PortRead {
    fn read_port(&mut self, port: u8) -> u32;
}

impl<T: PortRead + ?Sized> PortRead for &mut T {
    fn read_port(&mut self, port: u8) -> u32 {
        (**self).read_port(port)
    }
}

/// Ports below this index are read at most once per scan.
pub const MAX_CACHED_PORTS: usize = 8;

/// Samples keys by snapshotting whole input registers.
///
/// Each port referenced by the key map is read once per [`KeySampler::sample`] call and every key
/// on that port is tested against the same snapshot, so keys sharing a port are sampled at the
/// same instant.
pub struct PortSampler<P: PortRead, const N: usize> {
    ports: P,
    map: [KeyPin; N],
}

impl<P: PortRead, const N: usize> PortSampler<P, N> {
    pub const fn new(ports: P, map: [KeyPin; N]) -> Self {
        Self { ports, map }
    }

    pub fn map(&self) -> &[KeyPin; N] {
        &self.map
    }
}

impl<P: PortRead, const N: usize> KeySampler<N> for PortSampler<P, N> {
    fn sample(&mut self, levels: &mut [Level; N]) {
        let Self { ports, map } = self;
        let mut snapshot = [None::<u32>; MAX_CACHED_PORTS];

        for (pin, level) in map.iter().zip(levels.iter_mut()) {
            let bits = match snapshot.get_mut(pin.port as usize) {
                Some(cached) => *cached.get_or_insert_with(|| ports.read_port(pin.port)),
                None => ports.read_port(pin.port),
            };
            *level = if bits & pin.mask != 0 {
                Level::High
            } else {
                Level::Low
            };
        }
    }
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod test;
