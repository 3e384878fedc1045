/// Packed key bitmap exchanged over the bus. `B` is the payload length in bytes.
///
/// Bits beyond the real key count are don't-care for the reader but are kept at 1 ("released") by
/// [`KeyboardState::release_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardState<const B: usize> {
    bytes: [u8; B],
}

impl<const B: usize> Default for KeyboardState<B> {
    fn default() -> Self {
        Self::all_released()
    }
}

impl<const B: usize> KeyboardState<B> {
    /// Number of key positions the bitmap can address.
    pub const CAPACITY: usize = B * 8;

    pub const fn all_released() -> Self {
        Self { bytes: [0xff; B] }
    }

    /// Wrap a payload as read off the bus.
    pub const fn from_bytes(bytes: [u8; B]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; B] {
        &self.bytes
    }

    pub fn release_all(&mut self) {
        self.bytes.fill(0xff);
    }

    /// Clear the bit for `key`. Returns true if the key was not already marked pressed.
    pub fn set_pressed(&mut self, key: usize) -> bool {
        let Some(byte) = self.bytes.get_mut(key >> 3) else {
            return false;
        };
        let bp = 1 << (key & 7);
        let old = *byte;
        *byte &= !bp;
        old & bp != 0
    }

    /// Set the bit for `key`. Returns true if the key was marked pressed.
    pub fn set_released(&mut self, key: usize) -> bool {
        let Some(byte) = self.bytes.get_mut(key >> 3) else {
            return false;
        };
        let bp = 1 << (key & 7);
        let old = *byte;
        *byte |= bp;
        old & bp == 0
    }

    /// Is `key` reported pressed? Keys outside the bitmap are never pressed.
    pub fn is_pressed(&self, key: usize) -> bool {
        match self.bytes.get(key >> 3) {
            Some(byte) => byte & (1 << (key & 7)) == 0,
            None => false,
        }
    }

    /// Indexes of all keys reported pressed, in ascending order.
    pub fn pressed_keys(&self) -> impl Iterator<Item = usize> + '_ {
        (0..Self::CAPACITY).filter(|&key| self.is_pressed(key))
    }

    /// Keys whose reported state differs between `previous` and `self`, in ascending order.
    ///
    /// This is what the master half needs to turn two consecutive polls into key events.
    pub fn changes<'a>(&'a self, previous: &'a Self) -> impl Iterator<Item = KeyChange> + 'a {
        self.bytes
            .iter()
            .zip(previous.bytes.iter())
            .enumerate()
            .filter(|(_, (now, was))| now != was)
            .flat_map(|(i, (now, was))| {
                let (now, diff) = (*now, now ^ was);
                (0..8u8)
                    .filter(move |&bit| diff & (1 << bit) != 0)
                    .map(move |bit| KeyChange {
                        key: (i << 3) | bit as usize,
                        pressed: now & (1 << bit) == 0,
                    })
            })
    }
}

/// A key that changed between two reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyChange {
    pub key: usize,
    pub pressed: bool,
}

#[cfg(test)]
#[path = "report_test.rs"]
mod test;
