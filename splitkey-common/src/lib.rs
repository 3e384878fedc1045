#![no_std]
//! Wire protocol spoken between the two halves of a splitkey keyboard.
//!
//! The peripheral half is an I2C slave at [`SLAVE_ADDRESS`]. Whenever the master half reads it
//! gets exactly [`report_len`]`(N)` bytes: one bit per key, key `i` in byte `i / 8`, bit `i % 8`
//! (least significant bit first). A set bit means released, a cleared bit means pressed. There is
//! no framing, checksum or version; both sides agree on the key count at build time.

pub mod report;

pub use report::{KeyChange, KeyboardState};

/// 7-bit I2C address the peripheral half answers on.
pub const SLAVE_ADDRESS: u8 = 0x42;

/// Number of payload bytes needed to carry `keys` key bits.
///
/// ```
/// assert_eq!(splitkey_common::report_len(24), 3);
/// assert_eq!(splitkey_common::report_len(17), 3);
/// assert_eq!(splitkey_common::report_len(8), 1);
/// ```
pub const fn report_len(keys: usize) -> usize {
    keys.div_ceil(8)
}
