//! Build time defaults and the runtime scan configuration.

use crate::debounce::Rollover;

/// Keys on the reference right half.
pub const NUM_KEYS: usize = 24;
/// Bytes in the reference report.
pub const REPORT_LEN: usize = splitkey_common::report_len(NUM_KEYS);
/// Lockout window after an accepted transition.
pub const DEBOUNCE_MS: u32 = 10;
/// Simultaneous presses a report carries by default (6KRO).
pub const ROLLOVER_KEYS: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    pub debounce_ms: u32,
    pub rollover: Rollover,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanConfig {
    /// [`DEBOUNCE_MS`] lockout with [`ROLLOVER_KEYS`] key rollover; every key stays debounced
    /// even when the report is full.
    pub const fn new() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            rollover: Rollover::Truncate(ROLLOVER_KEYS),
        }
    }

    pub const fn debounce_ms(mut self, value: u32) -> Self {
        self.debounce_ms = value;
        self
    }

    pub const fn rollover(mut self, value: Rollover) -> Self {
        self.rollover = value;
        self
    }
}
