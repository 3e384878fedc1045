//! Edge triggered lockout debounce.
//!
//! The first edge seen on an idle key is accepted straight away, then the key is muted for the
//! debounce window: any further change inside the window is dropped, not queued. A press is
//! therefore visible with no added latency, at the cost of not telling a very fast double tap
//! apart from contact bounce.

use crate::{clock::Millis, sampler::Level};

/// How many simultaneous presses a single scan may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rollover {
    /// Report every pressed key.
    Unlimited,
    /// Debounce every key but report at most this many presses, in key order. Presses past the
    /// cap are reported released and counted in [`ScanOutcome::suppressed`].
    Truncate(u8),
    /// Stop examining keys once this many presses have been found. Keys after the cap are reported
    /// released and their debounce records are left untouched for that scan.
    EarlyExit(u8),
}

impl Rollover {
    /// The press cap, if any. A cap of zero means no limit.
    pub fn limit(self) -> Option<usize> {
        match self {
            Rollover::Unlimited | Rollover::Truncate(0) | Rollover::EarlyExit(0) => None,
            Rollover::Truncate(k) | Rollover::EarlyExit(k) => Some(k as usize),
        }
    }
}

/// Debounce bookkeeping for a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceRecord {
    debounced_level: Level,
    /// Transitions are ignored until this time. Cleared once it has passed.
    lockout_until: Option<Millis>,
}

impl Default for DebounceRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl DebounceRecord {
    /// Released, not locked out.
    pub const fn new() -> Self {
        Self {
            debounced_level: Level::RELEASED,
            lockout_until: None,
        }
    }

    pub fn level(&self) -> Level {
        self.debounced_level
    }

    pub fn is_pressed(&self) -> bool {
        self.debounced_level.is_pressed()
    }

    pub fn lockout_until(&self) -> Option<Millis> {
        self.lockout_until
    }

    /// Is the key still inside the lockout window that ends at `lockout_until`?
    ///
    /// Compares by wrapping difference, so it stays correct across counter wrap as long as the
    /// window is far shorter than the wrap period.
    pub fn is_locked(&self, now: Millis, window_ms: u32) -> bool {
        match self.lockout_until {
            Some(until) => {
                let left = now.until(until);
                left != 0 && left <= window_ms
            }
            None => false,
        }
    }

    /// Feed one raw sample. Returns true if the debounced level changed.
    fn update(&mut self, raw: Level, now: Millis, window_ms: u32) -> bool {
        if self.lockout_until.is_some() && !self.is_locked(now, window_ms) {
            self.lockout_until = None;
        }
        if raw == self.debounced_level || self.lockout_until.is_some() {
            return false;
        }
        self.debounced_level = raw;
        self.lockout_until = Some(now.wrapping_add(window_ms));
        true
    }
}

/// What a single [`Debouncer::scan`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanOutcome {
    /// Keys whose sample was examined.
    pub scanned: usize,
    /// Pressed keys that were reported.
    pub reported: usize,
    /// Pressed keys that were examined but not reported because the cap was reached.
    pub suppressed: usize,
    /// The scan stopped before the last key.
    pub stopped_early: bool,
}

impl ScanOutcome {
    /// Did the report leave out any key that is, or may be, pressed?
    pub fn is_truncated(&self) -> bool {
        self.suppressed != 0 || self.stopped_early
    }
}

/// Debounce state for `N` independent keys.
pub struct Debouncer<const N: usize> {
    records: [DebounceRecord; N],
    window_ms: u32,
}

impl<const N: usize> Debouncer<N> {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            records: [DebounceRecord::new(); N],
            window_ms,
        }
    }

    pub fn window_ms(&self) -> u32 {
        self.window_ms
    }

    pub fn record(&self, key: usize) -> Option<&DebounceRecord> {
        self.records.get(key)
    }

    pub fn records(&self) -> &[DebounceRecord; N] {
        &self.records
    }

    /// Run every key's sample through its record and call `report_pressed` with the index of each
    /// pressed key that fits under the `rollover` cap, in ascending key order.
    pub fn scan(
        &mut self,
        now: Millis,
        samples: &[Level; N],
        rollover: Rollover,
        mut report_pressed: impl FnMut(usize),
    ) -> ScanOutcome {
        let window_ms = self.window_ms;
        let limit = rollover.limit();
        let early_exit = matches!(rollover, Rollover::EarlyExit(_));
        let mut outcome = ScanOutcome::default();

        for (key, (record, &raw)) in self.records.iter_mut().zip(samples.iter()).enumerate() {
            record.update(raw, now, window_ms);
            outcome.scanned += 1;

            if !record.is_pressed() {
                continue;
            }
            if limit.is_some_and(|k| outcome.reported >= k) {
                outcome.suppressed += 1;
                continue;
            }

            report_pressed(key);
            outcome.reported += 1;

            if early_exit && limit.is_some_and(|k| outcome.reported >= k) {
                outcome.stopped_early = key + 1 < N;
                break;
            }
        }

        outcome
    }
}

#[cfg(test)]
#[path = "debounce_test.rs"]
mod test;
