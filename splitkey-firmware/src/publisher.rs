use crate::{
    bus::{BusEvent, SlaveTransport},
    clock::Clock,
    config::ScanConfig,
    debounce::{Debouncer, Rollover, ScanOutcome},
    debug, info,
    sampler::{KeySampler, Level},
    warn, KeyboardState,
};

/// Owns the debounce table and the report bitmap for `N` keys packed into `B` bytes.
///
/// All access goes through `&mut self`, so the bitmap handed to the bus is always the product of
/// one complete scan.
pub struct Publisher<S, C, const N: usize, const B: usize> {
    sampler: S,
    clock: C,
    debouncer: Debouncer<N>,
    rollover: Rollover,
    samples: [Level; N],
    state: KeyboardState<B>,
    last_outcome: ScanOutcome,
}

impl<S: KeySampler<N>, C: Clock, const N: usize, const B: usize> Publisher<S, C, N, B> {
    const REPORT_FITS: () = assert!(
        B == splitkey_common::report_len(N),
        "report must be exactly ceil(keys / 8) bytes"
    );

    pub fn new(sampler: S, clock: C, config: &ScanConfig) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::REPORT_FITS;

        Self {
            sampler,
            clock,
            debouncer: Debouncer::new(config.debounce_ms),
            rollover: config.rollover,
            samples: [Level::RELEASED; N],
            state: KeyboardState::all_released(),
            last_outcome: ScanOutcome::default(),
        }
    }

    /// The bitmap produced by the last [`Self::refresh`].
    pub fn report(&self) -> &KeyboardState<B> {
        &self.state
    }

    pub fn last_outcome(&self) -> ScanOutcome {
        self.last_outcome
    }

    pub fn debouncer(&self) -> &Debouncer<N> {
        &self.debouncer
    }

    /// Sample every key, debounce and rebuild the bitmap from scratch.
    pub fn refresh(&mut self) -> ScanOutcome {
        let Self {
            sampler,
            clock,
            debouncer,
            rollover,
            samples,
            state,
            last_outcome,
        } = self;

        sampler.sample(samples);
        let now = clock.now();

        state.release_all();
        let outcome = debouncer.scan(now, samples, *rollover, |key| {
            state.set_pressed(key);
        });

        if outcome.is_truncated() {
            debug!(
                "rollover cap reached: {} reported, {} suppressed, {} of {} scanned",
                outcome.reported,
                outcome.suppressed,
                outcome.scanned,
                N
            );
        }

        *last_outcome = outcome;
        outcome
    }

    /// React to a bus notification by refreshing the report.
    pub fn on_event(&mut self, event: BusEvent) -> ScanOutcome {
        match event {
            BusEvent::Startup => info!("seeding first report"),
            BusEvent::TransmitComplete => debug!("report read; refreshing"),
            BusEvent::ReceiveComplete => debug!("master wrote to us; refreshing"),
            BusEvent::Error => warn!("bus error; re-arming with a fresh scan"),
        }
        self.refresh()
    }

    /// Interrupt handler entry point: refresh then arm the next transmission on `transport`.
    ///
    /// On [`BusEvent::Error`] the transfer in flight is aborted first. An arming failure is
    /// returned; the next error notification gets another go.
    pub fn handle<T: SlaveTransport>(
        &mut self,
        event: BusEvent,
        transport: &mut T,
    ) -> Result<ScanOutcome, T::Error> {
        if event == BusEvent::Error {
            transport.abort();
        }
        let outcome = self.on_event(event);
        transport
            .transmit(self.state.as_bytes())
            .inspect_err(|e| warn!("unable to arm transmit: {:?}", e))?;
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "publisher_test.rs"]
mod test;
