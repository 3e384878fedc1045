//! The bus boundary: notifications from the slave peripheral and the transports that carry the
//! report to the master half.
//!
//! Two peripheral styles are supported. [`SlaveTransport`] fits interrupt driven HALs where a
//! transmit is armed and completion arrives later as a [`BusEvent`]; drive it with
//! [`Publisher::handle`] directly, or through [`SharedHalf`] when notifications may be delivered
//! concurrently. [`SlaveBus`] fits async drivers that wait for the master and answer in one call;
//! drive it with [`serve`].

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::{
    clock::Clock, debounce::ScanOutcome, debug, publisher::Publisher, sampler::KeySampler, warn,
    KeyboardState, Loggable,
};

/// Largest master write we keep. Anything longer is truncated by the transport.
pub const INBOUND_LEN: usize = 8;

/// Notifications that cause the report to be refreshed and re-armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    /// Seed the first report before any bus traffic.
    Startup,
    /// The master finished reading the previous report.
    TransmitComplete,
    /// The master wrote to us. Not used in normal operation.
    ReceiveComplete,
    /// The peripheral reported a fault; whatever was in flight is gone.
    Error,
}

/// Interrupt driven slave peripheral.
pub trait SlaveTransport {
    type Error: Loggable;

    /// Queue `report` to be sent on the next master read. Completion is signalled later as
    /// [`BusEvent::TransmitComplete`] or [`BusEvent::Error`].
    fn transmit(&mut self, report: &[u8]) -> Result<(), Self::Error>;

    /// Listen for a master write into `inbound`. Completion is signalled later as
    /// [`BusEvent::ReceiveComplete`] or [`BusEvent::Error`].
    fn receive(&mut self, inbound: &mut [u8]) -> Result<(), Self::Error>;

    /// Drop the transfer in flight, if any.
    fn abort(&mut self) {}
}

impl<T: SlaveTransport + ?Sized> SlaveTransport for &mut T {
    type Error = T::Error;

    fn transmit(&mut self, report: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit(report)
    }

    fn receive(&mut self, inbound: &mut [u8]) -> Result<(), Self::Error> {
        (**self).receive(inbound)
    }

    fn abort(&mut self) {
        (**self).abort()
    }
}

/// How a master transaction on a [`SlaveBus`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transfer {
    /// The master read the report.
    Transmitted,
    /// The master wrote this many bytes.
    Received(usize),
}

/// Async slave peripheral.
#[allow(async_fn_in_trait)]
pub trait SlaveBus {
    type Error: Loggable;

    /// Wait for the master to address us. A read is answered with `report`; a write is stored in
    /// `inbound`.
    async fn exchange(&mut self, report: &[u8], inbound: &mut [u8])
        -> Result<Transfer, Self::Error>;
}

/// Serve one master transaction and refresh the report for the next one.
pub async fn serve_once<S, C, Bus, const N: usize, const B: usize>(
    publisher: &mut Publisher<S, C, N, B>,
    bus: &mut Bus,
    inbound: &mut [u8],
) -> BusEvent
where
    S: KeySampler<N>,
    C: Clock,
    Bus: SlaveBus,
{
    let event = match bus.exchange(publisher.report().as_bytes(), inbound).await {
        Ok(Transfer::Transmitted) => BusEvent::TransmitComplete,
        Ok(Transfer::Received(n)) => {
            debug!("ignoring {} inbound bytes", n);
            BusEvent::ReceiveComplete
        }
        Err(e) => {
            warn!("bus error: {:?}", e);
            BusEvent::Error
        }
    };
    publisher.on_event(event);
    event
}

/// Seed the report and answer the master forever.
pub async fn serve<S, C, Bus, const N: usize, const B: usize>(
    publisher: &mut Publisher<S, C, N, B>,
    bus: &mut Bus,
) -> !
where
    S: KeySampler<N>,
    C: Clock,
    Bus: SlaveBus,
{
    publisher.on_event(BusEvent::Startup);
    let mut inbound = [0; INBOUND_LEN];
    loop {
        serve_once(publisher, bus, &mut inbound).await;
    }
}

/// A publisher and its transport behind one lock, for platforms that may deliver bus
/// notifications concurrently. The debounce table and the bitmap are only ever touched together.
pub struct SharedHalf<M: RawMutex, S, C, T, const N: usize, const B: usize> {
    inner: Mutex<M, RefCell<(Publisher<S, C, N, B>, T)>>,
}

impl<M, S, C, T, const N: usize, const B: usize> SharedHalf<M, S, C, T, N, B>
where
    M: RawMutex,
    S: KeySampler<N>,
    C: Clock,
    T: SlaveTransport,
{
    pub fn new(publisher: Publisher<S, C, N, B>, transport: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new((publisher, transport))),
        }
    }

    /// Handle a notification: refresh and arm the next transmit as one unit.
    pub fn notify(&self, event: BusEvent) -> Result<ScanOutcome, T::Error> {
        self.with(|publisher, transport| publisher.handle(event, transport))
    }

    /// Arm a listen on the shared transport, e.g. after an error left the peripheral idle.
    pub fn receive(&self, inbound: &mut [u8]) -> Result<(), T::Error> {
        self.with(|_, transport| {
            transport
                .receive(inbound)
                .inspect_err(|e| warn!("unable to arm receive: {:?}", e))
        })
    }

    /// Copy of the last published report.
    pub fn report(&self) -> KeyboardState<B> {
        self.with(|publisher, _| *publisher.report())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Publisher<S, C, N, B>, &mut T) -> R) -> R {
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let (publisher, transport) = &mut *guard;
            f(publisher, transport)
        })
    }
}

#[cfg(test)]
#[path = "bus_test.rs"]
mod test;
