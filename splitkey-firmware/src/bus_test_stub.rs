extern crate std;

use std::collections::VecDeque;
use std::vec::Vec;

use crate::bus::{SlaveBus, SlaveTransport, Transfer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusFault;

/// Interrupt style transport that records every armed report.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub sent: Vec<Vec<u8>>,
    pub aborts: usize,
    /// Number of listens armed.
    pub receives: usize,
    /// Byte written into the inbound buffer by each `receive`.
    pub write_byte: u8,
    /// Fail the next `transmit` or `receive`.
    pub fail_next: bool,
}

impl RecordingTransport {
    pub fn last(&self) -> Option<&[u8]> {
        self.sent.last().map(Vec::as_slice)
    }
}

impl SlaveTransport for RecordingTransport {
    type Error = BusFault;

    fn transmit(&mut self, report: &[u8]) -> Result<(), Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(BusFault);
        }
        self.sent.push(report.to_vec());
        Ok(())
    }

    fn receive(&mut self, inbound: &mut [u8]) -> Result<(), Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(BusFault);
        }
        inbound.fill(self.write_byte);
        self.receives += 1;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborts += 1;
    }
}

/// Async bus that plays back a fixed list of master transactions, then waits forever.
pub struct ScriptedBus {
    script: VecDeque<Result<Transfer, BusFault>>,
    /// Report offered to the master on each exchange.
    pub served: Vec<Vec<u8>>,
    /// Byte the master writes on a [`Transfer::Received`].
    pub write_byte: u8,
}

impl ScriptedBus {
    pub fn new(script: impl IntoIterator<Item = Result<Transfer, BusFault>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            served: Vec::new(),
            write_byte: 0xa5,
        }
    }
}

impl SlaveBus for ScriptedBus {
    type Error = BusFault;

    async fn exchange(
        &mut self,
        report: &[u8],
        inbound: &mut [u8],
    ) -> Result<Transfer, Self::Error> {
        self.served.push(report.to_vec());
        match self.script.pop_front() {
            Some(Ok(Transfer::Received(n))) => {
                let n = n.min(inbound.len());
                inbound[..n].fill(self.write_byte);
                Ok(Transfer::Received(n))
            }
            Some(result) => result,
            None => core::future::pending().await,
        }
    }
}
