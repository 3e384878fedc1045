#![no_std]

#[cfg(feature = "rp")]
pub mod rp;

#[cfg(feature = "defmt")]
use defmt_rtt as _;

pub use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
pub use splitkey_firmware::*;
pub use static_cell::StaticCell;
